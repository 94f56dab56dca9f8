//! In-memory stand-ins for player connections.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::rc::Rc;

use crate::Listener;

/// The moves a scripted player makes in one round, and its answer to the rematch question.
pub type Round = (&'static [&'static str], &'static str);

/// Everything the referee wrote to one [`ScriptedStream`].
#[derive(Clone, Default)]
pub struct Transcript(Rc<RefCell<Vec<u8>>>);

impl Transcript {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.borrow().clone())
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }
}

/// A connection that plays the client side from a script.
///
/// Once it has nothing more to say, reads return 0 bytes, i.e. the peer hung up.
#[derive(Default)]
pub struct ScriptedStream {
    input: VecDeque<u8>,
    output: Transcript,
    num_bytes_processed: usize,
    // Only consulted when the referee asks for a move or announces a result
    rounds: VecDeque<Round>,
    move_idx: usize,
}

impl ScriptedStream {
    /// A stream that delivers every given line up front, regardless of what it receives.
    pub fn new(lines: &[&str]) -> (Self, Transcript) {
        let mut bytes = Vec::new();
        for line in lines {
            bytes.extend_from_slice(line.as_bytes());
            bytes.push(b'\n');
        }
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> (Self, Transcript) {
        let stream = Self {
            input: bytes.iter().copied().collect(),
            ..Self::default()
        };
        let transcript = stream.output.clone();
        (stream, transcript)
    }

    /// A stream that performs the handshake, then answers every `move` with
    /// the next move of the current round and every result with that round's
    /// rematch answer.
    pub fn player(rounds: &[Round]) -> (Self, Transcript) {
        let (mut stream, transcript) = Self::new(&["hello, world!"]);
        stream.rounds = rounds.iter().copied().collect();
        (stream, transcript)
    }

    fn react_to_output(&mut self) {
        let mut replies = Vec::new();
        {
            let output = self.output.0.borrow();
            while let Some(len) = output[self.num_bytes_processed..]
                .iter()
                .position(|&b| b == b'\n')
            {
                let line = &output[self.num_bytes_processed..self.num_bytes_processed + len];
                self.num_bytes_processed += len + 1;
                match line {
                    b"move" => {
                        let next_move = self
                            .rounds
                            .front()
                            .and_then(|(moves, _)| moves.get(self.move_idx))
                            .copied();
                        if let Some(mv) = next_move {
                            replies.push(mv);
                            self.move_idx += 1;
                        }
                    }
                    b"win" | b"lose" | b"tie" => {
                        if let Some((_, answer)) = self.rounds.pop_front() {
                            replies.push(answer);
                            self.move_idx = 0;
                        }
                    }
                    _ => {}
                }
            }
        }
        for reply in replies {
            self.input.extend(reply.as_bytes());
            self.input.push_back(b'\n');
        }
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.output.0.borrow_mut().extend_from_slice(buf);
        self.react_to_output();
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Hands out the queued streams in order, then fails.
#[derive(Default)]
pub struct ScriptedListener {
    pending: VecDeque<ScriptedStream>,
    num_accepted: usize,
}

impl ScriptedListener {
    /// Queues a connection that will send the given lines.
    pub fn connect(&mut self, lines: &[&str]) -> Transcript {
        let (stream, transcript) = ScriptedStream::new(lines);
        self.pending.push_back(stream);
        transcript
    }

    /// Queues a connection that plays the given rounds, see [`ScriptedStream::player()`].
    pub fn connect_player(&mut self, rounds: &[Round]) -> Transcript {
        let (stream, transcript) = ScriptedStream::player(rounds);
        self.pending.push_back(stream);
        transcript
    }
}

impl Listener for ScriptedListener {
    type Stream = ScriptedStream;

    fn accept(&mut self) -> std::io::Result<(Self::Stream, String)> {
        let stream = self.pending.pop_front().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::WouldBlock, "No more connections")
        })?;
        self.num_accepted += 1;
        Ok((stream, format!("127.0.0.1:{}", 50000 + self.num_accepted)))
    }
}
