use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;

use tictactoe::{Mark, Message, MAX_MESSAGE_LEN};
use tracing::{debug, trace};

use crate::error::{PlayerError, PlayerFault};

/// Source of already-established player connections.
pub trait Listener {
    type Stream: Read + Write;

    /// Blocks until the next connection arrives. Also returns the peer address.
    fn accept(&mut self) -> std::io::Result<(Self::Stream, String)>;
}

impl Listener for TcpListener {
    type Stream = std::net::TcpStream;

    fn accept(&mut self) -> std::io::Result<(Self::Stream, String)> {
        let (stream, addr) = TcpListener::accept(self)?;
        Ok((stream, addr.to_string()))
    }
}

pub struct Player<S> {
    /// Only used for diagnostics.
    pub peer: String,
    pub mark: Mark,
    stream: BufReader<S>,
    // A re-usable buffer for reading lines.
    buf: String,
}

impl<S: Read + Write> Player<S> {
    pub fn new(stream: S, peer: impl Into<String>, mark: Mark) -> Self {
        Self {
            peer: peer.into(),
            mark,
            stream: BufReader::new(stream),
            buf: String::new(),
        }
    }

    pub fn send(&mut self, msg: &Message) -> Result<(), PlayerError> {
        trace!(name: "Sending message", peer = &self.peer, message = %msg);
        let stream = self.stream.get_mut();
        writeln!(stream, "{}", msg)?;
        stream.flush()?;
        Ok(())
    }

    /// Blocks until the player has sent one full line, and parses it.
    pub fn receive(&mut self) -> Result<Message, PlayerError> {
        self.buf.clear();
        let num_bytes_read = (&mut self.stream)
            .take(MAX_MESSAGE_LEN as u64)
            .read_line(&mut self.buf)?;
        let Some(line) = self.buf.strip_suffix('\n') else {
            return Err(if num_bytes_read == MAX_MESSAGE_LEN {
                PlayerError::MessageTooLong
            } else {
                // 0 bytes read means EOF, anything else is a line cut short by EOF
                PlayerError::Disconnected
            });
        };
        trace!(name: "Received message", peer = &self.peer, message = line);
        line.parse::<Message>().map_err(|err| PlayerError::Malformed {
            line: String::from(line),
            err,
        })
    }
}

/// Sends the same message to every player, stopping at the first failure.
pub fn broadcast<S: Read + Write>(
    players: &mut [Player<S>],
    msg: &Message,
) -> Result<(), PlayerFault> {
    for (player_idx, player) in players.iter_mut().enumerate() {
        player
            .send(msg)
            .map_err(|err| PlayerFault { player_idx, err })?;
    }
    Ok(())
}

/// Tells every player that the session is over.
///
/// Players that have already gone away are skipped.
pub fn say_bye<S: Read + Write>(players: &mut [Player<S>]) {
    for player in players.iter_mut() {
        if let Err(err) = player.send(&Message::Bye) {
            debug!(peer = &player.peer, %err, "Could not say bye");
        }
    }
}

#[cfg(test)]
mod tests {
    use tictactoe::{Move, ParseMessageError};

    use super::*;
    use crate::testing::ScriptedStream;

    #[test]
    fn reads_one_line_at_a_time() {
        let (stream, _) = ScriptedStream::from_bytes(b"hello, world!\n(0, 2)\nstop\n");
        let mut player = Player::new(stream, "peer", Mark::X);
        assert_eq!(player.receive().unwrap(), Message::Hello);
        assert_eq!(
            player.receive().unwrap(),
            Message::Move(Move::new(0, 2).unwrap())
        );
        assert_eq!(player.receive().unwrap(), Message::Rematch(false));
        assert!(matches!(player.receive(), Err(PlayerError::Disconnected)));
    }

    #[test]
    fn line_cut_short() {
        let (stream, _) = ScriptedStream::from_bytes(b"(0, 2");
        let mut player = Player::new(stream, "peer", Mark::X);
        assert!(matches!(player.receive(), Err(PlayerError::Disconnected)));
    }

    #[test]
    fn overlong_line() {
        let mut bytes = vec![b'a'; 40];
        bytes.push(b'\n');
        let (stream, _) = ScriptedStream::from_bytes(&bytes);
        let mut player = Player::new(stream, "peer", Mark::X);
        assert!(matches!(player.receive(), Err(PlayerError::MessageTooLong)));
    }

    #[test]
    fn invalid_utf8() {
        let (stream, _) = ScriptedStream::from_bytes(b"\xff\xfe\n");
        let mut player = Player::new(stream, "peer", Mark::X);
        assert!(matches!(player.receive(), Err(PlayerError::Io(_))));
    }

    #[test]
    fn malformed_line() {
        let (stream, _) = ScriptedStream::from_bytes(b"(3, 1)\n");
        let mut player = Player::new(stream, "peer", Mark::X);
        match player.receive() {
            Err(PlayerError::Malformed { line, err }) => {
                assert_eq!(line, "(3, 1)");
                assert_eq!(err, ParseMessageError::CoordinateOutOfRange { coordinate: 3 });
            }
            other => panic!("Expected a malformed message, got {:?}", other),
        }
    }

    #[test]
    fn bye_reaches_everyone_still_connected() {
        let (stream_1, transcript_1) = ScriptedStream::new(&[]);
        let (stream_2, transcript_2) = ScriptedStream::new(&[]);
        let mut players = [
            Player::new(stream_1, "peer 1", Mark::X),
            Player::new(stream_2, "peer 2", Mark::O),
        ];
        say_bye(&mut players);
        assert_eq!(transcript_1.lines(), ["bye"]);
        assert_eq!(transcript_2.lines(), ["bye"]);
    }
}
