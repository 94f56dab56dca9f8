use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};

use tictactoe::{Board, Mark, Message, Move, Outcome};
use tracing::trace;

/// A trait to simplify writing players.
pub trait Bot {
    /// Called at the start of every game, including rematches.
    fn new_game(&mut self, mark: Mark);
    /// Called when the referee asks for a move. The board has at least one empty cell.
    fn play_move(&mut self, board: &Board) -> anyhow::Result<Move>;
    /// Called whenever a move of either player was accepted by the referee.
    fn move_placed(&mut self, _mark: Mark, _mv: Move, _board: &Board) {}
    /// Called when a game is over. Returning `true` requests a rematch.
    fn game_over(&mut self, outcome: Outcome, board: &Board) -> anyhow::Result<bool>;

    /// Connects to a referee and plays until the referee or the bot ends the session.
    fn run<A: ToSocketAddrs>(&mut self, addr: A) -> anyhow::Result<()> {
        let stream = TcpStream::connect(addr)?;
        self.play(stream)
    }

    /// Plays over an established connection.
    fn play<S: Read + Write>(&mut self, stream: S) -> anyhow::Result<()> {
        let mut stream = BufReader::new(stream);
        let mut buf = String::new();

        send(stream.get_mut(), &Message::Hello)?;
        let my_mark = match receive(&mut stream, &mut buf)? {
            Some(Message::Mark(mark)) => mark,
            Some(Message::Bye) | None => return Ok(()),
            Some(msg) => anyhow::bail!("Expected a mark, but the referee sent '{}'", msg),
        };
        self.new_game(my_mark);

        let mut board = Board::new();
        loop {
            let Some(msg) = receive(&mut stream, &mut buf)? else {
                // 0 bytes read means EOF - the referee has gone away.
                break Ok(());
            };
            match msg {
                Message::MovePrompt => {
                    let mv = self.play_move(&board)?;
                    send(stream.get_mut(), &Message::Move(mv))?;
                }
                Message::Placed { mark, mv } => {
                    board.place(mark, mv)?;
                    self.move_placed(mark, mv, &board);
                }
                Message::Outcome(outcome) => {
                    let again = self.game_over(outcome, &board)?;
                    send(stream.get_mut(), &Message::Rematch(again))?;
                    if !again {
                        break Ok(());
                    }
                    board = Board::new();
                    self.new_game(my_mark);
                }
                Message::Bye => break Ok(()),
                msg => anyhow::bail!("Unexpected message from the referee: '{}'", msg),
            }
        }
    }
}

fn send<W: Write>(writer: &mut W, msg: &Message) -> anyhow::Result<()> {
    trace!(name: "Sending message", message = %msg);
    writeln!(writer, "{}", msg)?;
    writer.flush()?;
    Ok(())
}

/// Returns `None` on EOF.
fn receive<R: BufRead>(reader: &mut R, buf: &mut String) -> anyhow::Result<Option<Message>> {
    buf.clear(); // because read_line() appends to the buffer
    if reader.read_line(buf)? == 0 {
        return Ok(None);
    }
    let line = buf.trim_end_matches('\n');
    trace!(name: "Received message", message = line);
    Ok(Some(line.parse::<Message>()?))
}
