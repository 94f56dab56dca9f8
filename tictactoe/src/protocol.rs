use std::str::FromStr;

use crate::{Mark, Move};

/// The opening message every client sends after connecting.
pub const HANDSHAKE: &str = "hello, world!";

/// Upper bound for the length of a single line on the wire, including the newline.
pub const MAX_MESSAGE_LEN: usize = 32;

/// How a game ended, from the point of view of the recipient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

/// A single line of the protocol, without its trailing newline.
///
/// The [`Display`](std::fmt::Display) instance produces the exact wire text
/// and the [`FromStr`] instance only accepts the exact wire text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    /// Client → server: `hello, world!`
    Hello,
    /// Server → client: the mark assigned to the client, `x` or `o`.
    Mark(Mark),
    /// Server → client: `move`, it is the client's turn.
    MovePrompt,
    /// Client → server: the cell to play, e.g. `(0, 1)`.
    Move(Move),
    /// Server → both clients: a move was accepted, e.g. `x(1, 2)`.
    ///
    /// Both clients receive the moves of both players, including their own.
    Placed { mark: Mark, mv: Move },
    /// Server → client: `win`, `lose` or `tie`.
    Outcome(Outcome),
    /// Client → server: `continue` to request a rematch, `stop` to decline.
    Rematch(bool),
    /// Server → both clients: the session is over.
    Bye,
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::Hello => write!(f, "{}", HANDSHAKE),
            Message::Mark(mark) => write!(f, "{}", mark),
            Message::MovePrompt => write!(f, "move"),
            Message::Move(mv) => write!(f, "{}", mv),
            Message::Placed { mark, mv } => write!(f, "{}{}", mark, mv),
            Message::Outcome(Outcome::Win) => write!(f, "win"),
            Message::Outcome(Outcome::Lose) => write!(f, "lose"),
            Message::Outcome(Outcome::Tie) => write!(f, "tie"),
            Message::Rematch(true) => write!(f, "continue"),
            Message::Rematch(false) => write!(f, "stop"),
            Message::Bye => write!(f, "bye"),
        }
    }
}

/// The error type for the [`FromStr`] instance of [`Message`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseMessageError {
    Empty,
    Unrecognized,
    MalformedCoordinates,
    CoordinateOutOfRange { coordinate: u8 },
}

impl std::error::Error for ParseMessageError {}

impl std::fmt::Display for ParseMessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseMessageError::Empty => write!(f, "Empty message"),
            ParseMessageError::Unrecognized => write!(f, "Not a message of the protocol"),
            ParseMessageError::MalformedCoordinates => {
                write!(f, "Coordinates must have the form '(X, Y)'")
            }
            ParseMessageError::CoordinateOutOfRange { coordinate } => {
                write!(f, "Coordinate {} is not in the range 0 to 2", coordinate)
            }
        }
    }
}

impl FromStr for Message {
    type Err = ParseMessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let msg = match s {
            "" => return Err(ParseMessageError::Empty),
            HANDSHAKE => Message::Hello,
            "x" => Message::Mark(Mark::X),
            "o" => Message::Mark(Mark::O),
            "move" => Message::MovePrompt,
            "win" => Message::Outcome(Outcome::Win),
            "lose" => Message::Outcome(Outcome::Lose),
            "tie" => Message::Outcome(Outcome::Tie),
            "continue" => Message::Rematch(true),
            "stop" => Message::Rematch(false),
            "bye" => Message::Bye,
            _ => {
                if s.starts_with('(') {
                    return parse_coordinates(s).map(Message::Move);
                }
                for mark in [Mark::X, Mark::O] {
                    if let Some(coords) = s.strip_prefix(mark.as_char()) {
                        if coords.starts_with('(') {
                            return parse_coordinates(coords).map(|mv| Message::Placed { mark, mv });
                        }
                    }
                }
                return Err(ParseMessageError::Unrecognized);
            }
        };
        Ok(msg)
    }
}

/// Parses exactly `(X, Y)` where both are single digits between 0 and 2.
fn parse_coordinates(s: &str) -> Result<Move, ParseMessageError> {
    let &[b'(', x, b',', b' ', y, b')'] = s.as_bytes() else {
        return Err(ParseMessageError::MalformedCoordinates);
    };
    Move::new(parse_coordinate(x)?, parse_coordinate(y)?)
        .ok_or(ParseMessageError::MalformedCoordinates)
}

fn parse_coordinate(byte: u8) -> Result<u8, ParseMessageError> {
    if !byte.is_ascii_digit() {
        return Err(ParseMessageError::MalformedCoordinates);
    }
    let coordinate = byte - b'0';
    if Move::new(coordinate, 0).is_none() {
        return Err(ParseMessageError::CoordinateOutOfRange { coordinate });
    }
    Ok(coordinate)
}
