use tictactoe::{IllegalMove, Message, ParseMessageError};

/// Everything that makes a player unfit to continue a match.
#[derive(Debug)]
pub enum PlayerError {
    /// The stream was closed, possibly in the middle of a line.
    Disconnected,
    /// No newline within [`MAX_MESSAGE_LEN`](tictactoe::MAX_MESSAGE_LEN) bytes.
    MessageTooLong,
    Io(std::io::Error),
    Malformed {
        line: String,
        err: ParseMessageError,
    },
    Unexpected {
        expected: &'static str,
        received: Message,
    },
    IllegalMove(IllegalMove),
}

impl std::error::Error for PlayerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayerError::Io(err) => Some(err),
            PlayerError::Malformed { err, .. } => Some(err),
            PlayerError::IllegalMove(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerError::Disconnected => write!(f, "The player disconnected"),
            PlayerError::MessageTooLong => write!(f, "The player sent an overlong message"),
            PlayerError::Io(_) => write!(f, "Communication with the player failed"),
            PlayerError::Malformed { line, .. } => {
                write!(f, "The player sent a malformed message '{}'", line)
            }
            PlayerError::Unexpected { expected, received } => write!(
                f,
                "Expected {} from the player, but received '{}'",
                expected, received
            ),
            PlayerError::IllegalMove(_) => write!(f, "The player made an illegal move"),
        }
    }
}

impl From<std::io::Error> for PlayerError {
    fn from(err: std::io::Error) -> Self {
        PlayerError::Io(err)
    }
}

/// A [`PlayerError`] together with the index of the player who caused it.
#[derive(Debug)]
pub struct PlayerFault {
    pub player_idx: usize,
    pub err: PlayerError,
}

impl std::error::Error for PlayerFault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.err)
    }
}

impl std::fmt::Display for PlayerFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fault by player {}", self.player_idx + 1)
    }
}
