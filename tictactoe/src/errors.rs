use crate::{Mark, Move};

/// The error type for [`Board::place()`](crate::Board::place).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    CellOccupied { mv: Move, occupant: Mark },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::CellOccupied { mv, occupant } => {
                write!(f, "The cell {} is already taken by {}", mv, occupant)
            }
        }
    }
}
