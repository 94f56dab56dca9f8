use crate::{Board, Mark, Move};

const DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Pairs of opposite directions in `DIRECTIONS`, one pair per line through a cell.
const AXES: [(usize, usize); 4] = [(0, 4), (1, 5), (2, 6), (3, 7)];

/// Checks whether the mark at `last_move` completes a line of three.
///
/// Only lines through `last_move` are considered, so this must be called
/// after every move to detect every win. Returns `false` if the cell is empty.
pub fn is_winning_move(board: &Board, last_move: Move) -> bool {
    let Some(mark) = board.get(last_move) else {
        return false;
    };
    let (x, y) = (last_move.x() as i8, last_move.y() as i8);
    let longest_chain = AXES
        .iter()
        .map(|&(a, b)| {
            // Both chains include the cell of the move itself
            chain_length(board, x, y, mark, DIRECTIONS[a])
                + chain_length(board, x, y, mark, DIRECTIONS[b])
                - 1
        })
        .max()
        .unwrap_or(0);
    longest_chain == 3
}

/// The number of consecutive `mark`s starting at `(x, y)` and walking in direction `(dx, dy)`.
fn chain_length(board: &Board, x: i8, y: i8, mark: Mark, (dx, dy): (i8, i8)) -> u8 {
    let cell = u8::try_from(x)
        .ok()
        .zip(u8::try_from(y).ok())
        .and_then(|(x, y)| Move::new(x, y));
    match cell {
        Some(mv) if board.get(mv) == Some(mark) => {
            1 + chain_length(board, x + dx, y + dy, mark, (dx, dy))
        }
        _ => 0,
    }
}
