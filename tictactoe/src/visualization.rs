use crate::Board;

/// Draws the board with box-drawing characters, one row per line.
///
/// ```
/// # use tictactoe::{visualize_board, Board, Mark, Move};
/// let mut board = Board::new();
/// board.place(Mark::X, Move::new(1, 0).unwrap()).unwrap();
/// assert_eq!(
///     visualize_board(&board),
///     "   │ x │   \n───┼───┼───\n   │   │   \n───┼───┼───\n   │   │   "
/// );
/// ```
pub fn visualize_board(board: &Board) -> String {
    board
        .rows()
        .iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| format!(" {} ", cell.map_or(' ', |mark| mark.as_char())))
                .collect();
            cells.join("│")
        })
        .collect::<Vec<String>>()
        .join("\n───┼───┼───\n")
}
