use crate::IllegalMove;

pub const BOARD_SIZE: u8 = 3;

/// The mark a player writes into the cells of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The mark of the opponent.
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Mark::X => 'x',
            Mark::O => 'o',
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The coordinates of a cell, addressing `board[y][x]`.
///
/// Both coordinates are always in `0..BOARD_SIZE`.
///
/// ```text
/// (0, 0) │ (1, 0) │ (2, 0)
/// ───────┼────────┼───────
/// (0, 1) │ (1, 1) │ (2, 1)
/// ───────┼────────┼───────
/// (0, 2) │ (1, 2) │ (2, 2)
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    x: u8,
    y: u8,
}

impl Move {
    /// Returns `None` if a coordinate is outside of the board.
    pub fn new(x: u8, y: u8) -> Option<Self> {
        (x < BOARD_SIZE && y < BOARD_SIZE).then_some(Self { x, y })
    }

    /// The column.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// The row.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// All cells of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Move> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Move { x, y }))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A 3x3 tic-tac-toe board.
//
// Cells only ever go from empty to a mark, never back and never from one
// mark to the other, so `move_count` is the number of non-empty cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Mark>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    move_count: u8,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mark in the given cell, if any.
    pub fn get(&self, mv: Move) -> Option<Mark> {
        self.cells[mv.y as usize][mv.x as usize]
    }

    /// Writes `mark` into the cell addressed by `mv`.
    ///
    /// Fails without changing the board if the cell is already taken.
    pub fn place(&mut self, mark: Mark, mv: Move) -> Result<(), IllegalMove> {
        let cell = &mut self.cells[mv.y as usize][mv.x as usize];
        if let Some(occupant) = *cell {
            return Err(IllegalMove::CellOccupied { mv, occupant });
        }
        *cell = Some(mark);
        self.move_count += 1;
        Ok(())
    }

    /// How many marks have been placed so far.
    pub fn move_count(&self) -> u8 {
        self.move_count
    }

    pub fn is_full(&self) -> bool {
        usize::from(self.move_count) == Move::all().count()
    }

    /// The cells that are still free, in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        Move::all().filter(|&mv| self.get(mv).is_none())
    }

    /// The rows of the board, top to bottom.
    pub fn rows(&self) -> &[[Option<Mark>; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        &self.cells
    }
}
