//! Board reconstruction from the move log.
//!
//! The board is never stored by the authority; it is replayed from the
//! ordered list of accepted moves every time a snapshot arrives.

use std::fmt;
use tictactoe_sync_types::{GamePiece, GridPosition, TicTacToeMove};

/// One board cell: a piece or empty.
pub type Cell = Option<GamePiece>;

/// A 3×3 grid indexed by row, then column. `(0, 0)` is top-left.
///
/// Equality is structural: two boards are equal iff every cell matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Cell; GridPosition::SIZE]; GridPosition::SIZE],
}

impl Board {
    /// A board of nine empty cells.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replay one move onto the board.
    ///
    /// The cell is overwritten unconditionally. Re-occupying a cell is a
    /// contract violation of the snapshot, not something checked here.
    pub fn apply(&mut self, mv: &TicTacToeMove) {
        self.cells[mv.row.index()][mv.col.index()] = Some(mv.game_piece);
    }

    /// Contents of one cell.
    pub fn cell(&self, row: GridPosition, col: GridPosition) -> Cell {
        self.cells[row.index()][col.index()]
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> &[[Cell; GridPosition::SIZE]; GridPosition::SIZE] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// True if no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                match cell {
                    Some(piece) => write!(f, "{}", piece)?,
                    None => f.write_str(".")?,
                }
            }
        }
        Ok(())
    }
}

/// Build a board by replaying `moves` in order onto an empty grid.
pub fn board_from(moves: &[TicTacToeMove]) -> Board {
    let mut board = Board::empty();
    for mv in moves {
        board.apply(mv);
    }
    board
}
