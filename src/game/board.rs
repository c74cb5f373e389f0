use crate::error::{GameError, MoveError};

use super::PlayerId;

pub const DEFAULT_HEIGHT: usize = 6;
pub const DEFAULT_WIDTH: usize = 7;

/// Smallest dimension on which four in a row fits.
pub const MIN_DIMENSION: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(PlayerId),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn player(self) -> Option<PlayerId> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// Grid of cells indexed `[row][col]`. Row 0 is the top, row `height - 1`
/// the bottom, so pieces fall toward higher row indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// Create an empty board of the given size
    pub fn new(height: usize, width: usize) -> Result<Self, GameError> {
        validate_dimensions(height, width)?;
        Ok(Board {
            height,
            width,
            cells: vec![vec![Cell::Empty; width]; height],
        })
    }

    /// Board from explicit rows, top row first. Rows must all be `width` long.
    pub(crate) fn from_cells(cells: Vec<Vec<Cell>>) -> Result<Self, GameError> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        validate_dimensions(height, width)?;
        if let Some(row) = cells.iter().find(|row| row.len() != width) {
            return Err(GameError::InvalidDimensions {
                height,
                width: row.len(),
            });
        }
        Ok(Board {
            height,
            width,
            cells,
        })
    }

    /// Reinitialize every cell to empty, possibly with new dimensions.
    /// On error the board is left untouched.
    pub fn reset(&mut self, height: usize, width: usize) -> Result<(), GameError> {
        *self = Board::new(height, width)?;
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the cell at a specific position
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Cell at signed coordinates, `None` when off the board
    pub(crate) fn cell_checked(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.cells
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Lowest empty row in `col`, scanning from the bottom up
    pub fn find_drop_row(&self, col: usize) -> Result<usize, MoveError> {
        if col >= self.width {
            return Err(MoveError::ColumnOutOfRange {
                column: col,
                width: self.width,
            });
        }

        (0..self.height)
            .rev()
            .find(|&row| self.cells[row][col].is_empty())
            .ok_or(MoveError::ColumnFull { column: col })
    }

    /// Write a piece into an empty cell. Callers obtain `row` from
    /// [`Board::find_drop_row`] on the same board state.
    pub(crate) fn place(&mut self, row: usize, col: usize, player: PlayerId) {
        debug_assert!(
            self.cells[row][col].is_empty(),
            "cell ({row}, {col}) is already occupied"
        );
        self.cells[row][col] = Cell::Occupied(player);
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.width {
            return true;
        }
        !self.cells[0][col].is_empty()
    }

    /// Columns that can still take a piece
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.width)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| !cell.is_empty()))
    }

    /// Number of pieces belonging to `player`
    pub fn piece_count(&self, player: PlayerId) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Occupied(player))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            cells: vec![vec![Cell::Empty; DEFAULT_WIDTH]; DEFAULT_HEIGHT],
        }
    }
}

fn validate_dimensions(height: usize, width: usize) -> Result<(), GameError> {
    if height < MIN_DIMENSION || width < MIN_DIMENSION {
        return Err(GameError::InvalidDimensions { height, width });
    }
    Ok(())
}

/// Build a board from text rows, top row first: `.` empty, `X` player one,
/// `O` player two. Ignores gravity.
#[cfg(test)]
pub(crate) fn board_from_rows(rows: &[&str]) -> Board {
    let cells: Vec<Vec<Cell>> = rows
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| match c {
                    'X' => Cell::Occupied(PlayerId::One),
                    'O' => Cell::Occupied(PlayerId::Two),
                    _ => Cell::Empty,
                })
                .collect()
        })
        .collect();
    Board::from_cells(cells).unwrap()
}

#[cfg(test)]
pub(crate) fn drop_into(board: &mut Board, col: usize, player: PlayerId) -> usize {
    let row = board.find_drop_row(col).unwrap();
    board.place(row, col, player);
    row
}
