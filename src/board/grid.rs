//! The 5×6 player board.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellType};
use crate::core::config::{BOARD_COLS, BOARD_ROWS, POINTS_LAYOUT};
use crate::core::error::ContractViolation;

/// Fixed-shape grid of cells owned by one player.
///
/// Rows and columns are 0-based here. Column `c` corresponds to
/// die face `c + 1`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    cells: Vec<Vec<Cell>>,
}

#[derive(Deserialize)]
struct RawBoard {
    cells: Vec<Vec<Cell>>,
}

impl TryFrom<RawBoard> for Board {
    type Error = ContractViolation;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let shaped = raw.cells.len() == BOARD_ROWS
            && raw.cells.iter().all(|row| row.len() == BOARD_COLS);
        if !shaped {
            return Err(ContractViolation::MalformedBoard {
                rows: BOARD_ROWS,
                cols: BOARD_COLS,
            });
        }

        for (row, cells) in raw.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if (cell.row, cell.column) != (row, col) {
                    return Err(ContractViolation::InconsistentCell { row, col });
                }
            }
        }
        Ok(Self { cells: raw.cells })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with points from `POINTS_LAYOUT`.
    #[must_use]
    pub fn new() -> Self {
        let cells = (0..BOARD_ROWS)
            .map(|row| {
                (0..BOARD_COLS)
                    .map(|column| Cell::new(row, column, POINTS_LAYOUT[row][column]))
                    .collect()
            })
            .collect();
        Self { cells }
    }

    /// Check `(row, col)` lies on the board.
    pub fn check_bounds(row: usize, col: usize) -> Result<(), ContractViolation> {
        if row < BOARD_ROWS && col < BOARD_COLS {
            Ok(())
        } else {
            Err(ContractViolation::CellOutOfBounds { row, col })
        }
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row)?.get(col)
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(row)?.get_mut(col)
    }

    /// Rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter_map(move |row| row.get(col))
    }

    /// Number of cells holding `kind`.
    #[must_use]
    pub fn count(&self, kind: CellType) -> usize {
        self.cells().filter(|c| c.kind() == kind).count()
    }

    /// Check if column `col` already holds a built `kind`.
    #[must_use]
    pub fn column_has(&self, col: usize, kind: CellType) -> bool {
        self.column(col).any(|c| c.kind() == kind)
    }

    /// Sum of points over every occupied cell.
    #[must_use]
    pub fn occupied_points(&self) -> i64 {
        self.cells()
            .filter(|c| c.is_occupied() && c.kind().is_project())
            .map(Cell::points)
            .sum()
    }
}
