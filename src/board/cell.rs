//! Board cells and the project types that can be built on them.

use serde::{Deserialize, Serialize};

use crate::core::config::{BOARD_COLS, BOARD_ROWS, POINTS_LAYOUT};
use crate::core::error::ContractViolation;

/// What occupies a cell. `Empty` is the only unbuilt value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    #[default]
    Empty,
    House,
    Forest,
    Lake,
    Square,
    Factory,
}

impl CellType {
    /// Every buildable project type, in legend order.
    pub const PROJECTS: [CellType; 5] = [
        CellType::House,
        CellType::Forest,
        CellType::Lake,
        CellType::Square,
        CellType::Factory,
    ];

    /// The unordered pair of die faces that selects this project category.
    ///
    /// Only house, forest and lake are face-selected. Square and factory
    /// are unlocked by the shape of the roll instead.
    #[must_use]
    pub const fn paired_faces(self) -> Option<[u8; 2]> {
        match self {
            CellType::House => Some([1, 4]),
            CellType::Forest => Some([2, 5]),
            CellType::Lake => Some([3, 6]),
            CellType::Empty | CellType::Square | CellType::Factory => None,
        }
    }

    /// The face-selected category for a single die face.
    #[must_use]
    pub const fn category_for_face(face: u8) -> Option<CellType> {
        match face {
            1 | 4 => Some(CellType::House),
            2 | 5 => Some(CellType::Forest),
            3 | 6 => Some(CellType::Lake),
            _ => None,
        }
    }

    /// Check if this is a buildable project (anything but `Empty`).
    #[must_use]
    pub const fn is_project(self) -> bool {
        !matches!(self, CellType::Empty)
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CellType::Empty => "empty",
            CellType::House => "house",
            CellType::Forest => "forest",
            CellType::Lake => "lake",
            CellType::Square => "square",
            CellType::Factory => "factory",
        }
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single board cell.
///
/// `points` is fixed at creation. `occupied` is true exactly when
/// `kind` is a project, and only `build` changes either. Deserialization
/// checks both against the board layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCell")]
pub struct Cell {
    pub row: usize,
    pub column: usize,
    kind: CellType,
    occupied: bool,
    points: i64,
}

#[derive(Deserialize)]
struct RawCell {
    row: usize,
    column: usize,
    kind: CellType,
    occupied: bool,
    points: i64,
}

impl TryFrom<RawCell> for Cell {
    type Error = ContractViolation;

    fn try_from(raw: RawCell) -> Result<Self, Self::Error> {
        let (row, column) = (raw.row, raw.column);
        let on_board = row < BOARD_ROWS && column < BOARD_COLS;
        if !on_board
            || raw.occupied != raw.kind.is_project()
            || raw.points != POINTS_LAYOUT[row][column]
        {
            return Err(ContractViolation::InconsistentCell { row, col: column });
        }
        Ok(Self {
            row,
            column,
            kind: raw.kind,
            occupied: raw.occupied,
            points: raw.points,
        })
    }
}

impl Cell {
    /// Create an empty cell worth `points`.
    #[must_use]
    pub const fn new(row: usize, column: usize, points: i64) -> Self {
        Self {
            row,
            column,
            kind: CellType::Empty,
            occupied: false,
            points,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> CellType {
        self.kind
    }

    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupied
    }

    #[must_use]
    pub const fn points(&self) -> i64 {
        self.points
    }

    /// Write a project into the cell.
    ///
    /// Returns `false` and leaves the cell untouched if it is already
    /// occupied or `kind` is `Empty`.
    pub fn build(&mut self, kind: CellType) -> bool {
        if self.occupied || !kind.is_project() {
            return false;
        }
        self.kind = kind;
        self.occupied = true;
        true
    }
}
