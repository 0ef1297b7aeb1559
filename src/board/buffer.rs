//! Provisional placements for the current round.
//!
//! Entries keep insertion order and are unique by cell: staging onto a
//! cell that already has an entry replaces its project type in place.

use serde::{Deserialize, Serialize};

use super::cell::CellType;
use super::grid::Board;
use crate::core::error::ContractViolation;

/// A staged, not yet committed, project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProvisionalPlacement {
    pub row: usize,
    pub col: usize,
    pub kind: CellType,
}

/// What `stage` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageOutcome {
    /// New entry appended.
    Added,
    /// Existing entry at the cell changed type.
    Replaced { previous: CellType },
}

/// Ordered, cell-unique list of provisional placements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBuffer")]
pub struct ProvisionalBuffer {
    entries: Vec<ProvisionalPlacement>,
}

#[derive(Deserialize)]
struct RawBuffer {
    entries: Vec<ProvisionalPlacement>,
}

impl TryFrom<RawBuffer> for ProvisionalBuffer {
    type Error = ContractViolation;

    fn try_from(raw: RawBuffer) -> Result<Self, Self::Error> {
        let mut buffer = ProvisionalBuffer::new();
        for entry in raw.entries {
            Board::check_bounds(entry.row, entry.col)?;
            if !entry.kind.is_project() || buffer.get(entry.row, entry.col).is_some() {
                return Err(ContractViolation::InvalidStagedCell {
                    row: entry.row,
                    col: entry.col,
                });
            }
            buffer.entries.push(entry);
        }
        Ok(buffer)
    }
}

impl ProvisionalBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `kind` at `(row, col)`, replacing any entry already there.
    ///
    /// Rule checks belong to the caller; the buffer only keeps the
    /// one-entry-per-cell invariant.
    pub fn stage(&mut self, row: usize, col: usize, kind: CellType) -> StageOutcome {
        match self.entries.iter_mut().find(|e| e.row == row && e.col == col) {
            Some(entry) => {
                let previous = std::mem::replace(&mut entry.kind, kind);
                StageOutcome::Replaced { previous }
            }
            None => {
                self.entries.push(ProvisionalPlacement { row, col, kind });
                StageOutcome::Added
            }
        }
    }

    /// Drop every entry. Returns how many were discarded.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    #[must_use]
    pub fn entries(&self) -> &[ProvisionalPlacement] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&ProvisionalPlacement> {
        self.entries.iter().find(|e| e.row == row && e.col == col)
    }

    /// Any entry in 0-based column `col`.
    #[must_use]
    pub fn has_in_column(&self, col: usize) -> bool {
        self.entries.iter().any(|e| e.col == col)
    }

    /// An entry of `kind` in 0-based column `col`.
    #[must_use]
    pub fn column_has(&self, col: usize, kind: CellType) -> bool {
        self.entries.iter().any(|e| e.col == col && e.kind == kind)
    }

    /// Any entry of `kind`.
    #[must_use]
    pub fn contains(&self, kind: CellType) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProvisionalPlacement> {
        self.entries.iter()
    }
}
