//! Board model: a fixed 5×6 grid of cells with compiled-in point values.
//!
//! Only cell contents mutate, and only through `Cell::build`, which refuses
//! to touch an occupied cell. Once written, a project is permanent.
//! Placements waiting for a commit sit in a `ProvisionalBuffer` instead.

pub mod buffer;
pub mod cell;
pub mod grid;

pub use buffer::{ProvisionalBuffer, ProvisionalPlacement, StageOutcome};
pub use cell::{Cell, CellType};
pub use grid::Board;
