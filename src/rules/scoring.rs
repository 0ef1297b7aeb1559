//! Round and end-of-game scoring.
//!
//! A round score is the full board value recomputed from scratch, not the
//! points gained that round. The session total is the sum of recorded
//! round scores, plus the final bonus once the game ends.

use crate::board::{Board, CellType};
use crate::core::config::GameConfig;

/// Score for the round just committed: points over every built cell.
#[must_use]
pub fn round_score(board: &Board) -> i64 {
    board.occupied_points()
}

/// End-of-game bonus: per-factory plus per-square points.
#[must_use]
pub fn final_bonus(board: &Board, config: &GameConfig) -> i64 {
    let factories = board.count(CellType::Factory) as i64;
    let squares = board.count(CellType::Square) as i64;
    factories * config.factory_bonus + squares * config.square_bonus
}

/// Sum of all recorded round scores.
#[must_use]
pub fn total_of(round_scores: &[i64]) -> i64 {
    round_scores.iter().sum()
}
