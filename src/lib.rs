//! # dice-city
//!
//! Rules and scoring engine for a dice-driven city-building board game.
//!
//! Each round two dice are rolled. Their faces decide which projects
//! (house, forest, lake, square, factory) may be built and in which of the
//! six board columns. Placements are staged in a provisional buffer,
//! validated as a whole, then committed permanently to the player's board.
//!
//! ## Design Principles
//!
//! 1. **Explicit ownership**: all state lives in one `GameSession` that the
//!    caller owns and passes around. There is no global store.
//!
//! 2. **Commands return outcomes**: every command returns a
//!    `CommandResult`. A rule rejection carries its human-readable reason
//!    as data and leaves the session unchanged; caller bugs surface as a
//!    distinct `ContractViolation`.
//!
//! 3. **Pure rules**: legality, commit validation and scoring are free
//!    functions over dice, buffer and board, so they can be tested and
//!    benchmarked in isolation.
//!
//! ## Modules
//!
//! - `core`: configuration, dice, RNG, players, errors
//! - `board`: cells, project types, the 5×6 board, staged placements
//! - `rules`: placement legality, commit validation, scoring
//! - `session`: phases and the game session
//!
//! ## Example
//!
//! ```
//! use dice_city::{CellType, GameConfig, GameSession, Phase};
//!
//! let mut session = GameSession::new(GameConfig::new().with_seed(7));
//! session.add_player("Ada").unwrap();
//! session.start_game().unwrap();
//!
//! session.roll_dice_with(1, 3).unwrap();
//! session.select_project(CellType::House).unwrap();
//! session.place_project_temp(0, 2).unwrap(); // column 3
//! session.save_changes().unwrap();
//!
//! assert_eq!(session.phase(), Phase::Building);
//! assert!(session.can_proceed_to_next_round());
//! ```

pub mod board;
pub mod core;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CommandError, CommandResult, ContractViolation, Rejection,
    Dice, DiceRng, DiceRngState,
    GameConfig, Player, PlayerId,
    BOARD_COLS, BOARD_ROWS, MAX_ROUNDS_LIMIT, POINTS_LAYOUT,
};

pub use crate::board::{
    Board, Cell, CellType, ProvisionalBuffer, ProvisionalPlacement, StageOutcome,
};

pub use crate::rules::{
    allowed_columns, available_projects, check_placement, is_legal, legal_columns,
    validate_commit, round_score, final_bonus,
};

pub use crate::session::{CommitSummary, GameSession, Phase, RoundAdvance};
