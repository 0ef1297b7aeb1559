//! Core engine types: configuration, dice, RNG, players, errors.

pub mod config;
pub mod dice;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{GameConfig, BOARD_COLS, BOARD_ROWS, MAX_ROUNDS_LIMIT, POINTS_LAYOUT};
pub use dice::Dice;
pub use error::{CommandError, CommandResult, ContractViolation, Rejection};
pub use player::{Player, PlayerId};
pub use rng::{DiceRng, DiceRngState};
