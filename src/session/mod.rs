//! Round/phase state machine.
//!
//! ## Key Types
//!
//! - `GameSession`: owns players, dice, buffer and scores; every command
//!   returns a `CommandResult`
//! - `Phase`: planning, building, bonus, scoring (terminal)

pub mod game;
pub mod phase;

pub use game::{CommitSummary, GameSession, RoundAdvance};
pub use phase::Phase;
