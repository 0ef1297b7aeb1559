//! Command outcomes.
//!
//! Two distinct failure families:
//!
//! - `Rejection`: a game rule refused the command. Recoverable; the session
//!   is unchanged and the `Display` text is the reason to show the player.
//! - `ContractViolation`: the caller broke an API precondition (bad
//!   coordinates, unknown player). No game rule ever produces one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::MAX_ROUNDS_LIMIT;
use super::player::PlayerId;
use crate::board::CellType;

/// A game-rule rejection. The session is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("dice already rolled this round; place projects and save changes first")]
    DiceAlreadyRolled,

    #[error("changes already saved this round; advance to the next round")]
    ChangesCommitted,

    #[error("roll the dice first")]
    DiceNotRolled,

    #[error("select a project first")]
    NoProjectSelected,

    #[error("empty is not a project")]
    NotAProject,

    #[error("a square is already on the board; only one may be built per game")]
    SquareAlreadyPlaced,

    #[error("Double ({die},{die}): {project} must be in column {die}. A square may go in any empty cell")]
    DoubleColumn { die: u8, project: CellType },

    #[error("Dice: {die1} and {die2}. {project} must be in column {die1} or {die2}")]
    WrongColumn { die1: u8, die2: u8, project: CellType },

    #[error("column {column} already has a {project}")]
    DuplicateInColumn { column: u8, project: CellType },

    #[error("cell (row {row}, column {column}) is already built")]
    CellOccupied { row: u8, column: u8 },

    #[error("there is no column {column}; columns are 1 to 6")]
    NoSuchColumn { column: u8 },

    #[error("must place at least one project")]
    EmptyBuffer,

    #[error("Double ({die},{die}): must place a project in column {die} first")]
    MissingDoubleColumn { die: u8 },

    #[error("Category pair ({die1},{die2}): must place projects in both columns {die1} and {die2}")]
    MissingPairColumns { die1: u8, die2: u8 },

    #[error("unsaved placements remain; save changes first")]
    UnsavedChanges,

    #[error("roll the dice and save changes before advancing")]
    NotCommitted,

    #[error("game can only be started from planning at round 0")]
    AlreadyStarted,

    #[error("add a player before starting the game")]
    NoPlayers,

    #[error("round {round} offers no bonus")]
    NotBonusRound { round: u32 },

    #[error("bonus for round {round} already used")]
    BonusUsed { round: u32 },

    #[error("the round {round} bonus can only be used during round {round}, not round {current}")]
    BonusNotCurrentRound { round: u32, current: u32 },

    #[error("game is over")]
    GameOver,
}

/// A caller-side precondition failure.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ContractViolation {
    #[error("cell ({row}, {col}) is outside the board")]
    CellOutOfBounds { row: usize, col: usize },

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("session has no player to build for")]
    NoActivePlayer,

    #[error("die face {0} is outside 1..=6")]
    InvalidDieFace(u8),

    #[error("round count {0} is outside 1..={max}", max = MAX_ROUNDS_LIMIT)]
    InvalidRoundCount(u32),

    #[error("cell ({row}, {col}) does not match the board layout")]
    InconsistentCell { row: usize, col: usize },

    #[error("board is not {rows}x{cols}")]
    MalformedBoard { rows: usize, cols: usize },

    #[error("cell ({row}, {col}) is staged twice or without a project")]
    InvalidStagedCell { row: usize, col: usize },
}

/// Error returned by every session command.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CommandError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

impl CommandError {
    /// The rule rejection, if this is one.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            CommandError::Rejected(r) => Some(r),
            CommandError::Contract(_) => None,
        }
    }

    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, CommandError::Contract(_))
    }
}

/// Result of a session command.
pub type CommandResult<T = ()> = Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        let err = Rejection::WrongColumn {
            die1: 1,
            die2: 4,
            project: CellType::House,
        };
        assert_eq!(err.to_string(), "Dice: 1 and 4. house must be in column 1 or 4");

        let err = Rejection::DoubleColumn {
            die: 2,
            project: CellType::Forest,
        };
        assert!(err.to_string().starts_with("Double (2,2): forest must be in column 2"));

        // Rows and columns are both counted from 1
        let err = Rejection::CellOccupied { row: 1, column: 2 };
        assert_eq!(err.to_string(), "cell (row 1, column 2) is already built");
    }

    #[test]
    fn test_command_error_kinds() {
        let rejected: CommandError = Rejection::GameOver.into();
        assert_eq!(rejected.rejection(), Some(&Rejection::GameOver));
        assert!(!rejected.is_contract_violation());
        assert_eq!(rejected.to_string(), "game is over");

        let contract: CommandError = ContractViolation::InvalidDieFace(9).into();
        assert!(contract.is_contract_violation());
        assert!(contract.rejection().is_none());

        let contract = ContractViolation::InvalidRoundCount(0);
        assert_eq!(contract.to_string(), "round count 0 is outside 1..=99");
    }

    #[test]
    fn test_error_serde() {
        let err: CommandError = Rejection::MissingPairColumns { die1: 3, die2: 6 }.into();
        let json = serde_json::to_string(&err).unwrap();
        let restored: CommandError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, restored);
    }
}
