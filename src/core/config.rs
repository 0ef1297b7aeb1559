//! Game configuration and compiled-in board constants.
//!
//! The board geometry and its point layout never change between games, so
//! they live here as constants. Everything a table may want to tweak
//! (round count, bonus rounds, final bonuses, RNG seed) lives in `GameConfig`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::ContractViolation;

/// Number of board rows.
pub const BOARD_ROWS: usize = 5;

/// Number of board columns. Columns are addressed by die faces 1..=6.
pub const BOARD_COLS: usize = 6;

/// Point value of every board cell, fixed at board creation.
pub const POINTS_LAYOUT: [[i64; BOARD_COLS]; BOARD_ROWS] = [
    [3, 3, 2, 2, 0, 3],
    [0, 1, 0, 0, 1, 0],
    [2, 0, 1, 1, 0, 2],
    [0, 0, 1, 0, 1, 0],
    [3, 0, 2, 2, 0, 3],
];

/// Default number of scored rounds.
pub const DEFAULT_MAX_ROUNDS: u32 = 9;

/// Largest accepted round count.
pub const MAX_ROUNDS_LIMIT: u32 = 99;

/// Rounds that offer a one-time bonus unlock by default.
pub const DEFAULT_BONUS_ROUNDS: [u32; 3] = [3, 6, 9];

/// Complete game configuration.
///
/// Deserialization applies the same round count check as `with_max_rounds`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    /// Last scored round, in 1..=`MAX_ROUNDS_LIMIT`. `next_round` past
    /// this ends the game.
    pub max_rounds: u32,

    /// Rounds that offer a bonus. Each may be used once, and only while
    /// that round is the current one.
    pub bonus_rounds: SmallVec<[u32; 4]>,

    /// Dice RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// End-of-game points per factory cell.
    pub factory_bonus: i64,

    /// End-of-game points per square cell.
    pub square_bonus: i64,
}

#[derive(Deserialize)]
struct RawGameConfig {
    max_rounds: u32,
    bonus_rounds: SmallVec<[u32; 4]>,
    seed: Option<u64>,
    factory_bonus: i64,
    square_bonus: i64,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ContractViolation;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        check_round_count(raw.max_rounds)?;
        Ok(Self {
            max_rounds: raw.max_rounds,
            bonus_rounds: raw.bonus_rounds,
            seed: raw.seed,
            factory_bonus: raw.factory_bonus,
            square_bonus: raw.square_bonus,
        })
    }
}

fn check_round_count(max_rounds: u32) -> Result<(), ContractViolation> {
    if (1..=MAX_ROUNDS_LIMIT).contains(&max_rounds) {
        Ok(())
    } else {
        Err(ContractViolation::InvalidRoundCount(max_rounds))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            bonus_rounds: SmallVec::from_slice(&DEFAULT_BONUS_ROUNDS),
            seed: None,
            factory_bonus: 3,
            square_bonus: 2,
        }
    }
}

impl GameConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of scored rounds.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        assert!(max_rounds > 0, "Must play at least 1 round");
        assert!(
            max_rounds <= MAX_ROUNDS_LIMIT,
            "Cannot play more than {MAX_ROUNDS_LIMIT} rounds"
        );
        self.max_rounds = max_rounds;
        self
    }

    /// Replace the bonus round list.
    #[must_use]
    pub fn with_bonus_rounds(mut self, rounds: &[u32]) -> Self {
        self.bonus_rounds = SmallVec::from_slice(rounds);
        self
    }

    /// Seed the dice RNG for deterministic replays.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the end-of-game bonuses for factory and square cells.
    #[must_use]
    pub fn with_final_bonuses(mut self, factory: i64, square: i64) -> Self {
        self.factory_bonus = factory;
        self.square_bonus = square;
        self
    }

    /// Check whether `round` offers a bonus unlock.
    #[must_use]
    pub fn is_bonus_round(&self, round: u32) -> bool {
        self.bonus_rounds.contains(&round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.max_rounds, 9);
        assert_eq!(config.bonus_rounds.as_slice(), &[3, 6, 9]);
        assert_eq!(config.seed, None);
        assert_eq!(config.factory_bonus, 3);
        assert_eq!(config.square_bonus, 2);
    }

    #[test]
    fn test_config_builder() {
        let config = GameConfig::new()
            .with_max_rounds(4)
            .with_bonus_rounds(&[2])
            .with_seed(7)
            .with_final_bonuses(5, 1);

        assert_eq!(config.max_rounds, 4);
        assert!(config.is_bonus_round(2));
        assert!(!config.is_bonus_round(3));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.factory_bonus, 5);
        assert_eq!(config.square_bonus, 1);
    }

    #[test]
    #[should_panic(expected = "Must play at least 1 round")]
    fn test_zero_rounds() {
        let _ = GameConfig::new().with_max_rounds(0);
    }

    #[test]
    #[should_panic(expected = "Cannot play more than 99 rounds")]
    fn test_too_many_rounds() {
        let _ = GameConfig::new().with_max_rounds(MAX_ROUNDS_LIMIT + 1);
    }

    #[test]
    fn test_points_layout_shape() {
        assert_eq!(POINTS_LAYOUT.len(), BOARD_ROWS);
        assert!(POINTS_LAYOUT.iter().all(|row| row.len() == BOARD_COLS));
        assert_eq!(POINTS_LAYOUT[0][0], 3);
        assert_eq!(POINTS_LAYOUT[4][5], 3);
        assert_eq!(POINTS_LAYOUT[0][4], 0);
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::new().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let restored: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn test_config_serde_checks_round_count() {
        let json = |rounds: u32| {
            format!(
                r#"{{"max_rounds":{rounds},"bonus_rounds":[3],"seed":null,"factory_bonus":3,"square_bonus":2}}"#
            )
        };

        let config: GameConfig = serde_json::from_str(&json(5)).unwrap();
        assert_eq!(config.max_rounds, 5);

        assert!(serde_json::from_str::<GameConfig>(&json(0)).is_err());
        assert!(serde_json::from_str::<GameConfig>(&json(u32::MAX)).is_err());
    }
}
