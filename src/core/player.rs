//! Players and their boards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::board::Board;

/// Player identifier. Ids are handed out sequentially from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A player and the board they build on.
///
/// `score` mirrors the session total and is only written by the scoring
/// step of the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub board: Board,
    pub score: i64,
    pub used_bonuses: BTreeSet<String>,
}

impl Player {
    /// Create a player with an empty board.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            board: Board::new(),
            score: 0,
            used_bonuses: BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let id = PlayerId::new(3);
        assert_eq!(id.raw(), 3);
        assert_eq!(format!("{}", id), "Player 3");
    }

    #[test]
    fn test_new_player() {
        let player = Player::new(PlayerId::new(1), "Ada");
        assert_eq!(player.name, "Ada");
        assert_eq!(player.score, 0);
        assert!(player.used_bonuses.is_empty());
        assert_eq!(player.board, Board::new());
    }

    #[test]
    fn test_player_serialization() {
        let player = Player::new(PlayerId::new(2), "Bo");
        let json = serde_json::to_string(&player).unwrap();
        let restored: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, restored);
    }
}
