//! Game phases.

use serde::{Deserialize, Serialize};

/// Phase of the round/phase state machine.
///
/// `Planning → Building ⇄ Bonus → Scoring`. Scoring is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Before the first roll, round 0.
    #[default]
    Planning,
    /// Dice rolled or awaiting a roll; projects are placed and committed.
    Building,
    /// A bonus-round unlock is pending for this round.
    Bonus,
    /// Final scores computed; no further commands are accepted.
    Scoring,
}

impl Phase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Scoring)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Planning => "planning",
            Phase::Building => "building",
            Phase::Bonus => "bonus",
            Phase::Scoring => "scoring",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_terminal() {
        assert_eq!(Phase::default(), Phase::Planning);
        assert!(Phase::Scoring.is_terminal());
        assert!(!Phase::Bonus.is_terminal());
        assert_eq!(Phase::Building.to_string(), "building");
    }
}
