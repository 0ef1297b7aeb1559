//! The two dice of the current round.

use serde::{Deserialize, Serialize};

use super::error::ContractViolation;
use crate::board::CellType;

/// Current roll: both dice present or both absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDice", into = "RawDice")]
pub struct Dice {
    values: Option<(u8, u8)>,
}

/// Serialized form. Faces are re-checked on the way in.
#[derive(Serialize, Deserialize)]
struct RawDice {
    values: Option<(u8, u8)>,
}

impl TryFrom<RawDice> for Dice {
    type Error = ContractViolation;

    fn try_from(raw: RawDice) -> Result<Self, Self::Error> {
        match raw.values {
            Some((die1, die2)) => Dice::rolled(die1, die2),
            None => Ok(Dice::unrolled()),
        }
    }
}

impl From<Dice> for RawDice {
    fn from(dice: Dice) -> Self {
        RawDice {
            values: dice.values,
        }
    }
}

impl Dice {
    /// Not yet rolled.
    #[must_use]
    pub const fn unrolled() -> Self {
        Self { values: None }
    }

    /// A rolled pair. Faces must be in 1..=6.
    pub fn rolled(die1: u8, die2: u8) -> Result<Self, ContractViolation> {
        for face in [die1, die2] {
            if !(1..=6).contains(&face) {
                return Err(ContractViolation::InvalidDieFace(face));
            }
        }
        Ok(Self {
            values: Some((die1, die2)),
        })
    }

    #[must_use]
    pub const fn is_rolled(&self) -> bool {
        self.values.is_some()
    }

    #[must_use]
    pub const fn values(&self) -> Option<(u8, u8)> {
        self.values
    }

    #[must_use]
    pub fn die1(&self) -> Option<u8> {
        self.values.map(|(d, _)| d)
    }

    #[must_use]
    pub fn die2(&self) -> Option<u8> {
        self.values.map(|(_, d)| d)
    }

    /// Sum of both dice, 0 when unrolled.
    #[must_use]
    pub fn sum(&self) -> u8 {
        self.values.map_or(0, |(a, b)| a + b)
    }

    /// Both dice show the same face.
    #[must_use]
    pub fn is_double(&self) -> bool {
        matches!(self.values, Some((a, b)) if a == b)
    }

    /// The roll spans one category pair: {1,4}, {2,5} or {3,6} in either order.
    ///
    /// Such a roll unlocks the factory and must be built in both columns.
    #[must_use]
    pub fn is_category_pair(&self) -> bool {
        match self.values {
            Some((a, b)) if a != b => CellType::category_for_face(a)
                .and_then(CellType::paired_faces)
                .is_some_and(|faces| faces.contains(&b)),
            _ => false,
        }
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.values {
            Some((a, b)) => write!(f, "({a},{b})"),
            None => f.write_str("(unrolled)"),
        }
    }
}
