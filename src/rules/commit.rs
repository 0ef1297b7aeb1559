//! Whole-buffer validation run before a commit.
//!
//! Per-placement legality says each staged project sits in a column the
//! dice allow. This adds the round-level obligations: something must be
//! built, a double must be built in its column, and a category pair must
//! be built in both of its columns.

use crate::board::ProvisionalBuffer;
use crate::core::dice::Dice;
use crate::core::error::Rejection;

/// Check that `buffer` satisfies the round obligations for `dice`.
pub fn validate_commit(dice: &Dice, buffer: &ProvisionalBuffer) -> Result<(), Rejection> {
    let Some((die1, die2)) = dice.values() else {
        return Err(Rejection::DiceNotRolled);
    };

    if buffer.is_empty() {
        return Err(Rejection::EmptyBuffer);
    }

    let covers = |face: u8| {
        face.checked_sub(1)
            .is_some_and(|col| buffer.has_in_column(usize::from(col)))
    };

    if dice.is_double() && !covers(die1) {
        return Err(Rejection::MissingDoubleColumn { die: die1 });
    }

    if dice.is_category_pair() && !(covers(die1) && covers(die2)) {
        return Err(Rejection::MissingPairColumns { die1, die2 });
    }

    Ok(())
}
