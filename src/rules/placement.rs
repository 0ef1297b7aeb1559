//! Dice-to-column legality.
//!
//! Pure functions over a roll; nothing here looks at a board or buffer.
//! Column numbers are 1-based die faces throughout this module.
//!
//! ## Rules, in order
//!
//! 1. Nothing is legal before the dice are rolled, or outside columns 1..=6.
//! 2. A square is legal in every column.
//! 3. On a double `(d,d)` every other project must go in column `d`.
//! 4. House, forest and lake are each selected by a pair of faces
//!    ({1,4}, {2,5}, {3,6}). When one die shows the project's face, the
//!    project goes in the column shown by the *other* die. Either die
//!    may act as the selector.
//! 5. A factory goes in either rolled column, but only on a category
//!    pair roll.

use smallvec::SmallVec;

use crate::board::CellType;
use crate::core::config::BOARD_COLS;
use crate::core::dice::Dice;
use crate::core::error::Rejection;

/// Check whether `project` may be built in `column` (1-based) for `dice`.
pub fn check_placement(dice: &Dice, project: CellType, column: u8) -> Result<(), Rejection> {
    let Some((die1, die2)) = dice.values() else {
        return Err(Rejection::DiceNotRolled);
    };

    if !(1..=BOARD_COLS as u8).contains(&column) {
        return Err(Rejection::NoSuchColumn { column });
    }

    match project {
        CellType::Empty => return Err(Rejection::NotAProject),
        CellType::Square => return Ok(()),
        _ => {}
    }

    if die1 == die2 {
        return if column == die1 {
            Ok(())
        } else {
            Err(Rejection::DoubleColumn { die: die1, project })
        };
    }

    if let Some(faces) = project.paired_faces() {
        let first_selects = faces.contains(&die1) && column == die2;
        let second_selects = faces.contains(&die2) && column == die1;
        if first_selects || second_selects {
            return Ok(());
        }
    }

    if project == CellType::Factory && dice.is_category_pair() && (column == die1 || column == die2) {
        return Ok(());
    }

    Err(Rejection::WrongColumn { die1, die2, project })
}

/// Convenience wrapper returning a plain bool.
#[must_use]
pub fn is_legal(dice: &Dice, project: CellType, column: u8) -> bool {
    check_placement(dice, project, column).is_ok()
}

/// Projects offered by the legend for this roll.
///
/// One face-selected category per die (die 1 first, no repeats), then
/// square on a double and factory on a category pair.
#[must_use]
pub fn available_projects(dice: &Dice) -> SmallVec<[CellType; 5]> {
    let mut projects = SmallVec::new();
    let Some((die1, die2)) = dice.values() else {
        return projects;
    };

    for face in [die1, die2] {
        if let Some(category) = CellType::category_for_face(face) {
            if !projects.contains(&category) {
                projects.push(category);
            }
        }
    }

    if dice.is_double() {
        projects.push(CellType::Square);
    }
    if dice.is_category_pair() {
        projects.push(CellType::Factory);
    }

    projects
}

/// Columns (1-based) named by the roll. A double names one column.
#[must_use]
pub fn allowed_columns(dice: &Dice) -> SmallVec<[u8; 2]> {
    let mut columns = SmallVec::new();
    if let Some((die1, die2)) = dice.values() {
        columns.push(die1);
        if die2 != die1 {
            columns.push(die2);
        }
    }
    columns
}

/// Every column (1-based) where `project` is legal for this roll.
#[must_use]
pub fn legal_columns(dice: &Dice, project: CellType) -> SmallVec<[u8; 6]> {
    (1..=6).filter(|&c| is_legal(dice, project, c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(a: u8, b: u8) -> Dice {
        Dice::rolled(a, b).unwrap()
    }

    #[test]
    fn test_unrolled_rejects_everything() {
        let dice = Dice::unrolled();
        for project in CellType::PROJECTS {
            assert_eq!(check_placement(&dice, project, 1), Err(Rejection::DiceNotRolled));
        }
        assert!(available_projects(&dice).is_empty());
        assert!(allowed_columns(&dice).is_empty());
    }

    #[test]
    fn test_empty_is_never_legal() {
        assert_eq!(
            check_placement(&roll(1, 2), CellType::Empty, 2),
            Err(Rejection::NotAProject)
        );
    }

    #[test]
    fn test_columns_outside_board() {
        let dice = roll(1, 1);
        for column in [0, 7, u8::MAX] {
            assert_eq!(
                check_placement(&dice, CellType::Square, column),
                Err(Rejection::NoSuchColumn { column })
            );
        }
        assert!(!is_legal(&dice, CellType::House, 0));
    }

    #[test]
    fn test_other_die_selects_column() {
        // Die 1 shows a house face, die 2 names the column
        let dice = roll(1, 3);
        assert!(is_legal(&dice, CellType::House, 3));
        assert!(!is_legal(&dice, CellType::House, 1));

        // Die 2 shows a lake face, die 1 names the column
        assert!(is_legal(&dice, CellType::Lake, 1));
        assert!(!is_legal(&dice, CellType::Lake, 3));

        assert!(!is_legal(&dice, CellType::Forest, 1));
        assert!(!is_legal(&dice, CellType::Forest, 3));
    }

    #[test]
    fn test_category_pair_house_both_columns() {
        let dice = roll(1, 4);
        assert!(is_legal(&dice, CellType::House, 4));
        assert!(is_legal(&dice, CellType::House, 1));

        let err = check_placement(&dice, CellType::House, 2).unwrap_err();
        assert_eq!(
            err,
            Rejection::WrongColumn {
                die1: 1,
                die2: 4,
                project: CellType::House
            }
        );
        let message = err.to_string();
        assert!(message.contains("column 1 or 4"));
    }

    #[test]
    fn test_double_restricts_to_die_column() {
        let dice = roll(2, 2);
        assert_eq!(
            check_placement(&dice, CellType::Forest, 3),
            Err(Rejection::DoubleColumn {
                die: 2,
                project: CellType::Forest
            })
        );
        assert!(is_legal(&dice, CellType::Forest, 2));
        assert_eq!(legal_columns(&dice, CellType::Square).as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(legal_columns(&dice, CellType::Lake).as_slice(), &[2]);
    }

    #[test]
    fn test_factory_only_on_category_pair() {
        let dice = roll(6, 3);
        assert_eq!(legal_columns(&dice, CellType::Factory).as_slice(), &[3, 6]);

        let dice = roll(1, 5);
        assert!(legal_columns(&dice, CellType::Factory).is_empty());
    }

    #[test]
    fn test_available_projects() {
        assert_eq!(
            available_projects(&roll(1, 3)).as_slice(),
            &[CellType::House, CellType::Lake]
        );
        assert_eq!(
            available_projects(&roll(2, 5)).as_slice(),
            &[CellType::Forest, CellType::Factory]
        );
        assert_eq!(
            available_projects(&roll(6, 6)).as_slice(),
            &[CellType::Lake, CellType::Square]
        );
    }

    #[test]
    fn test_allowed_columns() {
        assert_eq!(allowed_columns(&roll(5, 2)).as_slice(), &[5, 2]);
        assert_eq!(allowed_columns(&roll(3, 3)).as_slice(), &[3]);
    }
}
