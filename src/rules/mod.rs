//! Rules engine: placement legality, commit validation, scoring.
//!
//! Everything here is a pure function of its inputs. The session owns
//! state and calls in; rules never mutate anything.

pub mod commit;
pub mod placement;
pub mod scoring;

pub use commit::validate_commit;
pub use placement::{allowed_columns, available_projects, check_placement, is_legal, legal_columns};
pub use scoring::{final_bonus, round_score, total_of};
