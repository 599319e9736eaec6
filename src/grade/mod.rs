#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Terminal overview rendering for graded rosters.
pub mod report;
/// Course header and student-row parsing.
pub mod roster;
/// The per-student decision rule and its result types.
pub mod rule;

pub use report::{StudentOutcome, show_overview};
pub use roster::{CourseHeader, Roster, RosterError, StudentRecord};
pub use rule::{Situation, SituationResult, calculate_situation};
