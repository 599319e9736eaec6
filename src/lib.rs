//! # pauta
//!
//! A batch grader for course spreadsheets: fetches the class roster from a
//! remote spreadsheet, computes each student's situation and final-exam
//! score, and writes both columns back in a single update.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Process-wide configuration loaded from the environment.
pub mod config;
/// For all things related to grading
pub mod grade;
/// The batch job tying fetch, grading, and write-back together.
pub mod job;
/// Spreadsheet gateway contract and the Sheets REST client.
pub mod sheets;
/// Utility functions for convenience
pub mod util;
