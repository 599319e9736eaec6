use serde::{Deserialize, Serialize};

/// Number of leading rows holding course metadata and column titles.
const HEADER_ROWS: usize = 2;

/// Columns every student row must provide: id, name, absences, three tests.
const MIN_COLUMNS: usize = 6;

/// Highest score the grading scale allows.
const MAX_SCORE: u32 = 100;

/// An enum to represent possible errors when parsing the fetched range.
#[derive(thiserror::Error, Debug)]
pub enum RosterError {
    /// The fetched range contained no rows at all.
    #[error("The fetched range contained no rows; expected a course header in the first cell.")]
    MissingHeader,
    /// The course header cell did not match the `<label>: <integer>` format.
    #[error("Malformed course header `{0}`; expected `<label>: <total classes>`.")]
    MalformedHeader(String),
    /// The course header declared zero total classes.
    #[error("The course header declared zero total classes; the absence rate would be undefined.")]
    ZeroClasses,
    /// A student row had fewer columns than required.
    #[error("Student row {row} has {found} column(s); expected at least {expected}.")]
    TooFewColumns {
        /// 1-based row position within the fetched range.
        row:      usize,
        /// Minimum number of columns a student row must provide.
        expected: usize,
        /// Number of columns actually present.
        found:    usize,
    },
    /// A numeric field failed to parse as an integer.
    #[error("Could not parse {field} `{value}` on student row {row} as an integer.")]
    InvalidNumber {
        /// 1-based row position within the fetched range.
        row:   usize,
        /// Which field failed to parse.
        field: &'static str,
        /// The raw cell contents.
        value: String,
    },
    /// A test score fell outside the grading scale.
    #[error("Test score {value} on student row {row} is outside the 0-100 grading scale.")]
    ScoreOutOfRange {
        /// 1-based row position within the fetched range.
        row:   usize,
        /// The offending score.
        value: u32,
    },
}

/// Course metadata parsed once per run from the first header cell.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseHeader {
    /// Total number of classes held in the course.
    pub total_classes: u32,
}

impl CourseHeader {
    /// Parses a header cell of the form `<label>: <integer>`, e.g.
    /// `Total de aulas: 60`.
    pub fn parse(cell: &str) -> Result<Self, RosterError> {
        let (_, count) = cell
            .split_once(": ")
            .ok_or_else(|| RosterError::MalformedHeader(cell.to_string()))?;
        let total_classes = count
            .trim()
            .parse::<u32>()
            .map_err(|_| RosterError::MalformedHeader(cell.to_string()))?;

        if total_classes == 0 {
            return Err(RosterError::ZeroClasses);
        }

        Ok(Self { total_classes })
    }
}

/// One student's row, parsed from the sheet in roster order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    /// Enrollment identifier, kept verbatim.
    pub id:       String,
    /// Student name, kept verbatim.
    pub name:     String,
    /// Number of classes missed.
    pub absences: u32,
    /// The three test scores, each on the 0-100 scale.
    pub tests:    [u32; 3],
}

impl StudentRecord {
    /// Parses one student row.
    ///
    /// Columns past the first six are ignored; the sheet keeps derived columns
    /// there that this tool overwrites.
    ///
    /// * `row`: raw cell values for the row.
    /// * `row_number`: 1-based position within the fetched range, for error
    ///   messages.
    pub fn from_row(row: &[String], row_number: usize) -> Result<Self, RosterError> {
        if row.len() < MIN_COLUMNS {
            return Err(RosterError::TooFewColumns {
                row:      row_number,
                expected: MIN_COLUMNS,
                found:    row.len(),
            });
        }

        let absences = parse_count(&row[2], "absences", row_number)?;
        let tests = [
            parse_score(&row[3], "test 1", row_number)?,
            parse_score(&row[4], "test 2", row_number)?,
            parse_score(&row[5], "test 3", row_number)?,
        ];

        Ok(Self {
            id: row[0].clone(),
            name: row[1].clone(),
            absences,
            tests,
        })
    }
}

/// Parses a non-negative integer cell, reporting the field name on failure.
fn parse_count(value: &str, field: &'static str, row: usize) -> Result<u32, RosterError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| RosterError::InvalidNumber {
            row,
            field,
            value: value.to_string(),
        })
}

/// Parses a test score and checks it against the grading scale.
fn parse_score(value: &str, field: &'static str, row: usize) -> Result<u32, RosterError> {
    let score = parse_count(value, field, row)?;
    if score > MAX_SCORE {
        return Err(RosterError::ScoreOutOfRange { row, value: score });
    }
    Ok(score)
}

/// The parsed course: header metadata plus every student row, in sheet order.
#[derive(Debug, Clone)]
pub struct Roster {
    /// Course metadata from the first header row.
    pub header:   CourseHeader,
    /// Student rows in the order they appear on the sheet.
    pub students: Vec<StudentRecord>,
}

impl Roster {
    /// Parses the full fetched range: course header from row 1, column titles
    /// on row 2 (discarded), students from row 3 on.
    pub fn from_rows(rows: &[Vec<String>]) -> Result<Self, RosterError> {
        let header_cell = rows
            .first()
            .and_then(|row| row.first())
            .ok_or(RosterError::MissingHeader)?;
        let header = CourseHeader::parse(header_cell)?;

        let students = rows
            .iter()
            .enumerate()
            .skip(HEADER_ROWS)
            .map(|(idx, row)| StudentRecord::from_row(row, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { header, students })
    }

    /// Returns true when the range held header rows but no students.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
