use colored::{ColoredString, Colorize};
use itertools::Itertools;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, object::Rows},
};

use super::{
    roster::StudentRecord,
    rule::{Situation, SituationResult},
};

/// One student's graded outcome, pairing the parsed record with the rule's
/// result. Outcome `i` always corresponds to student row `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentOutcome {
    /// Parsed student record, in roster order.
    pub student: StudentRecord,
    /// Result of the grading rule for this student.
    pub result:  SituationResult,
}

impl StudentOutcome {
    /// Test average used by the grading rule, recomputed for display.
    pub fn average(&self) -> f64 {
        f64::from(self.student.tests.iter().sum::<u32>()) / 3.0
    }
}

/// Row shape for the terminal overview table.
#[derive(Tabled)]
struct OverviewRow {
    /// Enrollment identifier.
    #[tabled(rename = "Id")]
    id:          String,
    /// Student name.
    #[tabled(rename = "Student")]
    name:        String,
    /// Number of classes missed.
    #[tabled(rename = "Absences")]
    absences:    u32,
    /// Test average, two decimal places.
    #[tabled(rename = "Average")]
    average:     String,
    /// Situation label as written to the sheet.
    #[tabled(rename = "Situation")]
    situation:   String,
    /// Final-exam score, or a dash when none applies.
    #[tabled(rename = "Final Exam")]
    final_grade: String,
}

impl From<&StudentOutcome> for OverviewRow {
    fn from(outcome: &StudentOutcome) -> Self {
        Self {
            id:          outcome.student.id.clone(),
            name:        outcome.student.name.clone(),
            absences:    outcome.student.absences,
            average:     format!("{:.2}", outcome.average()),
            situation:   outcome.result.situation.to_string(),
            final_grade: match outcome.result.situation {
                Situation::ExameFinal => outcome.result.final_grade.to_string(),
                _ => "-".to_string(),
            },
        }
    }
}

/// Colored per-situation counts for the summary line below the table.
fn summary_line(outcomes: &[StudentOutcome]) -> String {
    let counts = outcomes
        .iter()
        .map(|outcome| outcome.result.situation)
        .counts();

    let piece = |situation: Situation, paint: fn(&str) -> ColoredString| {
        let count = counts.get(&situation).copied().unwrap_or(0);
        let text = format!("{situation}: {count}");
        paint(&text).to_string()
    };

    [
        piece(Situation::Aprovado, |text| text.green()),
        piece(Situation::ExameFinal, |text| text.yellow()),
        piece(Situation::ReprovadoPorNota, |text| text.red()),
        piece(Situation::ReprovadoPorFalta, |text| text.red()),
    ]
    .join(" | ")
}

/// Renders the graded roster as a table on stderr, followed by a summary of
/// counts per situation.
pub fn show_overview(outcomes: &[StudentOutcome]) {
    let rows: Vec<OverviewRow> = outcomes.iter().map(OverviewRow::from).collect();

    eprintln!(
        "{}",
        Table::new(&rows)
            .with(Panel::header("Course Overview"))
            .with(
                Modify::new(Rows::first())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(Style::modern())
    );
    eprintln!("{}", summary_line(outcomes));
}
