use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::{
    config::OutputLayout,
    grade::{Roster, StudentOutcome, calculate_situation, show_overview},
    sheets::{SheetsGateway, ValueUpdate},
    util::Stopwatch,
};

/// Summary of one completed grading pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSummary {
    /// Number of students graded.
    pub students:      usize,
    /// Cells the spreadsheet service reported as updated; zero for previews
    /// and empty rosters.
    pub updated_cells: u64,
}

/// Fetches the configured range and parses it into a roster.
async fn fetch_roster(gateway: &impl SheetsGateway) -> Result<Roster> {
    tracing::info!("Getting course data from the spreadsheet service");
    let rows = gateway.fetch_rows().await?;
    Roster::from_rows(&rows).context("Failed to parse the fetched course range")
}

/// Applies the grading rule to every student, preserving roster order.
fn grade_all(roster: &Roster) -> Vec<StudentOutcome> {
    roster
        .students
        .iter()
        .map(|student| StudentOutcome {
            result:  calculate_situation(student, roster.header.total_classes),
            student: student.clone(),
        })
        .collect()
}

/// Builds the two single-column blocks written back to the sheet: situation
/// labels at the layout's situation anchor, final-exam scores at the adjacent
/// anchor. Value `i` of each block lands on student row `i`.
pub fn column_updates(outcomes: &[StudentOutcome], layout: &OutputLayout) -> Vec<ValueUpdate> {
    let situations: Vec<Vec<Value>> = outcomes
        .iter()
        .map(|outcome| vec![Value::from(outcome.result.situation.to_string())])
        .collect();
    let final_grades: Vec<Vec<Value>> = outcomes
        .iter()
        .map(|outcome| vec![Value::from(outcome.result.final_grade)])
        .collect();

    vec![
        ValueUpdate::builder()
            .range(layout.situation_cell())
            .values(situations)
            .build(),
        ValueUpdate::builder()
            .range(layout.final_grade_cell())
            .values(final_grades)
            .build(),
    ]
}

/// Runs the full batch job: fetch, grade every student, render the overview,
/// and write both graded columns back in a single update.
pub async fn run(gateway: &impl SheetsGateway, layout: &OutputLayout) -> Result<JobSummary> {
    let watch = Stopwatch::start();
    tracing::info!("Job has started");

    let roster = fetch_roster(gateway).await?;

    tracing::info!("Calculating students recovery status and final grade");
    let outcomes = grade_all(&roster);
    show_overview(&outcomes);

    if outcomes.is_empty() {
        // The service rejects empty value blocks, and there is nothing to
        // update anyway.
        tracing::warn!("The fetched range held no student rows; nothing to write");
        return Ok(JobSummary {
            students:      0,
            updated_cells: 0,
        });
    }

    tracing::info!("Sending spreadsheet updates");
    let updated_cells = gateway.write_rows(column_updates(&outcomes, layout)).await?;

    tracing::info!("The job finished, execution time: {:.2} seconds", watch.elapsed_secs());
    Ok(JobSummary {
        students: outcomes.len(),
        updated_cells,
    })
}

/// Grades the roster and renders the overview without writing anything back.
pub async fn preview(gateway: &impl SheetsGateway) -> Result<JobSummary> {
    let roster = fetch_roster(gateway).await?;
    let outcomes = grade_all(&roster);
    show_overview(&outcomes);

    Ok(JobSummary {
        students:      outcomes.len(),
        updated_cells: 0,
    })
}

/// Prints a JSON description of the course as parsed from the sheet.
pub async fn info(gateway: &impl SheetsGateway) -> Result<()> {
    let roster = fetch_roster(gateway).await?;

    let description = json!({
        "total_classes": roster.header.total_classes,
        "students": roster.students.len(),
    });
    println!("{}", serde_json::to_string_pretty(&description)?);

    Ok(())
}
