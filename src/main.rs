#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # pauta
//! ## Introduction
//!
//! A batch grader for course spreadsheets. It fetches the class roster from a
//! remote spreadsheet, computes each student's situation (approved, failed by
//! absence, failed by grade, or final-exam-eligible with a computed score),
//! and writes both result columns back in a single update.
//!
//! ## Configuration
//!
//! Credentials and addressing come from the environment (a `.env` file is
//! honored): `PAUTA_SPREADSHEET_ID` and `PAUTA_ACCESS_TOKEN` are required for
//! any command that reaches the spreadsheet service; `PAUTA_RANGE`,
//! `PAUTA_SITUATION_CELL`, and `PAUTA_FINAL_GRADE_CELL` override the
//! defaults.

use anyhow::{Context, Result};
use bpaf::*;
use dotenvy::dotenv;
use pauta::{config, job, sheets::SheetsClient};
use self_update::cargo_crate_version;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Updates binary based on github releases
fn update() -> Result<()> {
    self_update::backends::github::Update::configure()
        .repo_owner("dhruvdh")
        .repo_name("pauta")
        .bin_name("pauta")
        .no_confirm(true)
        .show_download_progress(true)
        .show_output(false)
        .current_version(cargo_crate_version!())
        .build()?
        .update()?;

    eprintln!("Update done!");
    Ok(())
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Grade every student and write the results back
    Run,
    /// Grade every student without writing anything back
    Preview,
    /// Print information about the course
    Info,
    /// Update the command
    Update,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    let run = pure(Cmd::Run)
        .to_options()
        .command("run")
        .help("Grade every student and write the results back to the sheet");

    let preview = pure(Cmd::Preview)
        .to_options()
        .command("preview")
        .help("Grade every student and print the overview without writing");

    let info = pure(Cmd::Info)
        .to_options()
        .command("info")
        .help("Prints a JSON description of the course as parsed");

    let update = pure(Cmd::Update)
        .to_options()
        .command("update")
        .help("Update the pauta command");

    let cmd = construct!([run, preview, info, update]);

    cmd.to_options()
        .descr("Grades a course spreadsheet and writes each student's situation back")
        .run()
}

/// Builds the configured gateway, failing with guidance when credentials are
/// absent.
fn gateway() -> Result<SheetsClient> {
    config::sheets_client().context(
        "PAUTA_SPREADSHEET_ID and PAUTA_ACCESS_TOKEN must be set to reach the spreadsheet service",
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let cmd = options();

    match cmd {
        Cmd::Run => {
            let summary = job::run(&gateway()?, &config::output_layout()).await?;
            tracing::info!(
                "Updated {} cell(s) for {} student(s)",
                summary.updated_cells,
                summary.students
            );
        }
        Cmd::Preview => {
            let summary = job::preview(&gateway()?).await?;
            tracing::info!("Previewed {} student(s); nothing was written", summary.students);
        }
        Cmd::Info => job::info(&gateway()?).await?,
        Cmd::Update => {
            match update() {
                Ok(_) => {}
                Err(e) => eprintln!("{e}"),
            };
        }
    };

    Ok(())
}
