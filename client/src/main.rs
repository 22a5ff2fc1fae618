//! `kemii-roster`: department reports over a Kemii roster.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use kemii_client::ClientSettings;
use kemii_client::cli::{
    CliError, count_lines, fetch_roster, filter_lines, load_catalog, load_roster, match_lines,
};
use kemii_departments::RosterMember;
use tokio::runtime::Builder;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `kemii-roster` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "kemii-roster",
    about = "Match skills to departments and report on a Kemii roster",
    version
)]
struct CliArgs {
    /// Department catalog JSON. Falls back to `KEMII_CATALOG_PATH`, then the
    /// built-in catalog.
    #[arg(long, global = true, value_name = "path")]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Print `department-id<TAB>available-count` for every department.
    Counts {
        /// Roster JSON file. Fetched from `KEMII_API_BASE_URL` when omitted.
        #[arg(long, value_name = "path")]
        roster: Option<PathBuf>,
    },
    /// Print display names of members affiliated with a department.
    Filter {
        /// Roster JSON file. Fetched from `KEMII_API_BASE_URL` when omitted.
        #[arg(long, value_name = "path")]
        roster: Option<PathBuf>,
        /// Department identifier, such as `design`.
        #[arg(long, value_name = "id")]
        department: String,
    },
    /// Print the departments a free-text label denotes.
    Match {
        /// Skill or affiliation label.
        #[arg(long, value_name = "text")]
        label: String,
        /// Only check this department.
        #[arg(long, value_name = "id")]
        department: Option<String>,
    },
}

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let Ok(runtime) = Builder::new_current_thread()
        .enable_all()
        .build()
        .inspect_err(|e| error!(error = %e, "failed to create Tokio runtime"))
    else {
        return ExitCode::FAILURE;
    };

    let Ok(lines) = runtime
        .block_on(run(args))
        .inspect_err(|e| error!(error = %e, "kemii-roster failed"))
    else {
        return ExitCode::FAILURE;
    };
    write_lines(&lines)
}

async fn run(args: CliArgs) -> Result<Vec<String>, CliError> {
    let settings = ClientSettings::load("kemii-roster")?;
    let catalog = load_catalog(args.catalog.as_deref(), &settings)?;

    match args.command {
        Command::Counts { roster } => {
            let members = roster_members(roster.as_deref(), &settings).await?;
            Ok(count_lines(&catalog, &members))
        }
        Command::Filter { roster, department } => {
            let members = roster_members(roster.as_deref(), &settings).await?;
            filter_lines(&catalog, &members, &department)
        }
        Command::Match { label, department } => {
            match_lines(&catalog, &label, department.as_deref())
        }
    }
}

async fn roster_members(
    path: Option<&Path>,
    settings: &ClientSettings,
) -> Result<Vec<RosterMember>, CliError> {
    let Some(file) = path else {
        return fetch_roster(settings).await;
    };
    load_roster(file)
}

fn write_lines(lines: &[String]) -> ExitCode {
    let mut stdout = io::stdout().lock();
    for line in lines {
        if let Err(e) = writeln!(stdout, "{line}") {
            error!(error = %e, "failed to write output");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
