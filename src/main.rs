//! `u-timetable` command-line entry point.
//!
//! Loads a section catalog, enumerates every conflict-free timetable and
//! writes the results into a timestamped run directory.
//!
//! # Usage
//!
//! ```bash
//! u-timetable --input "Fall 2025 Sections.xlsx" --before 900 --after 1700
//! u-timetable --config timetable.toml -v
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: log filter (default: `u_timetable=info`)

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use u_timetable::config::PlannerConfig;
use u_timetable::io::{self, Exporter};
use u_timetable::models::{Catalog, GroupBy};
use u_timetable::scheduler::Planner;
use u_timetable::validation::validate_records;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GroupByArg {
    Title,
    MeGroup,
}

impl From<GroupByArg> for GroupBy {
    fn from(arg: GroupByArg) -> Self {
        match arg {
            GroupByArg::Title => GroupBy::Title,
            GroupByArg::MeGroup => GroupBy::MeGroup,
        }
    }
}

/// Enumerate conflict-free course timetables.
#[derive(Debug, Parser)]
#[command(name = "u-timetable", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog file (.xlsx or .json).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Worksheet name (default: first sheet).
    #[arg(long)]
    sheet: Option<String>,

    /// Output root directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Reject sections starting before this time (hhmm).
    #[arg(long)]
    before: Option<i64>,

    /// Reject sections ending after this time (hhmm).
    #[arg(long)]
    after: Option<i64>,

    /// How sections are grouped into alternatives.
    #[arg(long, value_enum)]
    group_by: Option<GroupByArg>,

    /// Allow two sections with the same title in one timetable.
    #[arg(long)]
    allow_duplicate_titles: bool,

    /// Abort when the catalog has validation issues.
    #[arg(long)]
    strict: bool,

    /// Plan without writing any files.
    #[arg(long)]
    dry_run: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<PlannerConfig> {
        let mut config = match &self.config {
            Some(path) => PlannerConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => PlannerConfig::default(),
        };
        if let Some(input) = self.input {
            config.input = Some(input);
        }
        if self.sheet.is_some() {
            config.sheet = self.sheet;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(before) = self.before {
            config.filter.before = before;
        }
        if let Some(after) = self.after {
            config.filter.after = after;
        }
        if let Some(group_by) = self.group_by {
            config.group_by = group_by.into();
        }
        config.allow_duplicate_titles |= self.allow_duplicate_titles;
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "u_timetable=info",
        1 => "u_timetable=debug",
        _ => "u_timetable=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let strict = cli.strict;
    let dry_run = cli.dry_run;
    let config = cli.into_config()?;

    let Some(input) = config.input.clone() else {
        bail!("no catalog given: pass --input or set `input` in the config file");
    };
    let records = io::read_records(&input, config.sheet.as_deref())
        .with_context(|| format!("failed to read catalog {}", input.display()))?;

    if let Err(errors) = validate_records(&records, config.group_by) {
        for error in &errors {
            warn!(kind = ?error.kind, "{}", error.message);
        }
        if strict {
            bail!("catalog has {} validation issue(s)", errors.len());
        }
    }

    let catalog = Catalog::from_records(&records, config.group_by);
    let planner = Planner::from_config(&config).context("invalid filter window")?;
    let outcome = planner.plan(&catalog);

    if dry_run {
        info!("dry run, nothing written");
    } else {
        let run_dir = Exporter::from_config(&config)
            .export(&outcome)
            .context("failed to export schedules")?;
        info!(dir = %run_dir.display(), "results written");
    }

    println!(
        "Done. {} valid combinations found.",
        outcome.schedules.len()
    );
    Ok(())
}
