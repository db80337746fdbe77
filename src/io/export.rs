//! Schedule export.
//!
//! Each run gets its own directory under the output root, named after the
//! local start time (`run_YYYYmmdd_HHMMSS`):
//!
//! | File | Content |
//! |------|---------|
//! | `combinations.txt` | Text report of every exported schedule |
//! | `combination_NNN.csv` | Calendar events of schedule NNN |
//! | `calendars.xlsx` | One worksheet per schedule, same columns as the CSVs |
//! | `summary.json` | Run counters and per-schedule statistics |

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Days, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{info, warn};

use super::{json, xlsx};
use crate::config::{default_calendar_start, PlannerConfig};
use crate::error::Result;
use crate::models::{MilitaryTime, Schedule, Weekday};
use crate::scheduler::PlanOutcome;

/// Column names shared by the CSV and XLSX calendars.
pub const CSV_HEADER: [&str; 5] = ["Subject", "Start Date", "End Date", "Start Time", "End Time"];

const REPORT_SEPARATOR: &str = "-#-#-#-#-#-";

/// One calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub subject: String,
    pub date: NaiveDate,
    pub start_time: MilitaryTime,
    pub end_time: MilitaryTime,
}

impl CalendarEvent {
    /// Row values in [`CSV_HEADER`] order.
    pub fn fields(&self) -> [String; 5] {
        let date = self.date.format("%Y-%m-%d").to_string();
        [
            self.subject.clone(),
            date.clone(),
            date,
            self.start_time.to_hhmm_string(),
            self.end_time.to_hhmm_string(),
        ]
    }
}

/// Expands a schedule into dated events.
///
/// For each section and weekday (Mon..Fri), the lecture event comes before
/// the lab event. `calendar_start` is the Monday of the exported week.
/// Meetings that do not occur produce nothing.
pub fn calendar_events(schedule: &Schedule, calendar_start: NaiveDate) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    for section in schedule.sections() {
        for day in Weekday::ALL {
            for (kind, window) in section.meetings() {
                let Some((start_time, end_time)) = window.occurrence() else {
                    continue;
                };
                if !window.days().contains(day) {
                    continue;
                }
                let Some(date) = calendar_start.checked_add_days(Days::new(day.offset() as u64))
                else {
                    continue;
                };
                events.push(CalendarEvent {
                    subject: kind.subject(section.title()),
                    date,
                    start_time,
                    end_time,
                });
            }
        }
    }
    events
}

/// Renders the text report.
pub fn format_report(schedules: &[Schedule]) -> String {
    let mut out = format!("Begin Output\n\n{REPORT_SEPARATOR}\n\n");
    for (i, schedule) in schedules.iter().enumerate() {
        out.push_str(&format!("Combination {}:\n\n{schedule}\n", i + 1));
        out.push_str(&format!("{REPORT_SEPARATOR}\n\n"));
    }
    out.push_str(&format!("Number of combinations >>> {}", schedules.len()));
    out
}

/// Run directory name for a start time.
pub fn run_dir_name(started: NaiveDateTime) -> String {
    started.format("run_%Y%m%d_%H%M%S").to_string()
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Writes the events of one schedule as CSV.
pub fn write_csv(path: &Path, events: &[CalendarEvent]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}", CSV_HEADER.join(","))?;
    for event in events {
        let row: Vec<String> = event.fields().iter().map(|f| csv_field(f)).collect();
        writeln!(writer, "{}", row.join(","))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes run artifacts.
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    calendar_start: NaiveDate,
    max_exports: Option<usize>,
}

impl Exporter {
    /// Creates an exporter writing under `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            calendar_start: default_calendar_start(),
            max_exports: None,
        }
    }

    /// Creates an exporter from configuration.
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            calendar_start: config.calendar_start_date,
            max_exports: config.max_exports,
        }
    }

    /// Sets the Monday of the exported week.
    pub fn with_calendar_start(mut self, date: NaiveDate) -> Self {
        self.calendar_start = date;
        self
    }

    /// Caps the number of exported schedules.
    pub fn with_max_exports(mut self, max: usize) -> Self {
        self.max_exports = Some(max);
        self
    }

    /// Exports into a new run directory named after the current local time.
    pub fn export(&self, outcome: &PlanOutcome) -> Result<PathBuf> {
        self.export_at(outcome, Local::now().naive_local())
    }

    /// Exports into the run directory for `started`.
    ///
    /// Returns the run directory.
    pub fn export_at(&self, outcome: &PlanOutcome, started: NaiveDateTime) -> Result<PathBuf> {
        let run_dir = self.output_dir.join(run_dir_name(started));
        fs::create_dir_all(&run_dir)?;

        let limit = self.max_exports.unwrap_or(usize::MAX);
        let exported = &outcome.schedules[..outcome.schedules.len().min(limit)];
        if exported.len() < outcome.schedules.len() {
            warn!(
                accepted = outcome.schedules.len(),
                exported = exported.len(),
                "export capped by max_exports"
            );
        }

        fs::write(run_dir.join("combinations.txt"), format_report(exported))?;
        for (i, schedule) in exported.iter().enumerate() {
            let events = calendar_events(schedule, self.calendar_start);
            write_csv(&run_dir.join(format!("combination_{:03}.csv", i + 1)), &events)?;
        }
        xlsx::write_calendars(&run_dir.join("calendars.xlsx"), exported, self.calendar_start)?;
        json::write_summary(&run_dir.join("summary.json"), &outcome.summary, exported)?;

        info!(dir = %run_dir.display(), schedules = exported.len(), "export finished");
        Ok(run_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday::*;
    use crate::models::{Catalog, GroupBy, SectionRecord};
    use crate::scheduler::Planner;

    fn outcome() -> PlanOutcome {
        let records = vec![
            SectionRecord::new("MATH101").with_lecture(&[Mon, Wed], 900, 950),
            SectionRecord::new("MATH101").with_lecture(&[Tue], 900, 1015),
            SectionRecord::new("PHYS101")
                .with_lecture(&[Mon], 1000, 1050)
                .with_lab(&[Thu], 1400, 1650),
        ];
        Planner::new().plan(&Catalog::from_records(&records, GroupBy::Title))
    }

    fn started() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 20)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_calendar_events() {
        let outcome = outcome();
        let schedule = &outcome.schedules[0];
        let events = calendar_events(schedule, default_calendar_start());

        let rows: Vec<[String; 5]> = events.iter().map(CalendarEvent::fields).collect();
        let expected = [
            ["MATH101", "2025-04-28", "2025-04-28", "09:00", "09:50"],
            ["MATH101", "2025-04-30", "2025-04-30", "09:00", "09:50"],
            ["PHYS101", "2025-04-28", "2025-04-28", "10:00", "10:50"],
            ["PHYS101 Lab", "2025-05-01", "2025-05-01", "14:00", "16:50"],
        ];
        assert_eq!(rows.len(), expected.len());
        for (row, exp) in rows.iter().zip(expected) {
            assert_eq!(row, &exp.map(String::from));
        }
    }

    #[test]
    fn test_absent_meeting_has_no_events() {
        let mut rec = SectionRecord::new("ART100");
        rec.lab_days = [true; 5];
        let catalog = Catalog::from_records(&[rec], GroupBy::Title);
        let outcome = Planner::new().plan(&catalog);
        assert!(calendar_events(&outcome.schedules[0], default_calendar_start()).is_empty());
    }

    #[test]
    fn test_format_report() {
        let outcome = outcome();
        let report = format_report(&outcome.schedules);
        assert!(report.starts_with("Begin Output\n\n-#-#-#-#-#-\n\nCombination 1:\n\n"));
        assert!(report.contains("Course Title: PHYS101"));
        assert!(report.contains("Lab Time: 2:00 PM to 4:50 PM"));
        assert!(report.ends_with("-#-#-#-#-#-\n\nNumber of combinations >>> 2"));

        assert_eq!(
            format_report(&[]),
            "Begin Output\n\n-#-#-#-#-#-\n\nNumber of combinations >>> 0"
        );
    }

    #[test]
    fn test_run_dir_name() {
        assert_eq!(run_dir_name(started()), "run_20250820_140509");
    }

    #[test]
    fn test_csv_quoting() {
        assert_eq!(csv_field("MATH101"), "MATH101");
        assert_eq!(csv_field("Music, Intro"), "\"Music, Intro\"");
        assert_eq!(csv_field("The \"Lab\""), "\"The \"\"Lab\"\"\"");
    }

    #[test]
    fn test_export_writes_run_directory() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = outcome();
        let run_dir = Exporter::new(dir.path())
            .export_at(&outcome, started())
            .unwrap();

        assert_eq!(run_dir, dir.path().join("run_20250820_140509"));
        for file in [
            "combinations.txt",
            "combination_001.csv",
            "combination_002.csv",
            "calendars.xlsx",
            "summary.json",
        ] {
            assert!(run_dir.join(file).is_file(), "{file}");
        }

        let csv = fs::read_to_string(run_dir.join("combination_002.csv")).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Subject,Start Date,End Date,Start Time,End Time")
        );
        assert_eq!(lines.next(), Some("MATH101,2025-04-29,2025-04-29,09:00,10:15"));
    }

    #[test]
    fn test_export_respects_max_exports() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = outcome();
        let run_dir = Exporter::new(dir.path())
            .with_calendar_start(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
            .with_max_exports(1)
            .export_at(&outcome, started())
            .unwrap();

        assert!(run_dir.join("combination_001.csv").is_file());
        assert!(!run_dir.join("combination_002.csv").exists());
        let report = fs::read_to_string(run_dir.join("combinations.txt")).unwrap();
        assert!(report.ends_with("Number of combinations >>> 1"));
        let csv = fs::read_to_string(run_dir.join("combination_001.csv")).unwrap();
        assert!(csv.contains("2025-09-01"));
    }

    #[test]
    fn test_export_empty_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = PlanOutcome {
            schedules: Vec::new(),
            summary: Default::default(),
        };
        let run_dir = Exporter::new(dir.path())
            .export_at(&outcome, started())
            .unwrap();
        assert!(run_dir.join("calendars.xlsx").is_file());
        assert!(!run_dir.join("combination_001.csv").exists());
    }
}
