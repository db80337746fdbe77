//! JSON catalog input and run summary output.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::time::format_duration;
use crate::models::{Schedule, SectionRecord};
use crate::scheduler::RunSummary;

/// Reads a JSON array of section records.
pub fn read_records(path: &Path) -> Result<Vec<SectionRecord>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Per-schedule statistics written to `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleStats {
    /// 1-based position in the exported order.
    pub index: usize,
    /// Course titles in group order.
    pub titles: Vec<String>,
    /// Earliest start (hhmm).
    pub earliest_start_time: u16,
    /// Latest end (hhmm).
    pub latest_end_time: u16,
    /// Time at school, `H:MM`.
    pub max_time_at_school: String,
}

impl ScheduleStats {
    /// Collects statistics for one schedule.
    pub fn new(index: usize, schedule: &Schedule) -> Self {
        Self {
            index,
            titles: schedule.titles().into_iter().map(String::from).collect(),
            earliest_start_time: schedule.earliest_start_time().value(),
            latest_end_time: schedule.latest_end_time().value(),
            max_time_at_school: format_duration(schedule.max_time_at_school()),
        }
    }
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    summary: &'a RunSummary,
    exported: usize,
    schedules: Vec<ScheduleStats>,
}

/// Writes the run summary and per-schedule statistics.
pub fn write_summary(path: &Path, summary: &RunSummary, schedules: &[Schedule]) -> Result<()> {
    let document = SummaryDocument {
        summary,
        exported: schedules.len(),
        schedules: schedules
            .iter()
            .enumerate()
            .map(|(i, s)| ScheduleStats::new(i + 1, s))
            .collect(),
    };
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}
