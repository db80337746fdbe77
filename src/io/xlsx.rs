//! Spreadsheet catalog input and calendar workbook output.
//!
//! # Catalog layout
//!
//! The first row is the header. Required columns:
//!
//! | Column | Content |
//! |--------|---------|
//! | Course Title | Course identifier |
//! | Lec Mon .. Lec Fri | Lecture day flags |
//! | Lab Mon .. Lab Fri | Lab day flags |
//! | Lec Start, Lec End | Lecture times (hhmm) |
//! | Lab Start, Lab End | Lab times (hhmm) |
//!
//! Optional columns: `ME Group` (mutually-exclusive group) and `Include`
//! (blank means included). Column order does not matter.

use std::collections::HashMap;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use super::export::{calendar_events, CSV_HEADER};
use crate::error::{Error, Result};
use crate::models::SectionRecord;
use crate::models::Schedule;

pub const TITLE_COLUMN: &str = "Course Title";
pub const GROUP_COLUMN: &str = "ME Group";
pub const INCLUDE_COLUMN: &str = "Include";
pub const LECTURE_DAY_COLUMNS: [&str; 5] = ["Lec Mon", "Lec Tue", "Lec Wed", "Lec Thu", "Lec Fri"];
pub const LAB_DAY_COLUMNS: [&str; 5] = ["Lab Mon", "Lab Tue", "Lab Wed", "Lab Thu", "Lab Fri"];
pub const LECTURE_START_COLUMN: &str = "Lec Start";
pub const LECTURE_END_COLUMN: &str = "Lec End";
pub const LAB_START_COLUMN: &str = "Lab Start";
pub const LAB_END_COLUMN: &str = "Lab End";

/// Reads section records from a worksheet (first sheet when `sheet` is `None`).
pub fn read_records(path: &Path, sheet: Option<&str>) -> Result<Vec<SectionRecord>> {
    let book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| Error::Spreadsheet(format!("{}: {e}", path.display())))?;
    let worksheet = match sheet {
        Some(name) => book
            .get_sheet_by_name(name)
            .ok_or_else(|| Error::MissingSheet(name.to_string()))?,
        None => book
            .get_sheet(&0)
            .ok_or_else(|| Error::MissingSheet("(first sheet)".to_string()))?,
    };

    let (max_col, max_row) = worksheet.get_highest_column_and_row();
    debug!(
        sheet = worksheet.get_name(),
        columns = max_col,
        rows = max_row,
        "reading worksheet"
    );
    let rows: Vec<Vec<String>> = (1..=max_row)
        .map(|row| {
            (1..=max_col)
                .map(|col| worksheet.get_value((col, row)))
                .collect()
        })
        .collect();
    records_from_rows(&rows)
}

/// Column positions resolved from the header row.
struct Header {
    title: usize,
    group: Option<usize>,
    include: Option<usize>,
    lecture_days: [usize; 5],
    lab_days: [usize; 5],
    lecture_start: usize,
    lecture_end: usize,
    lab_start: usize,
    lab_end: usize,
}

impl Header {
    fn parse(cells: &[String]) -> Result<Self> {
        let positions: HashMap<&str, usize> = cells
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim(), i))
            .collect();
        let required = |name: &str| -> Result<usize> {
            positions
                .get(name)
                .copied()
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };
        let days = |names: [&str; 5]| -> Result<[usize; 5]> {
            let mut out = [0; 5];
            for (slot, name) in out.iter_mut().zip(names) {
                *slot = required(name)?;
            }
            Ok(out)
        };

        Ok(Self {
            title: required(TITLE_COLUMN)?,
            group: positions.get(GROUP_COLUMN).copied(),
            include: positions.get(INCLUDE_COLUMN).copied(),
            lecture_days: days(LECTURE_DAY_COLUMNS)?,
            lab_days: days(LAB_DAY_COLUMNS)?,
            lecture_start: required(LECTURE_START_COLUMN)?,
            lecture_end: required(LECTURE_END_COLUMN)?,
            lab_start: required(LAB_START_COLUMN)?,
            lab_end: required(LAB_END_COLUMN)?,
        })
    }

    fn record(&self, row: &[String]) -> SectionRecord {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
        let flags = |cols: [usize; 5]| cols.map(|c| parse_flag_cell(cell(c)));

        SectionRecord {
            title: cell(self.title).trim().to_string(),
            me_group: self
                .group
                .map(|c| cell(c).trim())
                .filter(|g| !g.is_empty())
                .map(String::from),
            lecture_days: flags(self.lecture_days),
            lab_days: flags(self.lab_days),
            lecture_start: parse_time_cell(cell(self.lecture_start)),
            lecture_end: parse_time_cell(cell(self.lecture_end)),
            lab_start: parse_time_cell(cell(self.lab_start)),
            lab_end: parse_time_cell(cell(self.lab_end)),
            include: self.include.map_or(true, |c| {
                let value = cell(c).trim();
                value.is_empty() || parse_flag_cell(value)
            }),
        }
    }
}

/// Converts a grid of cell strings (header first) into records.
///
/// Rows whose cells are all blank are skipped.
pub fn records_from_rows(rows: &[Vec<String>]) -> Result<Vec<SectionRecord>> {
    let Some((header, body)) = rows.split_first() else {
        return Err(Error::MissingColumn(TITLE_COLUMN.to_string()));
    };
    let header = Header::parse(header)?;
    Ok(body
        .iter()
        .filter(|row| row.iter().any(|c| !c.trim().is_empty()))
        .map(|row| header.record(row))
        .collect())
}

/// Parses a time cell.
///
/// Accepts integers (`930`), spreadsheet floats (`930.0`, truncated) and
/// `H:MM` text. Blank, `NaN` and non-numeric cells are `None`.
pub fn parse_time_cell(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(v) = value.parse::<i64>() {
        return Some(v);
    }
    if let Ok(v) = value.parse::<f64>() {
        return v.is_finite().then_some(v.trunc() as i64);
    }
    let (hour, minute) = value.split_once(':')?;
    let hour: i64 = hour.trim().parse().ok()?;
    let minute: i64 = minute.trim().parse().ok()?;
    Some(hour * 100 + minute)
}

/// Parses a day or include flag. Blank, `NaN` and infinite cells are `false`.
pub fn parse_flag_cell(value: &str) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "x" => true,
        other => other
            .parse::<f64>()
            .is_ok_and(|v| v.is_finite() && v != 0.0),
    }
}

/// Writes one worksheet per schedule with its calendar events.
pub fn write_calendars(
    path: &Path,
    schedules: &[Schedule],
    calendar_start: chrono::NaiveDate,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    for (i, schedule) in schedules.iter().enumerate() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(format!("Combination {}", i + 1))?;
        for (col, name) in (0u16..).zip(CSV_HEADER) {
            worksheet.write_string_with_format(0, col, name, &bold)?;
        }
        worksheet.set_column_width(0, 24)?;

        for (row, event) in (1u32..).zip(calendar_events(schedule, calendar_start)) {
            for (col, value) in (0u16..).zip(event.fields()) {
                worksheet.write_string(row, col, value)?;
            }
        }
    }
    if schedules.is_empty() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("No Combinations")?;
        worksheet.write_string(0, 0, "No valid combinations found.")?;
    }

    workbook.save(path)?;
    Ok(())
}
