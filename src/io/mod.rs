//! Catalog loading and schedule export.
//!
//! Loaders turn a spreadsheet or JSON file into ordered [`SectionRecord`]s;
//! the exporter writes accepted schedules into a timestamped run directory.
//!
//! | Extension | Loader |
//! |-----------|--------|
//! | `.xlsx`, `.xlsm` | [`xlsx::read_records`] |
//! | `.json` | [`json::read_records`] |

pub mod export;
pub mod json;
pub mod xlsx;

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::models::SectionRecord;

pub use export::{calendar_events, format_report, run_dir_name, CalendarEvent, Exporter};

/// Reads catalog rows, choosing the loader from the file extension.
///
/// `sheet` selects a worksheet for spreadsheet input and is ignored for
/// JSON.
pub fn read_records(path: &Path, sheet: Option<&str>) -> Result<Vec<SectionRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let records = match ext.as_str() {
        "xlsx" | "xlsm" => xlsx::read_records(path, sheet)?,
        "json" => json::read_records(path)?,
        _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
    };
    info!(path = %path.display(), rows = records.len(), "catalog loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let err = read_records(Path::new("sections.csv"), None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        let err = read_records(Path::new("sections"), None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_dispatch_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.JSON");
        std::fs::write(&path, r#"[{"title": "MATH101"}, {"title": "PHYS101"}]"#).unwrap();
        let records = read_records(&path, Some("ignored")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].title, "PHYS101");
    }
}
