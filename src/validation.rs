//! Input validation for section catalogs.
//!
//! Checks structural integrity of raw rows before they are normalized.
//! Normalization itself never fails (malformed meetings become absent), so
//! this pass is how callers learn what was dropped. Detects:
//! - Empty titles
//! - Meetings with one bound missing, or with `end <= start`
//! - Times outside `0..=2359`
//! - Day flags set on a meeting that has no times
//! - Missing "ME Group" values when grouping by it
//! - Identical rows
//! - Groups whose rows are all excluded
//!
//! Row numbers in messages are 1-based positions in the input.

use std::collections::HashSet;

use crate::models::{GroupBy, MeetingKind, SectionRecord};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A row has a blank course title.
    EmptyTitle,
    /// A meeting has a start without an end, or the reverse.
    IncompleteWindow,
    /// A meeting ends at or before its start.
    InvertedWindow,
    /// A time is outside `0..=2359`.
    TimeOutOfRange,
    /// Day flags are set but the meeting has no times.
    DaysWithoutTimes,
    /// `GroupBy::MeGroup` is used but the row has no group.
    MissingGroup,
    /// A row is identical to an earlier one.
    DuplicateRecord,
    /// Every row of a group is excluded.
    EmptyGroup,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates raw catalog rows.
///
/// Checks:
/// 1. Every row has a title
/// 2. Each meeting is either fully absent or has `start < end`
/// 3. All times are within `0..=2359`
/// 4. Day flags only appear on meetings with times
/// 5. Every row has an "ME Group" when grouping by it
/// 6. No row repeats an earlier one
/// 7. Every group has at least one included row
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_records(records: &[SectionRecord], group_by: GroupBy) -> ValidationResult {
    let mut errors = Vec::new();

    for (i, rec) in records.iter().enumerate() {
        let row = i + 1;

        if rec.title.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyTitle,
                format!("Row {row}: empty course title"),
            ));
        }

        if group_by == GroupBy::MeGroup
            && rec.me_group.as_deref().map_or(true, |g| g.trim().is_empty())
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingGroup,
                format!(
                    "Row {row} ('{}'): no ME group, grouping by title instead",
                    rec.title
                ),
            ));
        }

        check_meeting(
            &mut errors,
            row,
            rec,
            MeetingKind::Lecture,
            rec.lecture_start,
            rec.lecture_end,
            rec.lecture_days,
        );
        check_meeting(
            &mut errors,
            row,
            rec,
            MeetingKind::Lab,
            rec.lab_start,
            rec.lab_end,
            rec.lab_days,
        );
    }

    // Identical rows
    for (i, rec) in records.iter().enumerate() {
        if records[..i].contains(rec) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRecord,
                format!("Row {}: duplicate of an earlier '{}' row", i + 1, rec.title),
            ));
        }
    }

    // Groups with no included row, in first-seen order
    let mut seen = HashSet::new();
    for rec in records {
        let key = rec.group_key(group_by);
        if !seen.insert(key) {
            continue;
        }
        let any_included = records
            .iter()
            .any(|r| r.include && r.group_key(group_by) == key);
        if !any_included {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyGroup,
                format!("Group '{key}' has no included sections; no combination can be formed"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_meeting(
    errors: &mut Vec<ValidationError>,
    row: usize,
    rec: &SectionRecord,
    kind: MeetingKind,
    start: Option<i64>,
    end: Option<i64>,
    days: [bool; 5],
) {
    let label = match kind {
        MeetingKind::Lecture => "lecture",
        MeetingKind::Lab => "lab",
    };

    for value in [start, end].into_iter().flatten() {
        if !(0..=2359).contains(&value) {
            errors.push(ValidationError::new(
                ValidationErrorKind::TimeOutOfRange,
                format!(
                    "Row {row} ('{}'): {label} time {value} is outside 0..=2359",
                    rec.title
                ),
            ));
        }
    }

    match (start, end) {
        (Some(s), Some(e)) if e <= s => errors.push(ValidationError::new(
            ValidationErrorKind::InvertedWindow,
            format!(
                "Row {row} ('{}'): {label} ends at {e}, not after its start {s}",
                rec.title
            ),
        )),
        (Some(_), None) | (None, Some(_)) => errors.push(ValidationError::new(
            ValidationErrorKind::IncompleteWindow,
            format!("Row {row} ('{}'): {label} has only one time bound", rec.title),
        )),
        (None, None) if days.iter().any(|&d| d) => errors.push(ValidationError::new(
            ValidationErrorKind::DaysWithoutTimes,
            format!("Row {row} ('{}'): {label} has days but no times", rec.title),
        )),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday::*;

    fn sample_records() -> Vec<SectionRecord> {
        vec![
            SectionRecord::new("MATH101")
                .with_me_group("Math")
                .with_lecture(&[Mon, Wed, Fri], 900, 950),
            SectionRecord::new("MATH101")
                .with_me_group("Math")
                .with_lecture(&[Tue, Thu], 1100, 1215),
            SectionRecord::new("PHYS101")
                .with_me_group("Physics")
                .with_lecture(&[Mon, Wed], 1000, 1050)
                .with_lab(&[Thu], 1400, 1650),
        ]
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        let records = sample_records();
        assert!(validate_records(&records, GroupBy::Title).is_ok());
        assert!(validate_records(&records, GroupBy::MeGroup).is_ok());
    }

    #[test]
    fn test_empty_title() {
        let records = vec![SectionRecord::new("  ").with_lecture(&[Mon], 900, 1000)];
        assert_eq!(
            kinds(validate_records(&records, GroupBy::Title)),
            vec![ValidationErrorKind::EmptyTitle]
        );
    }

    #[test]
    fn test_inverted_window() {
        let records = vec![SectionRecord::new("BIO200").with_lecture(&[Tue], 1100, 1100)];
        let errors = validate_records(&records, GroupBy::Title).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvertedWindow);
        assert!(errors[0].message.starts_with("Row 1"));
    }

    #[test]
    fn test_incomplete_window() {
        let mut rec = SectionRecord::new("BIO200").with_lecture(&[Tue], 1100, 1200);
        rec.lab_days = [false, false, true, false, false];
        rec.lab_start = Some(1300);
        let errors = validate_records(&[rec], GroupBy::Title).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::IncompleteWindow);
        assert!(errors[0].message.contains("lab"));
    }

    #[test]
    fn test_time_out_of_range() {
        let records = vec![SectionRecord::new("CHEM110").with_lecture(&[Mon], 900, 2500)];
        assert_eq!(
            kinds(validate_records(&records, GroupBy::Title)),
            vec![ValidationErrorKind::TimeOutOfRange]
        );
    }

    #[test]
    fn test_days_without_times() {
        let mut rec = SectionRecord::new("ART100");
        rec.lecture_days = [true; 5];
        assert_eq!(
            kinds(validate_records(&[rec], GroupBy::Title)),
            vec![ValidationErrorKind::DaysWithoutTimes]
        );
    }

    #[test]
    fn test_missing_group_only_in_me_group_mode() {
        let records = vec![SectionRecord::new("ENG101").with_lecture(&[Fri], 800, 900)];
        assert!(validate_records(&records, GroupBy::Title).is_ok());
        assert_eq!(
            kinds(validate_records(&records, GroupBy::MeGroup)),
            vec![ValidationErrorKind::MissingGroup]
        );
    }

    #[test]
    fn test_duplicate_record() {
        let mut records = sample_records();
        records.push(records[0].clone());
        let errors = validate_records(&records, GroupBy::Title).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateRecord);
        assert!(errors[0].message.starts_with("Row 4"));
    }

    #[test]
    fn test_empty_group() {
        let records = vec![
            SectionRecord::new("MATH101").with_lecture(&[Mon], 900, 1000),
            SectionRecord::new("PHYS101")
                .with_lecture(&[Tue], 900, 1000)
                .with_include(false),
        ];
        let errors = validate_records(&records, GroupBy::Title).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyGroup);
        assert!(errors[0].message.contains("PHYS101"));
    }

    #[test]
    fn test_multiple_errors() {
        let records = vec![
            SectionRecord::new("").with_lecture(&[Mon], 1000, 900),
            SectionRecord::new("X").with_lab(&[Mon], -5, 900),
        ];
        let errors = validate_records(&records, GroupBy::Title).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
