//! Built-in conflict rules.
//!
//! - **DuplicateTitle**: two sections of the same course title never share
//!   a schedule, even when they sit in different groups.
//! - **MeetingOverlap**: any lecture/lab pairing meeting on a common day at
//!   intersecting times.

use super::ConflictRule;
use crate::models::Section;

/// Same course title.
#[derive(Debug, Clone, Copy)]
pub struct DuplicateTitle;

impl ConflictRule for DuplicateTitle {
    fn name(&self) -> &'static str {
        "DuplicateTitle"
    }

    fn conflicts(&self, a: &Section, b: &Section) -> bool {
        a.title() == b.title()
    }

    fn description(&self) -> &'static str {
        "Sections share a course title"
    }
}

/// Overlapping meetings.
///
/// Checks the four (lecture/lab) x (lecture/lab) pairings. A pairing only
/// fires when both windows occur, share a weekday, and their daily
/// intervals intersect.
#[derive(Debug, Clone, Copy)]
pub struct MeetingOverlap;

impl ConflictRule for MeetingOverlap {
    fn name(&self) -> &'static str {
        "MeetingOverlap"
    }

    fn conflicts(&self, a: &Section, b: &Section) -> bool {
        a.meetings().iter().any(|(_, wa)| {
            b.meetings()
                .iter()
                .any(|(_, wb)| wa.overlaps(wb))
        })
    }

    fn description(&self) -> &'static str {
        "Meetings overlap on a shared weekday"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday::*;
    use crate::models::{GroupBy, SectionRecord};

    fn section(rec: SectionRecord) -> Section {
        Section::from_record(&rec, GroupBy::Title)
    }

    #[test]
    fn test_duplicate_title() {
        let a = section(SectionRecord::new("MATH101").with_lecture(&[Mon], 900, 1000));
        let b = section(SectionRecord::new("MATH101").with_lecture(&[Tue], 1300, 1400));
        let c = section(SectionRecord::new("PHYS101"));
        assert!(DuplicateTitle.conflicts(&a, &b));
        assert!(!DuplicateTitle.conflicts(&a, &c));
    }

    #[test]
    fn test_lecture_lecture() {
        let a = section(SectionRecord::new("A").with_lecture(&[Mon], 900, 1000));
        let b = section(SectionRecord::new("B").with_lecture(&[Mon], 900, 1000));
        let c = section(SectionRecord::new("C").with_lecture(&[Mon], 1000, 1100));
        assert!(MeetingOverlap.conflicts(&a, &b));
        assert!(!MeetingOverlap.conflicts(&a, &c)); // touching endpoints
    }

    #[test]
    fn test_lab_lecture_pairings() {
        let lab_mon = section(SectionRecord::new("A").with_lab(&[Mon], 1300, 1600));
        let lec_mon = section(SectionRecord::new("B").with_lecture(&[Mon], 1400, 1500));
        let lec_tue = section(SectionRecord::new("C").with_lecture(&[Tue], 1400, 1500));
        assert!(MeetingOverlap.conflicts(&lab_mon, &lec_mon));
        assert!(MeetingOverlap.conflicts(&lec_mon, &lab_mon));
        assert!(!MeetingOverlap.conflicts(&lab_mon, &lec_tue));
    }

    #[test]
    fn test_lab_lab() {
        let a = section(SectionRecord::new("A").with_lab(&[Thu], 1300, 1600));
        let b = section(SectionRecord::new("B").with_lab(&[Thu], 1530, 1700));
        assert!(MeetingOverlap.conflicts(&a, &b));
    }

    #[test]
    fn test_same_day_different_times() {
        let a = section(
            SectionRecord::new("A")
                .with_lecture(&[Mon, Wed], 800, 900)
                .with_lab(&[Wed], 1300, 1500),
        );
        let b = section(
            SectionRecord::new("B")
                .with_lecture(&[Wed], 1000, 1100)
                .with_lab(&[Mon], 1500, 1700),
        );
        assert!(!MeetingOverlap.conflicts(&a, &b));
    }

    #[test]
    fn test_absent_meeting_cannot_conflict() {
        let mut rec = SectionRecord::new("A");
        rec.lecture_days = [true; 5];
        let days_without_times = section(rec);
        let b = section(SectionRecord::new("B").with_lecture(&[Mon], 900, 1000));
        assert!(!MeetingOverlap.conflicts(&days_without_times, &b));
    }
}
