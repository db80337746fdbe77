//! Timetable domain models.
//!
//! Provides the core data types for enumerating weekly course timetables:
//! a catalog of sections grouped into mutually-exclusive alternatives, and
//! schedules picking one section per group.
//!
//! # Domain Mappings
//!
//! | u-timetable | Registrar | Spreadsheet |
//! |-------------|-----------|-------------|
//! | Section | Course offering (CRN) | One row |
//! | TimeWindow | Lecture / lab meeting | Day flags + start/end columns |
//! | Catalog | Term offerings | The whole sheet |
//! | Schedule | Candidate timetable | One exported calendar |

mod calendar;
mod catalog;
mod schedule;
mod section;
pub mod time;

pub use calendar::{days_overlap, times_overlap, DayPattern, TimeWindow, WindowDefect, Weekday};
pub use catalog::{Catalog, SectionGroup};
pub use schedule::{ConflictReport, Schedule};
pub use section::{GroupBy, MeetingKind, Section, SectionRecord};
pub use time::MilitaryTime;
