//! Section (schedulable offering) model.
//!
//! A section is one specific offering of a course: a lecture window and a
//! lab window, either of which may be absent. Sections are created once
//! from raw input rows ([`SectionRecord`]) and never mutated afterwards.
//!
//! # Grouping
//! Every section belongs to exactly one group. A schedule picks one section
//! per group, so the group key decides which sections are mutually
//! exclusive alternatives:
//! - [`GroupBy::Title`]: sections of the same course title are alternatives.
//! - [`GroupBy::MeGroup`]: an explicit "ME Group" column decides.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{DayPattern, MilitaryTime, TimeWindow, Weekday};

/// How sections are partitioned into mutually-exclusive groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Group by course title.
    #[default]
    Title,
    /// Group by the explicit mutually-exclusive group field.
    MeGroup,
}

/// Lecture or lab component of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeetingKind {
    Lecture,
    Lab,
}

impl MeetingKind {
    /// Calendar subject for a meeting of this kind.
    pub fn subject(self, title: &str) -> String {
        match self {
            MeetingKind::Lecture => title.to_string(),
            MeetingKind::Lab => format!("{title} Lab"),
        }
    }
}

/// One raw catalog row, before normalization.
///
/// Time fields are raw integers as read from the source; blank or
/// non-numeric cells are `None`. Out-of-range values are kept here and
/// dropped during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Course title.
    pub title: String,
    /// Explicit mutually-exclusive group.
    #[serde(default)]
    pub me_group: Option<String>,
    /// Lecture days (Mon..Fri).
    #[serde(default)]
    pub lecture_days: [bool; 5],
    /// Lab days (Mon..Fri).
    #[serde(default)]
    pub lab_days: [bool; 5],
    #[serde(default)]
    pub lecture_start: Option<i64>,
    #[serde(default)]
    pub lecture_end: Option<i64>,
    #[serde(default)]
    pub lab_start: Option<i64>,
    #[serde(default)]
    pub lab_end: Option<i64>,
    /// Whether this row is eligible for scheduling.
    #[serde(default = "default_include")]
    pub include: bool,
}

fn default_include() -> bool {
    true
}

impl SectionRecord {
    /// Creates an included record with no meetings.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            me_group: None,
            lecture_days: [false; 5],
            lab_days: [false; 5],
            lecture_start: None,
            lecture_end: None,
            lab_start: None,
            lab_end: None,
            include: true,
        }
    }

    /// Sets the mutually-exclusive group.
    pub fn with_me_group(mut self, group: impl Into<String>) -> Self {
        self.me_group = Some(group.into());
        self
    }

    /// Sets the lecture meeting.
    pub fn with_lecture(mut self, days: &[Weekday], start: i64, end: i64) -> Self {
        self.lecture_days = DayPattern::of(days).flags();
        self.lecture_start = Some(start);
        self.lecture_end = Some(end);
        self
    }

    /// Sets the lab meeting.
    pub fn with_lab(mut self, days: &[Weekday], start: i64, end: i64) -> Self {
        self.lab_days = DayPattern::of(days).flags();
        self.lab_start = Some(start);
        self.lab_end = Some(end);
        self
    }

    /// Sets the inclusion flag.
    pub fn with_include(mut self, include: bool) -> Self {
        self.include = include;
        self
    }

    /// Group key under the given grouping mode.
    ///
    /// Falls back to the title when `MeGroup` is requested but the record
    /// has no (or a blank) group.
    pub fn group_key(&self, group_by: GroupBy) -> &str {
        match group_by {
            GroupBy::Title => &self.title,
            GroupBy::MeGroup => self
                .me_group
                .as_deref()
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .unwrap_or(&self.title),
        }
    }
}

/// A schedulable section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Section {
    title: String,
    group_key: String,
    lecture: TimeWindow,
    lab: TimeWindow,
}

impl Section {
    /// Creates a section from already-normalized windows.
    pub fn new(
        title: impl Into<String>,
        group_key: impl Into<String>,
        lecture: TimeWindow,
        lab: TimeWindow,
    ) -> Self {
        Self {
            title: title.into(),
            group_key: group_key.into(),
            lecture,
            lab,
        }
    }

    /// Normalizes a raw record.
    ///
    /// Malformed meetings (out-of-range times, a missing bound, or
    /// `end <= start`) become absent windows and a warning is logged.
    pub fn from_record(record: &SectionRecord, group_by: GroupBy) -> Self {
        let lecture = normalize_window(
            &record.title,
            MeetingKind::Lecture,
            record.lecture_start,
            record.lecture_end,
            record.lecture_days,
        );
        let lab = normalize_window(
            &record.title,
            MeetingKind::Lab,
            record.lab_start,
            record.lab_end,
            record.lab_days,
        );
        Self::new(
            record.title.clone(),
            record.group_key(group_by),
            lecture,
            lab,
        )
    }

    /// Course title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Group key.
    pub fn group_key(&self) -> &str {
        &self.group_key
    }

    /// Lecture window.
    pub fn lecture(&self) -> &TimeWindow {
        &self.lecture
    }

    /// Lab window.
    pub fn lab(&self) -> &TimeWindow {
        &self.lab
    }

    /// Both meetings, lecture first.
    pub fn meetings(&self) -> [(MeetingKind, &TimeWindow); 2] {
        [
            (MeetingKind::Lecture, &self.lecture),
            (MeetingKind::Lab, &self.lab),
        ]
    }

    /// Whether at least one meeting occurs.
    pub fn has_meetings(&self) -> bool {
        self.lecture.occurs() || self.lab.occurs()
    }

    /// Earliest occurring start.
    pub fn earliest_start(&self) -> Option<MilitaryTime> {
        self.occurring().map(|(s, _)| s).min()
    }

    /// Earliest occurring end.
    pub fn earliest_end(&self) -> Option<MilitaryTime> {
        self.occurring().map(|(_, e)| e).min()
    }

    /// Latest occurring end.
    pub fn latest_end(&self) -> Option<MilitaryTime> {
        self.occurring().map(|(_, e)| e).max()
    }

    fn occurring(&self) -> impl Iterator<Item = (MilitaryTime, MilitaryTime)> + '_ {
        [&self.lecture, &self.lab]
            .into_iter()
            .filter_map(TimeWindow::occurrence)
    }
}

fn normalize_window(
    title: &str,
    kind: MeetingKind,
    start: Option<i64>,
    end: Option<i64>,
    days: [bool; 5],
) -> TimeWindow {
    let days = DayPattern::new(days);
    let start_time = start.and_then(MilitaryTime::from_raw);
    let end_time = end.and_then(MilitaryTime::from_raw);
    if start.is_some() != start_time.is_some() || end.is_some() != end_time.is_some() {
        warn!(
            section = title,
            meeting = ?kind,
            ?start,
            ?end,
            "meeting time outside 0..=2359, treating meeting as absent"
        );
        return TimeWindow::absent(days);
    }
    TimeWindow::from_bounds(start_time, end_time, days).unwrap_or_else(|defect| {
        warn!(
            section = title,
            meeting = ?kind,
            %defect,
            "malformed meeting, treating meeting as absent"
        );
        TimeWindow::absent(days)
    })
}

fn fmt_time(time: Option<MilitaryTime>) -> String {
    time.map(|t| t.to_string())
        .unwrap_or_else(|| "None".to_string())
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Course Title: {}", self.title)?;
        writeln!(f, "Lecture Days: {}", self.lecture.days())?;
        writeln!(
            f,
            "Lecture Time: {} to {}",
            fmt_time(self.lecture.start()),
            fmt_time(self.lecture.end())
        )?;
        writeln!(f, "Lab Days: {}", self.lab.days())?;
        write!(
            f,
            "Lab Time: {} to {}",
            fmt_time(self.lab.start()),
            fmt_time(self.lab.end())
        )
    }
}
