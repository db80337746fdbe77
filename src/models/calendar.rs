//! Weekly meeting windows.
//!
//! A [`TimeWindow`] is a half-open daily interval `[start, end)` repeated on
//! the weekdays of its [`DayPattern`]. Either bound may be absent, in which
//! case the window does not *occur*: it never overlaps anything and is left
//! out of every aggregate.
//!
//! # Overlap
//! Two windows overlap iff they share at least one weekday AND their daily
//! intervals intersect. Touching endpoints (`900-1000` vs `1000-1100`) do
//! not overlap.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::MilitaryTime;

/// A day of the (five-day) teaching week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Weekday {
    /// All weekdays in calendar order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    /// Offset from Monday (0..=4).
    #[inline]
    pub fn offset(self) -> usize {
        self as usize
    }

    /// Short English name.
    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
        }
    }
}

/// Weekday-presence pattern (Mon..Fri).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayPattern([bool; 5]);

impl DayPattern {
    /// Pattern with no days set.
    pub const NONE: Self = Self([false; 5]);

    /// Creates a pattern from raw flags.
    pub const fn new(days: [bool; 5]) -> Self {
        Self(days)
    }

    /// Creates a pattern with the given days set.
    pub fn of(days: &[Weekday]) -> Self {
        let mut flags = [false; 5];
        for day in days {
            flags[day.offset()] = true;
        }
        Self(flags)
    }

    /// Raw flags.
    pub fn flags(&self) -> [bool; 5] {
        self.0
    }

    /// Whether `day` is set.
    #[inline]
    pub fn contains(&self, day: Weekday) -> bool {
        self.0[day.offset()]
    }

    /// Whether no day is set.
    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|&d| d)
    }

    /// Set days in calendar order.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(|d| self.contains(*d))
    }

    /// Whether the two patterns share at least one day.
    pub fn overlaps(&self, other: &Self) -> bool {
        days_overlap(&self.0, &other.0)
    }
}

impl fmt::Display for DayPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.days().map(Weekday::short_name).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Whether two weekday patterns share a day.
pub fn days_overlap(days1: &[bool; 5], days2: &[bool; 5]) -> bool {
    days1.iter().zip(days2).any(|(a, b)| *a && *b)
}

/// Whether two half-open intervals `[start1, end1)` and `[start2, end2)`
/// intersect.
///
/// Both intervals must be present; callers guard absence.
#[inline]
pub fn times_overlap(
    start1: MilitaryTime,
    end1: MilitaryTime,
    start2: MilitaryTime,
    end2: MilitaryTime,
) -> bool {
    start1.max(start2) < end1.min(end2)
}

/// Why a pair of raw bounds cannot form an occurring window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowDefect {
    /// Only one of start/end is present.
    Incomplete,
    /// `end <= start`.
    Inverted,
}

impl fmt::Display for WindowDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowDefect::Incomplete => write!(f, "start and end must both be present"),
            WindowDefect::Inverted => write!(f, "end must be later than start"),
        }
    }
}

/// A weekly meeting window: a daily interval on a set of weekdays.
///
/// Invariant: `start` is present iff `end` is present, and `end > start`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TimeWindow {
    start: Option<MilitaryTime>,
    end: Option<MilitaryTime>,
    days: DayPattern,
}

impl TimeWindow {
    /// Creates an occurring window. Returns `None` if `end <= start`.
    pub fn new(start: MilitaryTime, end: MilitaryTime, days: DayPattern) -> Option<Self> {
        (end > start).then_some(Self {
            start: Some(start),
            end: Some(end),
            days,
        })
    }

    /// A window with no meeting times (days kept for reference only).
    pub fn absent(days: DayPattern) -> Self {
        Self {
            start: None,
            end: None,
            days,
        }
    }

    /// Builds a window from optional bounds, enforcing the invariant.
    ///
    /// Both bounds absent yields an absent window. Any other violation is
    /// reported so the caller can decide how to recover.
    pub fn from_bounds(
        start: Option<MilitaryTime>,
        end: Option<MilitaryTime>,
        days: DayPattern,
    ) -> Result<Self, WindowDefect> {
        match (start, end) {
            (None, None) => Ok(Self::absent(days)),
            (Some(s), Some(e)) => Self::new(s, e, days).ok_or(WindowDefect::Inverted),
            _ => Err(WindowDefect::Incomplete),
        }
    }

    /// Start time, if present.
    pub fn start(&self) -> Option<MilitaryTime> {
        self.start
    }

    /// End time, if present.
    pub fn end(&self) -> Option<MilitaryTime> {
        self.end
    }

    /// Weekday pattern.
    pub fn days(&self) -> &DayPattern {
        &self.days
    }

    /// `(start, end)` when the window occurs.
    #[inline]
    pub fn occurrence(&self) -> Option<(MilitaryTime, MilitaryTime)> {
        self.start.zip(self.end)
    }

    /// Whether both bounds are present.
    #[inline]
    pub fn occurs(&self) -> bool {
        self.occurrence().is_some()
    }

    /// Length of the daily interval in minutes (0 if absent).
    pub fn duration_minutes(&self) -> u32 {
        self.occurrence()
            .map(|(s, e)| e.total_minutes().saturating_sub(s.total_minutes()))
            .unwrap_or(0)
    }

    /// Whether two windows meet on a common day at intersecting times.
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self.occurrence(), other.occurrence()) {
            (Some((s1, e1)), Some((s2, e2))) => {
                self.days.overlaps(&other.days) && times_overlap(s1, e1, s2, e2)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(v: u16) -> MilitaryTime {
        MilitaryTime::new(v).unwrap()
    }

    fn window(start: u16, end: u16, days: &[Weekday]) -> TimeWindow {
        TimeWindow::new(t(start), t(end), DayPattern::of(days)).unwrap()
    }

    #[test]
    fn test_times_overlap_half_open() {
        assert!(!times_overlap(t(100), t(200), t(200), t(300))); // touching
        assert!(times_overlap(t(100), t(300), t(200), t(400)));
        assert!(times_overlap(t(900), t(1200), t(1000), t(1100))); // nested
        assert!(!times_overlap(t(900), t(1000), t(1300), t(1400)));
    }

    #[test]
    fn test_days_overlap() {
        let mwf = [true, false, true, false, true];
        let tr = [false, true, false, true, false];
        let fri = [false, false, false, false, true];
        assert!(!days_overlap(&mwf, &tr));
        assert!(days_overlap(&mwf, &fri));
        assert!(!days_overlap(&[false; 5], &[false; 5]));
    }

    #[test]
    fn test_day_pattern() {
        let p = DayPattern::of(&[Weekday::Wed, Weekday::Mon]);
        assert!(p.contains(Weekday::Mon));
        assert!(!p.contains(Weekday::Tue));
        assert_eq!(p.days().collect::<Vec<_>>(), vec![Weekday::Mon, Weekday::Wed]);
        assert_eq!(p.to_string(), "[Mon, Wed]");
        assert!(DayPattern::NONE.is_empty());
    }

    #[test]
    fn test_window_invariant() {
        let days = DayPattern::of(&[Weekday::Mon]);
        assert!(TimeWindow::new(t(1000), t(900), days).is_none());
        assert!(TimeWindow::new(t(900), t(900), days).is_none());
        assert_eq!(
            TimeWindow::from_bounds(Some(t(900)), None, days),
            Err(WindowDefect::Incomplete)
        );
        assert_eq!(
            TimeWindow::from_bounds(Some(t(1000)), Some(t(900)), days),
            Err(WindowDefect::Inverted)
        );
        let absent = TimeWindow::from_bounds(None, None, days).unwrap();
        assert!(!absent.occurs());
        assert_eq!(absent.duration_minutes(), 0);
    }

    #[test]
    fn test_window_overlap() {
        let a = window(900, 1000, &[Weekday::Mon, Weekday::Wed]);
        let b = window(930, 1030, &[Weekday::Wed]);
        let c = window(930, 1030, &[Weekday::Tue]);
        let d = window(1000, 1100, &[Weekday::Mon]);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c)); // different days
        assert!(!a.overlaps(&d)); // touching
    }

    #[test]
    fn test_absent_window_never_overlaps() {
        let a = window(900, 1000, &[Weekday::Mon]);
        let absent = TimeWindow::absent(DayPattern::of(&[Weekday::Mon]));
        assert!(!a.overlaps(&absent));
        assert!(!absent.overlaps(&absent));
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(window(845, 1015, &[Weekday::Fri]).duration_minutes(), 90);
    }
}
