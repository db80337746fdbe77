//! Daily time-window filter.
//!
//! Restricts accepted schedules to sections meeting inside
//! `[before, after]`. See [`Schedule::satisfies_filters`] for the exact
//! per-section comparison.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{MilitaryTime, Schedule};

/// Allowed daily window, validated at construction.
///
/// # Examples
///
/// ```
/// use u_timetable::scheduler::TimeFilter;
///
/// let filter = TimeFilter::from_raw(800, 1700).unwrap();
/// assert_eq!(filter.before().value(), 800);
///
/// // Inverted bounds fail fast.
/// assert!(TimeFilter::from_raw(1700, 800).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFilter {
    before: MilitaryTime,
    after: MilitaryTime,
}

impl TimeFilter {
    /// Creates a filter. Fails if `before > after`.
    pub fn new(before: MilitaryTime, after: MilitaryTime) -> Result<Self> {
        if before > after {
            return Err(Error::InvalidFilter { before, after });
        }
        Ok(Self { before, after })
    }

    /// Creates a filter from raw hhmm integers.
    pub fn from_raw(before: i64, after: i64) -> Result<Self> {
        let before = MilitaryTime::from_raw(before).ok_or(Error::InvalidTime(before))?;
        let after = MilitaryTime::from_raw(after).ok_or(Error::InvalidTime(after))?;
        Self::new(before, after)
    }

    /// A filter that accepts every schedule (`0000..2359`).
    pub fn unrestricted() -> Self {
        Self {
            before: MilitaryTime::MIDNIGHT,
            after: MilitaryTime::END_OF_DAY,
        }
    }

    /// Lower bound.
    pub fn before(&self) -> MilitaryTime {
        self.before
    }

    /// Upper bound.
    pub fn after(&self) -> MilitaryTime {
        self.after
    }

    /// Whether the schedule passes.
    #[inline]
    pub fn accepts(&self, schedule: &Schedule) -> bool {
        schedule.satisfies_filters(self.before, self.after)
    }

    /// Keeps the schedules that pass, preserving order.
    pub fn apply(&self, mut schedules: Vec<Schedule>) -> Vec<Schedule> {
        schedules.retain(|s| self.accepts(s));
        schedules
    }
}

impl Default for TimeFilter {
    fn default() -> Self {
        Self::unrestricted()
    }
}
