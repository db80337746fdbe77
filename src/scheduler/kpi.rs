//! Run summary metrics.
//!
//! Counts what happened to every generated combination and summarizes
//! the accepted schedules.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Generated | Combinations produced by the generator |
//! | Rejected (conflict) | At least one conflicting pair |
//! | Rejected (filter) | Conflict-free but outside the time window |
//! | Accepted | Conflict-free and inside the time window |
//! | Acceptance rate | Accepted / Generated |
//! | Shortest day | Minimum `max_time_at_school` among accepted |

use serde::Serialize;

use crate::models::Schedule;

/// Outcome of evaluating one combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// Kept.
    Accepted,
    /// Two sections conflict.
    Conflict,
    /// Outside the daily window.
    Filtered,
}

/// Pipeline counters and accepted-schedule highlights.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Number of catalog groups.
    pub groups: usize,
    /// Number of eligible sections.
    pub sections: usize,
    /// Combinations produced by the generator.
    pub generated: usize,
    /// Combinations rejected by a conflict rule.
    pub rejected_conflict: usize,
    /// Combinations rejected by the time filter.
    pub rejected_filter: usize,
    /// Combinations accepted.
    pub accepted: usize,
    /// Smallest `max_time_at_school` among accepted schedules (hhmm).
    pub shortest_day: Option<u16>,
    /// Latest `earliest_start_time` among accepted schedules (hhmm).
    pub latest_first_class: Option<u16>,
}

impl RunSummary {
    /// Creates an empty summary for a catalog of the given shape.
    pub fn new(groups: usize, sections: usize) -> Self {
        Self {
            groups,
            sections,
            ..Default::default()
        }
    }

    /// Records one evaluated combination.
    pub fn record(&mut self, verdict: Verdict, schedule: &Schedule) {
        self.generated += 1;
        match verdict {
            Verdict::Conflict => self.rejected_conflict += 1,
            Verdict::Filtered => self.rejected_filter += 1,
            Verdict::Accepted => {
                self.accepted += 1;
                let day = schedule.max_time_at_school();
                self.shortest_day = Some(self.shortest_day.map_or(day, |d| d.min(day)));
                let first = schedule.earliest_start_time().value();
                self.latest_first_class =
                    Some(self.latest_first_class.map_or(first, |f| f.max(first)));
            }
        }
    }

    /// Fraction of generated combinations accepted (0.0 when none generated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.generated == 0 {
            0.0
        } else {
            self.accepted as f64 / self.generated as f64
        }
    }

    /// Whether counters add up.
    pub fn is_consistent(&self) -> bool {
        self.generated == self.accepted + self.rejected_conflict + self.rejected_filter
    }
}
