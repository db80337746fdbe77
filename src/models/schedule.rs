//! Schedule (candidate combination) model.
//!
//! A schedule holds exactly one section per group, in catalog group order.
//! Aggregate statistics are computed once at construction; the schedule
//! exposes no way to change its sections afterwards.
//!
//! # Statistics
//!
//! | Statistic | Definition |
//! |-----------|-----------|
//! | Earliest start | min occurring start (default [`LATEST_POSSIBLE_TIME`]) |
//! | Latest end | max occurring end (default [`EARLIEST_POSSIBLE_TIME`]) |
//! | Max time at school | elapsed hhmm duration between the two |

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::time::{format_duration, EARLIEST_POSSIBLE_TIME, LATEST_POSSIBLE_TIME};
use super::{MilitaryTime, Section};
use crate::conflict::ConflictChecker;

/// One candidate combination of sections.
#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    sections: Vec<Arc<Section>>,
    earliest_start_time: MilitaryTime,
    latest_end_time: MilitaryTime,
    max_time_at_school: u16,
}

/// A conflicting pair found in a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictReport<'a> {
    /// First section of the pair (schedule order).
    pub first: &'a Section,
    /// Second section of the pair.
    pub second: &'a Section,
    /// Name of the rule that fired.
    pub rule: &'static str,
    /// Description of the rule that fired.
    pub description: &'static str,
}

impl Schedule {
    /// Creates a schedule and computes its statistics.
    pub fn new(sections: Vec<Arc<Section>>) -> Self {
        let earliest_start_time = sections
            .iter()
            .filter_map(|s| s.earliest_start())
            .min()
            .unwrap_or(LATEST_POSSIBLE_TIME);
        let latest_end_time = sections
            .iter()
            .filter_map(|s| s.latest_end())
            .max()
            .unwrap_or(EARLIEST_POSSIBLE_TIME);
        let max_time_at_school = earliest_start_time.span_to(latest_end_time);

        Self {
            sections,
            earliest_start_time,
            latest_end_time,
            max_time_at_school,
        }
    }

    /// Sections in group order.
    pub fn sections(&self) -> &[Arc<Section>] {
        &self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the schedule is empty (catalog with no groups).
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Earliest start across all occurring meetings.
    pub fn earliest_start_time(&self) -> MilitaryTime {
        self.earliest_start_time
    }

    /// Latest end across all occurring meetings.
    pub fn latest_end_time(&self) -> MilitaryTime {
        self.latest_end_time
    }

    /// Span between earliest start and latest end, hhmm-encoded.
    pub fn max_time_at_school(&self) -> u16 {
        self.max_time_at_school
    }

    /// Course titles in group order.
    pub fn titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title()).collect()
    }

    /// Whether any pair of sections conflicts.
    ///
    /// Checks all `C(n, 2)` pairs and stops at the first conflict.
    pub fn has_conflicts(&self, checker: &ConflictChecker) -> bool {
        self.pairs().any(|(a, b)| checker.conflicts(a, b))
    }

    /// First conflicting pair and the rule that fired, if any.
    pub fn first_conflict(&self, checker: &ConflictChecker) -> Option<ConflictReport<'_>> {
        self.pairs().find_map(|(first, second)| {
            checker
                .first_rule(first, second)
                .map(|rule| ConflictReport {
                    first,
                    second,
                    rule: rule.name(),
                    description: rule.description(),
                })
        })
    }

    /// Whether every section stays inside `[filter_before, filter_after]`.
    ///
    /// Per section, the earliest occurring start is compared against
    /// `filter_before` and the earliest occurring end against
    /// `filter_after`. Sections without occurring meetings always pass.
    pub fn satisfies_filters(&self, filter_before: MilitaryTime, filter_after: MilitaryTime) -> bool {
        self.sections.iter().all(|section| {
            let starts_too_early = section
                .earliest_start()
                .is_some_and(|start| start < filter_before);
            let ends_too_late = section
                .earliest_end()
                .is_some_and(|end| end > filter_after);
            !starts_too_early && !ends_too_late
        })
    }

    fn pairs(&self) -> impl Iterator<Item = (&Section, &Section)> + '_ {
        self.sections.iter().enumerate().flat_map(move |(i, a)| {
            self.sections[i + 1..]
                .iter()
                .map(move |b| (a.as_ref(), b.as_ref()))
        })
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            write!(f, "{section}\n\n")?;
        }
        writeln!(f, "Earliest Start Time: {}", self.earliest_start_time)?;
        writeln!(f, "Latest End Time: {}", self.latest_end_time)?;
        writeln!(
            f,
            "Maximum Time At School: {}",
            format_duration(self.max_time_at_school)
        )
    }
}
