//! Combination pipeline.
//!
//! # Algorithm
//!
//! 1. Enumerate every one-section-per-group combination (lazily).
//! 2. Drop combinations with a conflicting pair.
//! 3. Drop combinations outside the daily time window.
//! 4. Stable-sort the survivors by the configured key.
//!
//! # Complexity
//! O(k^n * n^2) for n groups of k alternatives: each of the k^n
//! combinations checks C(n, 2) pairs. Only accepted schedules are kept in
//! memory.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{CombinationGenerator, RunSummary, TimeFilter, Verdict};
use crate::config::PlannerConfig;
use crate::conflict::ConflictChecker;
use crate::error::Result;
use crate::models::{Catalog, Schedule};

/// Ordering applied to accepted schedules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Latest end time, ascending.
    #[default]
    LatestEnd,
    /// Earliest start time, descending (latest first class first).
    EarliestStart,
    /// Time at school, ascending.
    TimeAtSchool,
    /// Keep generator order.
    Generated,
}

/// Stable-sorts schedules; ties keep their relative order.
pub fn sort_schedules(schedules: &mut [Schedule], key: SortKey) {
    match key {
        SortKey::LatestEnd => schedules.sort_by_key(|s| s.latest_end_time()),
        SortKey::EarliestStart => {
            schedules.sort_by_key(|s| std::cmp::Reverse(s.earliest_start_time()))
        }
        SortKey::TimeAtSchool => schedules.sort_by_key(|s| s.max_time_at_school()),
        SortKey::Generated => {}
    }
}

/// Result of a planning run.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    /// Accepted schedules, sorted.
    pub schedules: Vec<Schedule>,
    /// Run counters.
    pub summary: RunSummary,
}

/// Runs generation, evaluation and sorting over a catalog.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Catalog, GroupBy, SectionRecord, Weekday};
/// use u_timetable::scheduler::Planner;
///
/// let records = vec![
///     SectionRecord::new("MATH101").with_lecture(&[Weekday::Mon], 900, 1000),
///     SectionRecord::new("MATH101").with_lecture(&[Weekday::Tue], 900, 1000),
///     SectionRecord::new("PHYS101").with_lecture(&[Weekday::Mon], 900, 1000),
/// ];
/// let catalog = Catalog::from_records(&records, GroupBy::Title);
///
/// let outcome = Planner::new().plan(&catalog);
/// assert_eq!(outcome.summary.generated, 2);
/// assert_eq!(outcome.schedules.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    checker: ConflictChecker,
    filter: TimeFilter,
    sort_key: SortKey,
}

impl Planner {
    /// Creates a planner with the standard conflict rules, no time
    /// restriction, and latest-end ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a planner from configuration.
    ///
    /// Fails fast on an invalid configuration or filter window.
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let filter = TimeFilter::from_raw(config.filter.before, config.filter.after)?;
        config.validate()?;
        Ok(Self::new()
            .with_checker(ConflictChecker::with_duplicate_titles(
                config.allow_duplicate_titles,
            ))
            .with_filter(filter)
            .with_sort_key(config.sort))
    }

    /// Sets the conflict checker.
    pub fn with_checker(mut self, checker: ConflictChecker) -> Self {
        self.checker = checker;
        self
    }

    /// Sets the time filter.
    pub fn with_filter(mut self, filter: TimeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the sort key.
    pub fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    /// Conflict checker in use.
    pub fn checker(&self) -> &ConflictChecker {
        &self.checker
    }

    /// Time filter in use.
    pub fn filter(&self) -> &TimeFilter {
        &self.filter
    }

    /// Evaluates one combination.
    pub fn evaluate(&self, schedule: &Schedule) -> Verdict {
        if let Some(report) = schedule.first_conflict(&self.checker) {
            debug!(
                first = report.first.title(),
                second = report.second.title(),
                rule = report.rule,
                reason = report.description,
                "combination rejected"
            );
            Verdict::Conflict
        } else if !self.filter.accepts(schedule) {
            debug!(titles = ?schedule.titles(), "combination outside time window");
            Verdict::Filtered
        } else {
            Verdict::Accepted
        }
    }

    /// Runs the full pipeline.
    pub fn plan(&self, catalog: &Catalog) -> PlanOutcome {
        let generator = CombinationGenerator::new(catalog);
        info!(
            groups = catalog.group_count(),
            sections = catalog.section_count(),
            combinations = ?generator.total(),
            rules = ?self.checker.rule_names(),
            before = self.filter.before().value(),
            after = self.filter.after().value(),
            "planning started"
        );

        let mut summary = RunSummary::new(catalog.group_count(), catalog.section_count());
        let mut schedules = Vec::new();
        for schedule in generator {
            let verdict = self.evaluate(&schedule);
            summary.record(verdict, &schedule);
            if verdict == Verdict::Accepted {
                schedules.push(schedule);
            }
        }
        sort_schedules(&mut schedules, self.sort_key);

        info!(
            generated = summary.generated,
            accepted = summary.accepted,
            rejected_conflict = summary.rejected_conflict,
            rejected_filter = summary.rejected_filter,
            "planning finished"
        );
        PlanOutcome { schedules, summary }
    }
}
