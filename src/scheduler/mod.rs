//! Combination generation, evaluation and run metrics.
//!
//! # Algorithm
//!
//! `CombinationGenerator` enumerates the cartesian product of the catalog
//! groups. `Planner` streams each combination through the conflict checker
//! and the `TimeFilter`, keeps the survivors and sorts them.
//!
//! # KPI
//!
//! `RunSummary` counts generated, rejected and accepted combinations.

mod filter;
mod generator;
mod kpi;
mod pipeline;

pub use filter::TimeFilter;
pub use generator::CombinationGenerator;
pub use kpi::{RunSummary, Verdict};
pub use pipeline::{sort_schedules, PlanOutcome, Planner, SortKey};
