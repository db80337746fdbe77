//! Course timetable enumeration.
//!
//! Given a catalog of course sections, enumerates every combination that
//! takes one section per course group, rejects combinations with
//! overlapping meetings or meetings outside a daily time window, and
//! exports the rest as calendars.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `MilitaryTime`, `TimeWindow`, `Section`,
//!   `Catalog`, `Schedule`
//! - **`conflict`**: Pairwise conflict rules and the `ConflictChecker`
//! - **`scheduler`**: Combination generator, time filter, pipeline, run summary
//! - **`validation`**: Catalog row checks (incomplete windows, missing groups)
//! - **`io`**: XLSX / JSON loaders and text, CSV, XLSX, JSON exporters
//! - **`config`**: TOML run configuration
//!
//! # Architecture
//!
//! ```text
//! rows ──► Catalog ──► CombinationGenerator ──► Planner ──► Exporter
//!                                              │
//!                                  ConflictChecker + TimeFilter
//! ```
//!
//! Evaluation is total: malformed meetings are normalized into absent
//! windows when the catalog is built, so conflicts, filters and
//! aggregates never fail. Errors only come from configuration and I/O.

pub mod config;
pub mod conflict;
pub mod error;
pub mod io;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Error, Result};
