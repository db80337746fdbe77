//! Run configuration.
//!
//! Load planner options from a TOML file so runs can be repeated without
//! long command lines. Every field has a default; an empty file is valid.
//!
//! # Examples
//!
//! ```
//! use u_timetable::config::PlannerConfig;
//! use u_timetable::models::GroupBy;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     input = "Fall 2025 Sections.xlsx"
//!     group_by = "me_group"
//!     calendar_start_date = "2025-04-28"
//!
//!     [filter]
//!     before = 900
//!     after = 1700
//! "#).unwrap();
//!
//! assert_eq!(config.group_by, GroupBy::MeGroup);
//! assert_eq!(config.filter.before, 900);
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::GroupBy;
use crate::scheduler::SortKey;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default Monday the exported calendar week starts on.
pub fn default_calendar_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 28).unwrap_or_default()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("runs")
}

/// Planner and export options.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Catalog file (`.xlsx` or `.json`).
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Worksheet name (first sheet when unset).
    #[serde(default)]
    pub sheet: Option<String>,

    /// Directory receiving one sub-directory per run.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// How sections are grouped into alternatives.
    #[serde(default)]
    pub group_by: GroupBy,

    /// Monday of the exported calendar week.
    #[serde(default = "default_calendar_start")]
    pub calendar_start_date: NaiveDate,

    /// Upper bound on exported schedules (all when unset).
    #[serde(default)]
    pub max_exports: Option<usize>,

    /// Ordering of accepted schedules.
    #[serde(default)]
    pub sort: SortKey,

    /// Disables the duplicate-title conflict rule.
    #[serde(default)]
    pub allow_duplicate_titles: bool,

    /// Daily time window.
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Daily time window bounds in hhmm encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Sections starting before this are rejected.
    #[serde(default = "FilterConfig::default_before")]
    pub before: i64,
    /// Sections ending after this are rejected.
    #[serde(default = "FilterConfig::default_after")]
    pub after: i64,
}

impl FilterConfig {
    fn default_before() -> i64 {
        0
    }

    fn default_after() -> i64 {
        2359
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            before: Self::default_before(),
            after: Self::default_after(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            input: None,
            sheet: None,
            output_dir: default_output_dir(),
            group_by: GroupBy::default(),
            calendar_start_date: default_calendar_start(),
            max_exports: None,
            sort: SortKey::default(),
            allow_duplicate_titles: false,
            filter: FilterConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_exports == Some(0) {
            return Err(ConfigError::Invalid(
                "max_exports must be at least 1".to_string(),
            ));
        }
        if self.filter.before > self.filter.after {
            return Err(ConfigError::Invalid(format!(
                "filter.before ({}) is later than filter.after ({})",
                self.filter.before, self.filter.after
            )));
        }
        Ok(())
    }

    /// Sets the catalog path.
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the grouping mode.
    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    /// Sets the daily window.
    pub fn with_filter(mut self, before: i64, after: i64) -> Self {
        self.filter = FilterConfig { before, after };
        self
    }

    /// Sets the export cap.
    pub fn with_max_exports(mut self, max: usize) -> Self {
        self.max_exports = Some(max);
        self
    }
}
