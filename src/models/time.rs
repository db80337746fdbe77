//! Military (hhmm) time encoding.
//!
//! A time of day is stored as `hour * 100 + minute` (e.g. `1430` = 2:30 PM).
//! Values are only range-checked against `[0, 2359]`; the minute part is not
//! checked against 59, so `1360` is accepted. The encoding is compared as a
//! plain integer and only decomposed into hours and minutes when computing
//! elapsed durations or formatting for display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default earliest start of a schedule with no occurring meetings.
pub const LATEST_POSSIBLE_TIME: MilitaryTime = MilitaryTime(2000);

/// Default latest end of a schedule with no occurring meetings.
pub const EARLIEST_POSSIBLE_TIME: MilitaryTime = MilitaryTime(800);

/// A time of day in hhmm encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct MilitaryTime(u16);

impl MilitaryTime {
    /// Largest accepted encoded value.
    pub const MAX_VALUE: u16 = 2359;

    /// Midnight (`0000`).
    pub const MIDNIGHT: Self = Self(0);

    /// Last minute of the day (`2359`).
    pub const END_OF_DAY: Self = Self(Self::MAX_VALUE);

    /// Creates a time from its encoded value, or `None` if out of range.
    pub const fn new(value: u16) -> Option<Self> {
        if value <= Self::MAX_VALUE {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Converts a raw (possibly negative or oversized) integer.
    pub fn from_raw(value: i64) -> Option<Self> {
        u16::try_from(value).ok().and_then(Self::new)
    }

    /// Encoded value.
    #[inline]
    pub fn value(self) -> u16 {
        self.0
    }

    /// Hour part (`value / 100`).
    #[inline]
    pub fn hour(self) -> u16 {
        self.0 / 100
    }

    /// Minute part (`value % 100`).
    #[inline]
    pub fn minute(self) -> u16 {
        self.0 % 100
    }

    /// Minutes elapsed since midnight.
    #[inline]
    pub fn total_minutes(self) -> u32 {
        u32::from(self.hour()) * 60 + u32::from(self.minute())
    }

    /// Elapsed wall time from `self` to `end`, hhmm-encoded.
    ///
    /// Both ends are decomposed into hours and minutes first, so
    /// `0930 -> 1100` is `130` (1h30m), not `170`. Clamped at zero when
    /// `end` precedes `self`.
    pub fn span_to(self, end: MilitaryTime) -> u16 {
        let minutes = end.total_minutes().saturating_sub(self.total_minutes());
        encode_duration(minutes)
    }

    /// Zero-padded `HH:MM` rendering used in calendar tables.
    pub fn to_hhmm_string(self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Encodes a minute count as an hhmm duration.
pub fn encode_duration(minutes: u32) -> u16 {
    let hhmm = (minutes / 60) * 100 + minutes % 60;
    u16::try_from(hhmm).unwrap_or(u16::MAX)
}

/// Renders an hhmm duration as `H:MM`.
pub fn format_duration(hhmm: u16) -> String {
    format!("{}:{:02}", hhmm / 100, hhmm % 100)
}

impl fmt::Display for MilitaryTime {
    /// 12-hour clock rendering, e.g. `1430` -> `2:30 PM`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, suffix) = match self.hour() {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        write!(f, "{}:{:02} {}", hour, self.minute(), suffix)
    }
}

impl TryFrom<u16> for MilitaryTime {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(Error::InvalidTime(i64::from(value)))
    }
}

impl From<MilitaryTime> for u16 {
    fn from(time: MilitaryTime) -> Self {
        time.0
    }
}
