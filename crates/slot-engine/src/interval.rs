//! Minute-of-day interval primitives.
//!
//! Every time-of-day in the engine is an integer count of minutes since local
//! midnight of the requested civil date. Ranges are half-open `[start, end)`.
//! Values outside `0..=1440` are legal: a booking that started the evening before
//! has a negative start, and one running past midnight ends after 1440.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Minutes relative to local midnight.
pub type Minutes = i64;

pub const MINUTES_PER_DAY: Minutes = 24 * 60;

/// Parse a 24-hour `"HH:MM"` string into minutes since midnight.
///
/// `"24:00"` is accepted as the end of the day. Anything else that is not a valid
/// wall-clock time is a configuration fault.
pub fn parse_hhmm(s: &str) -> Result<Minutes> {
    let trimmed = s.trim();
    if trimmed == "24:00" {
        return Ok(MINUTES_PER_DAY);
    }
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map_err(|_| SlotError::Config(format!("invalid time of day '{}', expected HH:MM", s)))?;
    Ok(Minutes::from(time.hour() * 60 + time.minute()))
}

/// Format minutes since midnight as `"HH:MM"`.
pub fn format_hhmm(minutes: Minutes) -> String {
    format!("{:02}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}

/// A half-open range of minutes `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MinuteRange {
    pub start: Minutes,
    pub end: Minutes,
}

impl MinuteRange {
    pub fn new(start: Minutes, end: Minutes) -> Self {
        Self { start, end }
    }

    /// Parse a pair of `"HH:MM"` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(parse_hhmm(start)?, parse_hhmm(end)?))
    }

    pub fn len(&self) -> Minutes {
        (self.end - self.start).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// `self.start < other.end && self.end > other.start`.
    ///
    /// Adjacent ranges (one ends exactly when the other starts) do not overlap.
    pub fn overlaps(&self, other: &MinuteRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// The common part of both ranges, if any.
    pub fn intersect(&self, other: &MinuteRange) -> Option<MinuteRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(MinuteRange { start, end })
    }

    /// The smallest range covering both.
    pub fn enclose(&self, other: &MinuteRange) -> MinuteRange {
        MinuteRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl std::fmt::Display for MinuteRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", format_hhmm(self.start), format_hhmm(self.end))
    }
}
