use std::fmt::Display;

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

pub type UnixTimestamp = i64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateParseError {
    #[error("expected a YYYY-MM-DD date or an RFC 3339 timestamp, got {0}")]
    Invalid(String),
    #[error("start {start} is after end {end}")]
    StartAfterEnd { start: String, end: String },
}

/// Seconds since the UNIX epoch, floored. Plain dates are read as midnight UTC, full
/// timestamps must carry an offset.
pub fn to_unix_timestamp(date: &str) -> Result<UnixTimestamp, DateParseError> {
    if let Ok(naive_date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return naive_date
            .and_hms_opt(0, 0, 0)
            .map(|date_time| date_time.and_utc().timestamp())
            .ok_or_else(|| DateParseError::Invalid(date.to_string()));
    }

    DateTime::parse_from_rfc3339(date)
        .map(|date_time| date_time.timestamp())
        .map_err(|_| DateParseError::Invalid(date.to_string()))
}

/// An inclusive range of time, kept as both the input strings and their timestamps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
    pub start_timestamp: UnixTimestamp,
    pub end_timestamp: UnixTimestamp,
}

impl DateRange {
    pub fn new(start: &str, end: &str) -> Result<Self, DateParseError> {
        let start_timestamp = to_unix_timestamp(start)?;
        let end_timestamp = to_unix_timestamp(end)?;

        if start_timestamp > end_timestamp {
            return Err(DateParseError::StartAfterEnd {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self {
            start: start.to_string(),
            end: end.to_string(),
            start_timestamp,
            end_timestamp,
        })
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) to {} ({})",
            self.start, self.start_timestamp, self.end, self.end_timestamp
        )
    }
}
