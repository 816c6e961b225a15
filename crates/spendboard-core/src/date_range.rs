//! Date filter applied to expense fetches.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{error::CoreError, time::Clock};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive date range whose boundaries may be individually unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// First day of the current month through today, in local time.
    pub fn current_month(clock: &dyn Clock) -> Self {
        let today = clock.today();
        let first = today.with_day(1).unwrap_or(today);
        Self::new(Some(first), Some(today))
    }

    /// Parses both boundaries and rejects a start after the end.
    pub fn parse(start: &str, end: &str) -> Result<Self, CoreError> {
        let range = Self::new(parse_boundary(start)?, parse_boundary(end)?);
        if let (Some(start), Some(end)) = (range.start, range.end) {
            if start > end {
                return Err(CoreError::InvalidRange { start, end });
            }
        }
        Ok(range)
    }

    /// Updates the start boundary, returning whether it changed.
    pub fn set_start(&mut self, start: Option<NaiveDate>) -> bool {
        let changed = self.start != start;
        self.start = start;
        changed
    }

    /// Updates the end boundary, returning whether it changed.
    pub fn set_end(&mut self, end: Option<NaiveDate>) -> bool {
        let changed = self.end != end;
        self.end = end;
        changed
    }

    /// Both boundaries are set, so fetching may proceed.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// `start_date` / `end_date` query parameters for the boundaries that are set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(start) = self.start {
            pairs.push(("start_date", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.end {
            pairs.push(("end_date", end.format(DATE_FORMAT).to_string()));
        }
        pairs
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |date: Option<NaiveDate>| {
            date.map(|value| value.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "…".to_string())
        };
        write!(f, "{} → {}", render(self.start), render(self.end))
    }
}

/// Parses a `YYYY-MM-DD` boundary; blank input means "unset".
pub fn parse_boundary(raw: &str) -> Result<Option<NaiveDate>, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| CoreError::InvalidDate(trimmed.to_string()))
}
