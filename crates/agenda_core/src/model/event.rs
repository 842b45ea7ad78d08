//! Event domain model.
//!
//! # Responsibility
//! - Define the single calendar entry record shared by store and service.
//! - Provide canonical parsing helpers for date and time text.
//!
//! # Invariants
//! - Events have no surrogate identity; `(name, date, time)` distinguishes them.
//! - Events built through `Event::validated` carry canonical `YYYY-MM-DD` and
//!   `HH:MM` strings.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Canonical date format for persisted and compared dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Canonical wall-clock time format.
pub const TIME_FORMAT: &str = "%H:%M";

/// Validation errors for event input fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// Event name is empty after trimming.
    EmptyName,
    /// Date text is not a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// Time text is not a 24-hour `HH:MM` value.
    InvalidTime(String),
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "event name cannot be empty"),
            Self::InvalidDate(value) => write!(f, "invalid event date `{value}`"),
            Self::InvalidTime(value) => write!(f, "invalid event time `{value}`"),
        }
    }
}

impl Error for EventValidationError {}

/// One calendar entry.
///
/// Fields are plain strings so rows read back from disk keep whatever
/// representation the file holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// Free-text label.
    pub name: String,
    /// Calendar date, `YYYY-MM-DD` once validated.
    pub date: String,
    /// Wall-clock time, `HH:MM` once validated.
    pub time: String,
}

impl Event {
    /// Creates an event from raw field values without validation.
    pub fn new(name: impl Into<String>, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            time: time.into(),
        }
    }

    /// Creates an event from a trimmed name and already-parsed date/time.
    ///
    /// # Errors
    /// - Returns `EmptyName` when `name` is blank.
    pub fn validated(
        name: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Self, EventValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EventValidationError::EmptyName);
        }
        Ok(Self::new(
            name,
            date.format(DATE_FORMAT).to_string(),
            time.format(TIME_FORMAT).to_string(),
        ))
    }
}

/// Parses `YYYY-MM-DD` date text.
pub fn parse_event_date(value: &str) -> Result<NaiveDate, EventValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| EventValidationError::InvalidDate(trimmed.to_string()))
}

/// Parses 24-hour `HH:MM` time text. One-digit hours are accepted.
pub fn parse_event_time(value: &str) -> Result<NaiveTime, EventValidationError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .map_err(|_| EventValidationError::InvalidTime(trimmed.to_string()))
}
