//! Candidate date range for a trip.

use crate::dates::{nights_between, parse_instant};
use chrono::{DateTime, Utc};

/// The dates and length of the trip a guest is pricing.
///
/// A duration of zero or less means no date range is selected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripWindow {
    duration: i64,
    check_in: Option<String>,
    check_out: Option<String>,
    check_in_at: Option<DateTime<Utc>>,
    check_out_at: Option<DateTime<Utc>>,
}

impl TripWindow {
    /// Create a window with an explicit duration.
    pub fn new(duration: i64, check_in: impl Into<String>, check_out: impl Into<String>) -> Self {
        let check_in = check_in.into();
        let check_out = check_out.into();
        Self {
            duration,
            check_in_at: parse_instant(&check_in),
            check_out_at: parse_instant(&check_out),
            check_in: Some(check_in),
            check_out: Some(check_out),
        }
    }

    /// Create a window from dates, deriving the number of nights.
    ///
    /// If either date cannot be parsed the duration is zero.
    pub fn from_dates(check_in: impl Into<String>, check_out: impl Into<String>) -> Self {
        let mut window = Self::new(0, check_in, check_out);
        if let (Some(start), Some(end)) = (window.check_in_at, window.check_out_at) {
            window.duration = nights_between(start, end);
        }
        window
    }

    /// A duration with no dates (specials never apply).
    pub fn nights(duration: i64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// No dates selected.
    pub fn undated() -> Self {
        Self::default()
    }

    /// Number of nights.
    pub fn duration(&self) -> i64 {
        self.duration
    }

    /// Check if a positive number of nights is selected.
    pub fn is_priced(&self) -> bool {
        self.duration > 0
    }

    /// Raw check-in value.
    pub fn check_in(&self) -> Option<&str> {
        self.check_in.as_deref()
    }

    /// Raw check-out value.
    pub fn check_out(&self) -> Option<&str> {
        self.check_out.as_deref()
    }

    /// Parsed check-in instant.
    pub fn check_in_at(&self) -> Option<DateTime<Utc>> {
        self.check_in_at
    }

    /// Parsed check-out instant.
    pub fn check_out_at(&self) -> Option<DateTime<Utc>> {
        self.check_out_at
    }
}
