use crate::error::ParseError;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days after the canonical deletion during which data is treated as
/// recoverable.
pub const RECOVERY_WINDOW_DAYS: i64 = 30;

const SECONDS_PER_DAY: i64 = 86_400;

/// Naive layouts accepted in addition to RFC 3339; all are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
];

/// Deletion timestamp exactly as a backend reported it.
///
/// Parsing is deferred to timeline computation so an unreadable value can
/// still win precedence and be shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeletionStamp(String);

impl DeletionStamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.to_rfc3339())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> Result<DateTime<Utc>, ParseError> {
        parse_timestamp(&self.0)
    }
}

impl fmt::Display for DeletionStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ParseError> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ParseError::Timestamp {
            raw: raw.to_string(),
        })
}

/// Recovery countdown derived from the canonical deletion timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub deleted_at: DateTime<Utc>,
    pub days_since_deletion: i64,
    /// Negative once the window has elapsed.
    pub days_remaining: i64,
    pub expiration_date: DateTime<Utc>,
}

impl Timeline {
    /// `None` when the expiration date falls outside chrono's representable range.
    pub fn compute(deleted_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        let expiration_date =
            deleted_at.checked_add_signed(Duration::days(RECOVERY_WINDOW_DAYS))?;
        // Floor, not truncation toward zero: a stamp 1s in the future is day -1.
        let days_since_deletion = now
            .signed_duration_since(deleted_at)
            .num_seconds()
            .div_euclid(SECONDS_PER_DAY);
        Some(Self {
            deleted_at,
            days_since_deletion,
            days_remaining: RECOVERY_WINDOW_DAYS - days_since_deletion,
            expiration_date,
        })
    }

    pub fn window_open(&self) -> bool {
        self.days_remaining > 0
    }
}
