//! Error types, one enum per concern.
//!
//! Only [`InputError`] and [`ConfigError`] stop an investigation. Adapter
//! failures are folded into findings by the collector and timestamp parse
//! failures only suppress the timeline.

use std::time::Duration;
use thiserror::Error;

// ─── Input errors ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("alias must not be empty")]
    EmptyAlias,
}

// ─── Adapter errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("backend rejected credentials ({code})")]
    Unauthorized { code: u16 },

    #[error("no response within {after:?}")]
    Timeout { after: Duration },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

// ─── Timestamp errors ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognised timestamp '{raw}'")]
    Timestamp { raw: String },

    #[error("timestamp '{raw}' is outside the supported date range")]
    OutOfRange { raw: String },
}

// ─── Config errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Report errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("template render failed: {0}")]
    Render(#[from] tera::Error),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Result aliases ─────────────────────────────────────────────────────────

/// Result of a single backend call.
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;
