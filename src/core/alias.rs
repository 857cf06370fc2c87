use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized user identifier shared by every backend lookup.
///
/// Construction trims surrounding whitespace and upper-cases the value, so two
/// aliases compare equal whenever the backends would treat them as the same
/// user. The inner value cannot change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alias(String);

impl Alias {
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptyAlias);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-case form, used where backends build URLs from the alias.
    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }

    /// Alias with every character outside `[A-Z0-9._-]` replaced by `_`.
    pub fn file_safe(&self) -> String {
        self.0
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
