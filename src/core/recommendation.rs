use super::investigation::Investigation;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Verdict {
    Retain,
    Purge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub verdict: Verdict,
    pub rationale: String,
    pub action: String,
}

/// Retain whenever any backend still holds data.
///
/// The remaining recovery days are reported but never consulted here: the
/// retention obligation follows from data existing, not from the countdown.
pub fn recommend(investigation: &Investigation) -> Recommendation {
    if investigation.has_data {
        Recommendation {
            verdict: Verdict::Retain,
            rationale: "User has recoverable data".into(),
            action: "Maintain holds and restore if needed".into(),
        }
    } else {
        Recommendation {
            verdict: Verdict::Purge,
            rationale: "No significant data found".into(),
            action: "Safe to proceed with cleanup".into(),
        }
    }
}
