use super::alias::Alias;
use super::finding::{Finding, FindingStatus, Source};
use super::timeline::{DeletionStamp, Timeline};
use crate::error::ParseError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Merged, immutable result of investigating one alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investigation {
    pub alias: Alias,
    /// Fixed order: Directory, Mailbox, Storage.
    pub findings: Vec<Finding>,
    pub canonical_deleted_at: Option<DeletionStamp>,
    pub has_data: bool,
    /// Unset when there is no canonical stamp, or when it could not be parsed.
    pub timeline: Option<Timeline>,
}

impl Investigation {
    /// Reduce finalized findings into one investigation.
    pub fn reconcile(alias: Alias, findings: Vec<Finding>, now: DateTime<Utc>) -> Self {
        let canonical_deleted_at = canonical_deletion(&findings).cloned();
        let has_data = findings.iter().any(|finding| finding.data_present);

        let timeline = canonical_deleted_at
            .as_ref()
            .and_then(|stamp| match timeline_for(stamp, now) {
                Ok(timeline) => Some(timeline),
                Err(error) => {
                    tracing::warn!(
                        alias = alias.as_str(),
                        "deletion timeline suppressed: {error}"
                    );
                    None
                }
            });

        tracing::debug!(
            alias = alias.as_str(),
            has_data,
            canonical = canonical_deleted_at.as_ref().map(DeletionStamp::raw),
            "investigation reconciled"
        );

        Self {
            alias,
            findings,
            canonical_deleted_at,
            has_data,
            timeline,
        }
    }

    pub fn directory(&self) -> Option<&Finding> {
        self.findings
            .iter()
            .find(|finding| finding.source == Source::Directory)
    }

    pub fn mailbox(&self) -> Option<&Finding> {
        self.findings
            .iter()
            .find(|finding| finding.source == Source::Mailbox)
    }

    pub fn storage(&self) -> Option<&Finding> {
        self.findings.iter().find(|finding| finding.is_storage())
    }

    pub fn storage_found(&self) -> bool {
        self.storage().is_some_and(Finding::is_found)
    }
}

/// Directory deletion wins; a soft-deleted mailbox stamp is the fallback.
pub fn canonical_deletion(findings: &[Finding]) -> Option<&DeletionStamp> {
    let directory = findings
        .iter()
        .filter(|finding| finding.source == Source::Directory)
        .find_map(|finding| finding.deleted_at.as_ref());

    directory.or_else(|| {
        findings
            .iter()
            .filter(|finding| {
                finding.source == Source::Mailbox && finding.status == FindingStatus::SoftDeleted
            })
            .find_map(|finding| finding.deleted_at.as_ref())
    })
}

fn timeline_for(stamp: &DeletionStamp, now: DateTime<Utc>) -> Result<Timeline, ParseError> {
    let deleted_at = stamp.parse()?;
    Timeline::compute(deleted_at, now).ok_or_else(|| ParseError::OutOfRange {
        raw: stamp.raw().to_string(),
    })
}
