use super::timeline::DeletionStamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::Display;

/// Backend a [`Finding`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "tenant", rename_all = "snake_case")]
pub enum Source {
    Directory,
    Mailbox,
    /// Tenant that answered, or `None` for the summary of an unsuccessful
    /// tenant search.
    Storage(Option<String>),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => f.write_str("Directory"),
            Self::Mailbox => f.write_str("Mailbox"),
            Self::Storage(Some(tenant)) => write!(f, "Storage ({tenant})"),
            Self::Storage(None) => f.write_str("Storage"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    #[strum(serialize = "Active")]
    Active,
    #[strum(serialize = "Soft-deleted")]
    SoftDeleted,
    #[strum(serialize = "Deleted")]
    Deleted,
    #[strum(serialize = "Not found")]
    NotFound,
    #[strum(serialize = "Unavailable")]
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryDetail {
    pub object_id: Option<String>,
    pub display_name: Option<String>,
    pub primary_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailboxDetail {
    pub display_name: Option<String>,
    pub primary_address: Option<String>,
    pub litigation_hold: bool,
    pub in_place_holds: Vec<String>,
    pub retention_policy: Option<String>,
    pub item_count: Option<u64>,
    pub total_size_bytes: Option<u64>,
    /// Set when the mailbox was found but its statistics call failed.
    pub statistics_error: Option<String>,
}

impl MailboxDetail {
    pub fn is_on_hold(&self) -> bool {
        self.litigation_hold || !self.in_place_holds.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageDetail {
    pub tenant: String,
    pub site_url: String,
    pub usage_bytes: u64,
    pub quota_bytes: Option<u64>,
}

impl StorageDetail {
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_used(&self) -> Option<f64> {
        match self.quota_bytes {
            Some(quota) if quota > 0 => Some(self.usage_bytes as f64 / quota as f64 * 100.0),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantFailure {
    pub tenant: String,
    pub reason: String,
}

/// Outcome of a tenant search that found no site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSearchDetail {
    pub tenants_checked: usize,
    pub failures: Vec<TenantFailure>,
}

/// Backend-specific attributes kept for reporting only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FindingDetail {
    None,
    Directory(DirectoryDetail),
    Mailbox(MailboxDetail),
    Storage(StorageDetail),
    StorageSearch(StorageSearchDetail),
    Unavailable { reason: String },
}

/// Normalized result of one backend category for one investigation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub source: Source,
    pub status: FindingStatus,
    /// Present only for `Deleted` and `SoftDeleted`.
    pub deleted_at: Option<DeletionStamp>,
    pub data_present: bool,
    pub detail: FindingDetail,
}

impl Finding {
    pub fn not_found(source: Source, detail: FindingDetail) -> Self {
        Self {
            source,
            status: FindingStatus::NotFound,
            deleted_at: None,
            data_present: false,
            detail,
        }
    }

    pub fn unavailable(source: Source, reason: impl Into<String>) -> Self {
        Self {
            source,
            status: FindingStatus::Error,
            deleted_at: None,
            data_present: false,
            detail: FindingDetail::Unavailable {
                reason: reason.into(),
            },
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(
            self.status,
            FindingStatus::Active | FindingStatus::SoftDeleted | FindingStatus::Deleted
        )
    }

    pub fn is_storage(&self) -> bool {
        matches!(self.source, Source::Storage(_))
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.detail {
            FindingDetail::Unavailable { reason } => Some(reason),
            _ => None,
        }
    }
}
