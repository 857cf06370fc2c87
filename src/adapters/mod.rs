//! Backend adapter seams.
//!
//! Each adapter makes one blocking-from-the-caller, single-attempt request and
//! translates whatever the backend returns into [`Lookup`] or an
//! [`AdapterError`](crate::error::AdapterError). Retry policy, if any, stays
//! private to an implementation.

pub mod graph;
pub mod http_client;
pub mod mailbox;
pub mod storage;

pub use graph::GraphDirectoryAdapter;
pub use http_client::build_backend_client;
pub use mailbox::HttpMailboxAdapter;
pub use storage::HttpStorageAdapter;

use crate::core::alias::Alias;
use crate::core::timeline::DeletionStamp;
use crate::error::AdapterResult;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

pub type AdapterFuture<'a, T> = Pin<Box<dyn Future<Output = AdapterResult<T>> + Send + 'a>>;

/// Expected outcome of a lookup; absence is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedAccount {
    pub object_id: Option<String>,
    pub display_name: Option<String>,
    pub primary_address: Option<String>,
    pub deleted_at: Option<DeletionStamp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MailboxState {
    Active,
    SoftDeleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailboxRecord {
    /// Backend reference passed back for the statistics call.
    pub id: String,
    pub state: MailboxState,
    pub display_name: Option<String>,
    pub primary_address: Option<String>,
    pub litigation_hold: bool,
    pub in_place_holds: Vec<String>,
    pub retention_policy: Option<String>,
    pub deleted_at: Option<DeletionStamp>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailboxStatistics {
    pub item_count: u64,
    pub total_size_bytes: u64,
}

impl MailboxStatistics {
    pub fn has_content(&self) -> bool {
        self.item_count > 0 || self.total_size_bytes > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteUsage {
    pub url: String,
    pub usage_bytes: u64,
    pub quota_bytes: Option<u64>,
}

/// Identity service: deleted-item records by alias.
pub trait DirectoryAdapter: Send + Sync {
    fn name(&self) -> &str;

    fn lookup_deleted_account<'a>(
        &'a self,
        alias: &'a Alias,
    ) -> AdapterFuture<'a, Lookup<DeletedAccount>>;
}

/// Mailbox service: active or soft-deleted mailboxes and their usage.
pub trait MailboxAdapter: Send + Sync {
    fn name(&self) -> &str;

    fn lookup_mailbox<'a>(
        &'a self,
        alias: &'a Alias,
        include_soft_deleted: bool,
    ) -> AdapterFuture<'a, Lookup<MailboxRecord>>;

    fn mailbox_statistics<'a>(&'a self, mailbox_ref: &'a str)
    -> AdapterFuture<'a, MailboxStatistics>;
}

/// Multi-tenant storage service: personal site usage per tenant.
pub trait StorageAdapter: Send + Sync {
    fn name(&self) -> &str;

    fn lookup_site<'a>(
        &'a self,
        tenant_admin_endpoint: &'a str,
        site_url: &'a str,
    ) -> AdapterFuture<'a, Lookup<SiteUsage>>;
}
