#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use retention_probe::adapters::{
    AdapterFuture, DeletedAccount, DirectoryAdapter, Lookup, MailboxAdapter, MailboxRecord,
    MailboxState, MailboxStatistics, SiteUsage, StorageAdapter,
};
use retention_probe::config::TenantConfig;
use retention_probe::core::{Alias, DeletionStamp, EvidenceCollector};
use retention_probe::error::{AdapterError, AdapterResult};

pub const T1_ADMIN: &str = "https://t1-admin.example.com";
pub const T2_ADMIN: &str = "https://t2-admin.example.com";

/// Scripted backend answer.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Found(T),
    NotFound,
    Fail(String),
    /// Never answers within any sane timeout.
    Hang,
}

async fn answer<T: Clone>(reply: &Reply<T>) -> AdapterResult<Lookup<T>> {
    match reply {
        Reply::Found(value) => Ok(Lookup::Found(value.clone())),
        Reply::NotFound => Ok(Lookup::NotFound),
        Reply::Fail(message) => Err(AdapterError::Status {
            code: 503,
            message: message.clone(),
        }),
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Lookup::NotFound)
        }
    }
}

#[derive(Debug, Default)]
pub struct Calls {
    pub directory: AtomicUsize,
    pub mailbox_active: AtomicUsize,
    pub mailbox_soft_deleted: AtomicUsize,
    pub statistics: AtomicUsize,
    /// Admin endpoints in the order they were queried.
    pub storage: Mutex<Vec<String>>,
}

impl Calls {
    pub fn directory(&self) -> usize {
        self.directory.load(Ordering::SeqCst)
    }

    pub fn mailbox_active(&self) -> usize {
        self.mailbox_active.load(Ordering::SeqCst)
    }

    pub fn mailbox_soft_deleted(&self) -> usize {
        self.mailbox_soft_deleted.load(Ordering::SeqCst)
    }

    pub fn statistics(&self) -> usize {
        self.statistics.load(Ordering::SeqCst)
    }

    pub fn storage(&self) -> Vec<String> {
        self.storage.lock().unwrap().clone()
    }

    pub fn storage_calls_to(&self, admin_endpoint: &str) -> usize {
        self.storage()
            .iter()
            .filter(|endpoint| *endpoint == admin_endpoint)
            .count()
    }

    pub fn total(&self) -> usize {
        self.directory()
            + self.mailbox_active()
            + self.mailbox_soft_deleted()
            + self.statistics()
            + self.storage().len()
    }
}

struct FakeDirectory {
    reply: Reply<DeletedAccount>,
    calls: Arc<Calls>,
}

impl DirectoryAdapter for FakeDirectory {
    fn name(&self) -> &str {
        "fake-directory"
    }

    fn lookup_deleted_account<'a>(
        &'a self,
        _alias: &'a Alias,
    ) -> AdapterFuture<'a, Lookup<DeletedAccount>> {
        self.calls.directory.fetch_add(1, Ordering::SeqCst);
        Box::pin(answer(&self.reply))
    }
}

struct FakeMailbox {
    active: Reply<MailboxRecord>,
    soft_deleted: Reply<MailboxRecord>,
    statistics: Reply<MailboxStatistics>,
    calls: Arc<Calls>,
}

impl MailboxAdapter for FakeMailbox {
    fn name(&self) -> &str {
        "fake-mailbox"
    }

    fn lookup_mailbox<'a>(
        &'a self,
        _alias: &'a Alias,
        include_soft_deleted: bool,
    ) -> AdapterFuture<'a, Lookup<MailboxRecord>> {
        if include_soft_deleted {
            self.calls.mailbox_soft_deleted.fetch_add(1, Ordering::SeqCst);
            Box::pin(answer(&self.soft_deleted))
        } else {
            self.calls.mailbox_active.fetch_add(1, Ordering::SeqCst);
            Box::pin(answer(&self.active))
        }
    }

    fn mailbox_statistics<'a>(
        &'a self,
        _mailbox_ref: &'a str,
    ) -> AdapterFuture<'a, MailboxStatistics> {
        self.calls.statistics.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            answer(&self.statistics).await?.found().ok_or_else(|| {
                AdapterError::Decode("statistics missing".into())
            })
        })
    }
}

struct FakeStorage {
    sites: Vec<(String, Reply<SiteUsage>)>,
    calls: Arc<Calls>,
}

impl StorageAdapter for FakeStorage {
    fn name(&self) -> &str {
        "fake-storage"
    }

    fn lookup_site<'a>(
        &'a self,
        tenant_admin_endpoint: &'a str,
        _site_url: &'a str,
    ) -> AdapterFuture<'a, Lookup<SiteUsage>> {
        self.calls
            .storage
            .lock()
            .unwrap()
            .push(tenant_admin_endpoint.to_string());
        Box::pin(async move {
            match self
                .sites
                .iter()
                .find(|(endpoint, _)| endpoint == tenant_admin_endpoint)
            {
                Some((_, reply)) => answer(reply).await,
                None => Ok(Lookup::NotFound),
            }
        })
    }
}

/// Scripted answers for all three backends; everything defaults to NotFound.
#[derive(Debug, Clone)]
pub struct Backends {
    pub directory: Reply<DeletedAccount>,
    pub mailbox_active: Reply<MailboxRecord>,
    pub mailbox_soft_deleted: Reply<MailboxRecord>,
    pub statistics: Reply<MailboxStatistics>,
    pub sites: Vec<(String, Reply<SiteUsage>)>,
    pub tenants: Vec<TenantConfig>,
}

impl Default for Backends {
    fn default() -> Self {
        Self {
            directory: Reply::NotFound,
            mailbox_active: Reply::NotFound,
            mailbox_soft_deleted: Reply::NotFound,
            statistics: Reply::Found(MailboxStatistics::default()),
            sites: Vec::new(),
            tenants: two_tenants(),
        }
    }
}

impl Backends {
    pub fn site(mut self, admin_endpoint: &str, reply: Reply<SiteUsage>) -> Self {
        self.sites.push((admin_endpoint.to_string(), reply));
        self
    }

    pub fn build(self) -> (EvidenceCollector, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        let collector = EvidenceCollector::new(
            Box::new(FakeDirectory {
                reply: self.directory,
                calls: Arc::clone(&calls),
            }),
            Box::new(FakeMailbox {
                active: self.mailbox_active,
                soft_deleted: self.mailbox_soft_deleted,
                statistics: self.statistics,
                calls: Arc::clone(&calls),
            }),
            Box::new(FakeStorage {
                sites: self.sites,
                calls: Arc::clone(&calls),
            }),
            self.tenants,
        );
        (collector, calls)
    }
}

pub fn two_tenants() -> Vec<TenantConfig> {
    vec![
        TenantConfig::new(
            "t1",
            T1_ADMIN,
            "https://t1-my.example.com/personal/{alias}_t1_com",
        ),
        TenantConfig::new(
            "t2",
            T2_ADMIN,
            "https://t2-my.example.com/personal/{alias}_t2_com",
        ),
    ]
}

pub fn deleted_account(deleted_at: &str) -> DeletedAccount {
    DeletedAccount {
        object_id: Some("0f6c2d1e".into()),
        display_name: Some("Jane Doe".into()),
        primary_address: Some("jdoe@contoso.com".into()),
        deleted_at: Some(DeletionStamp::new(deleted_at)),
    }
}

pub fn mailbox(state: MailboxState, soft_deleted_at: Option<&str>) -> MailboxRecord {
    MailboxRecord {
        id: "mbx-jdoe".into(),
        state,
        display_name: Some("Jane Doe".into()),
        primary_address: Some("jdoe@contoso.com".into()),
        litigation_hold: false,
        in_place_holds: Vec::new(),
        retention_policy: Some("Default MRM Policy".into()),
        deleted_at: soft_deleted_at.map(DeletionStamp::new),
    }
}

pub fn statistics(item_count: u64, total_size_bytes: u64) -> MailboxStatistics {
    MailboxStatistics {
        item_count,
        total_size_bytes,
    }
}

pub fn site(url: &str, usage_bytes: u64) -> SiteUsage {
    SiteUsage {
        url: url.into(),
        usage_bytes,
        quota_bytes: Some(1024 * 1024 * 1024),
    }
}

pub fn alias(raw: &str) -> Alias {
    Alias::parse(raw).unwrap()
}
