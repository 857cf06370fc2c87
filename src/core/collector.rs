use super::alias::Alias;
use super::finding::{
    DirectoryDetail, Finding, FindingDetail, FindingStatus, MailboxDetail, Source, StorageDetail,
    StorageSearchDetail, TenantFailure,
};
use super::investigation::Investigation;
use crate::adapters::{
    AdapterFuture, DeletedAccount, DirectoryAdapter, GraphDirectoryAdapter, HttpMailboxAdapter,
    HttpStorageAdapter, Lookup, MailboxAdapter, MailboxRecord, MailboxState, MailboxStatistics,
    StorageAdapter, build_backend_client,
};
use crate::config::{Config, TenantConfig};
use crate::error::{AdapterError, AdapterResult, InputError};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info, warn};

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Queries every backend for one alias and reconciles the answers.
///
/// The directory, mailbox and storage paths run concurrently and never
/// observe each other's failures. Inside the mailbox path the lookups are
/// ordered (active, then soft-deleted, then statistics); inside the storage
/// path tenants are tried in priority order and the first hit ends the search.
pub struct EvidenceCollector {
    directory: Box<dyn DirectoryAdapter>,
    mailbox: Box<dyn MailboxAdapter>,
    storage: Box<dyn StorageAdapter>,
    tenants: Vec<TenantConfig>,
    call_timeout: Duration,
}

impl EvidenceCollector {
    pub fn new(
        directory: Box<dyn DirectoryAdapter>,
        mailbox: Box<dyn MailboxAdapter>,
        storage: Box<dyn StorageAdapter>,
        tenants: Vec<TenantConfig>,
    ) -> Self {
        Self {
            directory,
            mailbox,
            storage,
            tenants,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Bound applied to each individual adapter call.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// HTTP adapters wired from configuration.
    pub fn from_config(config: &Config) -> Self {
        let client = build_backend_client(config.reliability.adapter_timeout_secs);
        Self::new(
            Box::new(GraphDirectoryAdapter::new(
                client.clone(),
                &config.directory.endpoint,
                config.directory.token.as_deref(),
            )),
            Box::new(HttpMailboxAdapter::new(
                client.clone(),
                &config.mailbox.endpoint,
                config.mailbox.token.as_deref(),
            )),
            Box::new(HttpStorageAdapter::new(
                client,
                config.storage.token.as_deref(),
            )),
            config.storage.tenants.clone(),
        )
        .with_call_timeout(config.adapter_timeout())
    }

    /// Validate raw input, then collect. An empty alias fails before any
    /// backend is contacted.
    pub async fn investigate(&self, raw_alias: &str) -> Result<Investigation, InputError> {
        let alias = Alias::parse(raw_alias)?;
        Ok(self.collect(&alias).await)
    }

    pub async fn collect(&self, alias: &Alias) -> Investigation {
        let findings = self.findings(alias).await;
        Investigation::reconcile(alias.clone(), findings, Utc::now())
    }

    /// Same as [`collect`](Self::collect) with an explicit clock.
    pub async fn collect_at(&self, alias: &Alias, now: DateTime<Utc>) -> Investigation {
        let findings = self.findings(alias).await;
        Investigation::reconcile(alias.clone(), findings, now)
    }

    /// Exactly one finding per backend category, in source order.
    pub async fn findings(&self, alias: &Alias) -> Vec<Finding> {
        info!(alias = alias.as_str(), "collecting evidence");
        let (directory, mailbox, storage) = tokio::join!(
            self.directory_finding(alias),
            self.mailbox_finding(alias),
            self.storage_finding(alias),
        );
        vec![directory, mailbox, storage]
    }

    async fn guarded<T>(&self, call: AdapterFuture<'_, T>) -> AdapterResult<T> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .unwrap_or(Err(AdapterError::Timeout {
                after: self.call_timeout,
            }))
    }

    async fn directory_finding(&self, alias: &Alias) -> Finding {
        let backend = self.directory.name();
        match self
            .guarded(self.directory.lookup_deleted_account(alias))
            .await
        {
            Ok(Lookup::Found(account)) => {
                info!(backend, "deleted directory account found");
                deleted_account_finding(account)
            }
            Ok(Lookup::NotFound) => {
                info!(backend, "no deleted directory account");
                Finding::not_found(Source::Directory, FindingDetail::None)
            }
            Err(error) => {
                warn!(backend, "directory lookup failed: {error}");
                Finding::unavailable(Source::Directory, error.to_string())
            }
        }
    }

    async fn mailbox_finding(&self, alias: &Alias) -> Finding {
        let backend = self.mailbox.name();

        let active = self.guarded(self.mailbox.lookup_mailbox(alias, false)).await;
        let lookup = match active {
            Ok(Lookup::NotFound) => {
                debug!(backend, "no active mailbox, checking soft-deleted");
                self.guarded(self.mailbox.lookup_mailbox(alias, true)).await
            }
            other => other,
        };

        let record = match lookup {
            Ok(Lookup::Found(record)) => record,
            Ok(Lookup::NotFound) => {
                info!(backend, "no mailbox in either state");
                return Finding::not_found(Source::Mailbox, FindingDetail::None);
            }
            Err(error) => {
                warn!(backend, "mailbox lookup failed: {error}");
                return Finding::unavailable(Source::Mailbox, error.to_string());
            }
        };

        let statistics = self
            .guarded(self.mailbox.mailbox_statistics(&record.id))
            .await;
        mailbox_record_finding(record, statistics)
    }

    async fn storage_finding(&self, alias: &Alias) -> Finding {
        let backend = self.storage.name();
        let mut failures = Vec::new();

        for tenant in &self.tenants {
            let site_url = tenant.site_url_for(alias);
            match self
                .guarded(self.storage.lookup_site(&tenant.admin_endpoint, &site_url))
                .await
            {
                Ok(Lookup::Found(site)) => {
                    info!(backend, tenant = tenant.id.as_str(), "site found");
                    return Finding {
                        source: Source::Storage(Some(tenant.id.clone())),
                        status: FindingStatus::Active,
                        deleted_at: None,
                        data_present: site.usage_bytes > 0,
                        detail: FindingDetail::Storage(StorageDetail {
                            tenant: tenant.id.clone(),
                            site_url: site.url,
                            usage_bytes: site.usage_bytes,
                            quota_bytes: site.quota_bytes,
                        }),
                    };
                }
                Ok(Lookup::NotFound) => {
                    debug!(backend, tenant = tenant.id.as_str(), "site not found");
                }
                Err(error) => {
                    warn!(backend, tenant = tenant.id.as_str(), "site lookup failed: {error}");
                    failures.push(TenantFailure {
                        tenant: tenant.id.clone(),
                        reason: error.to_string(),
                    });
                }
            }
        }

        let tenants_checked = self.tenants.len();
        if tenants_checked > 0 && failures.len() == tenants_checked {
            let reasons = failures
                .iter()
                .map(|f| format!("{}: {}", f.tenant, f.reason))
                .collect::<Vec<_>>()
                .join("; ");
            return Finding::unavailable(
                Source::Storage(None),
                format!("all {tenants_checked} tenants failed ({reasons})"),
            );
        }

        info!(backend, tenants_checked, "no site in any tenant");
        Finding::not_found(
            Source::Storage(None),
            FindingDetail::StorageSearch(StorageSearchDetail {
                tenants_checked,
                failures,
            }),
        )
    }
}

fn deleted_account_finding(account: DeletedAccount) -> Finding {
    Finding {
        source: Source::Directory,
        status: FindingStatus::Deleted,
        deleted_at: account.deleted_at,
        data_present: false,
        detail: FindingDetail::Directory(DirectoryDetail {
            object_id: account.object_id,
            display_name: account.display_name,
            primary_address: account.primary_address,
        }),
    }
}

/// A failed statistics call only clears `data_present`; the status stays.
fn mailbox_record_finding(
    record: MailboxRecord,
    statistics: AdapterResult<MailboxStatistics>,
) -> Finding {
    let (status, deleted_at) = match record.state {
        MailboxState::Active => (FindingStatus::Active, None),
        MailboxState::SoftDeleted => (FindingStatus::SoftDeleted, record.deleted_at),
    };

    let mut detail = MailboxDetail {
        display_name: record.display_name,
        primary_address: record.primary_address,
        litigation_hold: record.litigation_hold,
        in_place_holds: record.in_place_holds,
        retention_policy: record.retention_policy,
        ..MailboxDetail::default()
    };

    let data_present = match statistics {
        Ok(stats) => {
            detail.item_count = Some(stats.item_count);
            detail.total_size_bytes = Some(stats.total_size_bytes);
            stats.has_content()
        }
        Err(error) => {
            warn!(mailbox = record.id.as_str(), "mailbox statistics unavailable: {error}");
            detail.statistics_error = Some(error.to_string());
            false
        }
    };

    Finding {
        source: Source::Mailbox,
        status,
        deleted_at,
        data_present,
        detail: FindingDetail::Mailbox(detail),
    }
}
