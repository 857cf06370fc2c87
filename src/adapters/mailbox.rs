//! Mailbox adapter for a REST mailbox service.
//!
//! `GET {base}/mailboxes/{alias}?softDeleted=<bool>` returns one mailbox or 404;
//! `GET {base}/mailboxes/{id}/statistics` returns item count and size.

use super::http_client::{endpoint_url, read_json};
use super::{AdapterFuture, Lookup, MailboxAdapter, MailboxRecord, MailboxState, MailboxStatistics};
use crate::core::alias::Alias;
use crate::core::timeline::DeletionStamp;
use crate::error::{AdapterError, AdapterResult};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MailboxDto {
    id: String,
    display_name: Option<String>,
    primary_smtp_address: Option<String>,
    #[serde(default)]
    litigation_hold_enabled: bool,
    #[serde(default)]
    in_place_holds: Vec<String>,
    retention_policy: Option<String>,
    when_soft_deleted: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatisticsDto {
    item_count: u64,
    total_item_size_bytes: u64,
}

pub struct HttpMailboxAdapter {
    client: Client,
    base_url: String,
    cached_auth_header: Option<String>,
}

impl HttpMailboxAdapter {
    pub fn new(client: Client, base_url: &str, token: Option<&str>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cached_auth_header: token.map(|t| format!("Bearer {t}")),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.cached_auth_header {
            Some(auth) => request.header("Authorization", auth),
            None => request,
        }
    }

    #[instrument(skip(self, alias), fields(alias = %alias))]
    async fn fetch_mailbox(
        &self,
        alias: &Alias,
        include_soft_deleted: bool,
    ) -> AdapterResult<Lookup<MailboxRecord>> {
        let url = endpoint_url(&self.base_url, &["mailboxes", alias.as_str()])?;
        let request = self.client.get(url).query(&[(
            "softDeleted",
            if include_soft_deleted { "true" } else { "false" },
        )]);

        let dto: Option<MailboxDto> = read_json(self.authorized(request).send().await?).await?;
        Ok(dto
            .map(|dto| into_record(dto, include_soft_deleted))
            .into())
    }

    #[instrument(skip(self))]
    async fn fetch_statistics(&self, mailbox_ref: &str) -> AdapterResult<MailboxStatistics> {
        let url = endpoint_url(&self.base_url, &["mailboxes", mailbox_ref, "statistics"])?;
        let request = self.authorized(self.client.get(url));

        let dto: Option<StatisticsDto> = read_json(request.send().await?).await?;
        let dto = dto.ok_or_else(|| {
            AdapterError::Decode(format!("no statistics for mailbox {mailbox_ref}"))
        })?;
        Ok(MailboxStatistics {
            item_count: dto.item_count,
            total_size_bytes: dto.total_item_size_bytes,
        })
    }
}

fn into_record(dto: MailboxDto, soft_deleted: bool) -> MailboxRecord {
    let state = if soft_deleted {
        MailboxState::SoftDeleted
    } else {
        MailboxState::Active
    };
    MailboxRecord {
        id: dto.id,
        state,
        display_name: dto.display_name,
        primary_address: dto.primary_smtp_address,
        litigation_hold: dto.litigation_hold_enabled,
        in_place_holds: dto.in_place_holds,
        retention_policy: dto.retention_policy,
        deleted_at: if soft_deleted {
            dto.when_soft_deleted.map(DeletionStamp::new)
        } else {
            None
        },
    }
}

impl MailboxAdapter for HttpMailboxAdapter {
    fn name(&self) -> &str {
        "mailbox"
    }

    fn lookup_mailbox<'a>(
        &'a self,
        alias: &'a Alias,
        include_soft_deleted: bool,
    ) -> AdapterFuture<'a, Lookup<MailboxRecord>> {
        Box::pin(self.fetch_mailbox(alias, include_soft_deleted))
    }

    fn mailbox_statistics<'a>(
        &'a self,
        mailbox_ref: &'a str,
    ) -> AdapterFuture<'a, MailboxStatistics> {
        Box::pin(self.fetch_statistics(mailbox_ref))
    }
}
