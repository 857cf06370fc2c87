//! Storage adapter for a tenant admin `sites` endpoint.
//!
//! `GET {admin}/sites?url=<site>` returns usage and quota or 404.

use super::http_client::{endpoint_url, read_json};
use super::{AdapterFuture, Lookup, SiteUsage, StorageAdapter};
use crate::error::AdapterResult;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteDto {
    url: Option<String>,
    #[serde(default)]
    storage_usage_bytes: u64,
    storage_quota_bytes: Option<u64>,
}

pub struct HttpStorageAdapter {
    client: Client,
    cached_auth_header: Option<String>,
}

impl HttpStorageAdapter {
    pub fn new(client: Client, token: Option<&str>) -> Self {
        Self {
            client,
            cached_auth_header: token.map(|t| format!("Bearer {t}")),
        }
    }

    #[instrument(skip(self))]
    async fn fetch_site(
        &self,
        tenant_admin_endpoint: &str,
        site_url: &str,
    ) -> AdapterResult<Lookup<SiteUsage>> {
        let url = endpoint_url(tenant_admin_endpoint, &["sites"])?;
        let mut request = self.client.get(url).query(&[("url", site_url)]);
        if let Some(auth) = &self.cached_auth_header {
            request = request.header("Authorization", auth);
        }

        let dto: Option<SiteDto> = read_json(request.send().await?).await?;
        Ok(dto
            .map(|dto| SiteUsage {
                url: dto.url.unwrap_or_else(|| site_url.to_string()),
                usage_bytes: dto.storage_usage_bytes,
                quota_bytes: dto.storage_quota_bytes,
            })
            .into())
    }
}

impl StorageAdapter for HttpStorageAdapter {
    fn name(&self) -> &str {
        "storage"
    }

    fn lookup_site<'a>(
        &'a self,
        tenant_admin_endpoint: &'a str,
        site_url: &'a str,
    ) -> AdapterFuture<'a, Lookup<SiteUsage>> {
        Box::pin(self.fetch_site(tenant_admin_endpoint, site_url))
    }
}
