//! Directory adapter backed by a Graph-style `deletedItems` endpoint.

use super::http_client::{endpoint_url, read_json};
use super::{AdapterFuture, DeletedAccount, DirectoryAdapter, Lookup};
use crate::core::alias::Alias;
use crate::core::timeline::DeletionStamp;
use crate::error::AdapterResult;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

const DELETED_USERS_PATH: &[&str] = &["v1.0", "directory", "deletedItems", "microsoft.graph.user"];
const SELECT_FIELDS: &str = "id,displayName,userPrincipalName,mail,mailNickname,deletedDateTime";

/// Paged `OData` collection wrapper.
#[derive(Debug, Deserialize)]
struct ODataResponse<T> {
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletedUser {
    id: Option<String>,
    display_name: Option<String>,
    user_principal_name: Option<String>,
    mail: Option<String>,
    deleted_date_time: Option<String>,
}

impl From<DeletedUser> for DeletedAccount {
    fn from(user: DeletedUser) -> Self {
        Self {
            object_id: user.id,
            display_name: user.display_name,
            primary_address: user.mail.or(user.user_principal_name),
            deleted_at: user.deleted_date_time.map(DeletionStamp::new),
        }
    }
}

pub struct GraphDirectoryAdapter {
    client: Client,
    base_url: String,
    /// Pre-computed `"Bearer <token>"` header value.
    cached_auth_header: Option<String>,
}

impl GraphDirectoryAdapter {
    pub fn new(client: Client, base_url: &str, token: Option<&str>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cached_auth_header: token.map(|t| format!("Bearer {t}")),
        }
    }

    #[instrument(skip(self, alias), fields(alias = %alias))]
    async fn fetch_deleted(&self, alias: &Alias) -> AdapterResult<Lookup<DeletedAccount>> {
        let url = endpoint_url(&self.base_url, DELETED_USERS_PATH)?;
        let filter = format!("mailNickname eq '{}'", odata_quote(alias.as_str()));

        let mut request = self
            .client
            .get(url)
            .query(&[("$filter", filter.as_str()), ("$select", SELECT_FIELDS)]);
        if let Some(auth) = &self.cached_auth_header {
            request = request.header("Authorization", auth);
        }

        let page: Option<ODataResponse<DeletedUser>> = read_json(request.send().await?).await?;
        let users = page.map(|p| p.value).unwrap_or_default();
        debug!(matches = users.len(), "deleted directory objects returned");

        Ok(latest_deletion(users.into_iter().map(DeletedAccount::from).collect()).into())
    }
}

impl DirectoryAdapter for GraphDirectoryAdapter {
    fn name(&self) -> &str {
        "graph"
    }

    fn lookup_deleted_account<'a>(
        &'a self,
        alias: &'a Alias,
    ) -> AdapterFuture<'a, Lookup<DeletedAccount>> {
        Box::pin(self.fetch_deleted(alias))
    }
}

fn odata_quote(value: &str) -> String {
    value.replace('\'', "''")
}

/// Several deleted objects can share a nickname; keep the most recent
/// readable deletion, falling back to the first record.
fn latest_deletion(accounts: Vec<DeletedAccount>) -> Option<DeletedAccount> {
    let newest = accounts
        .iter()
        .enumerate()
        .filter_map(|(idx, account)| {
            account
                .deleted_at
                .as_ref()
                .and_then(|stamp| stamp.parse().ok())
                .map(|at| (idx, at))
        })
        .max_by_key(|(_, at)| *at)
        .map(|(idx, _)| idx);

    let pick = newest.unwrap_or(0);
    accounts.into_iter().nth(pick)
}
