use crate::core::alias::Alias;
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the lower-cased alias in site URL templates.
pub const ALIAS_PLACEHOLDER: &str = "{alias}";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Graph API root (default: <https://graph.microsoft.com>)
    #[serde(default = "default_directory_endpoint")]
    pub endpoint: String,
    /// Bearer token; usually supplied via `RETENTION_PROBE_GRAPH_TOKEN`
    #[serde(default)]
    pub token: Option<String>,
}

fn default_directory_endpoint() -> String {
    "https://graph.microsoft.com".into()
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_directory_endpoint(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailboxConfig {
    #[serde(default = "default_mailbox_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub token: Option<String>,
}

fn default_mailbox_endpoint() -> String {
    "https://outlook.office365.com/adminapi/v1.0/contoso.onmicrosoft.com".into()
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            endpoint: default_mailbox_endpoint(),
            token: None,
        }
    }
}

/// One storage tenant, checked in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantConfig {
    pub id: String,
    pub admin_endpoint: String,
    /// Personal site URL containing `{alias}`.
    pub site_url_template: String,
}

impl TenantConfig {
    pub fn new(id: &str, admin_endpoint: &str, site_url_template: &str) -> Self {
        Self {
            id: id.into(),
            admin_endpoint: admin_endpoint.into(),
            site_url_template: site_url_template.into(),
        }
    }

    pub fn site_url_for(&self, alias: &Alias) -> String {
        self.site_url_template
            .replace(ALIAS_PLACEHOLDER, &alias.to_lowercase())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Tenants in priority order; the first one that knows the site wins.
    #[serde(default = "default_tenants")]
    pub tenants: Vec<TenantConfig>,
    #[serde(default)]
    pub token: Option<String>,
}

fn default_tenants() -> Vec<TenantConfig> {
    vec![
        TenantConfig::new(
            "contoso",
            "https://contoso-admin.sharepoint.com",
            "https://contoso-my.sharepoint.com/personal/{alias}_contoso_com",
        ),
        TenantConfig::new(
            "fabrikam",
            "https://fabrikam-admin.sharepoint.com",
            "https://fabrikam-my.sharepoint.com/personal/{alias}_fabrikam_com",
        ),
    ]
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            tenants: default_tenants(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliabilityConfig {
    /// Upper bound for any single backend call (default: 30)
    #[serde(default = "default_adapter_timeout_secs")]
    pub adapter_timeout_secs: u64,
}

fn default_adapter_timeout_secs() -> u64 {
    30
}

impl Default for ReliabilityConfig {
    fn default() -> Self {
        Self {
            adapter_timeout_secs: default_adapter_timeout_secs(),
        }
    }
}
