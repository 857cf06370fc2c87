use super::{
    ALIAS_PLACEHOLDER, DirectoryConfig, MailboxConfig, ReliabilityConfig, ReportConfig,
    StorageConfig,
};
use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path the config was read from; `None` when running on built-in defaults
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    #[serde(default)]
    pub directory: DirectoryConfig,

    #[serde(default)]
    pub mailbox: MailboxConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub reliability: ReliabilityConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Ok(home.join(".retention-probe").join("config.toml"))
    }

    /// Built-in defaults, overlaid by `~/.retention-probe/config.toml` when
    /// that file exists, then by environment variables. Nothing is written.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path()?;
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(ConfigError::Io)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Load(e.to_string()))
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub(crate) fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = value("RETENTION_PROBE_GRAPH_ENDPOINT") {
            self.directory.endpoint = endpoint;
        }
        if let Some(token) = value("RETENTION_PROBE_GRAPH_TOKEN") {
            self.directory.token = Some(token);
        }
        if let Some(endpoint) = value("RETENTION_PROBE_MAILBOX_ENDPOINT") {
            self.mailbox.endpoint = endpoint;
        }
        if let Some(token) = value("RETENTION_PROBE_MAILBOX_TOKEN") {
            self.mailbox.token = Some(token);
        }
        if let Some(token) = value("RETENTION_PROBE_STORAGE_TOKEN") {
            self.storage.token = Some(token);
        }
        if let Some(secs) = value("RETENTION_PROBE_TIMEOUT_SECS") {
            if let Ok(secs) = secs.trim().parse::<u64>() {
                self.reliability.adapter_timeout_secs = secs;
            } else {
                tracing::warn!("ignoring non-numeric RETENTION_PROBE_TIMEOUT_SECS={secs}");
            }
        }
        if let Some(dir) = value("RETENTION_PROBE_OUTPUT_DIR") {
            self.report.output_dir = dir;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reliability.adapter_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "reliability.adapter_timeout_secs must be greater than 0".into(),
            ));
        }

        check_endpoint("directory.endpoint", &self.directory.endpoint)?;
        check_endpoint("mailbox.endpoint", &self.mailbox.endpoint)?;

        let mut seen = HashSet::new();
        for tenant in &self.storage.tenants {
            let id = tenant.id.trim();
            if id.is_empty() {
                return Err(ConfigError::Validation(
                    "storage.tenants entries need a non-empty id".into(),
                ));
            }
            if !seen.insert(id.to_ascii_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "storage tenant '{id}' is listed more than once"
                )));
            }
            if !tenant.site_url_template.contains(ALIAS_PLACEHOLDER) {
                return Err(ConfigError::Validation(format!(
                    "storage tenant '{id}': site_url_template must contain {ALIAS_PLACEHOLDER}"
                )));
            }
            check_endpoint(&format!("storage tenant '{id}' admin_endpoint"), &tenant.admin_endpoint)?;
        }

        Ok(())
    }

    pub fn adapter_timeout(&self) -> Duration {
        Duration::from_secs(self.reliability.adapter_timeout_secs)
    }

    /// Report directory with `~` expanded.
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.report.output_dir).into_owned())
    }
}

fn check_endpoint(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| ConfigError::Validation(format!("{field} '{value}' is not a URL: {e}")))?;
    if matches!(parsed.scheme(), "http" | "https") {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{field} '{value}' must use http or https"
        )))
    }
}
