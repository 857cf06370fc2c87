mod backends;
mod core;
mod report;

pub use backends::{
    ALIAS_PLACEHOLDER, DirectoryConfig, MailboxConfig, ReliabilityConfig, StorageConfig,
    TenantConfig,
};
pub use self::core::Config;
pub use report::ReportConfig;
