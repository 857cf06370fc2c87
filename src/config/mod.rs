pub mod schema;

pub use schema::{
    Config, DirectoryConfig, MailboxConfig, ReliabilityConfig, ReportConfig, StorageConfig,
    TenantConfig,
};
