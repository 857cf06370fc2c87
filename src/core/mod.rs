//! Investigation domain: findings, reconciliation and the retention verdict.

pub mod alias;
pub mod collector;
pub mod finding;
pub mod investigation;
pub mod recommendation;
pub mod timeline;

pub use alias::Alias;
pub use collector::EvidenceCollector;
pub use finding::{Finding, FindingDetail, FindingStatus, Source};
pub use investigation::{Investigation, canonical_deletion};
pub use recommendation::{Recommendation, Verdict, recommend};
pub use timeline::{DeletionStamp, RECOVERY_WINDOW_DAYS, Timeline, parse_timestamp};
