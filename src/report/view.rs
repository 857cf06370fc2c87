//! Flattens an investigation into labelled rows for the templates.

use super::format::{NOT_AVAILABLE, bytes, or_na, single_line, timestamp, yes_no};
use crate::core::finding::{Finding, FindingDetail, FindingStatus, MailboxDetail};
use crate::core::timeline::RECOVERY_WINDOW_DAYS;
use crate::core::{Investigation, Recommendation};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub label: &'static str,
    pub value: String,
}

impl Row {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: single_line(&value.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: &'static str,
    /// CSS hook: `ok`, `warn`, `bad` or `muted`.
    pub tone: &'static str,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub alias: String,
    pub generated_at: String,
    pub verdict: String,
    pub sections: Vec<Section>,
}

impl ReportView {
    pub fn build(
        investigation: &Investigation,
        recommendation: &Recommendation,
        generated_at: &str,
    ) -> Self {
        Self {
            alias: investigation.alias.to_string(),
            generated_at: generated_at.to_string(),
            verdict: recommendation.verdict.to_string(),
            sections: vec![
                account_section(investigation.directory()),
                retention_section(investigation),
                mailbox_section(investigation.mailbox()),
                timeline_section(investigation),
                storage_section(investigation.storage()),
                recommendation_section(investigation, recommendation),
            ],
        }
    }
}

fn status_label(finding: Option<&Finding>) -> String {
    match finding {
        None => NOT_AVAILABLE.to_string(),
        Some(finding) => match finding.unavailable_reason() {
            Some(reason) => format!("Unavailable: {reason}"),
            None => finding.status.to_string(),
        },
    }
}

fn tone(finding: Option<&Finding>) -> &'static str {
    match finding.map(|f| f.status) {
        Some(FindingStatus::Active) => "ok",
        Some(FindingStatus::SoftDeleted | FindingStatus::Deleted) => "warn",
        Some(FindingStatus::Error) => "bad",
        Some(FindingStatus::NotFound) | None => "muted",
    }
}

fn mailbox_detail(finding: Option<&Finding>) -> Option<&MailboxDetail> {
    match finding.map(|f| &f.detail) {
        Some(FindingDetail::Mailbox(detail)) => Some(detail),
        _ => None,
    }
}

fn account_section(directory: Option<&Finding>) -> Section {
    let detail = match directory.map(|f| &f.detail) {
        Some(FindingDetail::Directory(detail)) => Some(detail),
        _ => None,
    };
    Section {
        title: "Account Status",
        tone: tone(directory),
        rows: vec![
            Row::new("Status", status_label(directory)),
            Row::new("Display name", or_na(detail.and_then(|d| d.display_name.as_deref()))),
            Row::new(
                "Primary address",
                or_na(detail.and_then(|d| d.primary_address.as_deref())),
            ),
            Row::new("Object ID", or_na(detail.and_then(|d| d.object_id.as_deref()))),
            Row::new(
                "Deleted at",
                or_na(directory.and_then(|f| f.deleted_at.as_ref()).map(|s| s.raw())),
            ),
        ],
    }
}

fn retention_section(investigation: &Investigation) -> Section {
    let detail = mailbox_detail(investigation.mailbox());
    let window = match &investigation.timeline {
        Some(timeline) if timeline.window_open() => {
            format!("Open ({} days remaining)", timeline.days_remaining)
        }
        Some(timeline) if timeline.days_remaining == 0 => "Elapsed today".to_string(),
        Some(timeline) => format!("Elapsed ({} days ago)", -timeline.days_remaining),
        None => NOT_AVAILABLE.to_string(),
    };
    let holds = detail.map(|d| {
        if d.in_place_holds.is_empty() {
            "None".to_string()
        } else {
            d.in_place_holds.join(", ")
        }
    });

    Section {
        title: "Retention Status",
        tone: if detail.is_some_and(MailboxDetail::is_on_hold) {
            "warn"
        } else {
            "muted"
        },
        rows: vec![
            Row::new(
                "Litigation hold",
                or_na(detail.map(|d| if d.litigation_hold { "Enabled" } else { "Disabled" })),
            ),
            Row::new("In-place holds", or_na(holds)),
            Row::new(
                "Retention policy",
                or_na(detail.and_then(|d| d.retention_policy.as_deref())),
            ),
            Row::new("Recovery window", window),
        ],
    }
}

fn mailbox_section(mailbox: Option<&Finding>) -> Section {
    let detail = mailbox_detail(mailbox);
    let statistics = detail.map(|d| match &d.statistics_error {
        Some(reason) => format!("Unavailable: {reason}"),
        None => "Available".to_string(),
    });
    Section {
        title: "Mailbox Information",
        tone: tone(mailbox),
        rows: vec![
            Row::new("Status", status_label(mailbox)),
            Row::new("Display name", or_na(detail.and_then(|d| d.display_name.as_deref()))),
            Row::new(
                "Primary address",
                or_na(detail.and_then(|d| d.primary_address.as_deref())),
            ),
            Row::new(
                "Soft-deleted at",
                or_na(mailbox.and_then(|f| f.deleted_at.as_ref()).map(|s| s.raw())),
            ),
            Row::new(
                "Item count",
                or_na(detail.and_then(|d| d.item_count).map(|n| n.to_string())),
            ),
            Row::new("Total size", or_na(detail.and_then(|d| d.total_size_bytes).map(bytes))),
            Row::new("Statistics", or_na(statistics)),
        ],
    }
}

fn timeline_section(investigation: &Investigation) -> Section {
    let timeline = investigation.timeline.as_ref();
    let source = investigation.canonical_deleted_at.as_ref().map(|_| {
        if investigation
            .directory()
            .is_some_and(|f| f.deleted_at.is_some())
        {
            "Directory account deletion"
        } else {
            "Mailbox soft-delete"
        }
    });
    Section {
        title: "Deletion Timeline",
        tone: match timeline {
            Some(t) if t.window_open() => "warn",
            Some(_) => "bad",
            None => "muted",
        },
        rows: vec![
            Row::new(
                "Deletion recorded",
                or_na(investigation.canonical_deleted_at.as_ref().map(|s| s.raw())),
            ),
            Row::new("Deletion source", or_na(source)),
            Row::new(
                "Days since deletion",
                or_na(timeline.map(|t| t.days_since_deletion.to_string())),
            ),
            Row::new(
                "Days remaining",
                or_na(timeline.map(|t| t.days_remaining.to_string())),
            ),
            Row::new(
                "Expiration date",
                or_na(timeline.map(|t| timestamp(&t.expiration_date))),
            ),
            Row::new("Recovery window", format!("{RECOVERY_WINDOW_DAYS} days")),
        ],
    }
}

fn storage_section(storage: Option<&Finding>) -> Section {
    let mut rows = vec![Row::new("Status", status_label(storage))];
    match storage.map(|f| &f.detail) {
        Some(FindingDetail::Storage(site)) => {
            rows.push(Row::new("Tenant", site.tenant.clone()));
            rows.push(Row::new("Site URL", or_na(Some(site.site_url.as_str()))));
            rows.push(Row::new("Usage", bytes(site.usage_bytes)));
            rows.push(Row::new("Quota", or_na(site.quota_bytes.map(bytes))));
            rows.push(Row::new(
                "Percent used",
                or_na(site.percent_used().map(|p| format!("{p:.1}%"))),
            ));
        }
        Some(FindingDetail::StorageSearch(search)) => {
            rows.push(Row::new(
                "Search",
                format!("Checked {} tenants", search.tenants_checked),
            ));
            let failures = search
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.tenant, f.reason))
                .collect::<Vec<_>>();
            rows.push(Row::new(
                "Tenant failures",
                if failures.is_empty() {
                    "None".to_string()
                } else {
                    failures.join("; ")
                },
            ));
        }
        _ => {
            rows.push(Row::new("Site URL", NOT_AVAILABLE));
            rows.push(Row::new("Usage", NOT_AVAILABLE));
        }
    }
    Section {
        title: "Storage Information",
        tone: tone(storage),
        rows,
    }
}

fn recommendation_section(
    investigation: &Investigation,
    recommendation: &Recommendation,
) -> Section {
    Section {
        title: "Recommendation",
        tone: if investigation.has_data { "warn" } else { "ok" },
        rows: vec![
            Row::new("Verdict", recommendation.verdict.to_string()),
            Row::new("Rationale", recommendation.rationale.clone()),
            Row::new("Action", recommendation.action.clone()),
            Row::new("Recoverable data", yes_no(investigation.has_data)),
        ],
    }
}
