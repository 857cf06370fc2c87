use chrono::{DateTime, Duration, TimeZone, Utc};
use retention_probe::adapters::{DeletedAccount, MailboxState};
use retention_probe::core::{DeletionStamp, FindingStatus, Investigation, Verdict, recommend};
use retention_probe::report::ReportView;

use super::fakes::{
    Backends, Reply, T1_ADMIN, alias, deleted_account, mailbox, site, statistics,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 9, 30, 0).unwrap()
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339()
}

fn report_row(investigation: &Investigation, section: &str, label: &str) -> String {
    let view = ReportView::build(investigation, &recommend(investigation), "2026-04-01 09:30:00");
    view.sections
        .iter()
        .find(|s| s.title == section)
        .and_then(|s| s.rows.iter().find(|r| r.label == label))
        .map(|r| r.value.clone())
        .unwrap_or_else(|| panic!("no row {section}/{label}"))
}

#[tokio::test]
async fn directory_stamp_wins_even_when_mailbox_is_older() {
    let (collector, _calls) = Backends {
        directory: Reply::Found(deleted_account("2026-03-20T00:00:00Z")),
        mailbox_soft_deleted: Reply::Found(mailbox(
            MailboxState::SoftDeleted,
            Some("2026-03-01T00:00:00Z"),
        )),
        ..Backends::default()
    }
    .build();

    let investigation = collector.collect_at(&alias("jdoe"), now()).await;

    assert_eq!(
        investigation.canonical_deleted_at,
        Some(DeletionStamp::new("2026-03-20T00:00:00Z"))
    );
    assert_eq!(investigation.timeline.unwrap().days_since_deletion, 12);
}

#[tokio::test]
async fn mailbox_soft_delete_is_the_fallback_stamp() {
    let (collector, _calls) = Backends {
        mailbox_soft_deleted: Reply::Found(mailbox(
            MailboxState::SoftDeleted,
            Some("2026-03-25T09:30:00Z"),
        )),
        ..Backends::default()
    }
    .build();

    let investigation = collector.collect_at(&alias("jdoe"), now()).await;

    assert_eq!(
        investigation.canonical_deleted_at,
        Some(DeletionStamp::new("2026-03-25T09:30:00Z"))
    );
    let timeline = investigation.timeline.unwrap();
    assert_eq!(timeline.days_since_deletion, 7);
    assert_eq!(timeline.days_remaining, 23);
}

#[tokio::test]
async fn directory_deletion_without_stamp_falls_back_to_mailbox() {
    let (collector, _calls) = Backends {
        directory: Reply::Found(DeletedAccount {
            deleted_at: None,
            ..deleted_account("2026-01-01T00:00:00Z")
        }),
        mailbox_soft_deleted: Reply::Found(mailbox(
            MailboxState::SoftDeleted,
            Some("2026-03-25T09:30:00Z"),
        )),
        ..Backends::default()
    }
    .build();

    let investigation = collector.collect_at(&alias("jdoe"), now()).await;

    assert_eq!(investigation.directory().unwrap().status, FindingStatus::Deleted);
    assert_eq!(
        investigation.canonical_deleted_at,
        Some(DeletionStamp::new("2026-03-25T09:30:00Z"))
    );
    assert_eq!(investigation.timeline.unwrap().days_since_deletion, 7);
    assert_eq!(
        report_row(&investigation, "Deletion Timeline", "Deletion source"),
        "Mailbox soft-delete"
    );
}

#[tokio::test]
async fn far_future_directory_stamp_suppresses_timeline_instead_of_failing() {
    let (collector, _calls) = Backends {
        directory: Reply::Found(deleted_account("+262142-12-31T00:00:00")),
        mailbox_soft_deleted: Reply::Found(mailbox(
            MailboxState::SoftDeleted,
            Some("2026-03-25T09:30:00Z"),
        )),
        statistics: Reply::Found(statistics(3, 2048)),
        ..Backends::default()
    }
    .build();

    let investigation = collector.collect_at(&alias("jdoe"), now()).await;

    assert_eq!(
        investigation.canonical_deleted_at,
        Some(DeletionStamp::new("+262142-12-31T00:00:00"))
    );
    assert!(investigation.timeline.is_none());
    assert_eq!(recommend(&investigation).verdict, Verdict::Retain);
    assert_eq!(
        report_row(&investigation, "Deletion Timeline", "Days remaining"),
        "N/A"
    );
}

#[tokio::test]
async fn no_deletion_anywhere_means_no_timeline() {
    let (collector, _calls) = Backends {
        mailbox_active: Reply::Found(mailbox(MailboxState::Active, None)),
        ..Backends::default()
    }
    .build();

    let investigation = collector.collect_at(&alias("jdoe"), now()).await;

    assert!(investigation.canonical_deleted_at.is_none());
    assert!(investigation.timeline.is_none());
}

#[tokio::test]
async fn account_outage_with_active_mailbox_content_is_retained() {
    let (collector, _calls) = Backends {
        directory: Reply::Fail("HTTP 503".into()),
        mailbox_active: Reply::Found(mailbox(MailboxState::Active, None)),
        statistics: Reply::Found(statistics(5, 0)),
        ..Backends::default()
    }
    .build();

    let investigation = collector.collect_at(&alias("jdoe"), now()).await;

    assert_eq!(investigation.directory().unwrap().status, FindingStatus::Error);
    assert!(investigation.has_data);
    assert_eq!(recommend(&investigation).verdict, Verdict::Retain);
}

#[tokio::test]
async fn elapsed_window_still_retains_when_data_exists() {
    let deleted = now() - Duration::days(45);
    let (collector, _calls) = Backends {
        directory: Reply::Found(deleted_account(&rfc3339(deleted))),
        mailbox_soft_deleted: Reply::Found(mailbox(MailboxState::SoftDeleted, None)),
        statistics: Reply::Found(statistics(40, 1_048_576)),
        ..Backends::default()
    }
    .build();

    let investigation = collector.collect_at(&alias("jdoe"), now()).await;

    let timeline = investigation.timeline.unwrap();
    assert_eq!(timeline.days_since_deletion, 45);
    assert_eq!(timeline.days_remaining, -15);
    assert_eq!(timeline.expiration_date, deleted + Duration::days(30));
    assert_eq!(recommend(&investigation).verdict, Verdict::Retain);
}

#[tokio::test]
async fn nothing_left_anywhere_is_purged() {
    let (collector, _calls) = Backends {
        directory: Reply::Found(deleted_account("2026-03-30T00:00:00Z")),
        mailbox_soft_deleted: Reply::Found(mailbox(
            MailboxState::SoftDeleted,
            Some("2026-03-30T00:00:00Z"),
        )),
        statistics: Reply::Found(statistics(0, 0)),
        ..Backends::default()
    }
    .site(T1_ADMIN, Reply::Found(site("https://t1-my.example.com/personal/jdoe_t1_com", 0)))
    .build();

    let investigation = collector.collect_at(&alias("jdoe"), now()).await;

    assert!(investigation.storage_found());
    assert!(!investigation.has_data);
    let recommendation = recommend(&investigation);
    assert_eq!(recommendation.verdict, Verdict::Purge);
    // A still-open window does not change the verdict either.
    assert!(investigation.timeline.unwrap().window_open());
}

#[tokio::test]
async fn storage_bytes_alone_mean_data() {
    let (collector, _calls) = Backends::default()
        .site(T1_ADMIN, Reply::Found(site("https://t1-my.example.com/personal/jdoe_t1_com", 1)))
        .build();

    let investigation = collector.collect_at(&alias("jdoe"), now()).await;

    assert!(investigation.has_data);
    assert_eq!(recommend(&investigation).verdict, Verdict::Retain);
}

#[tokio::test]
async fn unreadable_directory_stamp_keeps_precedence_but_drops_timeline() {
    let (collector, _calls) = Backends {
        directory: Reply::Found(deleted_account("last tuesday")),
        mailbox_soft_deleted: Reply::Found(mailbox(
            MailboxState::SoftDeleted,
            Some("2026-03-25T00:00:00Z"),
        )),
        ..Backends::default()
    }
    .build();

    let investigation = collector.collect_at(&alias("jdoe"), now()).await;

    assert_eq!(
        investigation.canonical_deleted_at,
        Some(DeletionStamp::new("last tuesday"))
    );
    assert!(investigation.timeline.is_none());
}

#[tokio::test]
async fn repeated_collection_is_identical_apart_from_the_clock() {
    let backends = Backends {
        directory: Reply::Found(deleted_account("2026-03-01T00:00:00Z")),
        mailbox_active: Reply::Found(mailbox(MailboxState::Active, None)),
        statistics: Reply::Found(statistics(3, 2048)),
        ..Backends::default()
    }
    .site(T1_ADMIN, Reply::Fail("throttled".into()));
    let (first, _) = backends.clone().build();
    let (second, _) = backends.build();

    let a = first.collect_at(&alias("jdoe"), now()).await;
    let b = second.collect_at(&alias("jdoe"), now()).await;
    assert_eq!(a, b);

    let later = second
        .collect_at(&alias("jdoe"), now() + Duration::days(2))
        .await;
    assert_eq!(a.findings, later.findings);
    assert_eq!(a.canonical_deleted_at, later.canonical_deleted_at);
    assert_eq!(a.has_data, later.has_data);
    assert_ne!(a.timeline, later.timeline);
}
