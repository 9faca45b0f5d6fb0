mod common;

use common::setup_db;
use randombox_backend::config::EventConfig;
use randombox_backend::database::codes;
use randombox_backend::error::{AppError, ImportError, IssueError};
use randombox_backend::models::CodeListQuery;
use randombox_backend::services::{CodeService, DrawService};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_issue_codes_creates_unique_prefixed_codes() {
    let db = setup_db().await;
    let service = CodeService::new(db.clone(), &EventConfig::default());

    let issued = service.issue_codes(25).await.unwrap();

    assert_eq!(issued.len(), 25);
    let unique: HashSet<_> = issued.iter().map(|c| c.code.clone()).collect();
    assert_eq!(unique.len(), 25);
    for code in &issued {
        assert!(code.code.starts_with("EVENT-"));
        assert_eq!(code.code.len(), 14);
        assert!(!code.is_used);
    }
    assert_eq!(codes::usage_counts(&db).await.unwrap(), (25, 0));
}

#[tokio::test]
async fn test_issue_count_bounds() {
    let db = setup_db().await;
    let service = CodeService::new(db.clone(), &EventConfig::default());

    for count in [0, -1, 101] {
        assert!(matches!(
            service.issue_codes(count).await,
            Err(IssueError::InvalidCount { max: 100 })
        ));
    }
    assert_eq!(service.issue_codes(100).await.unwrap().len(), 100);
}

#[tokio::test]
async fn test_configured_limits_cannot_exceed_ceilings() {
    let db = setup_db().await;
    let event = EventConfig {
        max_issue_count: 500,
        max_import_count: 5000,
        ..EventConfig::default()
    };
    let service = CodeService::new(db.clone(), &event);

    assert!(matches!(
        service.issue_codes(101).await,
        Err(IssueError::InvalidCount { max: 100 })
    ));
    let too_many: Vec<String> = (0..1001).map(|i| format!("CAP-{i:05}")).collect();
    assert!(matches!(
        service.bulk_import_codes(&too_many).await,
        Err(ImportError::TooMany { max: 1000 })
    ));
    assert_eq!(codes::usage_counts(&db).await.unwrap(), (0, 0));

    // lowering still applies, zero is raised to one
    let lowered = CodeService::new(
        db.clone(),
        &EventConfig {
            max_issue_count: 5,
            max_import_count: 0,
            ..EventConfig::default()
        },
    );
    assert!(matches!(
        lowered.issue_codes(6).await,
        Err(IssueError::InvalidCount { max: 5 })
    ));
    assert!(matches!(
        lowered.bulk_import_codes(&strings(&["A", "B"])).await,
        Err(ImportError::TooMany { max: 1 })
    ));
}

#[tokio::test]
async fn test_issue_gives_up_after_ten_collisions_and_keeps_earlier_codes() {
    let db = setup_db().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let service = CodeService::new(db.clone(), &EventConfig::default()).with_generator(Arc::new(
        move |prefix: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            format!("{prefix}FIXED000")
        },
    ));

    let err = service.issue_codes(3).await.unwrap_err();

    assert!(matches!(err, IssueError::GenerationFailed));
    // one success, then ten rejected candidates for the second slot
    assert_eq!(calls.load(Ordering::SeqCst), 11);
    assert!(codes::exists(&db, "EVENT-FIXED000").await.unwrap());
    assert_eq!(codes::usage_counts(&db).await.unwrap(), (1, 0));
}

#[tokio::test]
async fn test_issue_retries_past_existing_codes() {
    let db = setup_db().await;
    codes::insert(&db, "EVENT-TAKEN000").await.unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let service = CodeService::new(db.clone(), &EventConfig::default()).with_generator(Arc::new(
        move |prefix: &str| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n < 3 {
                format!("{prefix}TAKEN000")
            } else {
                format!("{prefix}FRESH{n:03}")
            }
        },
    ));

    let issued = service.issue_codes(1).await.unwrap();

    assert_eq!(issued[0].code, "EVENT-FRESH003");
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_bulk_import_partitions_created_and_duplicates() {
    let db = setup_db().await;
    codes::insert(&db, "PARTNER-0002").await.unwrap();
    let service = CodeService::new(db.clone(), &EventConfig::default());

    let raw = strings(&[
        " PARTNER-0001 ",
        "PARTNER-0002",
        "",
        "PARTNER-0003",
        "PARTNER-0001",
        "   ",
    ]);
    let outcome = service.bulk_import_codes(&raw).await.unwrap();

    let created: Vec<_> = outcome.created.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(created, vec!["PARTNER-0001", "PARTNER-0003"]);
    assert_eq!(outcome.duplicates, strings(&["PARTNER-0002"]));
    assert!(outcome.failed.is_empty());
    assert_eq!(codes::usage_counts(&db).await.unwrap(), (3, 0));
}

#[tokio::test]
async fn test_bulk_import_is_idempotent() {
    let db = setup_db().await;
    let service = CodeService::new(db.clone(), &EventConfig::default());
    let batch = strings(&["A-1", "A-2", "A-3"]);

    let first = service.bulk_import_codes(&batch).await.unwrap();
    assert_eq!(first.created.len(), 3);

    let again = strings(&["A-1", " A-2", "A-3", "A-2 "]);
    let second = service.bulk_import_codes(&again).await.unwrap();

    assert!(second.created.is_empty());
    assert_eq!(second.duplicates, strings(&["A-1", "A-2", "A-3"]));
    assert!(second.failed.is_empty());
    assert_eq!(codes::usage_counts(&db).await.unwrap(), (3, 0));
}

#[tokio::test]
async fn test_bulk_import_reports_oversized_codes_as_failed() {
    let db = setup_db().await;
    let service = CodeService::new(db.clone(), &EventConfig::default());
    let long = "X".repeat(65);

    let outcome = service
        .bulk_import_codes(&[long.clone(), "OK-0001".to_string()])
        .await
        .unwrap();

    assert_eq!(outcome.created.len(), 1);
    assert_eq!(outcome.failed, vec![long]);
}

#[tokio::test]
async fn test_bulk_import_size_limits() {
    let db = setup_db().await;
    let service = CodeService::new(db.clone(), &EventConfig::default());

    assert!(matches!(
        service.bulk_import_codes(&[]).await,
        Err(ImportError::Empty)
    ));
    assert!(matches!(
        service.bulk_import_codes(&strings(&["", "  "])).await,
        Err(ImportError::Empty)
    ));

    let too_many: Vec<String> = (0..1001).map(|i| format!("BULK-{i:05}")).collect();
    assert!(matches!(
        service.bulk_import_codes(&too_many).await,
        Err(ImportError::TooMany { max: 1000 })
    ));
    assert_eq!(codes::usage_counts(&db).await.unwrap(), (0, 0));

    let exactly_max = &too_many[..1000];
    let outcome = service.bulk_import_codes(exactly_max).await.unwrap();
    assert_eq!(outcome.created.len(), 1000);
}

#[tokio::test]
async fn test_list_codes_filters_by_status_and_reports_stats() {
    let db = setup_db().await;
    let service = CodeService::new(db.clone(), &EventConfig::default());
    let issued = service.issue_codes(4).await.unwrap();
    DrawService::new(db.clone())
        .participate(&issued[0].code)
        .await
        .unwrap();

    let used = service
        .list_codes(&CodeListQuery {
            status: Some("used".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(used.codes.len(), 1);
    assert_eq!(used.codes[0].code, issued[0].code);
    assert_eq!(used.pagination.total, 1);
    assert_eq!(used.stats.total, 4);
    assert_eq!(used.stats.used, 1);
    assert_eq!(used.stats.unused, 3);

    let page = service
        .list_codes(&CodeListQuery {
            page: Some(2),
            per_page: Some(3),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(page.codes.len(), 1);
    assert_eq!(page.pagination.total_pages, 2);

    assert!(matches!(
        service
            .list_codes(&CodeListQuery {
                status: Some("expired".into()),
                ..Default::default()
            })
            .await,
        Err(AppError::ValidationError(_))
    ));
}
