mod common;

use common::{prize, prize_stock, seed_catalog, setup_db};
use futures_util::future::join_all;
use randombox_backend::database::{codes, winners};
use randombox_backend::error::DrawError;
use randombox_backend::services::DrawService;
use sea_orm::DatabaseConnection;

async fn issue(db: &DatabaseConnection, code: &str) -> i64 {
    codes::insert(db, code).await.expect("insert code").id
}

#[tokio::test]
async fn test_participate_consumes_code_and_records_winner() {
    let db = setup_db().await;
    let catalog = seed_catalog(&db, &[prize("coffee", 3, 10)]).await;
    issue(&db, "EVENT-AAAA1111").await;
    let service = DrawService::new(db.clone());

    let outcome = service.participate("EVENT-AAAA1111").await.unwrap();

    assert_eq!(outcome.prize.id, catalog[0].id);
    assert_eq!(outcome.prize.name, "coffee");
    assert_eq!(prize_stock(&db, catalog[0].id).await, 2);

    let code = codes::find_by_code(&db, "EVENT-AAAA1111").await.unwrap().unwrap();
    assert!(code.is_used);
    assert!(code.used_at.is_some());

    let winner = winners::find(&db, &outcome.winner_id).await.unwrap().unwrap();
    assert_eq!(winner.participation_code_id, code.id);
    assert_eq!(winner.prize_id, catalog[0].id);
    assert!(winner.user_phone_number.is_empty());
    assert!(winner.fulfillment_transaction_id.is_empty());
}

#[tokio::test]
async fn test_participate_trims_surrounding_whitespace() {
    let db = setup_db().await;
    seed_catalog(&db, &[prize("coffee", 1, 10)]).await;
    issue(&db, "EVENT-TRIM0001").await;
    let service = DrawService::new(db.clone());

    assert!(service.participate("  EVENT-TRIM0001\n").await.is_ok());
}

#[tokio::test]
async fn test_second_redemption_is_rejected_without_side_effects() {
    let db = setup_db().await;
    let catalog = seed_catalog(&db, &[prize("coffee", 5, 10)]).await;
    issue(&db, "EVENT-ONCE0001").await;
    let service = DrawService::new(db.clone());

    service.participate("EVENT-ONCE0001").await.unwrap();
    let err = service.participate("EVENT-ONCE0001").await.unwrap_err();

    assert!(matches!(err, DrawError::CodeAlreadyUsed));
    assert_eq!(err.to_string(), "이미 사용된 참여 코드입니다.");
    assert_eq!(prize_stock(&db, catalog[0].id).await, 4);
    assert_eq!(winners::count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_mark_used_only_succeeds_once() {
    let db = setup_db().await;
    let id = issue(&db, "EVENT-MARK0001").await;
    let first_at = chrono::Utc::now();

    assert!(codes::mark_used(&db, id, first_at).await.unwrap());
    assert!(!codes::mark_used(&db, id, first_at + chrono::Duration::seconds(5)).await.unwrap());

    let stored = codes::find_by_code(&db, "EVENT-MARK0001").await.unwrap().unwrap();
    assert!(stored.is_used);
    assert_eq!(stored.used_at.map(|t| t.timestamp()), Some(first_at.timestamp()));
}

#[tokio::test]
async fn test_input_and_lookup_failures() {
    let db = setup_db().await;
    seed_catalog(&db, &[prize("coffee", 5, 10)]).await;
    let service = DrawService::new(db.clone());

    assert!(matches!(
        service.participate("").await,
        Err(DrawError::InvalidInput)
    ));
    assert!(matches!(
        service.participate("   ").await,
        Err(DrawError::InvalidInput)
    ));
    assert!(matches!(
        service.participate("EVENT-NOPE0000").await,
        Err(DrawError::CodeNotFound)
    ));
    assert_eq!(winners::count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_exhausted_catalog_leaves_code_unused() {
    let db = setup_db().await;
    seed_catalog(&db, &[prize("coffee", 0, 10), prize("voucher", 0, 90)]).await;
    issue(&db, "EVENT-EMPTY001").await;
    let service = DrawService::new(db.clone());

    let err = service.participate("EVENT-EMPTY001").await.unwrap_err();

    assert!(matches!(err, DrawError::PrizesExhausted));
    let code = codes::find_by_code(&db, "EVENT-EMPTY001").await.unwrap().unwrap();
    assert!(!code.is_used);
    assert!(code.used_at.is_none());
}

#[tokio::test]
async fn test_zero_weight_stock_is_not_drawable() {
    let db = setup_db().await;
    seed_catalog(&db, &[prize("display only", 10, 0)]).await;
    issue(&db, "EVENT-WEIGHT00").await;
    let service = DrawService::new(db.clone());

    assert!(matches!(
        service.participate("EVENT-WEIGHT00").await,
        Err(DrawError::PrizesExhausted)
    ));
}

#[tokio::test]
async fn test_last_unit_goes_to_one_participant() {
    let db = setup_db().await;
    let catalog = seed_catalog(&db, &[prize("last one", 1, 10)]).await;
    issue(&db, "EVENT-FIRST001").await;
    issue(&db, "EVENT-SECOND01").await;
    let service = DrawService::new(db.clone());

    service.participate("EVENT-FIRST001").await.unwrap();
    let err = service.participate("EVENT-SECOND01").await.unwrap_err();

    assert!(matches!(err, DrawError::PrizesExhausted));
    assert_eq!(prize_stock(&db, catalog[0].id).await, 0);
    let second = codes::find_by_code(&db, "EVENT-SECOND01").await.unwrap().unwrap();
    assert!(!second.is_used);
}

#[tokio::test]
async fn test_sold_out_prizes_are_skipped() {
    let db = setup_db().await;
    let catalog = seed_catalog(
        &db,
        &[prize("sold out", 0, 1000), prize("available", 50, 1)],
    )
    .await;
    let service = DrawService::new(db.clone());

    for i in 0..10 {
        let code = format!("EVENT-SKIP{i:04}");
        issue(&db, &code).await;
        let outcome = service.participate(&code).await.unwrap();
        assert_eq!(outcome.prize.id, catalog[1].id);
    }
    assert_eq!(prize_stock(&db, catalog[1].id).await, 40);
}

#[tokio::test]
async fn test_seeded_catalog_only_awards_mega_coffee() {
    let db = setup_db().await;
    let service = DrawService::new(db.clone());

    for i in 0..20 {
        let code = format!("EVENT-SEED{i:04}");
        issue(&db, &code).await;
        let outcome = service.participate(&code).await.unwrap();
        assert_eq!(outcome.prize.name, "메가커피 아메리카노");
    }
}

#[tokio::test]
async fn test_concurrent_redemptions_of_one_code_award_once() {
    let db = setup_db().await;
    let catalog = seed_catalog(&db, &[prize("coffee", 100, 10)]).await;
    issue(&db, "EVENT-RACE0001").await;
    let service = DrawService::new(db.clone());

    let results = join_all((0..10).map(|_| service.participate("EVENT-RACE0001"))).await;

    let wins = results.iter().filter(|r| r.is_ok()).count();
    let already_used = results
        .iter()
        .filter(|r| matches!(r, Err(DrawError::CodeAlreadyUsed)))
        .count();
    assert_eq!(wins, 1);
    assert_eq!(already_used, 9);
    assert_eq!(prize_stock(&db, catalog[0].id).await, 99);
    assert_eq!(winners::count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_concurrent_draws_never_oversell_stock() {
    let db = setup_db().await;
    let catalog = seed_catalog(&db, &[prize("limited", 5, 10)]).await;
    let codes_list: Vec<String> = (0..20).map(|i| format!("EVENT-LIMIT{i:03}")).collect();
    for code in &codes_list {
        issue(&db, code).await;
    }
    let service = DrawService::new(db.clone());

    let results = join_all(codes_list.iter().map(|c| service.participate(c))).await;

    let wins = results.iter().filter(|r| r.is_ok()).count();
    let exhausted = results
        .iter()
        .filter(|r| matches!(r, Err(DrawError::PrizesExhausted)))
        .count();
    assert_eq!(wins, 5);
    assert_eq!(exhausted, 15);
    assert_eq!(prize_stock(&db, catalog[0].id).await, 0);
    assert_eq!(winners::count(&db).await.unwrap(), 5);
    let (_, used) = codes::usage_counts(&db).await.unwrap();
    assert_eq!(used, 5);
}
