// tests/unit/repository_tests.rs
use carbon_diary_backend::{
    domain::usage_summary_model::NewUsageSummary,
    repository::{StoreError, UsageSummaryRepository, UsageSummaryStore},
};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use crate::common;

fn new_summary(user_id: &str, date: &str) -> NewUsageSummary {
    NewUsageSummary {
        user_id: user_id.to_string(),
        date: date.to_string(),
        total_logs: Some(4),
        total_daily_co2: Some(Decimal::from_str("10").unwrap()),
        avg_daily_co2: Some(Decimal::from_str("2.5").unwrap()),
        eco_score: Some(88.0),
    }
}

#[tokio::test]
async fn test_insert_usage_summary() {
    let db = common::db::TestDatabase::new().await;
    let repo = UsageSummaryRepository::new(db.connection.clone());

    let saved = repo.insert(new_summary("u1", "2024-01-01")).await.unwrap();

    assert_eq!(saved.user_id, "u1");
    assert_eq!(saved.date, "2024-01-01");
    assert_eq!(saved.total_logs, Some(4));
    assert_eq!(saved.eco_score, Some(88.0));
    assert_eq!(saved.created_at, saved.updated_at);

    let found = repo
        .find_by_user_and_date("u1", "2024-01-01")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, saved.id);
}

#[tokio::test]
async fn test_decimal_round_trip_is_exact() {
    let db = common::db::TestDatabase::new().await;
    let repo = UsageSummaryRepository::new(db.connection.clone());

    let mut summary = new_summary("u1", "2024-01-01");
    summary.avg_daily_co2 = Some(Decimal::from_str("2.505").unwrap());
    summary.total_daily_co2 = Some(Decimal::from_str("0.30000000000000004").unwrap());
    repo.insert(summary).await.unwrap();

    let found = repo
        .find_by_user_and_date("u1", "2024-01-01")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.avg_daily_co2.unwrap().to_string(), "2.505");
    assert_eq!(
        found.total_daily_co2.unwrap().to_string(),
        "0.30000000000000004"
    );
}

#[tokio::test]
async fn test_null_decimals_are_stored_as_null() {
    let db = common::db::TestDatabase::new().await;
    let repo = UsageSummaryRepository::new(db.connection.clone());

    let summary = NewUsageSummary {
        user_id: "u1".to_string(),
        date: "2024-01-01".to_string(),
        ..Default::default()
    };
    repo.insert(summary).await.unwrap();

    let found = repo
        .find_by_user_and_date("u1", "2024-01-01")
        .await
        .unwrap()
        .unwrap();
    assert!(found.total_daily_co2.is_none());
    assert!(found.avg_daily_co2.is_none());
    assert!(found.total_logs.is_none());
    assert!(found.eco_score.is_none());
}

#[tokio::test]
async fn test_duplicate_key_is_conflict() {
    let db = common::db::TestDatabase::new().await;
    let repo = UsageSummaryRepository::new(db.connection.clone());

    repo.insert(new_summary("u1", "2024-01-01")).await.unwrap();

    let mut other_values = new_summary("u1", "2024-01-01");
    other_values.total_logs = Some(1);
    let err = repo.insert(other_values).await.unwrap_err();

    match err {
        StoreError::Conflict { user_id, date } => {
            assert_eq!(user_id, "u1");
            assert_eq!(date, "2024-01-01");
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    assert_eq!(
        repo.count_by_user_and_date("u1", "2024-01-01").await.unwrap(),
        1
    );
    let kept = repo
        .find_by_user_and_date("u1", "2024-01-01")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.total_logs, Some(4));
}

#[tokio::test]
async fn test_different_keys_are_independent() {
    let db = common::db::TestDatabase::new().await;
    let repo = UsageSummaryRepository::new(db.connection.clone());

    repo.insert(new_summary("u1", "2024-01-01")).await.unwrap();
    repo.insert(new_summary("u1", "2024-01-02")).await.unwrap();
    repo.insert(new_summary("u2", "2024-01-01")).await.unwrap();

    assert_eq!(
        repo.count_by_user_and_date("u1", "2024-01-01").await.unwrap(),
        1
    );
    assert_eq!(
        repo.count_by_user_and_date("u2", "2024-01-01").await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_concurrent_inserts_single_winner() {
    let db = common::db::TestDatabase::new().await;
    let repo = Arc::new(UsageSummaryRepository::new(db.connection.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.insert(new_summary("u1", "2024-01-01")).await })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(StoreError::Conflict { .. }) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(
        repo.count_by_user_and_date("u1", "2024-01-01").await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_ping() {
    let db = common::db::TestDatabase::new().await;
    let repo = UsageSummaryRepository::new(db.connection.clone());

    assert!(repo.ping().await.is_ok());
}
