// src/repository/mod.rs
pub mod in_memory_usage_summary_store;
pub mod usage_summary_repository;

use crate::domain::usage_summary_model::{Model as UsageSummary, NewUsageSummary};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

pub use in_memory_usage_summary_store::InMemoryUsageSummaryStore;
pub use usage_summary_repository::UsageSummaryRepository;

/// 永続化層のエラー
///
/// 一意制約違反は `Conflict` として他の失敗と区別する。
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Usage summary already exists for user {user_id} on {date}")]
    Conflict { user_id: String, date: String },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// 日次サマリーの保存先
#[async_trait]
pub trait UsageSummaryStore: Send + Sync {
    /// 新規作成のみを行う。同じ (user_id, date) が既にあれば `StoreError::Conflict`
    async fn insert(&self, summary: NewUsageSummary) -> Result<UsageSummary, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
