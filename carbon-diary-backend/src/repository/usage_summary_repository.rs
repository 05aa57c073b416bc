// src/repository/usage_summary_repository.rs
use super::{StoreError, UsageSummaryStore};
use crate::domain::usage_summary_model::{
    self, Entity as UsageSummaryEntity, Model as UsageSummary, NewUsageSummary,
};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    SqlErr,
};

pub struct UsageSummaryRepository {
    db: DbConn,
}

impl UsageSummaryRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_user_and_date(
        &self,
        user_id: &str,
        date: &str,
    ) -> Result<Option<UsageSummary>, DbErr> {
        UsageSummaryEntity::find()
            .filter(usage_summary_model::Column::UserId.eq(user_id))
            .filter(usage_summary_model::Column::Date.eq(date))
            .one(&self.db)
            .await
    }

    pub async fn count_by_user_and_date(&self, user_id: &str, date: &str) -> Result<u64, DbErr> {
        UsageSummaryEntity::find()
            .filter(usage_summary_model::Column::UserId.eq(user_id))
            .filter(usage_summary_model::Column::Date.eq(date))
            .count(&self.db)
            .await
    }
}

#[async_trait]
impl UsageSummaryStore for UsageSummaryRepository {
    async fn insert(&self, summary: NewUsageSummary) -> Result<UsageSummary, StoreError> {
        let user_id = summary.user_id.clone();
        let date = summary.date.clone();

        summary
            .into_active_model()
            .insert(&self.db)
            .await
            .map_err(|err| match err.sql_err() {
                // 同時リクエストの勝敗は一意インデックスが決める
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    StoreError::Conflict { user_id, date }
                }
                _ => StoreError::Database(err),
            })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.ping().await?;
        Ok(())
    }
}
