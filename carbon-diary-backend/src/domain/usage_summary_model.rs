// src/domain/usage_summary_model.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

/// 1ユーザー・1日あたりの CO2 使用量サマリー
///
/// (user_id, date) の組み合わせはDBの一意インデックスで1件に制限される。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usage_summaries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub user_id: String,
    #[sea_orm(column_type = "Text")]
    pub date: String,
    #[sea_orm(nullable)]
    pub total_logs: Option<i32>,
    #[sea_orm(column_type = "Decimal(None)", nullable)]
    pub total_daily_co2: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(None)", nullable)]
    pub avg_daily_co2: Option<Decimal>,
    #[sea_orm(column_type = "Double", nullable)]
    pub eco_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}

/// 保存前の正規化済みサマリー（IDとタイムスタンプは保存時に付与）
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewUsageSummary {
    pub user_id: String,
    pub date: String,
    pub total_logs: Option<i32>,
    pub total_daily_co2: Option<Decimal>,
    pub avg_daily_co2: Option<Decimal>,
    pub eco_score: Option<f64>,
}

impl NewUsageSummary {
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            user_id: Set(self.user_id),
            date: Set(self.date),
            total_logs: Set(self.total_logs),
            total_daily_co2: Set(self.total_daily_co2),
            avg_daily_co2: Set(self.avg_daily_co2),
            eco_score: Set(self.eco_score),
            ..ActiveModel::new()
        }
    }

    /// DBを介さずにモデルを組み立てる（インメモリストア用）
    pub fn into_model(self) -> Model {
        let now = Utc::now();
        Model {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            date: self.date,
            total_logs: self.total_logs,
            total_daily_co2: self.total_daily_co2,
            avg_daily_co2: self.avg_daily_co2,
            eco_score: self.eco_score,
            created_at: now,
            updated_at: now,
        }
    }
}
