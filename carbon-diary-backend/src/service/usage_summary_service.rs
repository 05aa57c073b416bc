// src/service/usage_summary_service.rs

use crate::api::dto::usage_summary_dto::{Co2Value, CreateUsageSummaryDto};
use crate::domain::usage_summary_model::{Model as UsageSummary, NewUsageSummary};
use crate::error::{AppError, AppResult};
use crate::repository::{StoreError, UsageSummaryStore};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 取り込み結果
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    Created(UsageSummary),
    /// 同じ (user_id, date) が既に保存済み。再送として成功扱いにする
    AlreadyExists,
}

pub struct UsageSummaryService {
    store: Arc<dyn UsageSummaryStore>,
}

impl UsageSummaryService {
    pub fn new(store: Arc<dyn UsageSummaryStore>) -> Self {
        Self { store }
    }

    pub async fn ingest(&self, payload: CreateUsageSummaryDto) -> AppResult<IngestOutcome> {
        let summary = normalize(payload);

        match self.store.insert(summary).await {
            Ok(saved) => {
                info!(
                    summary_id = %saved.id,
                    user_id = %saved.user_id,
                    date = %saved.date,
                    "Saved usage summary"
                );
                Ok(IngestOutcome::Created(saved))
            }
            Err(StoreError::Conflict { user_id, date }) => {
                info!(%user_id, %date, "Usage summary already synced");
                Ok(IngestOutcome::AlreadyExists)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.store
            .ping()
            .await
            .map_err(|e| AppError::ServiceUnavailable(e.to_string()))
    }
}

/// 派生値の計算と小数の正規化を行い、保存用の値に変換する
pub fn normalize(payload: CreateUsageSummaryDto) -> NewUsageSummary {
    let total_daily_co2 = payload
        .total_daily_co2
        .clone()
        .or_else(|| derive_total_daily_co2(&payload));

    NewUsageSummary {
        total_daily_co2: to_decimal("totalDailyCO2", total_daily_co2.as_ref()),
        avg_daily_co2: to_decimal("avgDailyCO2", payload.avg_daily_co2.as_ref()),
        user_id: payload.user_id,
        date: payload.date,
        total_logs: payload.total_logs,
        eco_score: payload.eco_score,
    }
}

/// totalDailyCO2 が無く、avgDailyCO2 と 0 以外の totalLogs がある場合に合計を求める
///
/// 計算は f64 で行うため、結果は浮動小数点の丸めを含みうる。
pub fn derive_total_daily_co2(payload: &CreateUsageSummaryDto) -> Option<Co2Value> {
    if payload.total_daily_co2.is_some() {
        return None;
    }

    let avg = payload.avg_daily_co2.as_ref()?;
    let total_logs = payload.total_logs.filter(|logs| *logs != 0)?;

    let Some(avg_value) = avg.as_f64() else {
        warn!(
            user_id = %payload.user_id,
            avg_daily_co2 = %avg,
            "avgDailyCO2 is not numeric, skipping totalDailyCO2 derivation"
        );
        return None;
    };

    let total = avg_value * f64::from(total_logs);
    debug!(
        user_id = %payload.user_id,
        total_daily_co2 = total,
        "Computed totalDailyCO2 from avgDailyCO2"
    );
    Some(Co2Value::from(total))
}

/// 固定小数点数への変換。失敗してもリクエストは止めず、値を未設定にする
fn to_decimal(field: &'static str, value: Option<&Co2Value>) -> Option<Decimal> {
    let value = value?;
    match value.to_decimal() {
        Ok(decimal) => Some(decimal),
        Err(err) => {
            warn!(field, raw = %value, error = %err, "Failed to cast CO2 value to decimal");
            None
        }
    }
}
