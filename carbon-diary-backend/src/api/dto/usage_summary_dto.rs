// src/api/dto/usage_summary_dto.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// CO2 量の入力値。数値でも数値文字列でも受け付ける
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Co2Value {
    Number(f64),
    Text(String),
}

impl Co2Value {
    /// 数値として解釈できれば f64 を返す（派生値の計算用）
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Co2Value::Number(n) => Some(*n),
            Co2Value::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// 文字列表現を経由して固定小数点数に変換する
    ///
    /// 通常表記で失敗した場合は指数表記（`1.5e-3` など）として再解釈する。
    /// 0 でない値が精度不足で 0 に丸められる場合は `Underflow` とする。
    pub fn to_decimal(&self) -> Result<Decimal, rust_decimal::Error> {
        let raw = self.to_string();
        let decimal = Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw))?;

        if decimal.is_zero() && self.as_f64().is_some_and(|n| n != 0.0) {
            return Err(rust_decimal::Error::Underflow);
        }
        Ok(decimal)
    }
}

impl fmt::Display for Co2Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 の Display は往復可能な最短表記（2.505 -> "2.505"）
            Co2Value::Number(n) => write!(f, "{}", n),
            Co2Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Co2Value {
    fn from(value: f64) -> Self {
        Co2Value::Number(value)
    }
}

/// 日次サマリー登録リクエスト
///
/// 未知のフィールドは無視される。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUsageSummaryDto {
    #[validate(length(min = 1, message = "userId must not be empty"))]
    pub user_id: String,

    #[validate(length(min = 1, message = "date must not be empty"))]
    pub date: String,

    pub total_logs: Option<i32>,

    #[serde(rename = "totalDailyCO2")]
    pub total_daily_co2: Option<Co2Value>,

    #[serde(rename = "avgDailyCO2")]
    pub avg_daily_co2: Option<Co2Value>,

    pub eco_score: Option<f64>,
}
