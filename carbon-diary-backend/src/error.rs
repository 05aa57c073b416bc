// src/error.rs

use crate::repository::StoreError;
use crate::types::AckResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Multiple validation errors")]
    ValidationErrors(Vec<String>),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // クライアントはどの失敗でも再送するだけなので、ステータスは 400 に揃える
            AppError::BadRequest(_) | AppError::ValidationErrors(_) | AppError::Store(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // 失敗の種類はサーバーログでのみ区別する
        match &self {
            AppError::BadRequest(message) => {
                warn!(error_type = "bad_request", %message, "Rejected request");
            }
            AppError::ValidationErrors(errors) => {
                warn!(error_type = "validation_errors", errors = ?errors, "Rejected request");
            }
            AppError::Store(StoreError::Conflict { user_id, date }) => {
                // 通常はサービス層で成功扱いに変換されるため、ここに来るのは想定外
                warn!(error_type = "conflict", %user_id, %date, "Unmapped conflict");
            }
            AppError::Store(StoreError::Database(db_err)) => {
                error!(error_type = "database_error", error = ?db_err, "Store operation failed");
            }
            AppError::ServiceUnavailable(message) => {
                error!(error_type = "service_unavailable", %message, "Service unavailable");
            }
        }

        (self.status_code(), Json(AckResponse::failure())).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;
