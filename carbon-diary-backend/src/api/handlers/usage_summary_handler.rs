// src/api/handlers/usage_summary_handler.rs
use crate::api::dto::usage_summary_dto::CreateUsageSummaryDto;
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::ValidatedJson;
use crate::service::usage_summary_service::IngestOutcome;
use crate::types::AckResponse;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tracing::info;

/// 日次サマリーの登録
///
/// - 新規作成: 201 `{ "success": true }`
/// - 既に同じ (userId, date) がある: 200 `{ "success": true }`
/// - それ以外の失敗: 400 `{ "success": false }`
pub async fn create_usage_summary_handler(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUsageSummaryDto>,
) -> AppResult<impl IntoResponse> {
    info!(
        user_id = %payload.user_id,
        date = %payload.date,
        total_logs = ?payload.total_logs,
        "Incoming usage summary"
    );

    let status = match app_state.usage_summary_service.ingest(payload).await? {
        IngestOutcome::Created(_) => StatusCode::CREATED,
        IngestOutcome::AlreadyExists => StatusCode::OK,
    };

    Ok((status, AckResponse::success()))
}

pub async fn health_check_handler(State(app_state): State<AppState>) -> AppResult<AckResponse> {
    app_state.usage_summary_service.health_check().await?;
    Ok(AckResponse::success())
}

// --- Router Setup ---
pub fn usage_summary_router(app_state: AppState) -> Router {
    Router::new()
        // 旧クライアント向けのパスも同じハンドラーに向ける
        .route("/usage-summary", post(create_usage_summary_handler))
        .route("/api/usage-summary", post(create_usage_summary_handler))
        .route("/health", get(health_check_handler))
        .with_state(app_state)
}
