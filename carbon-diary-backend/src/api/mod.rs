// src/api/mod.rs
use crate::config::{AllowedOrigins, Config};
use crate::logging::{inject_request_context, logging_middleware};
use crate::repository::UsageSummaryStore;
use crate::service::usage_summary_service::UsageSummaryService;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub mod dto;
pub mod handlers;

/// アプリケーション状態
///
/// 保存先は起動時に生成して注入する（プロセス全体のシングルトンは持たない）。
#[derive(Clone)]
pub struct AppState {
    pub usage_summary_service: Arc<UsageSummaryService>,
}

impl AppState {
    pub fn new(store: Arc<dyn UsageSummaryStore>) -> Self {
        Self {
            usage_summary_service: Arc::new(UsageSummaryService::new(store)),
        }
    }
}

/// ルーターに共通レイヤーを適用したアプリケーションを構築
///
/// ボディサイズの上限は抽出器側で判定させ、超過時も `AppError` 経由で 400 を返す。
pub fn create_app(app_state: AppState, config: &Config) -> Router {
    handlers::usage_summary_handler::usage_summary_router(app_state)
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins))
}

fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    match origins {
        AllowedOrigins::Any => layer.allow_origin(Any),
        AllowedOrigins::List(list) => {
            let parsed: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(%origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(parsed)
        }
    }
}
