// src/main.rs
use carbon_diary_backend::api::{create_app, AppState};
use carbon_diary_backend::config::Config;
use carbon_diary_backend::db::{create_db_pool, run_migrations};
use carbon_diary_backend::repository::UsageSummaryRepository;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carbon_diary_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    info!("Starting Carbon Diary backend...");

    // 設定を読み込む
    let config = Config::from_env()?;
    info!(
        server_addr = %config.server_addr(),
        db_max_connections = config.db_max_connections,
        run_migrations = config.run_migrations,
        "Configuration loaded"
    );

    // データベース接続を作成
    let db_pool = create_db_pool(&config).await?;
    info!("Database connected");

    if config.run_migrations {
        run_migrations(&db_pool).await?;
        info!("Migrations applied");
    }

    let store = Arc::new(UsageSummaryRepository::new(db_pool.clone()));
    let app = create_app(AppState::new(store), &config);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Server listening on {}", config.server_addr());

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 処理中のリクエストが終わってから接続を閉じる
    if let Err(e) = db_pool.close().await {
        error!("Failed to close database connection: {}", e);
    }
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
