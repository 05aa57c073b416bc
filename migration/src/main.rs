use sea_orm_migration::prelude::*;

// `cargo run -p migration -- up` などでマイグレーションを手動実行する
#[async_std::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
