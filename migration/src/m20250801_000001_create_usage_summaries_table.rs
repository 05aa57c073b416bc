use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UsageSummaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UsageSummaries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UsageSummaries::UserId).text().not_null())
                    // 日付は文字列のまま保存する（フォーマットは検証しない）
                    .col(ColumnDef::new(UsageSummaries::Date).text().not_null())
                    .col(ColumnDef::new(UsageSummaries::TotalLogs).integer())
                    // 精度・スケールを指定しない NUMERIC で値をそのまま保持
                    .col(ColumnDef::new(UsageSummaries::TotalDailyCo2).decimal())
                    .col(ColumnDef::new(UsageSummaries::AvgDailyCo2).decimal())
                    .col(ColumnDef::new(UsageSummaries::EcoScore).double())
                    .col(
                        ColumnDef::new(UsageSummaries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UsageSummaries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // (user_id, date) ごとに1件だけ保存できるようにする
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_usage_summaries_user_date")
                    .table(UsageSummaries::Table)
                    .col(UsageSummaries::UserId)
                    .col(UsageSummaries::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .name("idx_usage_summaries_user_date")
                    .table(UsageSummaries::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UsageSummaries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UsageSummaries {
    Table,
    Id,
    UserId,
    Date,
    TotalLogs,
    #[sea_orm(iden = "total_daily_co2")]
    TotalDailyCo2,
    #[sea_orm(iden = "avg_daily_co2")]
    AvgDailyCo2,
    EcoScore,
    CreatedAt,
    UpdatedAt,
}
