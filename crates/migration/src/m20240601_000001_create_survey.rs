//! Create `survey` table.
//!
//! One row per submitted survey, owned by the surveyor's email.
//! Ids are 64-bit and `AUTOINCREMENT` on SQLite, so ids of deleted rows are never reused.
use sea_orm_migration::sea_orm::DatabaseBackend;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite only allows AUTOINCREMENT on `INTEGER PRIMARY KEY`, which is already 64-bit
        let id = match manager.get_database_backend() {
            DatabaseBackend::Sqlite => pk_auto(Survey::Id),
            _ => big_integer(Survey::Id).auto_increment().primary_key().take(),
        };
        manager
            .create_table(
                Table::create()
                    .table(Survey::Table)
                    .if_not_exists()
                    .col(id)
                    .col(text(Survey::SurveyorEmail))
                    .col(text(Survey::Name))
                    .col(integer(Survey::Age))
                    .col(text(Survey::Address))
                    .col(text(Survey::Symptoms))
                    .col(double_null(Survey::Latitude))
                    .col(double_null(Survey::Longitude))
                    .col(timestamp_with_time_zone(Survey::CreatedAt))
                    .col(timestamp_with_time_zone(Survey::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Survey::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Survey {
    Table,
    Id,
    SurveyorEmail,
    Name,
    Age,
    Address,
    Symptoms,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}
