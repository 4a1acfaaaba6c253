use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Every read/update/delete filters by owner
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_survey_surveyor_email")
                    .table(Survey::Table)
                    .col(Survey::SurveyorEmail)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_survey_surveyor_email").table(Survey::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Survey { Table, SurveyorEmail }
