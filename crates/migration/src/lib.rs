//! Migrator registering the survey schema migrations.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_survey;
mod m20240601_000002_add_survey_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_survey::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000002_add_survey_indexes::Migration),
        ]
    }
}
