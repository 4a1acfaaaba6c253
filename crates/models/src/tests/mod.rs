

use sea_orm::DatabaseConnection;
use migration::MigratorTrait;

/// Fresh, migrated in-memory SQLite database for one test.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let mut cfg = configs::DatabaseConfig::in_memory_sqlite();
    cfg.sqlx_logging = false;
    let db = crate::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
