use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, DatabaseConfig};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load configuration from `config.toml` (or `CONFIG_PATH`).
///
/// Only an absent file falls back to env vars and defaults; a file that does
/// not parse or validate is an error.
pub fn load_config() -> anyhow::Result<AppConfig> {
    match configs::load_default_if_present()? {
        Some(mut cfg) => {
            cfg.normalize_and_validate()?;
            Ok(cfg)
        }
        None => {
            warn!("config file not found; using environment");
            AppConfig::from_env()
        }
    }
}

/// Open the pool and bring the schema up to date. Failures here are fatal.
pub async fn connect_and_migrate(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    common::env::ensure_database_dir(&cfg.url).await?;
    let db = models::db::connect_with_config(cfg).await?;
    models::db::ping(&db).await?;
    if cfg.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }
    Ok(db)
}

/// Router over an already-connected database
pub fn build_app(db: DatabaseConnection) -> Router {
    routes::build_router(ServerState::from_db(db), build_cors())
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    let cfg = load_config()?;
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connect_and_migrate(&cfg.database).await?;
    let app = build_app(db);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting survey server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
