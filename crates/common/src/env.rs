//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::PathBuf;

use tracing::info;

/// Resolve the on-disk file behind a SQLite URL.
///
/// Returns `None` for non-SQLite URLs and for in-memory databases.
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Make sure the parent directory of a SQLite database file exists.
pub async fn ensure_database_dir(url: &str) -> anyhow::Result<()> {
    let Some(file) = sqlite_file_path(url) else { return Ok(()) };
    let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) else { return Ok(()) };
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    info!(dir = %dir.display(), "database directory ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_paths_are_extracted() {
        assert_eq!(sqlite_file_path("sqlite://data/surveys.db?mode=rwc"), Some(PathBuf::from("data/surveys.db")));
        assert_eq!(sqlite_file_path("sqlite:local.db"), Some(PathBuf::from("local.db")));
    }

    #[test]
    fn memory_and_postgres_have_no_file() {
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://u:p@localhost/db"), None);
    }

    #[tokio::test]
    async fn creates_missing_parent_dir() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("survey_env_{}", std::process::id()));
        let url = format!("sqlite://{}/nested/s.db?mode=rwc", root.display());
        ensure_database_dir(&url).await?;
        assert!(tokio::fs::metadata(root.join("nested")).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
