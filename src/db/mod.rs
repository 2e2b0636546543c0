//! Database module: models, schema and the SQLite content store.
//!
//! Layout:
//! - `models.rs`: row structs and the `Resource` table descriptions
//! - `schema.rs`: SQL DDL applied on startup
//! - `sqlite.rs`: `ContentStorage`, the only owner of persisted records

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{DbUser, Lead, NetworkEntry, Resource, Service, Testimonial};
pub use schema::SQLITE_INIT;
pub use sqlite::{ContentStorage, FieldValue, SqlitePool};

use crate::error::SiteError;
use std::path::PathBuf;
use tracing::info;

/// Open the store at `database_url`, creating the database directory and schema if absent.
pub async fn open(database_url: &str) -> Result<ContentStorage, SiteError> {
    if let Some(path) = sqlite_file_path(database_url)
        && let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        std::fs::create_dir_all(dir)?;
        info!(path = %dir.display(), "created database directory");
    }

    let storage = ContentStorage::connect(database_url).await?;
    storage.init_schema().await?;
    Ok(storage)
}

/// Filesystem path of a file-backed SQLite URL; `None` for in-memory databases.
fn sqlite_file_path(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_urls_resolve_to_paths() {
        assert_eq!(
            sqlite_file_path("sqlite:db/app.db"),
            Some(PathBuf::from("db/app.db"))
        );
        assert_eq!(
            sqlite_file_path("sqlite:///tmp/site.db?mode=rwc"),
            Some(PathBuf::from("/tmp/site.db"))
        );
    }

    #[test]
    fn memory_urls_have_no_path() {
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/db"), None);
    }
}
