use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// A table whose rows the generic store operations can list, insert, patch and delete.
///
/// `COLUMNS` names the writable columns; values passed to the store are aligned
/// with it by position. Table and column names are compile-time constants, never
/// request data.
pub trait Resource: for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Timestamp column used for newest-first listing.
    const ORDER_BY: &'static str = "updated_at";
}

#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: i64,
    pub title: Option<String>,
    pub category: Option<String>,
    pub bullets: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource for Service {
    const TABLE: &'static str = "services";
    const COLUMNS: &'static [&'static str] = &["title", "category", "bullets"];
}

// `bullets` is JSON text on disk; decode it here so nothing above the store sees the text form.
impl<'r> FromRow<'r, SqliteRow> for Service {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let bullets_json: String = row.try_get("bullets")?;
        let bullets: Vec<String> =
            serde_json::from_str(&bullets_json).map_err(|e| sqlx::Error::ColumnDecode {
                index: "bullets".to_string(),
                source: Box::new(e),
            })?;
        Ok(Service {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            category: row.try_get("category")?,
            bullets,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct NetworkEntry {
    pub id: i64,
    pub name: Option<String>,
    pub city: Option<String>,
    pub meta: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource for NetworkEntry {
    const TABLE: &'static str = "network";
    const COLUMNS: &'static [&'static str] = &["name", "city", "meta"];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Testimonial {
    pub id: i64,
    pub quote: Option<String>,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource for Testimonial {
    const TABLE: &'static str = "testimonials";
    const COLUMNS: &'static [&'static str] = &["quote", "author"];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub need: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource for Lead {
    const TABLE: &'static str = "leads";
    const COLUMNS: &'static [&'static str] = &["name", "phone", "need", "message"];
    // Leads are never updated.
    const ORDER_BY: &'static str = "created_at";
}
