use crate::db::models::{DbUser, Resource};
use crate::db::schema::SQLITE_INIT;
use crate::error::SiteError;
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;

pub type SqlitePool = Pool<Sqlite>;

/// One writable column value; `None` means the caller did not supply it.
pub type FieldValue = Option<String>;

#[derive(Clone)]
pub struct ContentStorage {
    pool: SqlitePool,
}

impl ContentStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Connect to `database_url`, creating the file if missing.
    pub async fn connect(database_url: &str) -> Result<Self, SiteError> {
        let in_memory = is_in_memory(database_url);
        let mut connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));
        if !in_memory {
            connect_opts = connect_opts.journal_mode(SqliteJournalMode::Wal);
        }

        let mut pool_opts = SqlitePoolOptions::new();
        if in_memory {
            // Every in-memory connection is a separate database; pin a single one.
            pool_opts = pool_opts
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_opts.connect_with(connect_opts).await?;
        Ok(Self::new(pool))
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), SiteError> {
        // sqlx::query runs a single statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<DbUser>, SiteError> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"SELECT id, email, password_hash, created_at, updated_at
               FROM users WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Insert a user unless one with the same email exists. Returns whether a row was written.
    pub async fn insert_user_if_absent(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, SiteError> {
        let now = format_timestamp(&now_timestamp());
        let res = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(email) DO NOTHING
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(now.clone())
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    /// All rows of `R`, newest first by `R::ORDER_BY`.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, SiteError> {
        let sql = format!(
            "SELECT * FROM {} ORDER BY {} DESC, id DESC",
            R::TABLE,
            R::ORDER_BY
        );
        let rows = sqlx::query_as::<_, R>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Insert a row of `R`. Unsupplied columns fall back to the column default.
    /// The new row's timestamps are never earlier than the newest row already listed,
    /// so with the `id DESC` tie-break it lists first. Returns the new row id.
    pub async fn insert<R: Resource>(&self, values: Vec<FieldValue>) -> Result<i64, SiteError> {
        let (mut columns, binds): (Vec<&str>, Vec<String>) = R::COLUMNS
            .iter()
            .copied()
            .zip(values)
            .filter_map(|(col, value)| value.map(|v| (col, v)))
            .unzip();
        columns.extend(["created_at", "updated_at"]);

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            columns.join(", "),
            vec!["?"; columns.len()].join(", ")
        );
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        let latest_sql = format!("SELECT MAX({}) FROM {}", R::ORDER_BY, R::TABLE);
        let latest = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(&latest_sql)
            .fetch_one(&mut *tx)
            .await?;
        // never behind a row bumped within the same microsecond
        let now = now_timestamp();
        let stamp = format_timestamp(&latest.map_or(now, |latest| latest.max(now)));

        let mut query = sqlx::query(&sql);
        for value in binds {
            query = query.bind(value);
        }
        let res = query
            .bind(stamp.clone())
            .bind(stamp)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(res.last_insert_rowid())
    }

    /// Partial update of row `id`: `None` keeps the stored column, `Some` overwrites it.
    /// `updated_at` always moves strictly forward. Returns `false` if the row does not exist.
    pub async fn update_partial<R: Resource>(
        &self,
        id: i64,
        mut values: Vec<FieldValue>,
    ) -> Result<bool, SiteError> {
        values.resize(R::COLUMNS.len(), None);

        // take the write lock up front; a read upgraded later fails with SQLITE_BUSY
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        let select = format!("SELECT updated_at FROM {} WHERE id = ?", R::TABLE);
        let previous = sqlx::query_scalar::<_, DateTime<Utc>>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(previous) = previous else {
            return Ok(false);
        };

        let sql = coalesce_update_sql(R::TABLE, R::COLUMNS);
        let mut query = sqlx::query(&sql);
        for value in values {
            query = query.bind(value);
        }
        query
            .bind(format_timestamp(&next_timestamp(previous)))
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Delete row `id` of `R`. Missing rows are not an error; returns rows removed.
    pub async fn delete<R: Resource>(&self, id: i64) -> Result<u64, SiteError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
        let res = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(res.rows_affected())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// `UPDATE <table> SET c = COALESCE(?, c), ..., updated_at = ? WHERE id = ?`
fn coalesce_update_sql(table: &str, columns: &[&str]) -> String {
    let assignments: Vec<String> = columns
        .iter()
        .map(|col| format!("{col} = COALESCE(?, {col})"))
        .collect();
    format!(
        "UPDATE {table} SET {}, updated_at = ? WHERE id = ?",
        assignments.join(", ")
    )
}

/// Current time truncated to the stored precision.
pub fn now_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A timestamp strictly later than `previous`, normally "now".
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now_timestamp();
    if now > previous {
        now
    } else {
        previous.trunc_subsecs(6) + TimeDelta::microseconds(1)
    }
}

/// Fixed-width RFC3339 so that text order matches time order.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
