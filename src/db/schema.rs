//! SQL DDL for initializing the content store.

/// SQLite schema. Every table carries:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `created_at` / `updated_at` as fixed-width RFC3339 text (microseconds, `Z`)
///
/// `services.bullets` is a JSON array serialized as text.
/// `users.email` is stored lowercase and is UNIQUE.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS services (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NULL,
    category TEXT NULL,
    bullets TEXT NOT NULL DEFAULT '[]', -- JSON array
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS network (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NULL,
    city TEXT NULL,
    meta TEXT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS testimonials (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    quote TEXT NULL,
    author TEXT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS leads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL DEFAULT '',
    phone TEXT NOT NULL DEFAULT '',
    need TEXT NOT NULL DEFAULT '',
    message TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_services_updated_at ON services(updated_at);
CREATE INDEX IF NOT EXISTS idx_network_updated_at ON network(updated_at);
CREATE INDEX IF NOT EXISTS idx_testimonials_updated_at ON testimonials(updated_at);
CREATE INDEX IF NOT EXISTS idx_leads_created_at ON leads(created_at);
"#;
