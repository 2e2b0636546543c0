pub mod auth;
pub mod content;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// `{"ok": true}` acknowledgement returned by write endpoints.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub const OK: Ack = Ack { ok: true };
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
    pub time: DateTime<Utc>,
}
