use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginOutput {
    pub ok: bool,
    pub email: String,
}

/// Body of `GET /api/auth/me`; `email` is omitted when unauthenticated.
#[derive(Debug, Serialize)]
pub struct MeOutput {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
