use axum::{Json, extract::State};
use tracing::info;

use crate::db::Lead;
use crate::error::SiteError;
use crate::middleware::{JsonBody, RequireSession};
use crate::router::SiteState;
use crate::types::Ack;
use crate::types::content::LeadInput;

/// POST /api/leads -> public contact form; every field is optional and nothing is validated.
pub async fn create_lead(
    State(state): State<SiteState>,
    JsonBody(input): JsonBody<LeadInput>,
) -> Result<Json<Ack>, SiteError> {
    let id = state.storage.insert::<Lead>(input.into_values()).await?;
    info!(id, "captured lead");
    Ok(Json(Ack::OK))
}

/// GET /api/leads -> admin only, newest submissions first.
pub async fn list_leads(
    _session: RequireSession,
    State(state): State<SiteState>,
) -> Result<Json<Vec<Lead>>, SiteError> {
    let leads = state.storage.list::<Lead>().await?;
    Ok(Json(leads))
}
