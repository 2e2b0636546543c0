//! Handlers shared by services, network entries and testimonials.
//!
//! Each route instantiates these with the resource's record or input type,
//! e.g. `create::<ServiceInput>` or `list::<Testimonial>`.

use axum::{Json, extract::State};
use serde::{Serialize, de::DeserializeOwned};
use tracing::info;

use crate::db::Resource;
use crate::error::SiteError;
use crate::middleware::{JsonBody, RequireSession, ResourceId};
use crate::router::SiteState;
use crate::types::Ack;
use crate::types::content::ContentInput;

/// GET /api/<resource> -> every row, most recently updated first.
pub async fn list<R>(State(state): State<SiteState>) -> Result<Json<Vec<R>>, SiteError>
where
    R: Resource + Serialize + 'static,
{
    let rows = state.storage.list::<R>().await?;
    Ok(Json(rows))
}

/// POST /api/<resource>
pub async fn create<I>(
    RequireSession(session): RequireSession,
    State(state): State<SiteState>,
    JsonBody(input): JsonBody<I>,
) -> Result<Json<Ack>, SiteError>
where
    I: ContentInput + DeserializeOwned + Default + Send + 'static,
{
    let values = input.into_create()?;
    let id = state.storage.insert::<I::Record>(values).await?;
    let table = <I::Record as Resource>::TABLE;
    info!(table, id, by = %session.email, "created record");
    Ok(Json(Ack::OK))
}

/// PATCH /api/<resource>/{id} -> 404 if the row does not exist.
pub async fn update<I>(
    RequireSession(session): RequireSession,
    State(state): State<SiteState>,
    ResourceId(id): ResourceId,
    JsonBody(input): JsonBody<I>,
) -> Result<Json<Ack>, SiteError>
where
    I: ContentInput + DeserializeOwned + Default + Send + 'static,
{
    let values = input.into_patch()?;
    if !state.storage.update_partial::<I::Record>(id, values).await? {
        return Err(SiteError::NotFound);
    }
    let table = <I::Record as Resource>::TABLE;
    info!(table, id, by = %session.email, "updated record");
    Ok(Json(Ack::OK))
}

/// DELETE /api/<resource>/{id} -> succeeds whether or not the row existed.
pub async fn delete<R>(
    RequireSession(session): RequireSession,
    State(state): State<SiteState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Ack>, SiteError>
where
    R: Resource + 'static,
{
    let removed = state.storage.delete::<R>(id).await?;
    info!(table = R::TABLE, id, removed, by = %session.email, "deleted record");
    Ok(Json(Ack::OK))
}
