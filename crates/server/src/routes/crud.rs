//! Handlers shared by every collection, mounted once per resource type.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::EntityId;
use service::CrudService;

use crate::errors::JsonApiError;
use crate::state::{AppState, Resource};

pub async fn list<S: Resource>(State(state): State<AppState>) -> Json<Vec<S::Entity>> {
    Json(S::from_state(&state).get_all().await)
}

pub async fn get_one<S: Resource>(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<S::Entity>, JsonApiError> {
    Ok(Json(S::from_state(&state).get_by_id(id).await?))
}

pub async fn create<S: Resource>(
    State(state): State<AppState>,
    Json(input): Json<S::Create>,
) -> Result<(StatusCode, Json<S::Entity>), JsonApiError> {
    let created = S::from_state(&state).create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Shallow merge; an `Id` in the body is ignored.
pub async fn update<S: Resource>(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<S::Patch>,
) -> Result<Json<S::Entity>, JsonApiError> {
    Ok(Json(S::from_state(&state).update(id, patch).await?))
}

/// Responds with the removed record.
pub async fn remove<S: Resource>(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<S::Entity>, JsonApiError> {
    Ok(Json(S::from_state(&state).delete(id).await?))
}
