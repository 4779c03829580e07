use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use models::EntityId;
use service::views::{self, ClientDetail, DashboardSummary, PortalView, TicketDetail};

use crate::errors::JsonApiError;
use crate::state::AppState;

pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(views::dashboard_summary(&state.services, Utc::now()).await)
}

pub async fn client_detail(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<ClientDetail>, JsonApiError> {
    Ok(Json(views::client_detail(&state.services, id).await?))
}

pub async fn ticket_detail(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<TicketDetail>, JsonApiError> {
    Ok(Json(views::ticket_detail(&state.services, id).await?))
}

pub async fn portal(
    State(state): State<AppState>,
    Path(client_id): Path<EntityId>,
) -> Result<Json<PortalView>, JsonApiError> {
    Ok(Json(views::client_portal(&state.services, client_id, Utc::now()).await?))
}
