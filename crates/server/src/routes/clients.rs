use axum::{
    extract::{Path, Query, State},
    Json,
};
use models::assignment::ClientServiceAssignment;
use models::client::Client;
use models::ticket::Ticket;
use models::EntityId;
use serde::Deserialize;
use service::pagination::{Page, Pagination};
use service::services::assignment_service::DEFAULT_EXPIRY_WINDOW_DAYS;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ClientListQuery {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ClientListQuery {
    fn pagination(&self) -> Pagination {
        let d = Pagination::default();
        Pagination { page: self.page.unwrap_or(d.page), per_page: self.per_page.unwrap_or(d.per_page) }
    }
}

/// Clients, optionally searched, one page at a time.
pub async fn list_clients(State(state): State<AppState>, Query(query): Query<ClientListQuery>) -> Json<Page<Client>> {
    let clients = &state.services.clients;
    let found = match query.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => clients.search(q).await,
        _ => clients.get_all().await,
    };
    Json(query.pagination().apply(found))
}

pub async fn client_assignments(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Vec<ClientServiceAssignment>>, JsonApiError> {
    state.services.clients.get_by_id(id).await?;
    Ok(Json(state.services.assignments.get_by_client_id(id).await))
}

pub async fn client_tickets(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Vec<Ticket>>, JsonApiError> {
    state.services.clients.get_by_id(id).await?;
    Ok(Json(state.services.tickets.get_by_client_id(id).await))
}

#[derive(Debug, Deserialize)]
pub struct ExpiringQuery {
    pub days: Option<i64>,
}

pub async fn expiring_assignments(
    State(state): State<AppState>,
    Query(query): Query<ExpiringQuery>,
) -> Result<Json<Vec<ClientServiceAssignment>>, JsonApiError> {
    let days = query.days.unwrap_or(DEFAULT_EXPIRY_WINDOW_DAYS);
    if days < 0 {
        return Err(JsonApiError::new(axum::http::StatusCode::BAD_REQUEST, "Validation Error", "days must not be negative"));
    }
    Ok(Json(state.services.assignments.get_expiring_services(days).await))
}
