use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use models::ticket::{Ticket, TicketStatus};
use models::ticket_message::{AuthorType, NewTicketMessage, TicketMessage};
use models::EntityId;
use serde::Deserialize;
use service::services::TicketFilter;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// Newest first, filtered by `status`, `priority` and `q`.
pub async fn list_tickets(State(state): State<AppState>, Query(filter): Query<TicketFilter>) -> Json<Vec<Ticket>> {
    Json(state.services.tickets.filter(&filter).await)
}

pub async fn open_tickets(State(state): State<AppState>) -> Json<Vec<Ticket>> {
    Json(state.services.tickets.get_open_tickets().await)
}

pub async fn ticket_stats(State(state): State<AppState>) -> Json<BTreeMap<TicketStatus, usize>> {
    Json(state.services.tickets.status_counts().await)
}

pub async fn ticket_messages(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Vec<TicketMessage>>, JsonApiError> {
    state.services.tickets.get_by_id(id).await?;
    Ok(Json(state.services.messages.get_by_ticket_id(id).await))
}

/// Message body posted to a ticket thread; the ticket comes from the path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBody {
    pub message: String,
    #[serde(default)]
    pub author_type: AuthorType,
    #[serde(default)]
    pub is_internal: bool,
}

pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(body): Json<MessageBody>,
) -> Result<(StatusCode, Json<TicketMessage>), JsonApiError> {
    state.services.tickets.get_by_id(id).await?;
    let input = NewTicketMessage {
        ticket_id: id,
        message: body.message,
        author_type: body.author_type,
        is_internal: body.is_internal,
    };
    let created = state.services.messages.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
