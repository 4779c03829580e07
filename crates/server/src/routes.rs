pub mod catalog;
pub mod clients;
pub mod crud;
pub mod tickets;
pub mod views;

use axum::{
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use service::services::{
    ClientService, ClientServiceAssignmentService, ServiceCatalogService, TicketMessageService, TicketService,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::metrics;
use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health::ok("client_hub"))
}

async fn metrics_handler() -> impl IntoResponse {
    metrics::encode_metrics()
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler));

    let clients = Router::new()
        .route("/api/clients", get(clients::list_clients).post(crud::create::<ClientService>))
        .route(
            "/api/clients/:id",
            get(crud::get_one::<ClientService>)
                .put(crud::update::<ClientService>)
                .delete(crud::remove::<ClientService>),
        )
        .route("/api/clients/:id/detail", get(views::client_detail))
        .route("/api/clients/:id/assignments", get(clients::client_assignments))
        .route("/api/clients/:id/tickets", get(clients::client_tickets));

    let catalog = Router::new()
        .route("/api/services", get(catalog::list_offerings).post(crud::create::<ServiceCatalogService>))
        .route(
            "/api/services/:id",
            get(crud::get_one::<ServiceCatalogService>)
                .put(crud::update::<ServiceCatalogService>)
                .delete(crud::remove::<ServiceCatalogService>),
        );

    let assignments = Router::new()
        .route(
            "/api/assignments",
            get(crud::list::<ClientServiceAssignmentService>).post(crud::create::<ClientServiceAssignmentService>),
        )
        .route("/api/assignments/expiring", get(clients::expiring_assignments))
        .route(
            "/api/assignments/:id",
            get(crud::get_one::<ClientServiceAssignmentService>)
                .put(crud::update::<ClientServiceAssignmentService>)
                .delete(crud::remove::<ClientServiceAssignmentService>),
        );

    let tickets = Router::new()
        .route("/api/tickets", get(tickets::list_tickets).post(crud::create::<TicketService>))
        .route("/api/tickets/open", get(tickets::open_tickets))
        .route("/api/tickets/stats", get(tickets::ticket_stats))
        .route(
            "/api/tickets/:id",
            get(crud::get_one::<TicketService>)
                .put(crud::update::<TicketService>)
                .delete(crud::remove::<TicketService>),
        )
        .route("/api/tickets/:id/detail", get(views::ticket_detail))
        .route("/api/tickets/:id/messages", get(tickets::ticket_messages).post(tickets::post_message))
        .route(
            "/api/messages/:id",
            get(crud::get_one::<TicketMessageService>)
                .put(crud::update::<TicketMessageService>)
                .delete(crud::remove::<TicketMessageService>),
        );

    let read_models = Router::new()
        .route("/api/dashboard", get(views::dashboard))
        .route("/api/portal/:client_id", get(views::portal));

    public
        .merge(clients)
        .merge(catalog)
        .merge(assignments)
        .merge(tickets)
        .merge(read_models)
        .with_state(state)
        .layer(middleware::from_fn(metrics::track))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                        // 5xx responses
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(cors),
        )
}
