use std::sync::Arc;

use service::services::{
    ClientService, ClientServiceAssignmentService, ServiceCatalogService, TicketMessageService, TicketService,
};
use service::{AppServices, CrudService};

/// Shared router state.
#[derive(Clone)]
pub struct AppState {
    pub services: AppServices,
}

impl AppState {
    pub fn new(services: AppServices) -> Self { Self { services } }
}

/// Finds one collection service inside the router state, so the generic
/// CRUD handlers can be mounted once per resource.
pub trait Resource: CrudService + Sized {
    fn from_state(state: &AppState) -> Arc<Self>;
}

impl Resource for ClientService {
    fn from_state(state: &AppState) -> Arc<Self> { state.services.clients.clone() }
}

impl Resource for ServiceCatalogService {
    fn from_state(state: &AppState) -> Arc<Self> { state.services.catalog.clone() }
}

impl Resource for ClientServiceAssignmentService {
    fn from_state(state: &AppState) -> Arc<Self> { state.services.assignments.clone() }
}

impl Resource for TicketService {
    fn from_state(state: &AppState) -> Arc<Self> { state.services.tickets.clone() }
}

impl Resource for TicketMessageService {
    fn from_state(state: &AppState) -> Arc<Self> { state.services.messages.clone() }
}
