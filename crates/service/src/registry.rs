//! Construction of the service bundle shared by every handler.

use std::sync::Arc;

use models::fixtures::SeedData;
use tracing::info;

use crate::latency::{DelayPolicy, NoDelay, SimulatedLatency};
use crate::services::{
    ClientService, ClientServiceAssignmentService, ServiceCatalogService, TicketMessageService, TicketService,
};
use crate::storage::id_policy::IdPolicy;
use crate::storage::memory_store::MemoryStore;

/// Knobs applied to every store and service in the bundle.
#[derive(Clone)]
pub struct ServiceOptions {
    pub delay: Arc<dyn DelayPolicy>,
    pub id_policy: IdPolicy,
}

impl ServiceOptions {
    /// Simulated latency when `scale` is given, none otherwise.
    pub fn with_latency(scale: Option<f64>) -> Self {
        let delay: Arc<dyn DelayPolicy> = match scale {
            Some(scale) => Arc::new(SimulatedLatency::new(scale)),
            None => Arc::new(NoDelay),
        };
        Self { delay, id_policy: IdPolicy::default() }
    }
}

impl Default for ServiceOptions {
    fn default() -> Self { Self::with_latency(None) }
}

/// One instance of each service, each owning its own collection.
#[derive(Clone)]
pub struct AppServices {
    pub clients: Arc<ClientService>,
    pub catalog: Arc<ServiceCatalogService>,
    pub assignments: Arc<ClientServiceAssignmentService>,
    pub tickets: Arc<TicketService>,
    pub messages: Arc<TicketMessageService>,
}

impl AppServices {
    pub fn from_seed(seed: SeedData, opts: ServiceOptions) -> Self {
        info!(
            clients = seed.clients.len(),
            offerings = seed.offerings.len(),
            assignments = seed.assignments.len(),
            tickets = seed.tickets.len(),
            messages = seed.messages.len(),
            id_policy = ?opts.id_policy,
            "seeding in-memory collections"
        );
        let ids = opts.id_policy;
        Self {
            clients: Arc::new(ClientService::new(MemoryStore::new(seed.clients, ids), opts.delay.clone())),
            catalog: Arc::new(ServiceCatalogService::new(MemoryStore::new(seed.offerings, ids), opts.delay.clone())),
            assignments: Arc::new(ClientServiceAssignmentService::new(
                MemoryStore::new(seed.assignments, ids),
                opts.delay.clone(),
            )),
            tickets: Arc::new(TicketService::new(MemoryStore::new(seed.tickets, ids), opts.delay.clone())),
            messages: Arc::new(TicketMessageService::new(MemoryStore::new(seed.messages, ids), opts.delay)),
        }
    }
}
