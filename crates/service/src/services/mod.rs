pub mod assignment_service;
pub mod catalog_service;
pub mod client_service;
pub mod ticket_message_service;
pub mod ticket_service;

pub use assignment_service::ClientServiceAssignmentService;
pub use catalog_service::{CatalogFilter, ServiceCatalogService};
pub use client_service::ClientService;
pub use ticket_message_service::TicketMessageService;
pub use ticket_service::{TicketFilter, TicketService};
