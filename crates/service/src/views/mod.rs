//! Read models assembled from several services.
//!
//! References between collections are soft, so every join here tolerates a
//! missing target and substitutes a placeholder.

pub mod client_detail;
pub mod dashboard;
pub mod portal;
pub mod ticket_detail;

use std::collections::HashMap;

use models::offering::ServiceOffering;
use models::EntityId;

pub use client_detail::{client_detail, ClientDetail, EnrichedAssignment};
pub use dashboard::{dashboard_summary, DashboardSummary, RecentTicket};
pub use portal::{client_portal, PortalService, PortalStats, PortalView};
pub use ticket_detail::{ticket_detail, TicketDetail};

pub const MISSING_SERVICE: &str = "Service not found";
pub const MISSING_CLIENT: &str = "Unknown client";
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Default look-ahead for "expiring soon" counters.
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

pub(crate) fn index_by_id(offerings: Vec<ServiceOffering>) -> HashMap<EntityId, ServiceOffering> {
    offerings.into_iter().map(|o| (o.id, o)).collect()
}
