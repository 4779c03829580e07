use chrono::{DateTime, Utc};
use models::assignment::{AssignmentStatus, ClientServiceAssignment};
use models::ticket::{Ticket, TicketStatus};
use models::EntityId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::ServiceError;
use crate::registry::AppServices;
use crate::views::{index_by_id, EXPIRY_WINDOW_DAYS, MISSING_SERVICE};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalService {
    #[serde(flatten)]
    pub assignment: ClientServiceAssignment,
    pub service_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub service_price: Decimal,
    pub days_until_expiry: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalStats {
    pub active_services: usize,
    pub open_tickets: usize,
    pub expiring_soon: usize,
}

/// What a client sees about their own account.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalView {
    pub client_id: EntityId,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub services: Vec<PortalService>,
    pub tickets: Vec<Ticket>,
    pub stats: PortalStats,
}

pub async fn client_portal(
    services: &AppServices,
    client_id: EntityId,
    now: DateTime<Utc>,
) -> Result<PortalView, ServiceError> {
    let (client, assignments, mut tickets, offerings) = tokio::try_join!(
        services.clients.get_by_id(client_id),
        async { Ok::<_, ServiceError>(services.assignments.get_by_client_id(client_id).await) },
        async { Ok::<_, ServiceError>(services.tickets.get_by_client_id(client_id).await) },
        async { Ok::<_, ServiceError>(services.catalog.get_all().await) },
    )?;

    let stats = PortalStats {
        active_services: assignments.iter().filter(|a| a.status == AssignmentStatus::Active).count(),
        open_tickets: tickets.iter().filter(|t| t.status == TicketStatus::Open).count(),
        expiring_soon: assignments.iter().filter(|a| a.is_expiring(now, EXPIRY_WINDOW_DAYS)).count(),
    };

    let offerings = index_by_id(offerings);
    let rows = assignments
        .into_iter()
        .map(|assignment| {
            let (service_name, service_price) = offerings
                .get(&assignment.service_id)
                .map_or((MISSING_SERVICE.to_string(), Decimal::ZERO), |o| (o.name.clone(), o.price));
            PortalService { days_until_expiry: assignment.days_until_expiry(now), service_name, service_price, assignment }
        })
        .collect();

    tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(PortalView {
        client_id: client.id,
        company_name: client.company_name,
        contact_name: client.contact_name,
        email: client.email,
        services: rows,
        tickets,
        stats,
    })
}
