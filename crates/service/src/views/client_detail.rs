use models::assignment::ClientServiceAssignment;
use models::client::Client;
use models::ticket::Ticket;
use models::EntityId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::ServiceError;
use crate::registry::AppServices;
use crate::views::{index_by_id, MISSING_SERVICE, UNKNOWN_CATEGORY};

/// An assignment with the catalog entry it points at, flattened.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAssignment {
    #[serde(flatten)]
    pub assignment: ClientServiceAssignment,
    pub service_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub service_price: Decimal,
    pub service_category: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetail {
    pub client: Client,
    pub assignments: Vec<EnrichedAssignment>,
    pub tickets: Vec<Ticket>,
}

/// A client with its services and tickets. Fails only when the client is missing.
pub async fn client_detail(services: &AppServices, client_id: EntityId) -> Result<ClientDetail, ServiceError> {
    let (client, assignments, tickets, offerings) = tokio::try_join!(
        services.clients.get_by_id(client_id),
        async { Ok::<_, ServiceError>(services.assignments.get_by_client_id(client_id).await) },
        async { Ok::<_, ServiceError>(services.tickets.get_by_client_id(client_id).await) },
        async { Ok::<_, ServiceError>(services.catalog.get_all().await) },
    )?;

    let offerings = index_by_id(offerings);
    let assignments = assignments
        .into_iter()
        .map(|assignment| match offerings.get(&assignment.service_id) {
            Some(o) => EnrichedAssignment {
                service_name: o.name.clone(),
                service_price: o.price,
                service_category: o.category.clone(),
                assignment,
            },
            None => EnrichedAssignment {
                service_name: MISSING_SERVICE.to_string(),
                service_price: Decimal::ZERO,
                service_category: UNKNOWN_CATEGORY.to_string(),
                assignment,
            },
        })
        .collect();

    Ok(ClientDetail { client, assignments, tickets })
}
