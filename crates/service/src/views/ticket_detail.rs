use models::client::Client;
use models::ticket::Ticket;
use models::ticket_message::TicketMessage;
use models::EntityId;
use serde::Serialize;

use crate::errors::ServiceError;
use crate::registry::AppServices;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetail {
    pub ticket: Ticket,
    pub messages: Vec<TicketMessage>,
    pub client: Client,
}

/// A ticket, its chronological thread and the client that opened it. A
/// ticket whose client has been deleted reports the client as not found.
pub async fn ticket_detail(services: &AppServices, ticket_id: EntityId) -> Result<TicketDetail, ServiceError> {
    let ticket = services.tickets.get_by_id(ticket_id).await?;
    let (messages, client) = tokio::try_join!(
        async { Ok::<_, ServiceError>(services.messages.get_by_ticket_id(ticket_id).await) },
        services.clients.get_by_id(ticket.client_id),
    )?;
    Ok(TicketDetail { ticket, messages, client })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ServiceOptions;
    use models::fixtures::SeedData;

    async fn services() -> Result<AppServices, anyhow::Error> {
        Ok(AppServices::from_seed(SeedData::embedded()?, ServiceOptions::default()))
    }

    #[tokio::test]
    async fn thread_is_ordered_and_client_attached() -> Result<(), anyhow::Error> {
        let detail = ticket_detail(&services().await?, 5).await?;
        let ids: Vec<_> = detail.messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![7, 8, 6]);
        assert_eq!(detail.client.id, 5);
        Ok(())
    }

    #[tokio::test]
    async fn dangling_client_surfaces_not_found() -> Result<(), anyhow::Error> {
        let err = ticket_detail(&services().await?, 7).await.unwrap_err();
        assert_eq!(err.to_string(), "Client not found");
        Ok(())
    }

    #[tokio::test]
    async fn missing_ticket_is_not_found() -> Result<(), anyhow::Error> {
        let err = ticket_detail(&services().await?, 70).await.unwrap_err();
        assert_eq!(err.to_string(), "Ticket not found");
        Ok(())
    }
}
