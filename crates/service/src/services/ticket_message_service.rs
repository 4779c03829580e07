use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use models::ticket_message::{NewTicketMessage, TicketMessage, TicketMessagePatch};
use models::{Entity, EntityId};
use tracing::{info, instrument};

use crate::crud::CrudService;
use crate::errors::ServiceError;
use crate::latency::{DelayPolicy, Operation};
use crate::storage::memory_store::MemoryStore;

/// Conversation threads attached to tickets.
pub struct TicketMessageService {
    store: Arc<MemoryStore<TicketMessage>>,
    delay: Arc<dyn DelayPolicy>,
}

impl TicketMessageService {
    pub fn new(store: Arc<MemoryStore<TicketMessage>>, delay: Arc<dyn DelayPolicy>) -> Self { Self { store, delay } }

    pub async fn get_all(&self) -> Vec<TicketMessage> {
        self.delay.pause(Operation::List).await;
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: EntityId) -> Result<TicketMessage, ServiceError> {
        self.delay.pause(Operation::Get).await;
        self.store.get(id).await.ok_or_else(|| ServiceError::not_found(TicketMessage::LABEL))
    }

    /// The thread of one ticket, oldest first. Equal timestamps keep insertion order.
    pub async fn get_by_ticket_id(&self, ticket_id: EntityId) -> Vec<TicketMessage> {
        self.delay.pause(Operation::Query).await;
        let mut thread = self.store.filter(|m| m.ticket_id == ticket_id).await;
        thread.sort_by_key(|m| m.created_at);
        thread
    }

    /// Append a message. The ticket id is not checked.
    #[instrument(skip(self, input), fields(ticket_id = input.ticket_id))]
    pub async fn create(&self, input: NewTicketMessage) -> Result<TicketMessage, ServiceError> {
        self.delay.pause(Operation::Create).await;
        input.validate()?;
        let created = self.store.insert_with(move |id, _| Ok(input.into_message(id, Utc::now()))).await?;
        info!(message_id = created.id, internal = created.is_internal, "ticket_message_created");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: EntityId, patch: TicketMessagePatch) -> Result<TicketMessage, ServiceError> {
        self.delay.pause(Operation::Update).await;
        let updated = self.store.update_with(id, |current| Ok(patch.apply(current)?)).await?;
        info!(message_id = id, "ticket_message_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> Result<TicketMessage, ServiceError> {
        self.delay.pause(Operation::Delete).await;
        let removed = self.store.remove(id).await?;
        info!(message_id = id, "ticket_message_deleted");
        Ok(removed)
    }
}

#[async_trait]
impl CrudService for TicketMessageService {
    type Entity = TicketMessage;
    type Create = NewTicketMessage;
    type Patch = TicketMessagePatch;

    async fn get_all(&self) -> Vec<TicketMessage> { self.get_all().await }
    async fn get_by_id(&self, id: EntityId) -> Result<TicketMessage, ServiceError> { self.get_by_id(id).await }
    async fn create(&self, input: NewTicketMessage) -> Result<TicketMessage, ServiceError> { self.create(input).await }
    async fn update(&self, id: EntityId, patch: TicketMessagePatch) -> Result<TicketMessage, ServiceError> { self.update(id, patch).await }
    async fn delete(&self, id: EntityId) -> Result<TicketMessage, ServiceError> { self.delete(id).await }
}
