use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use models::assignment::{ClientServiceAssignment, ClientServiceAssignmentPatch, NewClientServiceAssignment};
use models::{Entity, EntityId};
use tracing::{info, instrument};

use crate::crud::CrudService;
use crate::errors::ServiceError;
use crate::latency::{DelayPolicy, Operation};
use crate::storage::memory_store::MemoryStore;

/// Default look-ahead for renewal reminders.
pub const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 30;

/// Offerings contracted by clients.
pub struct ClientServiceAssignmentService {
    store: Arc<MemoryStore<ClientServiceAssignment>>,
    delay: Arc<dyn DelayPolicy>,
}

impl ClientServiceAssignmentService {
    pub fn new(store: Arc<MemoryStore<ClientServiceAssignment>>, delay: Arc<dyn DelayPolicy>) -> Self { Self { store, delay } }

    pub async fn get_all(&self) -> Vec<ClientServiceAssignment> {
        self.delay.pause(Operation::List).await;
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: EntityId) -> Result<ClientServiceAssignment, ServiceError> {
        self.delay.pause(Operation::Get).await;
        self.store.get(id).await.ok_or_else(|| ServiceError::not_found(ClientServiceAssignment::LABEL))
    }

    pub async fn get_by_client_id(&self, client_id: EntityId) -> Vec<ClientServiceAssignment> {
        self.delay.pause(Operation::Query).await;
        self.store.filter(|a| a.client_id == client_id).await
    }

    /// Create an active assignment. Client and offering ids are not checked.
    #[instrument(skip(self, input), fields(client_id = input.client_id, service_id = input.service_id))]
    pub async fn create(&self, input: NewClientServiceAssignment) -> Result<ClientServiceAssignment, ServiceError> {
        self.delay.pause(Operation::Create).await;
        input.validate()?;
        let created = self.store.insert_with(move |id, _| Ok(input.into_assignment(id))).await?;
        info!(assignment_id = created.id, "assignment_created");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: EntityId,
        patch: ClientServiceAssignmentPatch,
    ) -> Result<ClientServiceAssignment, ServiceError> {
        self.delay.pause(Operation::Update).await;
        let updated = self.store.update_with(id, |current| Ok(patch.apply(current)?)).await?;
        info!(assignment_id = id, status = ?updated.status, "assignment_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> Result<ClientServiceAssignment, ServiceError> {
        self.delay.pause(Operation::Delete).await;
        let removed = self.store.remove(id).await?;
        info!(assignment_id = id, "assignment_deleted");
        Ok(removed)
    }

    /// Active assignments ending within `window_days` from now.
    pub async fn get_expiring_services(&self, window_days: i64) -> Vec<ClientServiceAssignment> {
        self.expiring_at(window_days, Utc::now()).await
    }

    /// [`Self::get_expiring_services`] against an explicit reference instant.
    pub async fn expiring_at(&self, window_days: i64, now: DateTime<Utc>) -> Vec<ClientServiceAssignment> {
        self.delay.pause(Operation::Query).await;
        self.store.filter(|a| a.is_expiring(now, window_days)).await
    }
}

#[async_trait]
impl CrudService for ClientServiceAssignmentService {
    type Entity = ClientServiceAssignment;
    type Create = NewClientServiceAssignment;
    type Patch = ClientServiceAssignmentPatch;

    async fn get_all(&self) -> Vec<ClientServiceAssignment> { self.get_all().await }
    async fn get_by_id(&self, id: EntityId) -> Result<ClientServiceAssignment, ServiceError> { self.get_by_id(id).await }
    async fn create(&self, input: NewClientServiceAssignment) -> Result<ClientServiceAssignment, ServiceError> { self.create(input).await }
    async fn update(&self, id: EntityId, patch: ClientServiceAssignmentPatch) -> Result<ClientServiceAssignment, ServiceError> { self.update(id, patch).await }
    async fn delete(&self, id: EntityId) -> Result<ClientServiceAssignment, ServiceError> { self.delete(id).await }
}
