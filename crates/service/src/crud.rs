use async_trait::async_trait;
use models::{Entity, EntityId};
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::ServiceError;

/// The operation set every collection service exposes.
///
/// `Create` and `Patch` are the request shapes; a patch has no identity
/// field, so `update` can never move a record to another id.
#[async_trait]
pub trait CrudService: Send + Sync + 'static {
    type Entity: Entity + Serialize;
    type Create: DeserializeOwned + Send + 'static;
    type Patch: DeserializeOwned + Send + 'static;

    async fn get_all(&self) -> Vec<Self::Entity>;
    async fn get_by_id(&self, id: EntityId) -> Result<Self::Entity, ServiceError>;
    async fn create(&self, input: Self::Create) -> Result<Self::Entity, ServiceError>;
    async fn update(&self, id: EntityId, patch: Self::Patch) -> Result<Self::Entity, ServiceError>;
    async fn delete(&self, id: EntityId) -> Result<Self::Entity, ServiceError>;
}
