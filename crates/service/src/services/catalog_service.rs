use std::sync::Arc;

use async_trait::async_trait;
use models::entity::contains_ignore_case;
use models::offering::{NewServiceOffering, ServiceOffering, ServiceOfferingPatch};
use models::{Entity, EntityId};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::crud::CrudService;
use crate::errors::ServiceError;
use crate::latency::{DelayPolicy, Operation};
use crate::storage::memory_store::MemoryStore;

/// Catalog browsing filter. Every field is optional; an absent category
/// means all categories.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub q: Option<String>,
    pub active_only: bool,
}

/// The provider's service catalog.
pub struct ServiceCatalogService {
    store: Arc<MemoryStore<ServiceOffering>>,
    delay: Arc<dyn DelayPolicy>,
}

impl ServiceCatalogService {
    pub fn new(store: Arc<MemoryStore<ServiceOffering>>, delay: Arc<dyn DelayPolicy>) -> Self { Self { store, delay } }

    pub async fn get_all(&self) -> Vec<ServiceOffering> {
        self.delay.pause(Operation::List).await;
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: EntityId) -> Result<ServiceOffering, ServiceError> {
        self.delay.pause(Operation::Get).await;
        self.store.get(id).await.ok_or_else(|| ServiceError::not_found(ServiceOffering::LABEL))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewServiceOffering) -> Result<ServiceOffering, ServiceError> {
        self.delay.pause(Operation::Create).await;
        input.validate()?;
        let created = self.store.insert_with(move |id, _| Ok(input.into_offering(id))).await?;
        info!(service_id = created.id, category = %created.category, "service_offering_created");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: EntityId, patch: ServiceOfferingPatch) -> Result<ServiceOffering, ServiceError> {
        self.delay.pause(Operation::Update).await;
        patch.validate()?;
        let updated = self.store.update_with(id, |current| Ok(patch.apply(current))).await?;
        info!(service_id = id, "service_offering_updated");
        Ok(updated)
    }

    /// Remove an offering. Assignments referencing it are left dangling.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> Result<ServiceOffering, ServiceError> {
        self.delay.pause(Operation::Delete).await;
        let removed = self.store.remove(id).await?;
        info!(service_id = id, "service_offering_deleted");
        Ok(removed)
    }

    /// Active offerings in `category`.
    pub async fn get_by_category(&self, category: &str) -> Vec<ServiceOffering> {
        self.delay.pause(Operation::Query).await;
        self.store.filter(|s| s.category == category && s.is_active).await
    }

    /// Category and free-text filter used by the catalog page. The text
    /// matches name or description, case-insensitively.
    pub async fn search(&self, filter: &CatalogFilter) -> Vec<ServiceOffering> {
        self.delay.pause(Operation::Query).await;
        let q = filter.q.as_deref().map(|q| q.trim().to_lowercase()).unwrap_or_default();
        self.store
            .filter(|s| {
                filter.category.as_deref().map_or(true, |c| s.category == c)
                    && (!filter.active_only || s.is_active)
                    && (q.is_empty() || contains_ignore_case(&s.name, &q) || contains_ignore_case(&s.description, &q))
            })
            .await
    }
}

#[async_trait]
impl CrudService for ServiceCatalogService {
    type Entity = ServiceOffering;
    type Create = NewServiceOffering;
    type Patch = ServiceOfferingPatch;

    async fn get_all(&self) -> Vec<ServiceOffering> { self.get_all().await }
    async fn get_by_id(&self, id: EntityId) -> Result<ServiceOffering, ServiceError> { self.get_by_id(id).await }
    async fn create(&self, input: NewServiceOffering) -> Result<ServiceOffering, ServiceError> { self.create(input).await }
    async fn update(&self, id: EntityId, patch: ServiceOfferingPatch) -> Result<ServiceOffering, ServiceError> { self.update(id, patch).await }
    async fn delete(&self, id: EntityId) -> Result<ServiceOffering, ServiceError> { self.delete(id).await }
}
