use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use models::client::{Client, ClientPatch, NewClient};
use models::entity::contains_ignore_case;
use models::{Entity, EntityId};
use tracing::{info, instrument, warn};

use crate::crud::CrudService;
use crate::errors::ServiceError;
use crate::latency::{DelayPolicy, Operation};
use crate::storage::memory_store::MemoryStore;

/// Client accounts: required fields and case-insensitive unique email on create.
pub struct ClientService {
    store: Arc<MemoryStore<Client>>,
    delay: Arc<dyn DelayPolicy>,
}

impl ClientService {
    pub fn new(store: Arc<MemoryStore<Client>>, delay: Arc<dyn DelayPolicy>) -> Self { Self { store, delay } }

    pub async fn get_all(&self) -> Vec<Client> {
        self.delay.pause(Operation::List).await;
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: EntityId) -> Result<Client, ServiceError> {
        self.delay.pause(Operation::Get).await;
        self.store.get(id).await.ok_or_else(|| ServiceError::not_found(Client::LABEL))
    }

    /// Create a client with `status`, `customFields` and `notes` defaulted.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::client::{ClientStatus, NewClient};
    /// use service::latency::NoDelay;
    /// use service::services::client_service::ClientService;
    /// use service::storage::{id_policy::IdPolicy, memory_store::MemoryStore};
    /// let svc = ClientService::new(MemoryStore::new(Vec::new(), IdPolicy::Monotonic), Arc::new(NoDelay));
    /// let input = NewClient { company_name: "Acme".into(), email: "a@a.com".into(), ..Default::default() };
    /// let client = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(client.id, 1);
    /// assert_eq!(client.status, ClientStatus::Active);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: NewClient) -> Result<Client, ServiceError> {
        self.delay.pause(Operation::Create).await;
        input.validate()?;
        let wanted = input.email.trim().to_lowercase();
        let created = self
            .store
            .insert_with(move |id, existing| {
                if existing.iter().any(|c| c.email.trim().to_lowercase() == wanted) {
                    return Err(ServiceError::DuplicateEmail(input.email));
                }
                Ok(input.into_client(id, Utc::now()))
            })
            .await?;
        info!(client_id = created.id, "client_created");
        Ok(created)
    }

    /// Shallow-merge `patch` and refresh `updatedAt`. Email uniqueness is a
    /// create-time rule only; a collision here is logged, not rejected.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: EntityId, patch: ClientPatch) -> Result<Client, ServiceError> {
        self.delay.pause(Operation::Update).await;
        let new_email = patch.email.as_ref().map(|e| e.trim().to_lowercase());
        let updated = self.store.update_with(id, |current| Ok(patch.apply(current, Utc::now()))).await?;
        if let Some(email) = new_email {
            let shared = self
                .store
                .filter(|c| c.id != id && c.email.trim().to_lowercase() == email)
                .await;
            if !shared.is_empty() {
                warn!(client_id = id, others = shared.len(), "client email now shared with another client");
            }
        }
        info!(client_id = id, "client_updated");
        Ok(updated)
    }

    /// Remove a client. Its tickets and assignments are left in place.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> Result<Client, ServiceError> {
        self.delay.pause(Operation::Delete).await;
        let removed = self.store.remove(id).await?;
        info!(client_id = id, "client_deleted");
        Ok(removed)
    }

    /// Case-insensitive match on company name, contact name or email.
    pub async fn search(&self, query: &str) -> Vec<Client> {
        self.delay.pause(Operation::Query).await;
        let q = query.trim().to_lowercase();
        self.store
            .filter(|c| {
                q.is_empty()
                    || contains_ignore_case(&c.company_name, &q)
                    || contains_ignore_case(&c.contact_name, &q)
                    || contains_ignore_case(&c.email, &q)
            })
            .await
    }
}

#[async_trait]
impl CrudService for ClientService {
    type Entity = Client;
    type Create = NewClient;
    type Patch = ClientPatch;

    async fn get_all(&self) -> Vec<Client> { self.get_all().await }
    async fn get_by_id(&self, id: EntityId) -> Result<Client, ServiceError> { self.get_by_id(id).await }
    async fn create(&self, input: NewClient) -> Result<Client, ServiceError> { self.create(input).await }
    async fn update(&self, id: EntityId, patch: ClientPatch) -> Result<Client, ServiceError> { self.update(id, patch).await }
    async fn delete(&self, id: EntityId) -> Result<Client, ServiceError> { self.delete(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latency::NoDelay;
    use crate::storage::id_policy::IdPolicy;
    use models::client::ClientStatus;

    fn seeded() -> ClientService {
        let now = Utc::now();
        let seed = vec![NewClient {
            company_name: "Restaurante El Sazón".into(),
            contact_name: "María González".into(),
            email: "Maria@ElSazon.com".into(),
            ..Default::default()
        }
        .into_client(1, now)];
        ClientService::new(MemoryStore::new(seed, IdPolicy::Monotonic), Arc::new(NoDelay))
    }

    fn acme() -> NewClient {
        NewClient {
            company_name: "Acme".into(),
            contact_name: "X".into(),
            email: "a@a.com".into(),
            phone: "1".into(),
            address: "Y".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_next_id_and_defaults() -> Result<(), anyhow::Error> {
        let svc = seeded();
        let before = Utc::now();
        let c = svc.create(acme()).await?;
        assert_eq!(c.id, 2);
        assert_eq!(c.status, ClientStatus::Active);
        assert!(c.created_at >= before);
        assert_eq!(c.created_at, c.updated_at);
        assert_eq!(svc.get_all().await.len(), 2);
        assert_eq!(svc.get_by_id(2).await?, c);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_case_insensitive() {
        let svc = seeded();
        let input = NewClient { company_name: "Otro".into(), email: "maria@elsazon.COM".into(), ..Default::default() };
        let err = svc.create(input).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateEmail(_)));
        assert_eq!(svc.get_all().await.len(), 1);
    }

    #[tokio::test]
    async fn missing_required_fields_fail_validation() {
        let svc = seeded();
        let err = svc.create(NewClient { email: "z@z.com".into(), ..Default::default() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let err = svc.create(NewClient { company_name: "Z".into(), ..Default::default() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.get_all().await.len(), 1);
    }

    #[tokio::test]
    async fn free_form_email_is_accepted() -> Result<(), anyhow::Error> {
        let svc = ClientService::new(MemoryStore::new(Vec::new(), IdPolicy::Monotonic), Arc::new(NoDelay));
        let c = svc
            .create(NewClient { company_name: "Acme".into(), email: "acme-billing".into(), ..Default::default() })
            .await?;
        assert_eq!(c.id, 1);
        assert_eq!(c.email, "acme-billing");
        Ok(())
    }

    #[tokio::test]
    async fn update_keeps_identity_and_refreshes_timestamp() -> Result<(), anyhow::Error> {
        let svc = seeded();
        let original = svc.get_by_id(1).await?;
        let patch: ClientPatch = serde_json::from_value(serde_json::json!({ "Id": 50, "notes": "call first" }))?;
        let updated = svc.update(1, patch).await?;
        assert_eq!(updated.id, 1);
        assert_eq!(updated.notes, "call first");
        assert_eq!(updated.company_name, original.company_name);
        assert!(updated.updated_at >= original.updated_at);
        assert!(matches!(svc.get_by_id(50).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_allows_email_collision() -> Result<(), anyhow::Error> {
        let svc = seeded();
        svc.create(acme()).await?;
        let updated = svc.update(2, ClientPatch { email: Some("maria@elsazon.com".into()), ..Default::default() }).await?;
        assert_eq!(updated.email, "maria@elsazon.com");
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> Result<(), anyhow::Error> {
        let svc = seeded();
        let removed = svc.delete(1).await?;
        assert_eq!(removed.id, 1);
        assert!(svc.get_all().await.is_empty());
        let err = svc.get_by_id(1).await.unwrap_err();
        assert_eq!(err.to_string(), "Client not found");
        assert!(matches!(svc.delete(1).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn search_matches_any_text_field() -> Result<(), anyhow::Error> {
        let svc = seeded();
        svc.create(acme()).await?;
        assert_eq!(svc.search("sazón").await.len(), 1);
        assert_eq!(svc.search("MARÍA").await.len(), 1);
        assert_eq!(svc.search("a@a.com").await[0].id, 2);
        assert_eq!(svc.search("").await.len(), 2);
        assert!(svc.search("nobody").await.is_empty());
        Ok(())
    }
}
