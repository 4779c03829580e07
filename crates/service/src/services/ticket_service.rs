use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use models::entity::contains_ignore_case;
use models::ticket::{NewTicket, Ticket, TicketPatch, TicketPriority, TicketStatus};
use models::{Entity, EntityId};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::crud::CrudService;
use crate::errors::ServiceError;
use crate::latency::{DelayPolicy, Operation};
use crate::storage::memory_store::MemoryStore;

/// Ticket list filter; every criterion is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub q: Option<String>,
}

/// Support tickets.
pub struct TicketService {
    store: Arc<MemoryStore<Ticket>>,
    delay: Arc<dyn DelayPolicy>,
}

impl TicketService {
    pub fn new(store: Arc<MemoryStore<Ticket>>, delay: Arc<dyn DelayPolicy>) -> Self { Self { store, delay } }

    pub async fn get_all(&self) -> Vec<Ticket> {
        self.delay.pause(Operation::List).await;
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: EntityId) -> Result<Ticket, ServiceError> {
        self.delay.pause(Operation::Get).await;
        self.store.get(id).await.ok_or_else(|| ServiceError::not_found(Ticket::LABEL))
    }

    pub async fn get_by_client_id(&self, client_id: EntityId) -> Vec<Ticket> {
        self.delay.pause(Operation::Query).await;
        self.store.filter(|t| t.client_id == client_id).await
    }

    pub async fn get_by_status(&self, status: TicketStatus) -> Vec<Ticket> {
        self.delay.pause(Operation::Query).await;
        self.store.filter(|t| t.status == status).await
    }

    /// Tickets that are open or in progress.
    pub async fn get_open_tickets(&self) -> Vec<Ticket> {
        self.delay.pause(Operation::Query).await;
        self.store.filter(|t| t.status.is_open()).await
    }

    /// Filter by status, priority and subject/description text; newest first.
    pub async fn filter(&self, filter: &TicketFilter) -> Vec<Ticket> {
        self.delay.pause(Operation::Query).await;
        let q = filter.q.as_deref().map(|q| q.trim().to_lowercase()).unwrap_or_default();
        let mut found = self
            .store
            .filter(|t| {
                filter.status.map_or(true, |s| t.status == s)
                    && filter.priority.map_or(true, |p| t.priority == p)
                    && (q.is_empty() || contains_ignore_case(&t.subject, &q) || contains_ignore_case(&t.description, &q))
            })
            .await;
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }

    /// Number of tickets per status; every status is present, possibly with 0.
    pub async fn status_counts(&self) -> BTreeMap<TicketStatus, usize> {
        self.delay.pause(Operation::Query).await;
        let mut counts: BTreeMap<TicketStatus, usize> = TicketStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for t in self.store.list().await {
            *counts.entry(t.status).or_default() += 1;
        }
        counts
    }

    /// Open a ticket. The client id is not checked.
    #[instrument(skip(self, input), fields(client_id = input.client_id))]
    pub async fn create(&self, input: NewTicket) -> Result<Ticket, ServiceError> {
        self.delay.pause(Operation::Create).await;
        input.validate()?;
        let created = self.store.insert_with(move |id, _| Ok(input.into_ticket(id, Utc::now()))).await?;
        info!(ticket_id = created.id, priority = ?created.priority, "ticket_created");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: EntityId, patch: TicketPatch) -> Result<Ticket, ServiceError> {
        self.delay.pause(Operation::Update).await;
        if matches!(&patch.subject, Some(s) if s.trim().is_empty()) {
            return Err(ServiceError::Validation("ticket subject is required".into()));
        }
        let updated = self.store.update_with(id, |current| Ok(patch.apply(current, Utc::now()))).await?;
        info!(ticket_id = id, status = ?updated.status, priority = ?updated.priority, "ticket_updated");
        Ok(updated)
    }

    /// Remove a ticket. Its messages are left in place.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> Result<Ticket, ServiceError> {
        self.delay.pause(Operation::Delete).await;
        let removed = self.store.remove(id).await?;
        info!(ticket_id = id, "ticket_deleted");
        Ok(removed)
    }
}

#[async_trait]
impl CrudService for TicketService {
    type Entity = Ticket;
    type Create = NewTicket;
    type Patch = TicketPatch;

    async fn get_all(&self) -> Vec<Ticket> { self.get_all().await }
    async fn get_by_id(&self, id: EntityId) -> Result<Ticket, ServiceError> { self.get_by_id(id).await }
    async fn create(&self, input: NewTicket) -> Result<Ticket, ServiceError> { self.create(input).await }
    async fn update(&self, id: EntityId, patch: TicketPatch) -> Result<Ticket, ServiceError> { self.update(id, patch).await }
    async fn delete(&self, id: EntityId) -> Result<Ticket, ServiceError> { self.delete(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latency::NoDelay;
    use crate::storage::id_policy::IdPolicy;
    use chrono::{DateTime, Duration};

    fn ticket(id: EntityId, client_id: EntityId, status: TicketStatus, priority: TicketPriority, age_hours: i64) -> Ticket {
        let at: DateTime<Utc> = Utc::now() - Duration::hours(age_hours);
        Ticket {
            id,
            client_id,
            subject: format!("Issue {id}"),
            description: if id == 2 { "Correo rebotado".into() } else { String::new() },
            status,
            priority,
            created_at: at,
            updated_at: at,
        }
    }

    fn svc() -> TicketService {
        let seed = vec![
            ticket(1, 1, TicketStatus::Open, TicketPriority::High, 30),
            ticket(2, 1, TicketStatus::InProgress, TicketPriority::Urgent, 5),
            ticket(3, 2, TicketStatus::Closed, TicketPriority::Low, 50),
            ticket(4, 3, TicketStatus::Resolved, TicketPriority::High, 1),
        ];
        TicketService::new(MemoryStore::new(seed, IdPolicy::Monotonic), Arc::new(NoDelay))
    }

    #[tokio::test]
    async fn create_opens_ticket() -> Result<(), anyhow::Error> {
        let svc = svc();
        let t = svc
            .create(NewTicket { client_id: 2, subject: "Renovar SSL".into(), description: String::new(), priority: TicketPriority::Medium })
            .await?;
        assert_eq!(t.id, 5);
        assert_eq!(t.status, TicketStatus::Open);
        assert_eq!(svc.get_by_client_id(2).await.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn open_tickets_include_in_progress() {
        let ids: Vec<_> = svc().get_open_tickets().await.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn by_status_is_exact() {
        let svc = svc();
        assert_eq!(svc.get_by_status(TicketStatus::Open).await.len(), 1);
        assert_eq!(svc.get_by_status(TicketStatus::Closed).await[0].id, 3);
    }

    #[tokio::test]
    async fn filter_sorts_newest_first() {
        let svc = svc();
        let all: Vec<_> = svc.filter(&TicketFilter::default()).await.iter().map(|t| t.id).collect();
        assert_eq!(all, vec![4, 2, 1, 3]);

        let high: Vec<_> = svc
            .filter(&TicketFilter { priority: Some(TicketPriority::High), ..Default::default() })
            .await
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(high, vec![4, 1]);

        let text = svc.filter(&TicketFilter { q: Some("rebotado".into()), ..Default::default() }).await;
        assert_eq!(text.len(), 1);
        assert_eq!(text[0].id, 2);
    }

    #[tokio::test]
    async fn status_counts_cover_every_status() {
        let counts = svc().status_counts().await;
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[&TicketStatus::Open], 1);
        assert_eq!(counts[&TicketStatus::InProgress], 1);
    }

    #[tokio::test]
    async fn update_changes_status_not_identity() -> Result<(), anyhow::Error> {
        let svc = svc();
        let before = svc.get_by_id(1).await?;
        let updated = svc.update(1, TicketPatch { status: Some(TicketStatus::Resolved), ..Default::default() }).await?;
        assert_eq!(updated.id, 1);
        assert_eq!(updated.status, TicketStatus::Resolved);
        assert_eq!(updated.created_at, before.created_at);
        assert!(updated.updated_at > before.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn blank_subject_patch_is_rejected() -> Result<(), anyhow::Error> {
        let svc = svc();
        let err = svc.update(1, TicketPatch { subject: Some(" ".into()), ..Default::default() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.get_by_id(1).await?.subject, "Issue 1");
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let err = svc().delete(77).await.unwrap_err();
        assert_eq!(err.to_string(), "Ticket not found");
    }
}
