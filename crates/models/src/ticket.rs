use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::errors::ModelError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

    /// Open and in-progress tickets still need attention.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// A support request raised for a client. `client_id` is a soft reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub client_id: EntityId,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: TicketPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Ticket {
    const LABEL: &'static str = "Ticket";

    fn id(&self) -> EntityId { self.id }

    fn set_id(&mut self, id: EntityId) { self.id = id; }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub client_id: EntityId,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: TicketPriority,
}

impl NewTicket {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.subject.trim().is_empty() {
            return Err(ModelError::Validation("ticket subject is required".into()));
        }
        Ok(())
    }

    /// New tickets always start open.
    pub fn into_ticket(self, id: EntityId, now: DateTime<Utc>) -> Ticket {
        Ticket {
            id,
            client_id: self.client_id,
            subject: self.subject,
            description: self.description,
            status: TicketStatus::Open,
            priority: self.priority,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketPatch {
    pub client_id: Option<EntityId>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
}

impl TicketPatch {
    pub fn apply(self, current: &Ticket, now: DateTime<Utc>) -> Ticket {
        Ticket {
            id: current.id,
            client_id: self.client_id.unwrap_or(current.client_id),
            subject: self.subject.unwrap_or_else(|| current.subject.clone()),
            description: self.description.unwrap_or_else(|| current.description.clone()),
            status: self.status.unwrap_or(current.status),
            priority: self.priority.unwrap_or(current.priority),
            created_at: current.created_at,
            updated_at: now,
        }
    }
}
