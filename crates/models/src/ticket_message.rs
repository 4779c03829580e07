use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::errors::ModelError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthorType {
    #[default]
    Support,
    Client,
}

/// One entry in a ticket's conversation thread.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketMessage {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub ticket_id: EntityId,
    pub message: String,
    #[serde(default)]
    pub author_type: AuthorType,
    #[serde(default)]
    pub is_internal: bool,
    pub created_at: DateTime<Utc>,
}

impl Entity for TicketMessage {
    const LABEL: &'static str = "Message";

    fn id(&self) -> EntityId { self.id }

    fn set_id(&mut self, id: EntityId) { self.id = id; }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicketMessage {
    pub ticket_id: EntityId,
    pub message: String,
    #[serde(default)]
    pub author_type: AuthorType,
    #[serde(default)]
    pub is_internal: bool,
}

impl NewTicketMessage {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.message.trim().is_empty() {
            return Err(ModelError::Validation("message must not be empty".into()));
        }
        Ok(())
    }

    pub fn into_message(self, id: EntityId, now: DateTime<Utc>) -> TicketMessage {
        TicketMessage {
            id,
            ticket_id: self.ticket_id,
            message: self.message,
            author_type: self.author_type,
            is_internal: self.is_internal,
            created_at: now,
        }
    }
}

/// Messages are append-only in the UI; edits are limited to the text and
/// the internal flag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketMessagePatch {
    pub message: Option<String>,
    pub is_internal: Option<bool>,
}

impl TicketMessagePatch {
    pub fn apply(self, current: &TicketMessage) -> Result<TicketMessage, ModelError> {
        if matches!(&self.message, Some(m) if m.trim().is_empty()) {
            return Err(ModelError::Validation("message must not be empty".into()));
        }
        Ok(TicketMessage {
            message: self.message.unwrap_or_else(|| current.message.clone()),
            is_internal: self.is_internal.unwrap_or(current.is_internal),
            ..current.clone()
        })
    }
}
