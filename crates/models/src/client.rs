use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::errors::ModelError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
}

/// A customer account of the provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub company_name: String,
    #[serde(default)]
    pub contact_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub status: ClientStatus,
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Client {
    const LABEL: &'static str = "Client";

    fn id(&self) -> EntityId { self.id }

    fn set_id(&mut self, id: EntityId) { self.id = id; }
}

/// Create input. Missing text fields deserialize to empty strings so the
/// required-field check can report them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewClient {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: Option<ClientStatus>,
    pub custom_fields: Option<BTreeMap<String, String>>,
    pub notes: Option<String>,
}

impl NewClient {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.company_name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(ModelError::Validation("company name and email are required".into()));
        }
        Ok(())
    }

    pub fn into_client(self, id: EntityId, now: DateTime<Utc>) -> Client {
        Client {
            id,
            company_name: self.company_name,
            contact_name: self.contact_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            status: self.status.unwrap_or_default(),
            custom_fields: self.custom_fields.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Absent fields keep the stored value; there is no identity field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientPatch {
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<ClientStatus>,
    pub custom_fields: Option<BTreeMap<String, String>>,
    pub notes: Option<String>,
}

impl ClientPatch {
    pub fn apply(self, current: &Client, now: DateTime<Utc>) -> Client {
        Client {
            id: current.id,
            company_name: self.company_name.unwrap_or_else(|| current.company_name.clone()),
            contact_name: self.contact_name.unwrap_or_else(|| current.contact_name.clone()),
            email: self.email.unwrap_or_else(|| current.email.clone()),
            phone: self.phone.unwrap_or_else(|| current.phone.clone()),
            address: self.address.unwrap_or_else(|| current.address.clone()),
            status: self.status.unwrap_or(current.status),
            custom_fields: self.custom_fields.unwrap_or_else(|| current.custom_fields.clone()),
            notes: self.notes.unwrap_or_else(|| current.notes.clone()),
            created_at: current.created_at,
            updated_at: now,
        }
    }
}
