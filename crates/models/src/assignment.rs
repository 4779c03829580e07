use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::errors::ModelError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssignmentStatus {
    #[default]
    Active,
    Inactive,
    Expired,
}

/// A catalog offering contracted by a client. `client_id` and `service_id`
/// are soft references: nothing guarantees the targets still exist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientServiceAssignment {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub client_id: EntityId,
    pub service_id: EntityId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: AssignmentStatus,
}

impl Entity for ClientServiceAssignment {
    const LABEL: &'static str = "Client service";

    fn id(&self) -> EntityId { self.id }

    fn set_id(&mut self, id: EntityId) { self.id = id; }
}

impl ClientServiceAssignment {
    /// End date as an instant at UTC midnight.
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.end_date.and_time(NaiveTime::MIN).and_utc()
    }

    /// Active and ending no later than `now + window_days`. Already-lapsed
    /// assignments that are still marked active count as expiring.
    pub fn is_expiring(&self, now: DateTime<Utc>, window_days: i64) -> bool {
        self.status == AssignmentStatus::Active && self.ends_at() <= now + Duration::days(window_days)
    }

    /// Whole days from `now`'s calendar date to the end date; negative once past.
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.end_date - now.date_naive()).num_days()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClientServiceAssignment {
    pub client_id: EntityId,
    pub service_id: EntityId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewClientServiceAssignment {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_period(self.start_date, self.end_date)
    }

    /// New assignments always start active.
    pub fn into_assignment(self, id: EntityId) -> ClientServiceAssignment {
        ClientServiceAssignment {
            id,
            client_id: self.client_id,
            service_id: self.service_id,
            start_date: self.start_date,
            end_date: self.end_date,
            status: AssignmentStatus::Active,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientServiceAssignmentPatch {
    pub client_id: Option<EntityId>,
    pub service_id: Option<EntityId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<AssignmentStatus>,
}

impl ClientServiceAssignmentPatch {
    /// Merge and check the resulting period.
    pub fn apply(self, current: &ClientServiceAssignment) -> Result<ClientServiceAssignment, ModelError> {
        let merged = ClientServiceAssignment {
            id: current.id,
            client_id: self.client_id.unwrap_or(current.client_id),
            service_id: self.service_id.unwrap_or(current.service_id),
            start_date: self.start_date.unwrap_or(current.start_date),
            end_date: self.end_date.unwrap_or(current.end_date),
            status: self.status.unwrap_or(current.status),
        };
        validate_period(merged.start_date, merged.end_date)?;
        Ok(merged)
    }
}

fn validate_period(start: NaiveDate, end: NaiveDate) -> Result<(), ModelError> {
    if end < start {
        return Err(ModelError::Validation("end date must not precede start date".into()));
    }
    Ok(())
}
