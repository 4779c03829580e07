use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::errors::ModelError;

/// Catalog categories known to the admin UI. Stored as plain strings so
/// fixtures with other categories still load.
pub const KNOWN_CATEGORIES: [&str; 5] = [
    "webHosting",
    "domainManagement",
    "wordPressManagement",
    "emailHosting",
    "seoMarketing",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

/// A sellable item in the service catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price: Decimal,
    #[serde(default)]
    pub billing_cycle: BillingCycle,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,
}

fn default_true() -> bool { true }

impl Entity for ServiceOffering {
    const LABEL: &'static str = "Service";

    fn id(&self) -> EntityId { self.id }

    fn set_id(&mut self, id: EntityId) { self.id = id; }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewServiceOffering {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub billing_cycle: BillingCycle,
    pub custom_fields: BTreeMap<String, String>,
}

impl NewServiceOffering {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("service name is required".into()));
        }
        validate_price(self.price)
    }

    /// New offerings always start active.
    pub fn into_offering(self, id: EntityId) -> ServiceOffering {
        ServiceOffering {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            billing_cycle: self.billing_cycle,
            is_active: true,
            custom_fields: self.custom_fields,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceOfferingPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub billing_cycle: Option<BillingCycle>,
    pub is_active: Option<bool>,
    pub custom_fields: Option<BTreeMap<String, String>>,
}

impl ServiceOfferingPatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        match self.price {
            Some(price) => validate_price(price),
            None => Ok(()),
        }
    }

    pub fn apply(self, current: &ServiceOffering) -> ServiceOffering {
        ServiceOffering {
            id: current.id,
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self.description.unwrap_or_else(|| current.description.clone()),
            category: self.category.unwrap_or_else(|| current.category.clone()),
            price: self.price.unwrap_or(current.price),
            billing_cycle: self.billing_cycle.unwrap_or(current.billing_cycle),
            is_active: self.is_active.unwrap_or(current.is_active),
            custom_fields: self.custom_fields.unwrap_or_else(|| current.custom_fields.clone()),
        }
    }
}

fn validate_price(price: Decimal) -> Result<(), ModelError> {
    if price < Decimal::ZERO {
        return Err(ModelError::Validation("price must not be negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_offering_starts_active() {
        let o = NewServiceOffering {
            name: "Hosting Web Básico".into(),
            category: "webHosting".into(),
            price: Decimal::from(299),
            ..Default::default()
        }
        .into_offering(3);
        assert!(o.is_active);
        assert_eq!(o.billing_cycle, BillingCycle::Monthly);
    }

    #[test]
    fn negative_price_is_rejected() {
        let input = NewServiceOffering { name: "x".into(), price: Decimal::from(-1), ..Default::default() };
        assert!(matches!(input.validate(), Err(ModelError::Validation(_))));
        let patch = ServiceOfferingPatch { price: Some(Decimal::from(-5)), ..Default::default() };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn price_reads_json_numbers() -> Result<(), anyhow::Error> {
        let o: ServiceOffering = serde_json::from_str(
            r#"{"Id":1,"name":"n","category":"webHosting","price":299.5,"billingCycle":"yearly"}"#,
        )?;
        assert_eq!(o.price, Decimal::new(2995, 1));
        assert_eq!(o.billing_cycle, BillingCycle::Yearly);
        assert!(o.is_active);
        Ok(())
    }
}
