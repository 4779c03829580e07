use std::collections::HashMap;

use chrono::{DateTime, Utc};
use models::assignment::AssignmentStatus;
use models::client::ClientStatus;
use models::offering::BillingCycle;
use models::ticket::Ticket;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::registry::AppServices;
use crate::views::{index_by_id, EXPIRY_WINDOW_DAYS, MISSING_CLIENT};

const RECENT_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTicket {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub client_name: String,
}

/// Headline numbers for the admin landing page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub active_clients: usize,
    pub open_tickets: usize,
    pub expiring_services: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_revenue: Decimal,
    pub recent_activity: Vec<RecentTicket>,
}

pub async fn dashboard_summary(services: &AppServices, now: DateTime<Utc>) -> DashboardSummary {
    let (clients, offerings, mut tickets, assignments) = tokio::join!(
        services.clients.get_all(),
        services.catalog.get_all(),
        services.tickets.get_all(),
        services.assignments.get_all(),
    );

    let offerings = index_by_id(offerings);
    let monthly_revenue: Decimal = assignments
        .iter()
        .filter(|a| a.status == AssignmentStatus::Active)
        .filter_map(|a| offerings.get(&a.service_id))
        .filter(|o| o.billing_cycle == BillingCycle::Monthly)
        .map(|o| o.price)
        .sum();

    let names: HashMap<_, _> = clients.iter().map(|c| (c.id, c.company_name.as_str())).collect();
    let open_tickets = tickets.iter().filter(|t| t.status.is_open()).count();
    tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let recent_activity = tickets
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|ticket| {
            let client_name = names.get(&ticket.client_id).copied().unwrap_or(MISSING_CLIENT).to_string();
            RecentTicket { ticket, client_name }
        })
        .collect();

    DashboardSummary {
        active_clients: clients.iter().filter(|c| c.status == ClientStatus::Active).count(),
        open_tickets,
        expiring_services: assignments.iter().filter(|a| a.is_expiring(now, EXPIRY_WINDOW_DAYS)).count(),
        monthly_revenue,
        recent_activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ServiceOptions;
    use chrono::TimeZone;
    use models::fixtures::SeedData;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 25, 12, 0, 0).single().expect("valid instant")
    }

    #[tokio::test]
    async fn summary_over_bundled_data() -> Result<(), anyhow::Error> {
        let services = AppServices::from_seed(SeedData::embedded()?, ServiceOptions::default());
        let summary = dashboard_summary(&services, now()).await;
        assert_eq!(summary.active_clients, 4);
        assert_eq!(summary.open_tickets, 4);
        // 1 and 2 end in December, 7 lapsed but is still marked active
        assert_eq!(summary.expiring_services, 3);
        // 299 + 899 + 599 + 1500; the yearly domain is excluded
        assert_eq!(summary.monthly_revenue, Decimal::from(3297));
        let ids: Vec<_> = summary.recent_activity.iter().map(|r| r.ticket.id).collect();
        assert_eq!(ids, vec![6, 5, 3, 1, 2]);
        assert_eq!(summary.recent_activity[0].client_name, "Ferretería Hernández");
        Ok(())
    }

    #[tokio::test]
    async fn dangling_client_gets_placeholder_name() -> Result<(), anyhow::Error> {
        let mut seed = SeedData::embedded()?;
        seed.tickets.retain(|t| t.id == 7);
        let services = AppServices::from_seed(seed, ServiceOptions::default());
        let summary = dashboard_summary(&services, now()).await;
        assert_eq!(summary.recent_activity.len(), 1);
        assert_eq!(summary.recent_activity[0].client_name, MISSING_CLIENT);
        Ok(())
    }

    #[tokio::test]
    async fn empty_collections_give_zeroes() {
        let services = AppServices::from_seed(SeedData::empty(), ServiceOptions::default());
        let summary = dashboard_summary(&services, now()).await;
        assert_eq!(summary.monthly_revenue, Decimal::ZERO);
        assert!(summary.recent_activity.is_empty());
    }
}
