//! Seed data for the in-memory collections.
//!
//! The default data set is compiled into the crate. A directory with any of
//! `clients.json`, `services.json`, `clientServices.json`, `tickets.json` and
//! `ticketMessages.json` can replace individual collections at startup.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::assignment::ClientServiceAssignment;
use crate::client::Client;
use crate::errors::ModelError;
use crate::offering::ServiceOffering;
use crate::ticket::Ticket;
use crate::ticket_message::TicketMessage;

const CLIENTS: &str = include_str!("../fixtures/clients.json");
const SERVICES: &str = include_str!("../fixtures/services.json");
const CLIENT_SERVICES: &str = include_str!("../fixtures/clientServices.json");
const TICKETS: &str = include_str!("../fixtures/tickets.json");
const TICKET_MESSAGES: &str = include_str!("../fixtures/ticketMessages.json");

/// One array of records per collection.
#[derive(Clone, Debug, Default)]
pub struct SeedData {
    pub clients: Vec<Client>,
    pub offerings: Vec<ServiceOffering>,
    pub assignments: Vec<ClientServiceAssignment>,
    pub tickets: Vec<Ticket>,
    pub messages: Vec<TicketMessage>,
}

impl SeedData {
    /// Empty collections, for isolated tests.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The data set bundled with the crate.
    pub fn embedded() -> Result<Self, ModelError> {
        Ok(Self {
            clients: parse("clients.json", CLIENTS)?,
            offerings: parse("services.json", SERVICES)?,
            assignments: parse("clientServices.json", CLIENT_SERVICES)?,
            tickets: parse("tickets.json", TICKETS)?,
            messages: parse("ticketMessages.json", TICKET_MESSAGES)?,
        })
    }

    /// Load from `dir`, falling back to the bundled file for anything missing.
    /// A present but malformed file is an error.
    pub async fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ModelError> {
        let dir = dir.as_ref();
        Ok(Self {
            clients: load(dir, "clients.json", CLIENTS).await?,
            offerings: load(dir, "services.json", SERVICES).await?,
            assignments: load(dir, "clientServices.json", CLIENT_SERVICES).await?,
            tickets: load(dir, "tickets.json", TICKETS).await?,
            messages: load(dir, "ticketMessages.json", TICKET_MESSAGES).await?,
        })
    }
}

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> Result<Vec<T>, ModelError> {
    serde_json::from_str(raw).map_err(|e| ModelError::Fixture(format!("{name}: {e}")))
}

async fn load<T: DeserializeOwned>(dir: &Path, name: &str, bundled: &str) -> Result<Vec<T>, ModelError> {
    let path = dir.join(name);
    match tokio::fs::read_to_string(&path).await {
        Ok(raw) => {
            let rows: Vec<T> = parse(name, &raw)?;
            info!(file = %path.display(), rows = rows.len(), "fixture_loaded");
            Ok(rows)
        }
        Err(e) => {
            warn!(file = %path.display(), error = %e, "fixture file unavailable; using bundled data");
            parse(name, bundled)
        }
    }
}
