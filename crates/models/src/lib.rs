//! Entity definitions for the client administration backend.
//! - Plain serde records matching the fixture JSON shape (`Id`, camelCase).
//! - Create inputs and partial-update patches with model-level validation.
//! - Bundled seed data.

pub mod errors;
pub mod entity;
pub mod client;
pub mod offering;
pub mod assignment;
pub mod ticket;
pub mod ticket_message;
pub mod fixtures;

pub use entity::{Entity, EntityId};
