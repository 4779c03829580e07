//! Storage abstractions for service layer
//!
//! Contains the generic in-memory collection shared by every service and the
//! identity policy it uses to number new records.

pub mod id_policy;
pub mod memory_store;
