//! Service layer providing the CRUD services and read views of the admin app.
//! - Each service owns one in-memory collection seeded from `models` fixtures.
//! - Validation lives with the entity definitions in the `models` crate.
//! - Views join collections on the caller side; references stay soft.

pub mod crud;
pub mod errors;
pub mod latency;
pub mod pagination;
pub mod registry;
pub mod services;
pub mod storage;
pub mod views;

pub use crud::CrudService;
pub use errors::ServiceError;
pub use registry::{AppServices, ServiceOptions};
