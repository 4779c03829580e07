use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Health {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl Health {
    pub fn ok(service: &str) -> Self {
        Self { status: "ok".into(), service: service.into(), version: env!("CARGO_PKG_VERSION").into() }
    }
}

/// Error payload returned by the HTTP API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}
