//! Simulated I/O latency.
//!
//! Every service call awaits its delay policy before touching a store. Tests
//! use [`NoDelay`]; demos use [`SimulatedLatency`] to reproduce the pacing a
//! browser UI sees against a remote backend.

use std::time::Duration;

use async_trait::async_trait;

/// Kind of service call, used to pick a latency magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    Query,
}

impl Operation {
    /// Baseline latency in milliseconds.
    pub fn base_millis(self) -> u64 {
        match self {
            Operation::List => 250,
            Operation::Get => 200,
            Operation::Create => 400,
            Operation::Update => 350,
            Operation::Delete => 250,
            Operation::Query => 200,
        }
    }
}

#[async_trait]
pub trait DelayPolicy: Send + Sync {
    async fn pause(&self, op: Operation);
}

/// Resolves immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

#[async_trait]
impl DelayPolicy for NoDelay {
    async fn pause(&self, _op: Operation) {}
}

/// Sleeps for the operation's baseline scaled by `scale`.
#[derive(Clone, Copy, Debug)]
pub struct SimulatedLatency {
    scale: f64,
}

impl SimulatedLatency {
    /// Negative or non-finite scales are treated as zero.
    pub fn new(scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 0.0 };
        Self { scale }
    }

    pub fn duration_for(&self, op: Operation) -> Duration {
        Duration::from_secs_f64(op.base_millis() as f64 * self.scale / 1000.0)
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self { Self::new(1.0) }
}

#[async_trait]
impl DelayPolicy for SimulatedLatency {
    async fn pause(&self, op: Operation) {
        let d = self.duration_for(op);
        if !d.is_zero() {
            tokio::time::sleep(d).await;
        }
    }
}
