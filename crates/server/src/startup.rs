use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use models::fixtures::SeedData;
use service::{AppServices, ServiceOptions};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Seed data from the configured directory, or the bundled set.
async fn load_seed(cfg: &AppConfig) -> Result<SeedData, StartupError> {
    let mut dir = cfg.fixtures.dir.as_deref();
    if let Some(d) = dir {
        if !common::env::fixtures_dir_available(d).await {
            dir = None;
        }
    }
    let seed = match dir {
        Some(dir) => {
            info!(dir = %dir.display(), "loading fixtures from directory");
            SeedData::from_dir(dir).await
        }
        None => SeedData::embedded(),
    };
    seed.map_err(|e| StartupError::Fixtures(e.to_string()))
}

/// Seed the services and wrap them as router state.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let seed = load_seed(cfg).await?;
    let opts = ServiceOptions::with_latency(cfg.latency_scale());
    Ok(AppState::new(AppServices::from_seed(seed, opts)))
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let addr: SocketAddr = cfg
        .server
        .addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address {}: {e}", cfg.server.addr())))?;
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    info!(%addr, latency = ?cfg.latency_scale(), "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app).await.map_err(anyhow::Error::from)?;
    Ok(())
}
