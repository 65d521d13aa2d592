//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload containing the server
//! version, uptime, snapshot metadata (source, version hash, revision,
//! route count), and cumulative reload statistics.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub config: ConfigHealth,
    pub stats: StatsResponse,
}

#[derive(Serialize, Deserialize)]
pub struct ConfigHealth {
    pub source: String,
    pub version: String,
    pub revision: u64,
    pub loaded_ago_seconds: u64,
    pub routes: usize,
}

#[derive(Serialize, Deserialize)]
pub struct StatsResponse {
    pub config_reloads: u64,
    pub failed_reloads: u64,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let loaded = state.store.snapshot();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        config: ConfigHealth {
            source: loaded.source_name.clone(),
            version: loaded.version.short().to_string(),
            revision: loaded.revision,
            loaded_ago_seconds: loaded.loaded_at.elapsed().as_secs(),
            routes: loaded.config.route_count(),
        },
        stats: StatsResponse {
            config_reloads: state.stats.config_reloads.load(Ordering::Relaxed),
            failed_reloads: state.stats.failed_reloads.load(Ordering::Relaxed),
        },
    })
}
