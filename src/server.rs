//! Axum server setup, shared application state, and graceful shutdown.
//!
//! Contains [`AppState`] (the `Arc`-shared state holding the routes
//! store, the config source, stats, and uptime), [`build_router`] for
//! constructing the Axum router with middleware layers, and
//! [`shutdown_signal`] for SIGTERM / Ctrl+C handling.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::actuator;
use crate::config::store::RoutesStore;
use crate::config::ConfigSource;
use crate::error::GatehouseError;
use crate::health::health_handler;

#[derive(Debug)]
pub struct Stats {
    pub config_reloads: AtomicU64,
    pub failed_reloads: AtomicU64,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            config_reloads: AtomicU64::new(0),
            failed_reloads: AtomicU64::new(0),
        }
    }
}

pub struct AppState {
    pub store: RoutesStore,
    pub source: Box<dyn ConfigSource>,
    pub start_time: Instant,
    pub stats: Stats,
}

impl AppState {
    /// Reload from the config source if its version changed (or always,
    /// when `force` is set). Returns `true` when a new snapshot was
    /// published. A failed load keeps the current snapshot.
    pub async fn refresh(&self, force: bool) -> Result<bool, GatehouseError> {
        let current_version = self.store.snapshot().version.clone();

        if !force && !self.source.has_changed(&current_version).await? {
            return Ok(false);
        }

        tracing::info!(force, "reloading route table");
        let (config, version) = self.source.load().await?;
        let route_count = config.route_count();
        let published = self.store.publish(config, version);
        self.stats.config_reloads.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            routes = route_count,
            revision = published.revision,
            version = %published.version.short(),
            "route table reloaded"
        );
        Ok(true)
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/actuator", actuator::actuator_router())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
