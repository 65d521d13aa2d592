//! `gatehouse run` — load, publish, serve, and hot-reload a route table.
//!
//! Startup is strictly ordered: resolve the config source, load and
//! validate it, publish the first snapshot, start the refresh loop, and
//! only then bind the diagnostics server. Nothing reads the store before
//! the first snapshot exists.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cli::RunArgs;
use crate::config::sources::create_file_source;
use crate::config::store::RoutesStore;
use crate::config::ConfigSource;
use crate::error::GatehouseError;
use crate::logging;
use crate::server::{self, AppState, Stats};

pub async fn execute(args: RunArgs) -> Result<(), GatehouseError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let source = resolve_config_source(&args).await?;
    let (config, version) = source.load().await?;
    let route_count = config.route_count();
    let version_short = version.short().to_string();

    let store = RoutesStore::new(config, version, source.name());

    let state = Arc::new(AppState {
        store,
        source,
        start_time: Instant::now(),
        stats: Stats::new(),
    });

    // Shutdown signal: dropping shutdown_tx closes the channel and stops the refresh loop
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let refresh_state = state.clone();
    let poll_interval = args.poll_interval;
    let refresh_handle = tokio::spawn(async move {
        config_refresh_loop(refresh_state, poll_interval, shutdown_rx).await;
    });

    let router = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        routes = route_count,
        version = %version_short,
        "gatehouse started"
    );

    let graceful_shutdown = async move {
        server::shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(graceful_shutdown)
        .await?;

    if let Err(e) = refresh_handle.await {
        tracing::error!(error = %e, "config refresh task failed");
    }

    tracing::info!("gatehouse stopped");
    Ok(())
}

async fn resolve_config_source(args: &RunArgs) -> Result<Box<dyn ConfigSource>, GatehouseError> {
    resolve_file_source(args.config.as_deref())
        .await?
        .ok_or_else(|| GatehouseError::NoConfigSource {
            hint: "Provide --config <file>.\n  \
                   Run 'gatehouse init' to create a config file."
                .into(),
        })
}

async fn resolve_file_source(
    explicit: Option<&std::path::Path>,
) -> Result<Option<Box<dyn ConfigSource>>, GatehouseError> {
    if let Some(path) = explicit {
        return create_file_source(path).map(Some);
    }

    // Auto-detect in current directory
    let candidates = [
        "gatehouse.yaml",
        "gatehouse.yml",
        "gatehouse.json",
        "gatehouse.toml",
    ];

    for name in &candidates {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected config file");
            return create_file_source(&path).map(Some);
        }
    }

    Ok(None)
}

async fn config_refresh_loop(
    state: Arc<AppState>,
    interval_secs: u64,
    mut shutdown: tokio::sync::watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    interval.tick().await; // Skip first immediate tick

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = shutdown.changed() => {
                tracing::debug!("config refresh loop shutting down");
                return;
            }
        }

        if let Err(e) = state.refresh(false).await {
            state.stats.failed_reloads.fetch_add(1, Ordering::Relaxed);
            tracing::error!(error = %e, "config reload failed, keeping current route table");
        }
    }
}
