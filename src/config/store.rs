//! Lock-free publication of route table snapshots.
//!
//! [`RoutesStore`] keeps the current [`LoadedConfig`] behind an
//! [`ArcSwap`]. Readers call [`RoutesStore::snapshot`] (or
//! [`RoutesStore::config`]) once per request and work against that
//! `Arc` for as long as they need it; a concurrent reload never changes
//! a snapshot that has already been handed out.
//!
//! Writers never touch a published value. [`RoutesStore::publish`]
//! swaps in a freshly loaded config and [`RoutesStore::update`] clones
//! the current one, edits the copy, and swaps that in. Both go through
//! `rcu`, so each publish gets the next revision number even if two
//! writers race.

use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;

use super::ConfigVersion;
use crate::routes::RoutesConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Arc<RoutesConfig>,
    pub version: ConfigVersion,
    pub source_name: String,
    pub loaded_at: Instant,
    pub revision: u64,
}

pub struct RoutesStore {
    current: ArcSwap<LoadedConfig>,
}

impl RoutesStore {
    #[must_use]
    pub fn new(config: RoutesConfig, version: ConfigVersion, source_name: impl Into<String>) -> Self {
        Self {
            current: ArcSwap::from_pointee(LoadedConfig {
                config: Arc::new(config),
                version,
                source_name: source_name.into(),
                loaded_at: Instant::now(),
                revision: 1,
            }),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<LoadedConfig> {
        self.current.load_full()
    }

    #[must_use]
    pub fn config(&self) -> Arc<RoutesConfig> {
        Arc::clone(&self.current.load().config)
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.current.load().revision
    }

    /// Replace the whole snapshot with a newly loaded config.
    pub fn publish(&self, config: RoutesConfig, version: ConfigVersion) -> Arc<LoadedConfig> {
        let config = Arc::new(config);
        self.swap_with(|current| LoadedConfig {
            config: Arc::clone(&config),
            version: version.clone(),
            source_name: current.source_name.clone(),
            loaded_at: Instant::now(),
            revision: current.revision + 1,
        })
    }

    /// Copy-on-write edit of the current config.
    ///
    /// `edit` may run more than once if another writer publishes
    /// concurrently, so it must not have side effects.
    pub fn update<F>(&self, edit: F) -> Arc<LoadedConfig>
    where
        F: Fn(&mut RoutesConfig),
    {
        self.swap_with(|current| {
            let mut next = (*current.config).clone();
            edit(&mut next);
            LoadedConfig {
                config: Arc::new(next),
                version: current.version.clone(),
                source_name: current.source_name.clone(),
                loaded_at: Instant::now(),
                revision: current.revision + 1,
            }
        })
    }

    fn swap_with<F>(&self, build: F) -> Arc<LoadedConfig>
    where
        F: Fn(&LoadedConfig) -> LoadedConfig,
    {
        let mut published = None;
        self.current.rcu(|current| {
            let next = Arc::new(build(current));
            published = Some(Arc::clone(&next));
            next
        });
        let published = published.unwrap_or_else(|| self.current.load_full());
        tracing::debug!(
            revision = published.revision,
            routes = published.config.route_count(),
            "routes snapshot published"
        );
        published
    }
}
