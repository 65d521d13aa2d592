//! The route table and its global routing defaults.
//!
//! [`RoutesConfig`] is the complete, self-contained snapshot that
//! readers consult: routes keyed by id plus the global prefix,
//! strip-prefix and retry defaults, the header sets, and the
//! thread-pool naming policy. It is a plain value; publishing it to
//! concurrent readers is the job of
//! [`RoutesStore`](crate::config::store::RoutesStore).

pub mod route;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::policy::header_set::HeaderSet;
pub use route::{Route, SensitiveHeaders, Target};

/// Thread-pool key used by every route unless separate pools are enabled.
pub const SHARED_THREAD_POOL_KEY: &str = "RibbonCommand";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThreadPool {
    pub use_separate_thread_pools: bool,
    pub thread_pool_key_prefix: String,
}

impl ThreadPool {
    /// Pool key for a command (normally a route's service id).
    #[must_use]
    pub fn pool_key(&self, command_key: &str) -> String {
        if self.use_separate_thread_pools {
            format!("{}{command_key}", self.thread_pool_key_prefix)
        } else {
            SHARED_THREAD_POOL_KEY.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutesConfig {
    pub prefix: String,
    pub strip_prefix: bool,
    pub retryable: bool,
    pub ignored_headers: HeaderSet,
    pub sensitive_headers: SensitiveHeaders,
    pub additional_sensitive_headers: HeaderSet,
    pub ignore_security_headers: bool,
    pub thread_pool: ThreadPool,
    routes: BTreeMap<String, Route>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            strip_prefix: true,
            retryable: false,
            ignored_headers: HeaderSet::new(),
            sensitive_headers: SensitiveHeaders::Inherited,
            additional_sensitive_headers: HeaderSet::new(),
            ignore_security_headers: true,
            thread_pool: ThreadPool::default(),
            routes: BTreeMap::new(),
        }
    }
}

impl RoutesConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, replacing any route with the same id.
    pub fn add_or_replace_route(&mut self, route: Route) -> Option<Route> {
        self.routes.insert(route.id.clone(), route)
    }

    #[must_use]
    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.get(id)
    }

    /// Routes ordered by id.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    /// Removing an unknown id is a no-op.
    pub fn remove_route(&mut self, id: &str) -> Option<Route> {
        self.routes.remove(id)
    }

    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Replace the global sensitive-header base set.
    pub fn set_sensitive_headers<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensitive_headers = SensitiveHeaders::Explicit(names.into_iter().collect());
    }

    /// Add a header on top of whatever the global base set resolves to.
    pub fn add_sensitive_header(&mut self, name: impl Into<String>) {
        self.additional_sensitive_headers.insert(name);
    }

    pub fn set_ignored_headers<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_headers = names.into_iter().collect();
    }

    #[must_use]
    pub fn full_path(&self, route: &Route) -> String {
        format!("{}{}", self.prefix, route.path)
    }

    #[must_use]
    pub fn is_retryable(&self, route: &Route) -> bool {
        route.retryable.unwrap_or(self.retryable)
    }

    /// Full paths claimed by more than one route, with the claiming ids.
    /// Diagnostics keyed by full path can only show one of them.
    #[must_use]
    pub fn duplicate_full_paths(&self) -> BTreeMap<String, Vec<String>> {
        let mut by_path: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for route in self.routes() {
            by_path
                .entry(self.full_path(route))
                .or_default()
                .push(route.id.clone());
        }
        by_path.retain(|_, ids| ids.len() > 1);
        by_path
    }
}
