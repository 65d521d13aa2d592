//! Header redaction policy: which headers never leave the proxy.
//!
//! Two sets are resolved for every proxied request:
//!
//! - **ignored** headers are dropped in both directions. They are global
//!   only: [`effective_ignored_headers`] is the configured set plus the
//!   security defaults when `ignore_security_headers` is on.
//! - **sensitive** headers are dropped from the outbound request.
//!   [`effective_sensitive_headers`] returns a route's explicit override
//!   verbatim (even when empty) and otherwise the global set.
//!
//! Everything here is computed from the current field values of a
//! [`RoutesConfig`] snapshot. Nothing mutates, nothing fails; a missing
//! route resolves to the global policy.

pub mod header_set;

use http::{HeaderMap, HeaderName};
use serde::Serialize;

use crate::routes::{Route, RoutesConfig, SensitiveHeaders};
use header_set::HeaderSet;

#[must_use]
pub fn effective_ignored_headers(config: &RoutesConfig) -> HeaderSet {
    if config.ignore_security_headers {
        config.ignored_headers.union(&HeaderSet::security_defaults())
    } else {
        config.ignored_headers.clone()
    }
}

/// Global sensitive set: the explicit base (or the security defaults
/// when inherited and enabled) plus any additional headers.
#[must_use]
pub fn global_sensitive_headers(config: &RoutesConfig) -> HeaderSet {
    let base = match &config.sensitive_headers {
        SensitiveHeaders::Explicit(set) => set.clone(),
        SensitiveHeaders::Inherited if config.ignore_security_headers => {
            HeaderSet::security_defaults()
        }
        SensitiveHeaders::Inherited => HeaderSet::new(),
    };
    base.union(&config.additional_sensitive_headers)
}

#[must_use]
pub fn effective_sensitive_headers(config: &RoutesConfig, route: Option<&Route>) -> HeaderSet {
    match route.map(Route::sensitive_headers) {
        Some(SensitiveHeaders::Explicit(set)) => set.clone(),
        Some(SensitiveHeaders::Inherited) | None => global_sensitive_headers(config),
    }
}

/// Resolved policy for one route, ready to apply to header maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderPolicy {
    pub route: Option<String>,
    pub custom_sensitive_headers: bool,
    pub ignored: HeaderSet,
    pub sensitive: HeaderSet,
}

impl HeaderPolicy {
    #[must_use]
    pub fn resolve(config: &RoutesConfig, route: Option<&Route>) -> Self {
        Self {
            route: route.map(|r| r.id.clone()),
            custom_sensitive_headers: route.is_some_and(Route::custom_sensitive_headers),
            ignored: effective_ignored_headers(config),
            sensitive: effective_sensitive_headers(config, route),
        }
    }

    /// Unknown ids fall back to the global policy.
    #[must_use]
    pub fn for_route_id(config: &RoutesConfig, id: &str) -> Self {
        let route = config.route(id);
        if route.is_none() {
            tracing::debug!(route = %id, "unknown route id, using global header policy");
        }
        Self::resolve(config, route)
    }

    #[must_use]
    pub fn is_request_header_allowed(&self, name: &str) -> bool {
        !self.ignored.contains(name) && !self.sensitive.contains(name)
    }

    #[must_use]
    pub fn is_response_header_allowed(&self, name: &str) -> bool {
        !self.ignored.contains(name)
    }

    /// Strip ignored and sensitive headers before forwarding upstream.
    /// Returns the number of header names removed.
    pub fn filter_request(&self, headers: &mut HeaderMap) -> usize {
        remove_all(headers, &self.ignored) + remove_all(headers, &self.sensitive)
    }

    /// Strip ignored headers before returning a response downstream.
    pub fn filter_response(&self, headers: &mut HeaderMap) -> usize {
        remove_all(headers, &self.ignored)
    }
}

fn remove_all(headers: &mut HeaderMap, names: &HeaderSet) -> usize {
    let mut removed = 0;
    for name in names.lowercase_names() {
        match HeaderName::from_bytes(name.as_bytes()) {
            Ok(header) => {
                if headers.remove(&header).is_some() {
                    removed += 1;
                }
            }
            Err(_) => {
                tracing::warn!(header = %name, "invalid header name in policy, skipping");
            }
        }
    }
    removed
}
