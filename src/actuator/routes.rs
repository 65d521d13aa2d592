//! Route table endpoint.
//!
//! `GET /actuator/routes` maps each route's full path to its location.
//! With `?format=details` each entry carries the route's flags and its
//! effective sensitive headers. `POST /actuator/routes` forces a reload
//! from the config source. `GET /actuator/routes/{id}/headers` returns
//! the resolved [`HeaderPolicy`]; unknown ids get the global policy.

use std::collections::BTreeMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::policy::header_set::HeaderSet;
use crate::policy::{effective_sensitive_headers, HeaderPolicy};
use crate::routes::RoutesConfig;
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RoutesQuery {
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteDetails {
    pub id: String,
    pub full_path: String,
    pub path: String,
    pub location: Option<String>,
    pub prefix: String,
    /// Whether the global prefix is removed before forwarding.
    pub strip_global_prefix: bool,
    pub retryable: bool,
    pub strip_prefix: bool,
    pub custom_sensitive_headers: bool,
    pub sensitive_headers: Vec<String>,
}

fn mappings(config: &RoutesConfig) -> BTreeMap<String, String> {
    config
        .routes()
        .map(|route| {
            (
                config.full_path(route),
                route.location().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

fn details(config: &RoutesConfig) -> BTreeMap<String, RouteDetails> {
    config
        .routes()
        .map(|route| {
            let sensitive: HeaderSet = effective_sensitive_headers(config, Some(route));
            let full_path = config.full_path(route);
            (
                full_path.clone(),
                RouteDetails {
                    id: route.id.clone(),
                    full_path,
                    path: route.path.clone(),
                    location: route.location().map(str::to_string),
                    prefix: config.prefix.clone(),
                    strip_global_prefix: config.strip_prefix,
                    retryable: config.is_retryable(route),
                    strip_prefix: route.strip_prefix,
                    custom_sensitive_headers: route.custom_sensitive_headers(),
                    sensitive_headers: sensitive.to_vec(),
                },
            )
        })
        .collect()
}

fn render(config: &RoutesConfig, query: &RoutesQuery) -> Response {
    if query.format.as_deref() == Some("details") {
        Json(details(config)).into_response()
    } else {
        Json(mappings(config)).into_response()
    }
}

pub async fn routes_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RoutesQuery>,
) -> Response {
    let config = state.store.config();
    render(&config, &query)
}

pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RoutesQuery>,
) -> Response {
    match state.refresh(true).await {
        Ok(_) => {
            let config = state.store.config();
            render(&config, &query)
        }
        Err(e) => {
            state.stats.failed_reloads.fetch_add(1, Ordering::Relaxed);
            tracing::error!(error = %e, "forced reload failed, keeping current route table");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

pub async fn headers_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<HeaderPolicy> {
    let config = state.store.config();
    Json(HeaderPolicy::for_route_id(&config, &id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::Route;

    fn config() -> RoutesConfig {
        let mut config = RoutesConfig::new();
        config.prefix = "/api".into();
        let mut foo = Route::new("foo");
        foo.url = Some("http://foo:80".into());
        foo.set_sensitive_headers(["X-Foo"]);
        config.add_or_replace_route(foo);
        let mut bar = Route::new("bar");
        bar.service_id = Some("bar-service".into());
        config.add_or_replace_route(bar);
        config
    }

    #[test]
    fn mappings_use_full_path_and_location() {
        let map = mappings(&config());
        assert_eq!(map["/api/foo/**"], "http://foo:80");
        assert_eq!(map["/api/bar/**"], "bar-service");
    }

    #[test]
    fn details_show_effective_sensitive_headers() {
        let map = details(&config());
        assert_eq!(map["/api/foo/**"].sensitive_headers, vec!["X-Foo".to_string()]);
        assert!(map["/api/foo/**"].custom_sensitive_headers);
        assert_eq!(map["/api/bar/**"].sensitive_headers.len(), 3);
        assert!(!map["/api/bar/**"].custom_sensitive_headers);
        assert!(map["/api/bar/**"].strip_global_prefix);
    }

    #[test]
    fn details_follow_global_strip_prefix() {
        let mut config = config();
        config.strip_prefix = false;
        let map = details(&config);
        assert!(map.values().all(|d| !d.strip_global_prefix));
    }
}
