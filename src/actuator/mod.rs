//! Actuator-style diagnostics endpoints under the `/actuator` prefix.
//!
//! Exposes the route table ([`routes`]), the effective header policy for
//! a route, and the current configuration rendered back as a document
//! ([`configprops`]). Every handler reads one snapshot from the store and
//! never blocks a concurrent reload.

mod configprops;
mod routes;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::server::AppState;

pub use routes::{RouteDetails, RoutesQuery};

#[derive(Serialize)]
struct ActuatorIndex {
    #[serde(rename = "_links")]
    links: BTreeMap<String, ActuatorLink>,
}

#[derive(Serialize)]
struct ActuatorLink {
    href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    templated: Option<bool>,
}

/// Build the actuator sub-router (nested under `/actuator`).
pub fn actuator_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_handler))
        .route(
            "/routes",
            get(routes::routes_handler).post(routes::reset_handler),
        )
        .route("/routes/{id}/headers", get(routes::headers_handler))
        .route("/configprops", get(configprops::configprops_handler))
}

async fn index_handler() -> Json<ActuatorIndex> {
    let endpoints = [
        ("self", "/actuator", false),
        ("routes", "/actuator/routes", false),
        ("routes-details", "/actuator/routes?format=details", false),
        ("route-headers", "/actuator/routes/{id}/headers", true),
        ("configprops", "/actuator/configprops", false),
    ];

    let links = endpoints
        .into_iter()
        .map(|(name, href, templated)| {
            (
                name.to_string(),
                ActuatorLink {
                    href: href.to_string(),
                    templated: templated.then_some(true),
                },
            )
        })
        .collect();

    Json(ActuatorIndex { links })
}
