//! Current resolved configuration endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::config::model::RoutesDocument;
use crate::server::AppState;

pub async fn configprops_handler(State(state): State<Arc<AppState>>) -> Json<RoutesDocument> {
    let config = state.store.config();
    Json(RoutesDocument::from_config(&config))
}
