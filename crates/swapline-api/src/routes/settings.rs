//! Catalog snapshot endpoints

use axum::{extract::State, routing::get, Json, Router};
use swapline_core::Settings;

use super::{reject, ApiResult};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_settings).put(put_settings))
}

/// GET /settings - Current catalog snapshot
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Settings> {
    state.settings().await.map(Json).map_err(reject)
}

/// PUT /settings - Replace the catalog snapshot
pub async fn put_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Json<Settings> {
    state.set_settings(settings.clone()).await;
    Json(settings)
}
