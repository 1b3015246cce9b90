//! Query-parameter hint endpoints

use axum::{extract::State, routing::get, Json, Router};
use swapline_form::QueryParams;

use crate::dto::QueryResponse;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_query).post(apply_query))
}

/// GET /query - Persisted query params
pub async fn get_query(State(state): State<AppState>) -> Json<QueryParams> {
    Json(state.query().await)
}

/// POST /query - Apply params parsed from the page URL
pub async fn apply_query(
    State(state): State<AppState>,
    Json(incoming): Json<QueryParams>,
) -> Json<QueryResponse> {
    let applied = state.apply_query(incoming).await;
    Json(QueryResponse {
        applied,
        params: state.query().await,
    })
}
