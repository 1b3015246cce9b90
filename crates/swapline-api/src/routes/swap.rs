//! Swap submission failure routing

use axum::{routing::post, Json, Router};
use swapline_form::{route_submit_failure, SubmitFailure, SubmitOutcome};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/failure", post(failure))
}

/// POST /swap/failure - Decide where the flow goes after a failed submission
pub async fn failure(Json(failure): Json<SubmitFailure>) -> Json<SubmitOutcome> {
    let outcome = route_submit_failure(&failure);
    tracing::debug!(?failure, ?outcome, "Routed swap submission failure");
    Json(outcome)
}
