//! API route handlers

pub mod address;
pub mod health;
pub mod menu;
pub mod query;
pub mod sessions;
pub mod settings;
pub mod swap;
pub mod wallet;

use axum::{http::StatusCode, routing::get, Json, Router};

use crate::dto::ApiError;
use crate::state::StateError;
use crate::AppState;

pub(crate) type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// Map a state error onto its HTTP status and error body
pub(crate) fn reject(err: impl Into<StateError>) -> (StatusCode, Json<ApiError>) {
    let err = err.into();
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiError::new(err.error_code(), err.to_string())))
}

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/settings", settings::router())
        .nest("/address", address::router())
        .nest("/menu", menu::router())
        .nest("/sessions", sessions::router())
        .nest("/wallet", wallet::router())
        .nest("/query", query::router())
        .nest("/swap", swap::router())
        .with_state(state)
}
