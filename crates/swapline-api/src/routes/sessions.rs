//! Address input session endpoints
//!
//! A session owns one destination address field on the front-end. Every
//! mutation returns the full session snapshot.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use super::{reject, ApiResult};
use crate::dto::{
    AffordanceQuery, AffordanceResponse, ApiError, CreateSessionRequest, DestinationRef,
    InputRequest, SelectAddressRequest, SessionResponse,
};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/:id", get(get_session).delete(delete_session))
        .route("/:id/input", post(input))
        .route("/:id/select", post(select))
        .route("/:id/accept", post(accept))
        .route("/:id/clear", post(clear))
        .route("/:id/destination", post(retarget))
        .route("/:id/affordances", get(affordances))
}

/// POST /sessions - Open a session for a destination
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), (StatusCode, Json<ApiError>)> {
    let ctx = state
        .input_context(
            request.destination.kind,
            &request.destination.id,
            request.swap_type,
        )
        .await
        .map_err(reject)?;

    let (id, session) = state
        .create_session(ctx, request.restore, request.wallet_listener)
        .await;
    Ok((StatusCode::CREATED, Json(SessionResponse::new(id, &session))))
}

/// GET /sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<SessionResponse> {
    let session = state.session(id).await.map_err(reject)?;
    Ok(Json(SessionResponse::new(id, &session)))
}

/// DELETE /sessions/:id
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    state.remove_session(id).await.map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /sessions/:id/input - Raw input change
pub async fn input(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<InputRequest>,
) -> ApiResult<SessionResponse> {
    let (_, session) = state
        .update_session(id, |c| c.keystroke(request.text))
        .await
        .map_err(reject)?;
    Ok(Json(SessionResponse::new(id, &session)))
}

/// POST /sessions/:id/select - Pick a recently used or account address
pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectAddressRequest>,
) -> ApiResult<SessionResponse> {
    let (_, session) = state
        .update_session(id, |c| {
            if request.from_account {
                c.set_from_account(&request.address)
            } else {
                c.select_recent(&request.address)
            }
        })
        .await
        .map_err(reject)?;
    Ok(Json(SessionResponse::new(id, &session)))
}

/// POST /sessions/:id/accept - Confirm the typed candidate
pub async fn accept(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<SessionResponse> {
    let (_, session) = state
        .update_session(id, |c| c.accept_typed())
        .await
        .map_err(reject)?;
    Ok(Json(SessionResponse::new(id, &session)))
}

/// POST /sessions/:id/clear - Remove the address
pub async fn clear(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<SessionResponse> {
    let (outcome, session) = state.clear_session(id).await.map_err(reject)?;
    let mut response = SessionResponse::new(id, &session);
    response.wallet_disconnected = outcome.disconnect_wallet;
    Ok(Json(response))
}

/// POST /sessions/:id/destination - Point the session at another destination
pub async fn retarget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(destination): Json<DestinationRef>,
) -> ApiResult<SessionResponse> {
    let current = state.session(id).await.map_err(reject)?;
    let swap_type = current.controller.context().swap_type;
    let ctx = state
        .input_context(destination.kind, &destination.id, swap_type)
        .await
        .map_err(reject)?;

    let (outcome, session) = state.retarget_session(id, ctx).await.map_err(reject)?;
    let mut response = SessionResponse::new(id, &session);
    response.wallet_disconnected = outcome.disconnect_wallet;
    Ok(Json(response))
}

/// GET /sessions/:id/affordances - Autofill buttons to offer
pub async fn affordances(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AffordanceQuery>,
) -> ApiResult<AffordanceResponse> {
    let session = state.session(id).await.map_err(reject)?;
    let controller = &session.controller;
    let connect_enabled = state
        .config()
        .await
        .deposit_address_connect_enabled(controller.context().destination.id());

    Ok(Json(AffordanceResponse {
        wallet_autofill: controller.wallet_autofill_available(),
        account_autofill: controller
            .account_autofill_available(query.authenticated, connect_enabled),
    }))
}
