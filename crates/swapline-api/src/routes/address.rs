//! Address validation and recently used address endpoints
//!
//! - POST /address/validate - Validate an address against a destination
//! - POST /address/recent - Filter and label the user's address book

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use swapline_address::{recent_addresses, validate, AddressInputError, RecentAddress};

use super::{reject, ApiResult};
use crate::dto::{RecentRequest, ValidateRequest, ValidateResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/validate", post(validate_address))
        .route("/recent", post(recent))
}

/// POST /address/validate
pub async fn validate_address(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> ApiResult<ValidateResponse> {
    let ctx = state
        .input_context(
            request.destination.kind,
            &request.destination.id,
            request.swap_type,
        )
        .await
        .map_err(reject)?;

    let validation = validate(
        &request.address,
        &ctx.destination,
        &ctx.blacklist,
        ctx.swap_type,
    );

    let guidance = if request.address.is_empty() {
        None
    } else if !validation.is_syntactically_valid {
        Some(
            AddressInputError::InvalidAddress {
                network: ctx.destination.display_name().to_string(),
            }
            .to_string(),
        )
    } else if validation.is_blacklisted {
        Some(AddressInputError::Blacklisted.to_string())
    } else {
        None
    };

    let config = state.config().await;
    Ok(Json(ValidateResponse {
        validation,
        guidance,
        placeholder: config.address_placeholder(ctx.destination.id()).to_string(),
        confirmation_warning: config
            .confirmation_warning(ctx.destination.id())
            .map(str::to_string),
    }))
}

/// POST /address/recent
pub async fn recent(
    State(state): State<AppState>,
    Json(request): Json<RecentRequest>,
) -> ApiResult<Vec<RecentAddress>> {
    let destination = state
        .destination(request.destination.kind, &request.destination.id)
        .await
        .map_err(reject)?;
    let now = request.now.unwrap_or_else(Utc::now);

    let recent = recent_addresses(&request.entries, request.swap_type, &destination, now);
    tracing::debug!(
        destination = %destination.id(),
        total = request.entries.len(),
        applicable = recent.len(),
        "Filtered address book"
    );
    Ok(Json(recent))
}
