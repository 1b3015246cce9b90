//! Selector menu endpoints
//!
//! - POST /menu - Items for one side's selector
//! - POST /menu/select - Record the chosen endpoint as the side's query hint
//! - POST /menu/deposit - OffRamp deposit network guidance

use axum::{extract::State, routing::post, Json, Router};
use swapline_core::{AppConfig, Settings, SwapFormValues};
use swapline_form::{
    currency_icon_path, off_ramp_deposit_network, preselect, selector_menu, MenuContext,
    QueryParams,
};

use super::{reject, ApiResult};
use crate::dto::{DepositGuidanceResponse, MenuRequest, MenuResponse, MenuSelectRequest};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(menu))
        .route("/select", post(select))
        .route("/deposit", post(deposit))
}

/// Catalog-supplied resource storage, falling back to the configured one
fn storage_url<'a>(settings: &'a Settings, config: &'a AppConfig) -> &'a str {
    let url = settings.discovery.resource_storage_url.as_str();
    if url.is_empty() {
        &config.resource_storage_url
    } else {
        url
    }
}

/// POST /menu
pub async fn menu(
    State(state): State<AppState>,
    Json(request): Json<MenuRequest>,
) -> ApiResult<MenuResponse> {
    let settings = state.settings().await.map_err(reject)?;
    let config = state.config().await;
    let query = state.query().await;

    let ctx = MenuContext {
        values: &request.values,
        query: &query,
        resource_storage_url: storage_url(&settings, &config),
        allow_same_endpoint: config.allow_same_endpoint,
    };
    let menu = selector_menu(&settings, request.side, &ctx);
    let preselected = preselect(&menu.items, query.hint(request.side)).map(|item| item.id.clone());

    Ok(Json(MenuResponse { menu, preselected }))
}

/// POST /menu/select
pub async fn select(
    State(state): State<AppState>,
    Json(request): Json<MenuSelectRequest>,
) -> Json<QueryParams> {
    state.select_endpoint(request.side, &request.id).await;
    Json(state.query().await)
}

/// POST /menu/deposit
pub async fn deposit(
    State(state): State<AppState>,
    Json(values): Json<SwapFormValues>,
) -> ApiResult<DepositGuidanceResponse> {
    let settings = state.settings().await.map_err(reject)?;
    let config = state.config().await;
    let url = storage_url(&settings, &config);

    Ok(Json(DepositGuidanceResponse {
        network: off_ramp_deposit_network(&values, &settings.networks).cloned(),
        currency_icon: values
            .currency
            .as_deref()
            .map(|asset| currency_icon_path(url, asset)),
    }))
}
