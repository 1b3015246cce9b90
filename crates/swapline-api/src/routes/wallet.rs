//! Wallet event endpoints
//!
//! The wallet-connect flow runs in the front-end; it reports connect and
//! disconnect here and the event is forwarded to every listening session.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::dto::{WalletConnectRequest, WalletResponse, WalletStatusResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_wallet))
        .route("/connect", post(connect))
        .route("/disconnect", post(disconnect))
}

/// GET /wallet
pub async fn get_wallet(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    let wallet = state.wallet().await;
    Json(WalletStatusResponse {
        connected: wallet.is_some(),
        address: wallet.map(|w| w.address),
    })
}

/// POST /wallet/connect
pub async fn connect(
    State(state): State<AppState>,
    Json(request): Json<WalletConnectRequest>,
) -> Json<WalletResponse> {
    let dispatch = state.connect_wallet(request.address.clone()).await;
    Json(WalletResponse::new(Some(request.address), dispatch))
}

/// POST /wallet/disconnect
pub async fn disconnect(State(state): State<AppState>) -> Json<WalletResponse> {
    let dispatch = state.disconnect_wallet().await;
    Json(WalletResponse::new(None, dispatch))
}
