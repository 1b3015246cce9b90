//! Data Transfer Objects for API requests and responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swapline_address::{FormOutput, InputState};
use swapline_core::{
    AddressBookEntry, DestinationKind, Network, Side, SwapFormValues, SwapType, ValidationResult,
};
use swapline_form::{QueryParams, SelectorMenu};
use uuid::Uuid;

use crate::state::{Session, WalletDispatch};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub settings_loaded: bool,
}

impl HealthResponse {
    pub fn new(settings_loaded: bool) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            settings_loaded,
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Catalog reference to a network or exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationRef {
    pub kind: DestinationKind,
    pub id: String,
}

/// Address validation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub address: String,
    pub destination: DestinationRef,
    #[serde(default)]
    pub swap_type: SwapType,
}

/// Address validation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    #[serde(flatten)]
    pub validation: ValidationResult,
    /// Inline guidance text when the address is not acceptable
    pub guidance: Option<String>,
    /// Per-network input placeholder
    pub placeholder: String,
    /// Shown on the confirmation step for this network
    pub confirmation_warning: Option<String>,
}

/// Recently used addresses request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentRequest {
    pub destination: DestinationRef,
    #[serde(default)]
    pub swap_type: SwapType,
    pub entries: Vec<AddressBookEntry>,
    /// Reference time for the "used N days ago" labels, defaults to now
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Selector menu request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuRequest {
    pub side: Side,
    #[serde(default)]
    pub values: SwapFormValues,
}

/// Selector menu response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
    #[serde(flatten)]
    pub menu: SelectorMenu,
    /// Item matching the side's query hint
    pub preselected: Option<String>,
}

/// Record the endpoint chosen in a selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSelectRequest {
    pub side: Side,
    pub id: String,
}

/// OffRamp deposit guidance response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositGuidanceResponse {
    pub network: Option<Network>,
    pub currency_icon: Option<String>,
}

/// Open an address input session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub destination: DestinationRef,
    #[serde(default)]
    pub swap_type: SwapType,
    /// Subscribe the session to wallet events
    #[serde(default)]
    pub wallet_listener: bool,
    /// Existing form values to resume from
    #[serde(default)]
    pub restore: Option<FormOutput>,
}

/// Raw input change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRequest {
    pub text: String,
}

/// Address picked from a list (recently used, exchange account)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectAddressRequest {
    pub address: String,
    /// Address was fetched from the user's exchange account
    #[serde(default)]
    pub from_account: bool,
}

/// Address input session snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub state: InputState,
    pub input: String,
    pub short_address: String,
    pub valid_candidate: Option<String>,
    pub guidance: Option<String>,
    pub form: FormOutput,
    pub wallet_listener: bool,
    pub wallet_autofill_available: bool,
    /// Set when clearing the field also disconnected the wallet
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub wallet_disconnected: bool,
}

impl SessionResponse {
    pub fn new(id: Uuid, session: &Session) -> Self {
        let controller = &session.controller;
        Self {
            id,
            state: controller.state(),
            input: controller.input().to_string(),
            short_address: swapline_address::shorten_address(controller.input()),
            valid_candidate: controller.valid_candidate().map(str::to_string),
            guidance: controller.guidance(),
            form: controller.output().clone(),
            wallet_listener: session.wallet_listener,
            wallet_autofill_available: controller.wallet_autofill_available(),
            wallet_disconnected: false,
        }
    }
}

/// Autofill affordances query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffordanceQuery {
    /// User is signed in to the exchange
    #[serde(default)]
    pub authenticated: bool,
}

/// Which autofill buttons to offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordanceResponse {
    pub wallet_autofill: bool,
    pub account_autofill: bool,
}

/// Connected wallet status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletStatusResponse {
    pub connected: bool,
    pub address: Option<String>,
}

/// Wallet connect request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConnectRequest {
    pub address: String,
}

/// A session that refused the wallet address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRejection {
    pub id: Uuid,
    pub code: String,
    pub message: String,
}

/// Wallet event dispatch result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletResponse {
    pub connected: Option<String>,
    pub accepted: Vec<Uuid>,
    pub rejected: Vec<SessionRejection>,
}

impl WalletResponse {
    pub fn new(connected: Option<String>, dispatch: WalletDispatch) -> Self {
        Self {
            connected,
            accepted: dispatch.accepted,
            rejected: dispatch
                .rejected
                .into_iter()
                .map(|(id, e)| SessionRejection {
                    id,
                    code: e.error_code().to_string(),
                    message: e.to_string(),
                })
                .collect(),
        }
    }
}

/// Query application response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Whether the incoming params replaced the stored ones
    pub applied: bool,
    pub params: QueryParams,
}
