//! Swap submission failure routing
//!
//! An OffRamp swap needs a live authorization with the exchange. When the API
//! rejects the credentials the flow returns to the authorization step;
//! anything else is reported to the user and the flow stays where it is.

use serde::{Deserialize, Serialize};

/// Known API error codes
pub struct KnownErrorCode;

impl KnownErrorCode {
    pub const INVALID_CREDENTIALS: &'static str = "INVALID_CREDENTIALS";
}

/// Steps of the swap creation flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapCreateStep {
    MainForm,
    OffRampOAuth,
    Confirm,
}

/// Error payload returned by the swap API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

/// Why a swap submission failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubmitFailure {
    /// The API answered with an error body
    Api(ApiErrorBody),
    /// No usable error body (network failure, malformed response)
    Transport { message: String },
}

/// What the flow does next
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SubmitOutcome {
    GoToStep { step: SwapCreateStep },
    Notify { message: String },
}

pub fn route_submit_failure(failure: &SubmitFailure) -> SubmitOutcome {
    match failure {
        SubmitFailure::Api(body) if body.code == KnownErrorCode::INVALID_CREDENTIALS => {
            tracing::debug!("Exchange credentials rejected, returning to authorization");
            SubmitOutcome::GoToStep {
                step: SwapCreateStep::OffRampOAuth,
            }
        }
        SubmitFailure::Api(body) => SubmitOutcome::Notify {
            message: body.message.clone(),
        },
        SubmitFailure::Transport { message } => SubmitOutcome::Notify {
            message: message.clone(),
        },
    }
}
