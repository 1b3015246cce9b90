//! Destination address input state machine
//!
//! Owns one destination address field. Raw keystrokes, recent-address
//! selection, exchange-account autofill and wallet events all funnel through
//! here, and only validated addresses reach `destination_address`.

use serde::{Deserialize, Serialize};
use swapline_core::{AddressFormat, BlacklistedAddress, Destination, SwapType, ValidationResult};
use thiserror::Error;

use crate::validate::validate;
use crate::wallet::WalletEventHandler;

/// Input field state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputState {
    #[default]
    Empty,
    TypingUnconfirmed,
    ValidCandidate,
    Confirmed,
    ConnectedWallet,
}

/// Values written back to the swap form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOutput {
    pub destination_address: String,
    #[serde(rename = "addressConfirmed")]
    pub address_confirmed: bool,
    /// Address was fetched from the user's exchange account
    #[serde(rename = "depositeAddressIsfromAccount")]
    pub deposite_address_is_from_account: bool,
}

/// Address input errors. The display strings are the inline guidance texts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressInputError {
    #[error("Enter a valid {network} address")]
    InvalidAddress { network: String },

    #[error("You can not transfer to this address")]
    Blacklisted,

    #[error("Address input is locked while a wallet is connected")]
    InputLocked,

    #[error("No address to confirm")]
    NothingToConfirm,
}

impl AddressInputError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAddress { .. } => "invalid_address",
            Self::Blacklisted => "blacklisted_address",
            Self::InputLocked => "input_locked",
            Self::NothingToConfirm => "nothing_to_confirm",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAddress { .. } | Self::NothingToConfirm => 400,
            Self::Blacklisted => 422,
            Self::InputLocked => 409,
        }
    }
}

/// What the controller validates against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputContext {
    pub destination: Destination,
    #[serde(default)]
    pub swap_type: SwapType,
    #[serde(default)]
    pub blacklist: Vec<BlacklistedAddress>,
}

impl InputContext {
    pub fn new(destination: Destination, swap_type: SwapType) -> Self {
        Self {
            destination,
            swap_type,
            blacklist: Vec::new(),
        }
    }

    pub fn with_blacklist(mut self, blacklist: Vec<BlacklistedAddress>) -> Self {
        self.blacklist = blacklist;
        self
    }

    fn check(&self, address: &str) -> ValidationResult {
        validate(address, &self.destination, &self.blacklist, self.swap_type)
    }

    fn verdict(&self, address: &str) -> Result<(), AddressInputError> {
        let result = self.check(address);
        if !result.is_syntactically_valid {
            return Err(AddressInputError::InvalidAddress {
                network: self.destination.display_name().to_string(),
            });
        }
        if result.is_blacklisted {
            return Err(AddressInputError::Blacklisted);
        }
        Ok(())
    }
}

/// Result of clearing the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearOutcome {
    /// The cleared address came from a connected wallet, which must be
    /// disconnected as well
    pub disconnect_wallet: bool,
}

/// State machine over one destination address field
#[derive(Debug, Clone)]
pub struct AddressInputController {
    context: InputContext,
    state: InputState,
    input: String,
    valid_candidate: Option<String>,
    output: FormOutput,
}

impl AddressInputController {
    pub fn new(context: InputContext) -> Self {
        Self {
            context,
            state: InputState::Empty,
            input: String::new(),
            valid_candidate: None,
            output: FormOutput::default(),
        }
    }

    /// Resume from existing form values.
    ///
    /// A confirmed address that no longer validates is dropped.
    pub fn restore(context: InputContext, output: FormOutput) -> Self {
        let mut controller = Self::new(context);
        if output.destination_address.is_empty() {
            return controller;
        }

        controller.input = output.destination_address.clone();
        if output.address_confirmed
            && controller.context.verdict(&output.destination_address).is_ok()
        {
            controller.state = InputState::Confirmed;
            controller.output = output;
        } else {
            controller.output.destination_address = output.destination_address;
            controller.evaluate_input();
        }
        controller
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &FormOutput {
        &self.output
    }

    pub fn context(&self) -> &InputContext {
        &self.context
    }

    /// Last typed value that passed validation
    pub fn valid_candidate(&self) -> Option<&str> {
        self.valid_candidate.as_deref()
    }

    /// Verdict for the current input
    pub fn validation(&self) -> ValidationResult {
        self.context.check(&self.input)
    }

    /// Inline guidance for the current input, if any
    pub fn guidance(&self) -> Option<String> {
        if self.input.is_empty() {
            return None;
        }
        self.context.verdict(&self.input).err().map(|e| e.to_string())
    }

    /// Raw keystroke. Always drops the confirmed flag.
    pub fn keystroke(&mut self, text: impl Into<String>) -> Result<InputState, AddressInputError> {
        if self.state == InputState::ConnectedWallet {
            return Err(AddressInputError::InputLocked);
        }

        self.input = text.into();
        self.output.address_confirmed = false;
        self.evaluate_input();
        Ok(self.state)
    }

    /// Pick an entry from the recently used list
    pub fn select_recent(&mut self, address: &str) -> Result<InputState, AddressInputError> {
        if self.state == InputState::ConnectedWallet {
            return Err(AddressInputError::InputLocked);
        }
        self.context.verdict(address)?;
        self.confirm(address.to_string(), InputState::Confirmed, false);
        Ok(self.state)
    }

    /// Accept the typed candidate
    pub fn accept_typed(&mut self) -> Result<InputState, AddressInputError> {
        if self.state == InputState::ConnectedWallet {
            return Err(AddressInputError::InputLocked);
        }

        let Some(candidate) = self.valid_candidate.clone() else {
            let err = if self.input.is_empty() {
                None
            } else {
                self.context.verdict(&self.input).err()
            };
            return Err(err.unwrap_or(AddressInputError::NothingToConfirm));
        };

        self.context.verdict(&candidate)?;
        self.confirm(candidate, InputState::Confirmed, false);
        Ok(self.state)
    }

    /// Address fetched from the user's exchange account
    pub fn set_from_account(&mut self, address: &str) -> Result<InputState, AddressInputError> {
        if self.state == InputState::ConnectedWallet {
            return Err(AddressInputError::InputLocked);
        }
        self.context.verdict(address)?;
        self.confirm(address.to_string(), InputState::Confirmed, true);
        Ok(self.state)
    }

    /// Remove the address. Input, form address and both flags reset together.
    pub fn clear(&mut self) -> ClearOutcome {
        let disconnect_wallet = self.state == InputState::ConnectedWallet;
        self.reset();
        tracing::debug!(disconnect_wallet, "Destination address cleared");
        ClearOutcome { disconnect_wallet }
    }

    /// Switch to another destination. A confirmed address that does not
    /// validate against the new destination is cleared.
    pub fn retarget(&mut self, context: InputContext) -> ClearOutcome {
        self.context = context;
        let confirmed = matches!(
            self.state,
            InputState::Confirmed | InputState::ConnectedWallet
        );

        if confirmed && self.context.verdict(&self.output.destination_address).is_err() {
            return self.clear();
        }
        if !confirmed {
            self.evaluate_input();
        }
        ClearOutcome {
            disconnect_wallet: false,
        }
    }

    /// "Autofill from wallet" is offered for empty EVM inputs outside OffRamp
    pub fn wallet_autofill_available(&self) -> bool {
        self.input.is_empty()
            && self.context.swap_type != SwapType::OffRamp
            && self.context.destination.address_format() == Some(AddressFormat::Evm)
    }

    /// "Autofill from exchange account" is offered for empty OffRamp inputs
    pub fn account_autofill_available(&self, authenticated: bool, connect_enabled: bool) -> bool {
        self.input.is_empty()
            && self.context.swap_type == SwapType::OffRamp
            && authenticated
            && connect_enabled
            && !self.output.deposite_address_is_from_account
    }

    fn evaluate_input(&mut self) {
        if self.context.verdict(&self.input).is_ok() {
            self.valid_candidate = Some(self.input.clone());
            self.state = InputState::ValidCandidate;
        } else {
            self.valid_candidate = None;
            self.state = InputState::TypingUnconfirmed;
        }
    }

    fn confirm(&mut self, address: String, state: InputState, from_account: bool) {
        tracing::debug!(
            destination = %self.context.destination.id(),
            ?state,
            from_account,
            "Destination address confirmed"
        );
        self.input = address.clone();
        self.valid_candidate = None;
        self.output = FormOutput {
            destination_address: address,
            address_confirmed: true,
            deposite_address_is_from_account: from_account,
        };
        self.state = state;
    }

    fn reset(&mut self) {
        self.input.clear();
        self.valid_candidate = None;
        self.output = FormOutput::default();
        self.state = InputState::Empty;
    }
}

impl WalletEventHandler for AddressInputController {
    fn on_connect(&mut self, address: &str) -> Result<(), AddressInputError> {
        self.context.verdict(address)?;
        self.confirm(address.to_string(), InputState::ConnectedWallet, false);
        Ok(())
    }

    /// Only a wallet-supplied address is dropped
    fn on_disconnect(&mut self) {
        if self.state != InputState::ConnectedWallet {
            return;
        }
        self.reset();
        tracing::debug!("Wallet disconnected, destination address cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::WalletEvent;
    use swapline_core::{Exchange, Network, Status};

    const ADDR: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const OTHER: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

    fn ethereum() -> Destination {
        Destination::Network(Network {
            internal_name: "ethereum".to_string(),
            display_name: "Ethereum".to_string(),
            status: Status::Active,
            address_type: "evm".to_string(),
        })
    }

    fn solana() -> Destination {
        Destination::Network(Network {
            internal_name: "solana".to_string(),
            display_name: "Solana".to_string(),
            status: Status::Active,
            address_type: "solana".to_string(),
        })
    }

    fn coinbase() -> Destination {
        Destination::Exchange(Exchange {
            internal_name: "coinbase".to_string(),
            display_name: "Coinbase".to_string(),
            status: Status::Active,
            address_type: "evm".to_string(),
            currencies: vec![],
        })
    }

    fn controller() -> AddressInputController {
        AddressInputController::new(InputContext::new(ethereum(), SwapType::CrossChain))
    }

    #[test]
    fn test_typing_flow() {
        let mut c = controller();
        assert_eq!(c.state(), InputState::Empty);

        assert_eq!(c.keystroke("0x5aA").unwrap(), InputState::TypingUnconfirmed);
        assert_eq!(c.guidance().as_deref(), Some("Enter a valid Ethereum address"));
        assert!(c.valid_candidate().is_none());

        assert_eq!(c.keystroke(ADDR).unwrap(), InputState::ValidCandidate);
        assert_eq!(c.valid_candidate(), Some(ADDR));
        assert!(c.guidance().is_none());
        assert!(!c.output().address_confirmed);

        assert_eq!(c.accept_typed().unwrap(), InputState::Confirmed);
        assert_eq!(c.output().destination_address, ADDR);
        assert!(c.output().address_confirmed);
    }

    #[test]
    fn test_keystroke_resets_confirmed_flag() {
        let mut c = controller();
        c.select_recent(ADDR).unwrap();
        assert!(c.output().address_confirmed);

        c.keystroke(format!("{}0", ADDR)).unwrap();
        assert_eq!(c.state(), InputState::TypingUnconfirmed);
        assert!(!c.output().address_confirmed);
    }

    #[test]
    fn test_invalid_never_confirmed() {
        let mut c = controller();
        c.keystroke("0x1234").unwrap();
        let err = c.accept_typed().unwrap_err();
        assert_eq!(
            err,
            AddressInputError::InvalidAddress {
                network: "Ethereum".to_string()
            }
        );
        assert_ne!(c.state(), InputState::Confirmed);
        assert!(c.output().destination_address.is_empty());

        assert!(c.select_recent("not-an-address").is_err());
        assert!(!c.output().address_confirmed);
    }

    #[test]
    fn test_accept_without_input() {
        let mut c = controller();
        assert_eq!(c.accept_typed().unwrap_err(), AddressInputError::NothingToConfirm);
    }

    #[test]
    fn test_blacklisted_blocked_but_recoverable() {
        let context = InputContext::new(ethereum(), SwapType::CrossChain).with_blacklist(vec![
            BlacklistedAddress {
                network: None,
                address: ADDR.to_lowercase(),
            },
        ]);
        let mut c = AddressInputController::new(context);

        c.keystroke(ADDR).unwrap();
        assert_eq!(c.state(), InputState::TypingUnconfirmed);
        assert_eq!(
            c.guidance().as_deref(),
            Some("You can not transfer to this address")
        );
        assert_eq!(c.accept_typed().unwrap_err(), AddressInputError::Blacklisted);
        assert_eq!(c.select_recent(ADDR).unwrap_err(), AddressInputError::Blacklisted);

        c.keystroke(OTHER).unwrap();
        assert_eq!(c.accept_typed().unwrap(), InputState::Confirmed);
        assert_eq!(c.output().destination_address, OTHER);
    }

    #[test]
    fn test_off_ramp_skips_blacklist() {
        let context = InputContext::new(coinbase(), SwapType::OffRamp).with_blacklist(vec![
            BlacklistedAddress {
                network: None,
                address: ADDR.to_string(),
            },
        ]);
        let mut c = AddressInputController::new(context);
        c.keystroke(ADDR).unwrap();
        assert!(c.guidance().is_none());
        assert_eq!(c.accept_typed().unwrap(), InputState::Confirmed);
    }

    #[test]
    fn test_clear_is_atomic() {
        let mut c = controller();
        c.set_from_account(ADDR).unwrap();
        assert!(c.output().deposite_address_is_from_account);

        let outcome = c.clear();
        assert!(!outcome.disconnect_wallet);
        assert_eq!(c.output(), &FormOutput::default());
        assert_eq!(c.input(), "");
        assert_eq!(c.state(), InputState::Empty);
    }

    #[test]
    fn test_wallet_connect_and_disconnect() {
        let mut c = controller();
        c.handle_wallet_event(&WalletEvent::Connected {
            address: ADDR.to_string(),
        })
        .unwrap();
        assert_eq!(c.state(), InputState::ConnectedWallet);
        assert_eq!(c.output().destination_address, ADDR);
        assert!(c.output().address_confirmed);

        assert_eq!(c.keystroke("x").unwrap_err(), AddressInputError::InputLocked);

        c.handle_wallet_event(&WalletEvent::Disconnected).unwrap();
        assert_eq!(c.state(), InputState::Empty);
        assert_eq!(c.output().destination_address, "");
        assert!(!c.output().address_confirmed);
    }

    #[test]
    fn test_disconnect_keeps_user_address() {
        let mut c = controller();
        c.select_recent(ADDR).unwrap();
        c.on_disconnect();
        assert_eq!(c.state(), InputState::Confirmed);
        assert_eq!(c.output().destination_address, ADDR);

        let mut c = controller();
        c.keystroke("0x5aA").unwrap();
        c.on_disconnect();
        assert_eq!(c.state(), InputState::TypingUnconfirmed);
        assert_eq!(c.input(), "0x5aA");
    }

    #[test]
    fn test_account_autofill_locked_by_wallet() {
        let mut c = controller();
        c.on_connect(ADDR).unwrap();
        assert_eq!(
            c.set_from_account(OTHER).unwrap_err(),
            AddressInputError::InputLocked
        );
        assert_eq!(c.state(), InputState::ConnectedWallet);
        assert_eq!(c.output().destination_address, ADDR);
        assert!(!c.output().deposite_address_is_from_account);
    }

    #[test]
    fn test_clear_connected_wallet_requests_disconnect() {
        let mut c = controller();
        c.on_connect(ADDR).unwrap();
        let outcome = c.clear();
        assert!(outcome.disconnect_wallet);
        assert_eq!(c.output(), &FormOutput::default());
    }

    #[test]
    fn test_wallet_connect_invalid_address_rejected() {
        let mut c = AddressInputController::new(InputContext::new(solana(), SwapType::CrossChain));
        assert!(c.on_connect(ADDR).is_err());
        assert_eq!(c.state(), InputState::Empty);
        assert!(!c.output().address_confirmed);
    }

    #[test]
    fn test_retarget_drops_incompatible_address() {
        let mut c = controller();
        c.select_recent(ADDR).unwrap();

        c.retarget(InputContext::new(solana(), SwapType::CrossChain));
        assert_eq!(c.state(), InputState::Empty);
        assert_eq!(c.output(), &FormOutput::default());
    }

    #[test]
    fn test_restore() {
        let output = FormOutput {
            destination_address: ADDR.to_string(),
            address_confirmed: true,
            deposite_address_is_from_account: false,
        };
        let c = AddressInputController::restore(
            InputContext::new(ethereum(), SwapType::CrossChain),
            output.clone(),
        );
        assert_eq!(c.state(), InputState::Confirmed);
        assert_eq!(c.output(), &output);

        let c = AddressInputController::restore(
            InputContext::new(solana(), SwapType::CrossChain),
            output,
        );
        assert_eq!(c.state(), InputState::TypingUnconfirmed);
        assert!(!c.output().address_confirmed);
    }

    #[test]
    fn test_autofill_affordances() {
        let c = controller();
        assert!(c.wallet_autofill_available());

        let c = AddressInputController::new(InputContext::new(solana(), SwapType::CrossChain));
        assert!(!c.wallet_autofill_available());

        let mut c = AddressInputController::new(InputContext::new(coinbase(), SwapType::OffRamp));
        assert!(!c.wallet_autofill_available());
        assert!(c.account_autofill_available(true, true));
        assert!(!c.account_autofill_available(false, true));
        assert!(!c.account_autofill_available(true, false));

        c.set_from_account(ADDR).unwrap();
        c.clear();
        assert!(c.account_autofill_available(true, true));
    }

    #[test]
    fn test_form_output_json_names() {
        let json = serde_json::to_value(FormOutput::default()).unwrap();
        assert!(json.get("destination_address").is_some());
        assert!(json.get("addressConfirmed").is_some());
        assert!(json.get("depositeAddressIsfromAccount").is_some());
    }
}
