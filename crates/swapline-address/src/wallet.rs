//! Wallet connection boundary
//!
//! The wallet-connect subsystem is external; it reports two events. Anything
//! that owns a destination address field registers as a handler.

use serde::{Deserialize, Serialize};

use crate::input::AddressInputError;

/// Event raised by the wallet-connect subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WalletEvent {
    Connected { address: String },
    Disconnected,
}

/// Receiver of wallet connect / disconnect events
pub trait WalletEventHandler {
    /// A wallet connected and exposed `address`
    fn on_connect(&mut self, address: &str) -> Result<(), AddressInputError>;

    /// The wallet disconnected
    fn on_disconnect(&mut self);

    fn handle_wallet_event(&mut self, event: &WalletEvent) -> Result<(), AddressInputError> {
        match event {
            WalletEvent::Connected { address } => self.on_connect(address),
            WalletEvent::Disconnected => {
                self.on_disconnect();
                Ok(())
            }
        }
    }
}
