//! Destination address rules
//!
//! Validation dispatch per address format, blacklist checks, the recently
//! used address book, and the address input state machine that turns user
//! input and wallet events into a confirmed destination address.

pub mod address_book;
pub mod blacklist;
pub mod input;
pub mod validate;
pub mod wallet;

pub use address_book::{days_since, recent_addresses, recently_used, RecentAddress, UsageLabel};
pub use blacklist::{is_blacklisted, is_blacklisted_for};
pub use input::{
    AddressInputController, AddressInputError, ClearOutcome, FormOutput, InputContext, InputState,
};
pub use validate::{is_valid_address, shorten_address, to_checksum_address, validate};
pub use wallet::{WalletEvent, WalletEventHandler};
