//! Swapline-api: HTTP API layer for Swapline
//!
//! Exposes the destination rules to the front-end: address validation,
//! recently used addresses, selector menus, address input sessions and
//! wallet events.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{AppState, Session, StateError, WalletDispatch, WalletState};
