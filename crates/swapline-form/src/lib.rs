//! Swap form rules
//!
//! Network and exchange selector menus, query-parameter hints persisted per
//! session, the OffRamp deposit network lookup, and routing of swap
//! submission failures.

pub mod confirm;
pub mod deposit;
pub mod menu;
pub mod query;

pub use confirm::{
    route_submit_failure, ApiErrorBody, KnownErrorCode, SubmitFailure, SubmitOutcome,
    SwapCreateStep,
};
pub use deposit::{currency_icon_path, off_ramp_deposit_network};
pub use menu::{
    exchange_menu_items, icon_path, network_menu_items, preselect, selector_menu, MenuContext,
    SelectMenuItem, SelectorMenu,
};
pub use query::{MemoryQueryStore, QueryParams, QueryState, QueryStore, QUERY_STORAGE_KEY};
