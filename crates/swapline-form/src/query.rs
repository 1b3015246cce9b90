//! Query-parameter hints for the swap form
//!
//! Hints arrive with the page URL and are persisted for the session, so that
//! navigating within the app keeps them. A new query only replaces the stored
//! one if it sets at least one known key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use swapline_core::Side;

/// Storage key for persisted query params
pub const QUERY_STORAGE_KEY: &str = "settings_query_params";

/// Known query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_network: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_exchange: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_exchange_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_address: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_address: Option<String>,
}

impl QueryParams {
    /// Whether any known key is set
    pub fn has_any(&self) -> bool {
        self.from.is_some()
            || self.to.is_some()
            || self.lock_network.is_some()
            || self.dest_network.is_some()
            || self.lock_exchange.is_some()
            || self.source_exchange_name.is_some()
            || self.lock_address.is_some()
            || self.dest_address.is_some()
    }

    /// Network pinned on the `to` side
    pub fn locked_network(&self) -> Option<&str> {
        match self.lock_network {
            Some(true) => self.dest_network.as_deref(),
            _ => None,
        }
    }

    /// Exchange pinned on the `from` side
    pub fn locked_exchange(&self) -> Option<&str> {
        match self.lock_exchange {
            Some(true) => self.source_exchange_name.as_deref(),
            _ => None,
        }
    }

    /// Destination address pinned by the query
    pub fn locked_address(&self) -> Option<&str> {
        match self.lock_address {
            Some(true) => self.dest_address.as_deref(),
            _ => None,
        }
    }

    /// Preselection hint for a side
    pub fn hint(&self, side: Side) -> Option<&str> {
        match side {
            Side::From => self.from.as_deref(),
            Side::To => self.to.as_deref(),
        }
    }
}

/// Session storage for query params
pub trait QueryStore {
    fn load(&self, key: &str) -> Option<QueryParams>;
    fn save(&mut self, key: &str, params: &QueryParams);
}

/// In-process session storage
#[derive(Debug, Clone, Default)]
pub struct MemoryQueryStore {
    entries: HashMap<String, QueryParams>,
}

impl QueryStore for MemoryQueryStore {
    fn load(&self, key: &str) -> Option<QueryParams> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, params: &QueryParams) {
        self.entries.insert(key.to_string(), params.clone());
    }
}

/// Query params bound to their persisted copy
#[derive(Debug, Clone)]
pub struct QueryState<S: QueryStore> {
    store: S,
    current: QueryParams,
}

impl<S: QueryStore> QueryState<S> {
    /// Load persisted params, falling back to `initial`
    pub fn new(store: S, initial: QueryParams) -> Self {
        let current = store.load(QUERY_STORAGE_KEY).unwrap_or(initial);
        Self { store, current }
    }

    pub fn current(&self) -> &QueryParams {
        &self.current
    }

    /// Apply a freshly parsed query. Returns whether it replaced the stored one.
    pub fn apply(&mut self, incoming: QueryParams) -> bool {
        if !incoming.has_any() {
            return false;
        }
        tracing::debug!(?incoming, "Replacing persisted query params");
        self.current = incoming;
        self.store.save(QUERY_STORAGE_KEY, &self.current);
        true
    }

    /// Write back the endpoint selected on `side`
    pub fn select(&mut self, side: Side, internal_name: &str) {
        let slot = match side {
            Side::From => &mut self.current.from,
            Side::To => &mut self.current.to,
        };
        *slot = Some(internal_name.to_string());
        self.store.save(QUERY_STORAGE_KEY, &self.current);
    }
}
