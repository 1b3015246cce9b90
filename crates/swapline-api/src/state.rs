//! Application state shared across API handlers

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use swapline_address::{
    AddressInputController, AddressInputError, ClearOutcome, FormOutput, InputContext,
    WalletEvent, WalletEventHandler,
};
use swapline_core::{AppConfig, CatalogError, Destination, DestinationKind, Settings, Side, SwapType};
use swapline_form::{MemoryQueryStore, QueryParams, QueryState};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Errors raised by state operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Input(#[from] AddressInputError),

    #[error("Unknown session: {0}")]
    SessionNotFound(Uuid),
}

impl StateError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog(e) => e.error_code(),
            Self::Input(e) => e.error_code(),
            Self::SessionNotFound(_) => "session_not_found",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Catalog(e) => e.status_code(),
            Self::Input(e) => e.status_code(),
            Self::SessionNotFound(_) => 404,
        }
    }
}

/// Connected wallet
#[derive(Clone, Debug)]
pub struct WalletState {
    pub address: String,
    pub connected_at: DateTime<Utc>,
}

/// One address input field owned by a front-end form
#[derive(Debug, Clone)]
pub struct Session {
    pub controller: AddressInputController,
    /// Receives wallet connect / disconnect events
    pub wallet_listener: bool,
}

/// Result of dispatching a wallet event to listening sessions
#[derive(Debug, Default)]
pub struct WalletDispatch {
    pub accepted: Vec<Uuid>,
    pub rejected: Vec<(Uuid, AddressInputError)>,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
    settings: RwLock<Option<Settings>>,
    sessions: RwLock<HashMap<Uuid, Session>>,
    wallet: RwLock<Option<WalletState>>,
    query: RwLock<QueryState<MemoryQueryStore>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
                settings: RwLock::new(None),
                sessions: RwLock::new(HashMap::new()),
                wallet: RwLock::new(None),
                query: RwLock::new(QueryState::new(
                    MemoryQueryStore::default(),
                    QueryParams::default(),
                )),
            }),
        }
    }

    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    /// Current catalog snapshot
    pub async fn settings(&self) -> Result<Settings, CatalogError> {
        self.inner
            .settings
            .read()
            .await
            .clone()
            .ok_or(CatalogError::NotLoaded)
    }

    /// Replace the catalog snapshot
    pub async fn set_settings(&self, settings: Settings) {
        tracing::info!(
            networks = settings.networks.len(),
            exchanges = settings.exchanges.len(),
            blacklisted = settings.blacklisted_addresses.len(),
            "Settings loaded"
        );
        *self.inner.settings.write().await = Some(settings);
    }

    /// Look up an active destination in the catalog
    pub async fn destination(
        &self,
        kind: DestinationKind,
        id: &str,
    ) -> Result<Destination, CatalogError> {
        let settings = self.inner.settings.read().await;
        let settings = settings.as_ref().ok_or(CatalogError::NotLoaded)?;
        let destination =
            settings
                .destination(kind, id)
                .ok_or_else(|| CatalogError::UnknownDestination {
                    kind,
                    id: id.to_string(),
                })?;
        if !destination.is_active() {
            return Err(CatalogError::Inactive { id: id.to_string() });
        }
        Ok(destination)
    }

    /// Validation context for a destination, with the catalog's blacklist
    pub async fn input_context(
        &self,
        kind: DestinationKind,
        id: &str,
        swap_type: SwapType,
    ) -> Result<InputContext, CatalogError> {
        let destination = self.destination(kind, id).await?;
        let blacklist = self.settings().await?.blacklisted_addresses;
        Ok(InputContext::new(destination, swap_type).with_blacklist(blacklist))
    }

    /// Open an address input session.
    ///
    /// A listening session created while a wallet is connected picks the
    /// wallet address up immediately if it validates.
    pub async fn create_session(
        &self,
        context: InputContext,
        restore: Option<FormOutput>,
        wallet_listener: bool,
    ) -> (Uuid, Session) {
        let mut controller = match restore {
            Some(output) => AddressInputController::restore(context, output),
            None => AddressInputController::new(context),
        };

        // sessions stay locked while the wallet is read
        let mut sessions = self.inner.sessions.write().await;
        if wallet_listener {
            if let Some(wallet) = self.wallet().await {
                if let Err(e) = controller.on_connect(&wallet.address) {
                    tracing::debug!(error = %e, "Connected wallet not usable for new session");
                }
            }
        }

        let id = Uuid::new_v4();
        let session = Session {
            controller,
            wallet_listener,
        };
        sessions.insert(id, session.clone());
        drop(sessions);
        tracing::debug!(%id, wallet_listener, "Session created");
        (id, session)
    }

    pub async fn session(&self, id: Uuid) -> Result<Session, StateError> {
        self.inner
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StateError::SessionNotFound(id))
    }

    /// Run `f` against a session's controller and return the updated session
    pub async fn update_session<F, T>(&self, id: Uuid, f: F) -> Result<(T, Session), StateError>
    where
        F: FnOnce(&mut AddressInputController) -> Result<T, AddressInputError>,
    {
        let mut sessions = self.inner.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(StateError::SessionNotFound(id))?;
        let value = f(&mut session.controller)?;
        Ok((value, session.clone()))
    }

    /// Clear a session's address. Clearing a wallet-supplied address also
    /// disconnects the wallet.
    pub async fn clear_session(&self, id: Uuid) -> Result<(ClearOutcome, Session), StateError> {
        let (outcome, session) = self
            .update_session(id, |controller| Ok(controller.clear()))
            .await?;
        if outcome.disconnect_wallet {
            self.disconnect_wallet().await;
        }
        Ok((outcome, session))
    }

    /// Point a session at another destination. Dropping a wallet-supplied
    /// address disconnects the wallet.
    pub async fn retarget_session(
        &self,
        id: Uuid,
        context: InputContext,
    ) -> Result<(ClearOutcome, Session), StateError> {
        let (outcome, session) = self
            .update_session(id, |controller| Ok(controller.retarget(context)))
            .await?;
        if outcome.disconnect_wallet {
            self.disconnect_wallet().await;
        }
        Ok((outcome, session))
    }

    pub async fn remove_session(&self, id: Uuid) -> Result<(), StateError> {
        self.inner
            .sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StateError::SessionNotFound(id))
    }

    pub async fn wallet(&self) -> Option<WalletState> {
        self.inner.wallet.read().await.clone()
    }

    /// Record a connected wallet and notify listening sessions
    pub async fn connect_wallet(&self, address: String) -> WalletDispatch {
        *self.inner.wallet.write().await = Some(WalletState {
            address: address.clone(),
            connected_at: Utc::now(),
        });
        tracing::info!(%address, "Wallet connected");
        self.dispatch(&WalletEvent::Connected { address }).await
    }

    /// Forget the connected wallet and notify listening sessions
    pub async fn disconnect_wallet(&self) -> WalletDispatch {
        let previous = self.inner.wallet.write().await.take();
        if previous.is_none() {
            return WalletDispatch::default();
        }
        tracing::info!("Wallet disconnected");
        self.dispatch(&WalletEvent::Disconnected).await
    }

    async fn dispatch(&self, event: &WalletEvent) -> WalletDispatch {
        let mut sessions = self.inner.sessions.write().await;
        let mut result = WalletDispatch::default();
        for (id, session) in sessions.iter_mut().filter(|(_, s)| s.wallet_listener) {
            match session.controller.handle_wallet_event(event) {
                Ok(()) => result.accepted.push(*id),
                Err(e) => {
                    tracing::debug!(%id, error = %e, "Session rejected wallet address");
                    result.rejected.push((*id, e));
                }
            }
        }
        result
    }

    pub async fn query(&self) -> QueryParams {
        self.inner.query.read().await.current().clone()
    }

    /// Apply freshly parsed query params. Returns whether they replaced the
    /// stored ones.
    pub async fn apply_query(&self, incoming: QueryParams) -> bool {
        self.inner.query.write().await.apply(incoming)
    }

    /// Write back the endpoint selected on `side`
    pub async fn select_endpoint(&self, side: Side, id: &str) {
        self.inner.query.write().await.select(side, id);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapline_address::InputState;
    use swapline_core::{Network, Status};

    const ADDR_A: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const ADDR_B: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
    const SOL_ADDR: &str = "So11111111111111111111111111111111111111112";

    fn network(id: &str, address_type: &str, status: Status) -> Network {
        Network {
            internal_name: id.to_string(),
            display_name: id.to_string(),
            status,
            address_type: address_type.to_string(),
        }
    }

    async fn loaded_state() -> AppState {
        let state = AppState::new();
        state
            .set_settings(Settings {
                networks: vec![
                    network("ethereum", "evm", Status::Active),
                    network("solana", "solana", Status::Active),
                    network("zksync", "evm", Status::Inactive),
                ],
                ..Default::default()
            })
            .await;
        state
    }

    async fn context(state: &AppState, id: &str) -> InputContext {
        state
            .input_context(DestinationKind::Network, id, SwapType::CrossChain)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_destination_lookup_errors() {
        let state = AppState::new();
        assert!(matches!(
            state.destination(DestinationKind::Network, "ethereum").await,
            Err(CatalogError::NotLoaded)
        ));

        let state = loaded_state().await;
        assert!(matches!(
            state.destination(DestinationKind::Network, "base").await,
            Err(CatalogError::UnknownDestination { .. })
        ));
        assert!(matches!(
            state.destination(DestinationKind::Network, "zksync").await,
            Err(CatalogError::Inactive { .. })
        ));
        assert!(state
            .destination(DestinationKind::Network, "ethereum")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_wallet_events_reach_listeners_only() {
        let state = loaded_state().await;
        let ctx = context(&state, "ethereum").await;
        let (listener, _) = state.create_session(ctx.clone(), None, true).await;
        let (other, _) = state.create_session(ctx, None, false).await;

        let dispatch = state.connect_wallet(ADDR_A.to_string()).await;
        assert_eq!(dispatch.accepted, vec![listener]);

        let session = state.session(listener).await.unwrap();
        assert_eq!(session.controller.state(), InputState::ConnectedWallet);
        assert_eq!(session.controller.output().destination_address, ADDR_A);
        let session = state.session(other).await.unwrap();
        assert_eq!(session.controller.state(), InputState::Empty);
    }

    #[tokio::test]
    async fn test_wallet_address_rejected_by_other_format() {
        let state = loaded_state().await;
        let ctx = context(&state, "solana").await;
        let (id, _) = state.create_session(ctx, None, true).await;

        let dispatch = state.connect_wallet(ADDR_A.to_string()).await;
        assert!(dispatch.accepted.is_empty());
        assert_eq!(dispatch.rejected.len(), 1);
        assert_eq!(dispatch.rejected[0].0, id);
        assert_eq!(
            state.session(id).await.unwrap().controller.state(),
            InputState::Empty
        );
    }

    #[tokio::test]
    async fn test_new_listener_picks_up_connected_wallet() {
        let state = loaded_state().await;
        state.connect_wallet(ADDR_B.to_string()).await;

        let ctx = context(&state, "ethereum").await;
        let (_, session) = state.create_session(ctx, None, true).await;
        assert_eq!(session.controller.state(), InputState::ConnectedWallet);
        assert_eq!(session.controller.output().destination_address, ADDR_B);
    }

    #[tokio::test]
    async fn test_clearing_wallet_address_disconnects() {
        let state = loaded_state().await;
        let ctx = context(&state, "ethereum").await;
        let (first, _) = state.create_session(ctx.clone(), None, true).await;
        let (second, _) = state.create_session(ctx, None, true).await;
        state.connect_wallet(ADDR_A.to_string()).await;

        let (outcome, session) = state.clear_session(first).await.unwrap();
        assert!(outcome.disconnect_wallet);
        assert_eq!(session.controller.state(), InputState::Empty);
        assert!(state.wallet().await.is_none());
        assert_eq!(
            state.session(second).await.unwrap().controller.state(),
            InputState::Empty
        );
    }

    #[tokio::test]
    async fn test_new_listener_after_disconnect_stays_empty() {
        let state = loaded_state().await;
        state.connect_wallet(ADDR_A.to_string()).await;
        state.disconnect_wallet().await;

        let ctx = context(&state, "ethereum").await;
        let (id, session) = state.create_session(ctx, None, true).await;
        assert_eq!(session.controller.state(), InputState::Empty);
        assert_eq!(
            state.session(id).await.unwrap().controller.state(),
            InputState::Empty
        );
    }

    #[tokio::test]
    async fn test_disconnect_without_wallet_is_noop() {
        let state = loaded_state().await;
        let ctx = context(&state, "ethereum").await;
        let (id, _) = state.create_session(ctx, None, true).await;
        state
            .update_session(id, |c| c.select_recent(ADDR_A))
            .await
            .unwrap();

        let dispatch = state.disconnect_wallet().await;
        assert!(dispatch.accepted.is_empty());

        let session = state.session(id).await.unwrap();
        assert_eq!(session.controller.state(), InputState::Confirmed);
        assert_eq!(session.controller.output().destination_address, ADDR_A);
    }

    #[tokio::test]
    async fn test_disconnect_keeps_addresses_not_from_wallet() {
        let state = loaded_state().await;
        let ctx = context(&state, "solana").await;
        let (id, _) = state.create_session(ctx, None, true).await;
        state.connect_wallet(ADDR_A.to_string()).await;
        state
            .update_session(id, |c| c.select_recent(SOL_ADDR))
            .await
            .unwrap();

        state.disconnect_wallet().await;

        let session = state.session(id).await.unwrap();
        assert_eq!(session.controller.state(), InputState::Confirmed);
        assert_eq!(session.controller.output().destination_address, SOL_ADDR);
    }

    #[tokio::test]
    async fn test_retarget_wallet_session_disconnects() {
        let state = loaded_state().await;
        let ctx = context(&state, "ethereum").await;
        let (first, _) = state.create_session(ctx.clone(), None, true).await;
        let (second, _) = state.create_session(ctx, None, true).await;
        state.connect_wallet(ADDR_A.to_string()).await;

        let solana = context(&state, "solana").await;
        let (outcome, session) = state.retarget_session(first, solana).await.unwrap();
        assert!(outcome.disconnect_wallet);
        assert_eq!(session.controller.state(), InputState::Empty);
        assert!(state.wallet().await.is_none());
        assert_eq!(
            state.session(second).await.unwrap().controller.state(),
            InputState::Empty
        );
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let state = AppState::new();
        let id = Uuid::new_v4();
        let err = state.session(id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert!(state.remove_session(id).await.is_err());
    }

    #[tokio::test]
    async fn test_query_state() {
        let state = AppState::new();
        assert!(!state.apply_query(QueryParams::default()).await);
        assert!(
            state
                .apply_query(QueryParams {
                    from: Some("ethereum".to_string()),
                    ..Default::default()
                })
                .await
        );
        state.select_endpoint(Side::To, "solana").await;

        let query = state.query().await;
        assert_eq!(query.from.as_deref(), Some("ethereum"));
        assert_eq!(query.to.as_deref(), Some("solana"));
    }
}
