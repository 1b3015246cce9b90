//! Swapline application: configuration, logging and the API server

use std::path::Path;

use anyhow::Context;
use swapline_api::{start_server, AppState};
use swapline_core::{AppConfig, Settings};

/// Read a catalog snapshot from a JSON file
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse settings from {}", path.display()))
}

/// Build the shared state from configuration, preloading the catalog if one
/// is configured
pub async fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
    let settings = match &config.settings_path {
        Some(path) => Some(load_settings(path)?),
        None => None,
    };

    let state = AppState::with_config(config);
    if let Some(settings) = settings {
        state.set_settings(settings).await;
    }
    Ok(state)
}

/// Run the application until the server stops
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("swapline=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    tracing::info!("Starting Swapline");

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let state = build_state(config).await?;

    start_server(state).await.context("API server failed")
}
