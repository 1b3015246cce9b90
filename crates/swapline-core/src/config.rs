//! Configuration types for Swapline

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Environment variable pointing at a JSON config file
pub const CONFIG_PATH_ENV: &str = "SWAPLINE_CONFIG";

/// Environment variable overriding the API port
pub const API_PORT_ENV: &str = "SWAPLINE_API_PORT";

/// Placeholder shown when a network has no known setting
pub const DEFAULT_ADDRESS_PLACEHOLDER: &str = "0x123...ab56c";

/// Per-network presentation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSettings {
    #[serde(default)]
    pub address_placeholder: Option<String>,

    /// Shown on the swap confirmation step when set
    #[serde(default)]
    pub confirmation_warning_message: Option<String>,
}

/// Per-exchange settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeSettings {
    /// Deposit address can be fetched from the user's exchange account
    #[serde(default)]
    pub enable_deposit_address_connect: bool,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Icon base URL used until the catalog supplies one
    #[serde(default = "default_resource_storage_url")]
    pub resource_storage_url: String,

    /// Allow the same endpoint on both sides of a swap
    #[serde(default)]
    pub allow_same_endpoint: bool,

    /// Catalog snapshot loaded at startup (optional)
    #[serde(default)]
    pub settings_path: Option<PathBuf>,

    /// Keyed by network internal name
    #[serde(default)]
    pub network_settings: HashMap<String, NetworkSettings>,

    /// Keyed by exchange internal name
    #[serde(default)]
    pub exchange_settings: HashMap<String, ExchangeSettings>,
}

fn default_api_port() -> u16 {
    19080
}

fn default_resource_storage_url() -> String {
    "https://storage.swapline.dev".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            resource_storage_url: default_resource_storage_url(),
            allow_same_endpoint: false,
            settings_path: None,
            network_settings: HashMap::new(),
            exchange_settings: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build configuration from the environment.
    ///
    /// Reads the file named by `SWAPLINE_CONFIG` if set, then applies the
    /// `SWAPLINE_API_PORT` override.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                tracing::info!(path = %path, "Loading configuration file");
                Self::load(path)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(port) = std::env::var(API_PORT_ENV) {
            config.api_port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: API_PORT_ENV,
                value: port,
            })?;
        }

        Ok(config)
    }

    /// Address input placeholder for a network
    pub fn address_placeholder(&self, network: &str) -> &str {
        self.network_settings
            .get(network)
            .and_then(|s| s.address_placeholder.as_deref())
            .unwrap_or(DEFAULT_ADDRESS_PLACEHOLDER)
    }

    pub fn confirmation_warning(&self, network: &str) -> Option<&str> {
        self.network_settings
            .get(network)
            .and_then(|s| s.confirmation_warning_message.as_deref())
    }

    pub fn deposit_address_connect_enabled(&self, exchange: &str) -> bool {
        self.exchange_settings
            .get(exchange)
            .map(|s| s.enable_deposit_address_connect)
            .unwrap_or(false)
    }
}
