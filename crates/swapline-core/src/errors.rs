//! Error types for Swapline

use std::path::PathBuf;

use thiserror::Error;

use crate::DestinationKind;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Destination catalog lookup errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Settings have not been loaded")]
    NotLoaded,

    #[error("Unknown {kind:?} destination: {id}")]
    UnknownDestination { kind: DestinationKind, id: String },

    #[error("Destination {id} is not active")]
    Inactive { id: String },
}

impl CatalogError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotLoaded => "settings_not_loaded",
            Self::UnknownDestination { .. } => "unknown_destination",
            Self::Inactive { .. } => "destination_inactive",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotLoaded => 503,
            Self::UnknownDestination { .. } => 404,
            Self::Inactive { .. } => 422,
        }
    }
}
