//! Plugin-Catalog: a paginated plugin-directory harvester
//!
//! This crate pages through the "popular" listing of a public plugin-directory
//! API, fetches a detail record for every listed plugin with bounded
//! concurrency, and persists the aggregate as a JSON snapshot.

pub mod api;
pub mod config;
pub mod export;
pub mod harvest;
pub mod snapshot;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Plugin-Catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error while {context}: {source}")]
    Http {
        context: String,
        source: reqwest::Error,
    },

    #[error("Unexpected HTTP status {status} while {context}")]
    UnexpectedStatus { context: String, status: u16 },

    #[error("Failed to decode response while {context}: {message}")]
    Decode { context: String, message: String },

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Worker task failed: {0}")]
    Task(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Snapshot persistence errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(serde_json::Error),
}

/// Result type alias for Plugin-Catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for snapshot operations
pub type SnapshotResult<T> = std::result::Result<T, SnapshotError>;

// Re-export commonly used types
pub use api::{ApiClient, DetailRecord, ListingEntry};
pub use config::Config;
pub use harvest::{HarvestMode, HarvestReport, PaginationStop};
pub use snapshot::{merge_top, Snapshot, SnapshotStore};
