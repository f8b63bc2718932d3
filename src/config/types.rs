use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Hard ceiling the upstream API places on `per_page`
pub const MAX_REQUEST_LIMIT: u32 = 100;

/// Main configuration structure for Plugin-Catalog
///
/// Loaded once at startup and shared read-only for the duration of a run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Endpoint of the plugin-directory info API
    #[serde(rename = "wp_api_url")]
    pub api_url: String,

    /// Entries requested per listing page (clamped to `MAX_REQUEST_LIMIT`)
    #[serde(rename = "wp_api_request_limit")]
    pub request_limit: u32,

    /// Number of listing pages to walk in the full modes
    #[serde(rename = "wp_api_total_pages")]
    pub total_pages: u32,

    /// Maximum number of detail requests in flight at once
    #[serde(default = "default_detail_concurrency")]
    pub detail_concurrency: u32,

    /// Pause after each processed page (milliseconds)
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Whole-request timeout for API calls (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Where the snapshot is read from and written to
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl Config {
    /// Creates a configuration with default optional settings
    pub fn new(api_url: impl Into<String>, request_limit: u32, total_pages: u32) -> Self {
        Self {
            api_url: api_url.into(),
            request_limit: request_limit.min(MAX_REQUEST_LIMIT),
            total_pages,
            detail_concurrency: default_detail_concurrency(),
            page_delay_ms: default_page_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            snapshot_path: default_snapshot_path(),
        }
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_detail_concurrency() -> u32 {
    10
}

fn default_page_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("db/plugins.json")
}
