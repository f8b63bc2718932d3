//! HTTP client for the plugin-directory API
//!
//! Wraps a `reqwest::Client` together with the endpoint and page size taken
//! from the configuration, and centralizes request/response error
//! classification for the lister and detail fetcher.

use crate::config::Config;
use crate::{CatalogError, ConfigError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with the crate's user agent and timeouts
///
/// # Arguments
///
/// * `timeout` - Whole-request timeout applied to every call
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Handle on the upstream API shared by the lister and the detail workers
///
/// Cloning is cheap: the underlying connection pool is reference counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    endpoint: Url,
    per_page: u32,
}

impl ApiClient {
    /// Creates a client for the endpoint and page size in `config`
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        let endpoint = Url::parse(&config.api_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid wp_api_url '{}': {}", config.api_url, e))
        })?;

        let http =
            build_http_client(config.request_timeout()).map_err(|source| CatalogError::Http {
                context: "building HTTP client".to_string(),
                source,
            })?;

        Ok(Self {
            http,
            endpoint,
            per_page: config.request_limit,
        })
    }

    /// Entries requested per listing page
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Issues a single GET against the endpoint and decodes the JSON body
    ///
    /// Transport failures, non-2xx statuses and undecodable bodies are kept
    /// apart so callers can report them precisely.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        params: &[(String, String)],
        context: &str,
    ) -> Result<T, CatalogError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(params)
            .send()
            .await
            .map_err(|source| CatalogError::Http {
                context: context.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                context: context.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| CatalogError::Http {
            context: context.to_string(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|e| CatalogError::Decode {
            context: context.to_string(),
            message: e.to_string(),
        })
    }
}
