use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_url(&config.api_url)?;
    validate_limits(config)?;

    if config.snapshot_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "snapshot_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// The endpoint must be an absolute http(s) URL
fn validate_api_url(api_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(api_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid wp_api_url '{}': {}", api_url, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl(format!(
            "wp_api_url must use http or https, got '{}'",
            other
        ))),
    }
}

fn validate_limits(config: &Config) -> Result<(), ConfigError> {
    if config.request_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "wp_api_request_limit must be >= 1, got {}",
            config.request_limit
        )));
    }

    if config.detail_concurrency < 1 || config.detail_concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "detail_concurrency must be between 1 and 100, got {}",
            config.detail_concurrency
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}
