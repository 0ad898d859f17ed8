//! Environment-driven configuration.
//!
//! The klines endpoint is public, so no credentials are involved. The only
//! knob is an optional `BINANCE_API_URL` override of the REST endpoint,
//! used to point the fetcher at a proxy or a local test server.

use crate::Result;
use crate::client::BINANCE_API_URL;
use crate::error::WickerError;

/// Everything read from the environment at startup.
#[derive(Debug)]
pub struct AppConfig {
    pub binance: BinanceConfig,
}

/// Exchange endpoint configuration.
#[derive(Debug)]
pub struct BinanceConfig {
    /// Base URL of the spot REST API.
    pub api_url: String,
}

/// Loads configuration from the environment.
///
/// `BINANCE_API_URL` overrides the default public endpoint when set and
/// non-empty.
///
/// # Errors
///
/// Returns [`WickerError::Config`] when the override carries no
/// `http://` or `https://` scheme.
pub fn fetch_config() -> Result<AppConfig> {
    let api_url = non_empty_var("BINANCE_API_URL").unwrap_or_else(|| BINANCE_API_URL.to_string());

    if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
        return Err(WickerError::Config(format!(
            "BINANCE_API_URL must start with http:// or https://, got {api_url}"
        )));
    }

    Ok(AppConfig {
        binance: BinanceConfig { api_url },
    })
}

/// Returns the value of an environment variable if it exists and is
/// non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
