//! Environment driven configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by `dotenvy` in `main`.
//!
//! - `STYLIST_ENDPOINT`: prediction endpoint URL
//! - `STYLIST_MAX_UPLOAD_BYTES`: largest photo accepted before upload
//! - `STYLIST_USER_AGENT`: user agent for outbound requests
//! - `STYLIST_NO_PROXY`: `1`/`true` to bypass system proxies (local backends)

use anyhow::{Context, Result};
use tracing::info;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_USER_AGENT: &str = concat!("outfit-finder/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub max_upload_bytes: u64,
    pub user_agent: String,
    pub no_proxy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            no_proxy: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("STYLIST_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }

        if let Some(raw) = lookup("STYLIST_MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = raw
                .trim()
                .parse()
                .with_context(|| format!("STYLIST_MAX_UPLOAD_BYTES is not a number: {raw}"))?;
        }

        if let Some(user_agent) = lookup("STYLIST_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            config.user_agent = user_agent;
        }

        if let Some(raw) = lookup("STYLIST_NO_PROXY") {
            config.no_proxy = matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        info!(
            "Using prediction endpoint {} (upload limit {} bytes)",
            config.endpoint, config.max_upload_bytes
        );
        Ok(config)
    }
}
