//! Client configuration: API base address and request timeout.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const BASE_URL_ENV: &str = "LABDESK_BASE_URL";
pub const TIMEOUT_SECS_ENV: &str = "LABDESK_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address every resource path is appended to, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout; expiry is reported as a network error.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS) }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: normalize_base_url(base_url), ..Self::default() }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `LABDESK_BASE_URL`: default `http://localhost:8080/api/v1`
    /// - `LABDESK_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Unparseable or blank values
    /// fall back to defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| DEFAULT_BASE_URL.to_owned(), |v| normalize_base_url(&v));
        let timeout_secs = lookup(TIMEOUT_SECS_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self { base_url, timeout: Duration::from_secs(timeout_secs) }
    }

    /// Join a resource path onto the base address.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}
