//! Ingest configuration.
//!
//! Values come from a key lookup rather than the process environment directly, so callers (and
//! tests) can resolve a config from any source. [`IngestConfig::from_env`] is the usual entry.

use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;

pub const API_URL_VAR: &str = "ALPHA_API_URL";
pub const API_TIMEOUT_VAR: &str = "ALPHA_API_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const GRAPHS_PATH: &str = "graphs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl IngestConfig {
    /// Config for `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves [`API_URL_VAR`] and [`API_TIMEOUT_VAR`] through `lookup`. Unset or blank values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = match present(API_URL_VAR) {
            Some(raw) => parse_base_url(&raw)?,
            None => parse_base_url(DEFAULT_API_URL)?,
        };
        let timeout = match present(API_TIMEOUT_VAR) {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => DEFAULT_TIMEOUT,
        };
        Ok(Self { base_url, timeout })
    }

    /// The base URL with a `graphs` segment appended to its path. A trailing slash on the base
    /// is dropped first; query and fragment are kept.
    pub fn graphs_url(&self) -> String {
        let mut url = self.base_url.clone();
        // Only fails for cannot-be-a-base URLs, which `parse_base_url` rejects.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(GRAPHS_PATH);
        }
        url.to_string()
    }
}

pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::invalid_config(format!("base URL `{raw}`: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_config(format!(
            "base URL `{raw}` must use http or https"
        )));
    }
    if url.cannot_be_a_base() {
        return Err(Error::invalid_config(format!(
            "base URL `{raw}` cannot carry a path"
        )));
    }
    Ok(url)
}

/// Whole seconds, strictly positive.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        Error::invalid_config(format!("timeout `{raw}` is not a whole number of seconds"))
    })?;
    if secs == 0 {
        return Err(Error::invalid_config("timeout must be at least 1 second"));
    }
    Ok(Duration::from_secs(secs))
}
