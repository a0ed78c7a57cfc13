//! Client configuration.
//!
//! Built once at startup and injected into every client; nothing reads
//! the environment per request.

use std::fmt;
use std::str::FromStr;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// How slider moves are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReorderMode {
    /// Two single-record updates, compensating the first if the second
    /// fails.
    #[default]
    Sequential,
    /// One `PUT /sliders/reorder` carrying both assignments.
    Batch,
}

impl FromStr for ReorderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(ReorderMode::Sequential),
            "batch" => Ok(ReorderMode::Batch),
            other => Err(ConfigError::Invalid {
                var: "HERALD_REORDER_MODE",
                reason: format!("expected `sequential` or `batch`, got `{other}`"),
            }),
        }
    }
}

impl fmt::Display for ReorderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReorderMode::Sequential => f.write_str("sequential"),
            ReorderMode::Batch => f.write_str("batch"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Connection settings for the content API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL without a trailing slash.
    pub api_url: String,
    /// Prefix for server-relative asset paths, without a trailing slash.
    pub asset_base_url: String,
    pub request_timeout_secs: u64,
    pub reorder_mode: ReorderMode,
}

impl ClientConfig {
    /// Settings for `api_url` with every other field at its default.
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        let api_url = trim_base(&api_url);
        Self {
            asset_base_url: api_url.clone(),
            api_url,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            reorder_mode: ReorderMode::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                       | Default                |
    /// |-------------------------------|------------------------|
    /// | `HERALD_API_URL`              | required               |
    /// | `HERALD_ASSET_BASE_URL`       | value of the API URL   |
    /// | `HERALD_REQUEST_TIMEOUT_SECS` | `30`                   |
    /// | `HERALD_REORDER_MODE`         | `sequential`           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("HERALD_API_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("HERALD_API_URL"))?;
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "HERALD_API_URL",
                reason: format!("expected an http(s) URL, got `{api_url}`"),
            });
        }

        let mut config = Self::new(api_url);

        if let Some(base) = lookup("HERALD_ASSET_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.asset_base_url = trim_base(&base);
        }

        if let Some(raw) = lookup("HERALD_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs =
                raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: "HERALD_REQUEST_TIMEOUT_SECS",
                    reason: format!("expected a whole number of seconds, got `{raw}`"),
                })?;
        }

        if let Some(raw) = lookup("HERALD_REORDER_MODE") {
            config.reorder_mode = raw.parse()?;
        }

        Ok(config)
    }

    /// Resolve an asset URL as returned by the API. Absolute URLs pass
    /// through; server-relative paths are joined to `asset_base_url`.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") || path.is_empty() {
            return path.to_string();
        }
        format!("{}/{}", self.asset_base_url, path.trim_start_matches('/'))
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
