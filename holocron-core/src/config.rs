//! Configuration for the fetch-and-normalize pipeline

use crate::coerce::NullMarkers;
use crate::error::{HolocronError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root of the public SWAPI mirror
pub const DEFAULT_API_BASE: &str = "https://swapi.py4e.com/api";

/// Cache document location relative to the working directory
pub const DEFAULT_CACHE_PATH: &str = "./CACHE.json";

/// Per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_API_BASE: &str = "HOLOCRON_API_BASE";
pub const ENV_CACHE_PATH: &str = "HOLOCRON_CACHE_PATH";
pub const ENV_TIMEOUT_SECS: &str = "HOLOCRON_TIMEOUT_SECS";
pub const ENV_NULL_MARKERS: &str = "HOLOCRON_NULL_MARKERS";

/// Configuration shared by the cache, the client and the builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolocronConfig {
    /// Root URL of the resource API, without trailing slash
    pub api_base: String,

    /// Location of the cache document
    pub cache_path: PathBuf,

    /// Timeout applied to every remote fetch
    pub timeout: Duration,

    /// Strings canonicalized to null
    pub null_markers: NullMarkers,
}

impl Default for HolocronConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            timeout: DEFAULT_TIMEOUT,
            null_markers: NullMarkers::default(),
        }
    }
}

impl HolocronConfig {
    /// Create a new builder for the configuration
    pub fn builder() -> HolocronConfigBuilder {
        HolocronConfigBuilder::default()
    }

    /// Load configuration from the environment (and a `.env` file if present)
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup; unset variables
    /// fall back to the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(api_base) = lookup(ENV_API_BASE) {
            builder = builder.api_base(api_base);
        }
        if let Some(path) = lookup(ENV_CACHE_PATH) {
            builder = builder.cache_path(path);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                HolocronError::Config(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, secs))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(markers) = lookup(ENV_NULL_MARKERS) {
            builder = builder.null_markers(NullMarkers::new(markers.split(',')));
        }

        let config = builder.build();
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            return Err(HolocronError::Config("api_base must not be empty".to_string()));
        }

        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(HolocronError::Config(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }

        if self.timeout.is_zero() {
            return Err(HolocronError::Config("timeout must be greater than 0".to_string()));
        }

        if self.cache_path.as_os_str().is_empty() {
            return Err(HolocronError::Config("cache_path must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Builder for the configuration
#[derive(Debug, Default)]
pub struct HolocronConfigBuilder {
    api_base: Option<String>,
    cache_path: Option<PathBuf>,
    timeout: Option<Duration>,
    null_markers: Option<NullMarkers>,
}

impl HolocronConfigBuilder {
    /// Set the API root; a trailing slash is dropped
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        let api_base: String = api_base.into();
        self.api_base = Some(api_base.trim_end_matches('/').to_string());
        self
    }

    /// Set the cache document location
    pub fn cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    /// Set the fetch timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the null markers
    pub fn null_markers(mut self, markers: NullMarkers) -> Self {
        self.null_markers = Some(markers);
        self
    }

    /// Build the configuration
    pub fn build(self) -> HolocronConfig {
        let defaults = HolocronConfig::default();

        HolocronConfig {
            api_base: self.api_base.unwrap_or(defaults.api_base),
            cache_path: self.cache_path.unwrap_or(defaults.cache_path),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            null_markers: self.null_markers.unwrap_or(defaults.null_markers),
        }
    }
}
