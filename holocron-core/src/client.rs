//! Remote resource fetching
//!
//! [`ResourceFetcher`] is the seam between the cache and the network. The
//! cache only ever talks to this trait; [`SwapiClient`] is the HTTP
//! implementation used by the CLI.

use crate::cache::types::{CacheValue, QueryParams};
use crate::error::{HolocronError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Fetches a raw resource from a remote source
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch the resource at `locator` with optional query parameters.
    ///
    /// Network failures, non-success responses and timeouts are errors; no
    /// retry is attempted.
    async fn get(
        &self,
        locator: &str,
        params: Option<&QueryParams>,
        timeout: Duration,
    ) -> Result<CacheValue>;
}

/// HTTP client for the SWAPI resource API
#[derive(Debug, Clone)]
pub struct SwapiClient {
    http: Client,
}

impl SwapiClient {
    /// Create a new client
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("holocron/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HolocronError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { http })
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

fn map_transport_error(locator: &str, timeout: Duration, e: reqwest::Error) -> HolocronError {
    if e.is_timeout() {
        HolocronError::Timeout {
            locator: locator.to_string(),
            timeout_seconds: timeout.as_secs(),
        }
    } else {
        HolocronError::Fetch(format!("{}: {}", locator, e))
    }
}

#[async_trait]
impl ResourceFetcher for SwapiClient {
    async fn get(
        &self,
        locator: &str,
        params: Option<&QueryParams>,
        timeout: Duration,
    ) -> Result<CacheValue> {
        debug!("GET {} params={:?}", locator, params);

        let mut request = self.http.get(locator).timeout(timeout);
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request
            .send()
            .await
            .map_err(|e| map_transport_error(locator, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HolocronError::Status {
                locator: locator.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<CacheValue>()
            .await
            .map_err(|e| map_transport_error(locator, timeout, e))
    }
}
