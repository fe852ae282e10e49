//! HTTP fetch stage.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Default per-request timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Default identifying client header.
pub const DEFAULT_USER_AGENT: &str = "search-ingest/1.0";

/// Failure to retrieve a document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Something that can retrieve the HTML body behind a URL.
pub trait FetchHtml {
    /// GET `url` and return its body as text.
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

/// [`FetchHtml`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher over a fresh `reqwest` client.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Whole-request timeout applied to every fetch
    /// * `user_agent` - Identifying `User-Agent` header sent with every request
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the TLS backend or client cannot
    /// be initialized.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, timeout })
    }
}

impl FetchHtml for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!(bytes = body.len(), "Fetched document");
        Ok(body)
    }
}

impl HttpFetcher {
    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Transport(e)
        }
    }
}
