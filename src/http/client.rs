//! HTTP session carrying the browser headers and request timeout.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, Url};

use super::retry::AttemptError;
use crate::config::FetcherConfig;

/// HTTP session shared by every attempt of a fetcher.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client with the configured default headers and timeout.
    pub fn from_config(config: &FetcherConfig) -> Result<Self> {
        let headers = config.headers.to_header_map()?;

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::new(client))
    }

    /// Performs a single GET and returns the body text of a successful response.
    pub async fn get_text(&self, url: &Url) -> Result<String, AttemptError> {
        debug!("GET {}...", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(AttemptError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Status(status));
        }

        let body = response.text().await.map_err(AttemptError::Body)?;
        debug!("Read {} bytes from {}", body.len(), url);

        Ok(body)
    }
}
