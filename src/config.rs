//! Fetcher configuration: target site, browser headers, retry policy and timeout.

use anyhow::{Context, Result};
use reqwest::{
    Url,
    header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT},
};
use std::time::Duration;

use crate::http::RetryPolicy;

/// Site fetched when no other base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.tripadvisor.com";

/// Per-request timeout applied to every attempt.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Header values sent with every request so traffic resembles a desktop browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserHeaders {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
}

impl Default for BrowserHeaders {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
        }
    }
}

impl BrowserHeaders {
    /// Builds the default header map installed on the HTTP client.
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent).context("Invalid User-Agent header value")?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(&self.accept).context("Invalid Accept header value")?,
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&self.accept_language)
                .context("Invalid Accept-Language header value")?,
        );
        Ok(headers)
    }
}

/// Everything a [`PageFetcher`](crate::fetcher::PageFetcher) needs to know up front.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub base_url: Url,
    pub headers: BrowserHeaders,
    pub retry: RetryPolicy,
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            headers: BrowserHeaders::default(),
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FetcherConfig {
    /// Default configuration pointed at another site.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    /// Checks the invariants that construction relies on.
    pub fn validate(&self) -> Result<()> {
        self.retry.validate()?;
        match self.base_url.scheme() {
            "http" | "https" => Ok(()),
            other => anyhow::bail!(
                "Base URL must use http or https, got '{}': {}",
                other,
                self.base_url
            ),
        }
    }
}
