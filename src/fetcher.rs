//! Page retrieval with a rate-limiting pause and linear retry backoff.

use anyhow::{Context, Result, bail};
use log::{debug, error, info, warn};
use reqwest::Url;

use crate::config::FetcherConfig;
use crate::http::{HttpClient, RetryPolicy};
use crate::sleep::{Sleeper, TokioSleeper};

/// Prefixes that mark a path as a complete URL rather than one relative to the base.
const ABSOLUTE_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Fetches raw pages from one site, one request at a time.
///
/// The fetcher owns its HTTP session until [`close`](PageFetcher::close) is
/// called or it is dropped.
pub struct PageFetcher<S: Sleeper = TokioSleeper> {
    base_url: Url,
    retry: RetryPolicy,
    http: Option<HttpClient>,
    sleeper: S,
}

impl PageFetcher<TokioSleeper> {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        Self::with_sleeper(config, TokioSleeper)
    }
}

impl<S: Sleeper> PageFetcher<S> {
    /// Creates a fetcher that waits through the given sleeper.
    pub fn with_sleeper(config: FetcherConfig, sleeper: S) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::from_config(&config)?;

        Ok(Self {
            base_url: config.base_url,
            retry: config.retry,
            http: Some(http),
            sleeper,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    /// Turns a caller-supplied path into the URL to request.
    ///
    /// Paths starting with `http://` or `https://` are taken as they are;
    /// anything else is resolved against the base URL.
    pub fn resolve_url(&self, path: &str) -> Result<Url> {
        let url = if is_absolute_url(path) {
            Url::parse(path).with_context(|| format!("Invalid URL: {}", path))?
        } else {
            self.base_url
                .join(path)
                .with_context(|| format!("Cannot resolve '{}' against {}", path, self.base_url))?
        };

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => bail!("Unsupported URL scheme '{}' in {}", other, url),
        }
    }

    /// Fetches `path` with the configured retry policy.
    ///
    /// Returns `Ok(None)` when every attempt failed. `Err` is reserved for
    /// problems no retry can fix: an unusable path or a closed fetcher.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&mut self, path: &str) -> Result<Option<String>> {
        let policy = self.retry;
        self.fetch_with(path, policy).await
    }

    /// Fetches `path` with an explicit retry policy for this call only.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_with(&mut self, path: &str, policy: RetryPolicy) -> Result<Option<String>> {
        policy.validate()?;
        let url = self.resolve_url(path)?;
        let http = self
            .http
            .as_ref()
            .context("Page fetcher has already been closed")?;

        for attempt in 1..=policy.retry_count {
            self.sleeper.sleep(policy.pause_before_attempt()).await;

            info!(
                "Fetching {} (attempt {}/{})",
                url, attempt, policy.retry_count
            );

            match http.get_text(&url).await {
                Ok(body) => {
                    info!("Successfully retrieved content from {}", url);
                    return Ok(Some(body));
                }
                Err(e) => {
                    warn!("Attempt {} failed: {}", attempt, e);

                    if policy.is_last_attempt(attempt) {
                        error!(
                            "Failed to retrieve {} after {} attempts",
                            url, policy.retry_count
                        );
                        break;
                    }

                    let backoff = policy.backoff_after_failure(attempt);
                    debug!("Backing off for {:?} before next attempt", backoff);
                    self.sleeper.sleep(backoff).await;
                }
            }
        }

        Ok(None)
    }

    /// Releases the HTTP session and its pooled connections. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.http.take().is_some() {
            debug!("Closed HTTP session for {}", self.base_url);
        }
    }
}

fn is_absolute_url(path: &str) -> bool {
    ABSOLUTE_PREFIXES.iter().any(|prefix| {
        path.as_bytes()
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
    })
}
