//! Retry schedule and attempt failure reporting.

use anyhow::{Result, bail};
use reqwest::StatusCode;
use std::time::Duration;

/// Number of attempts made when nothing else is configured.
pub const DEFAULT_RETRY_COUNT: usize = 3;

/// Rate-limiting pause and backoff unit, in seconds.
pub const DEFAULT_DELAY_SECS: u64 = 2;

/// How many times to try a request and how long to wait around each try.
///
/// Every attempt is preceded by `delay`. A failed attempt `n` (1-indexed) that
/// is not the last one is followed by a further `delay * n`, so the backoff
/// grows linearly with the attempt number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retry_count: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_count: DEFAULT_RETRY_COUNT,
            delay: Duration::from_secs(DEFAULT_DELAY_SECS),
        }
    }
}

impl RetryPolicy {
    pub fn new(retry_count: usize, delay: Duration) -> Result<Self> {
        let policy = Self { retry_count, delay };
        policy.validate()?;
        Ok(policy)
    }

    pub fn from_secs(retry_count: usize, delay_secs: u64) -> Result<Self> {
        Self::new(retry_count, Duration::from_secs(delay_secs))
    }

    pub fn validate(&self) -> Result<()> {
        if self.retry_count == 0 {
            bail!("Retry count must be at least 1");
        }
        Ok(())
    }

    /// Fixed pause taken before every attempt, the first one included.
    pub fn pause_before_attempt(&self) -> Duration {
        self.delay
    }

    /// Backoff taken after `attempt` (1-indexed) fails and another attempt remains.
    pub fn backoff_after_failure(&self, attempt: usize) -> Duration {
        self.delay
            .saturating_mul(u32::try_from(attempt).unwrap_or(u32::MAX))
    }

    pub fn is_last_attempt(&self, attempt: usize) -> bool {
        attempt >= self.retry_count
    }
}

/// Why a single attempt did not produce a page.
///
/// All variants are the same kind of failure as far as callers are concerned;
/// the distinction only feeds log messages.
#[derive(Debug)]
pub enum AttemptError {
    /// The server answered with a non-success status.
    Status(StatusCode),
    /// The request could not be completed (connect error, timeout, ...).
    Transport(reqwest::Error),
    /// The response started but its body could not be read.
    Body(reqwest::Error),
}

impl std::fmt::Display for AttemptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptError::Status(status) => write!(f, "HTTP error status: {}", status),
            AttemptError::Transport(e) if e.is_timeout() => write!(f, "request timed out: {}", e),
            AttemptError::Transport(e) => write!(f, "request failed: {}", e),
            AttemptError::Body(e) => write!(f, "failed to read response body: {}", e),
        }
    }
}

impl std::error::Error for AttemptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttemptError::Status(_) => None,
            AttemptError::Transport(e) | AttemptError::Body(e) => Some(e),
        }
    }
}
