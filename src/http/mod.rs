//! HTTP session and retry schedule used by the page fetcher.

mod client;
mod retry;

pub use client::HttpClient;
pub use retry::{AttemptError, DEFAULT_DELAY_SECS, DEFAULT_RETRY_COUNT, RetryPolicy};
