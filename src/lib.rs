pub mod config;
pub mod fetcher;
pub mod http;
pub mod sleep;

pub use config::{BrowserHeaders, FetcherConfig};
pub use fetcher::PageFetcher;
pub use http::RetryPolicy;
