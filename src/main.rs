use anyhow::Result;
use clap::Parser;
use tripfetch::config::{DEFAULT_BASE_URL, FetcherConfig};
use tripfetch::fetcher::PageFetcher;
use tripfetch::http::{DEFAULT_DELAY_SECS, DEFAULT_RETRY_COUNT, RetryPolicy};

/// Page fetched when no path is given.
const DEMO_PATH: &str = "/Hotels-g186338-a_travelersChoice.1-London_England-Hotels.html";

/// tripfetch - fetch travel-review pages politely
///
/// Fetches one page with browser-like headers, a pause before every request
/// and retries with growing backoff, then prints the raw HTML to stdout.
/// Nothing is printed if every attempt fails.
///
/// Examples:
///   tripfetch                              # Fetch the demonstration page
///   tripfetch /Restaurants-g60763.html     # Fetch another page on the site
#[derive(Parser, Debug)]
#[command(author, version = env!("TRIPFETCH_VERSION"), about)]
struct Cli {
    /// Path relative to the base URL, or an absolute http(s) URL
    #[arg(value_name = "PATH", default_value = DEMO_PATH)]
    pub path: String,

    /// Site the path is resolved against
    #[arg(
        long = "base-url",
        env = "TRIPFETCH_BASE_URL",
        value_name = "URL",
        default_value = DEFAULT_BASE_URL
    )]
    pub base_url: String,

    /// Number of attempts before giving up
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_RETRY_COUNT)]
    pub retries: usize,

    /// Seconds to wait before each attempt; also the backoff unit
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_DELAY_SECS)]
    pub delay: u64,
}

impl Cli {
    fn to_config(&self) -> Result<FetcherConfig> {
        Ok(FetcherConfig {
            retry: RetryPolicy::from_secs(self.retries, self.delay)?,
            ..FetcherConfig::with_base_url(&self.base_url)?
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut fetcher = PageFetcher::new(cli.to_config()?)?;
    let result = fetcher.fetch(&cli.path).await;
    fetcher.close();

    if let Some(content) = result? {
        println!("{}", content);
    }
    Ok(())
}
