use std::env;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Upper bound for a single rate-limit sleep, whatever `max_retries` is.
pub const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Lookback ranges the chart endpoint understands.
pub const SUPPORTED_PERIODS: [&str; 11] = [
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    /// First rate-limit sleep; doubled on every further 429.
    pub backoff_base: Duration,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CHART_URL.to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            backoff_base: Duration::from_secs(2),
            user_agent: "Mozilla/5.0 (fx-signal)".to_string(),
        }
    }
}

impl ProviderConfig {
    /// Reads `YAHOO_CHART_URL`, `YAHOO_TIMEOUT_SECS` and `YAHOO_MAX_RETRIES`,
    /// falling back to the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = env::var("YAHOO_CHART_URL").unwrap_or(defaults.base_url);
        let timeout = env_number("YAHOO_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let max_retries = env_number("YAHOO_MAX_RETRIES")
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(defaults.max_retries);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            max_retries,
            backoff_base: defaults.backoff_base,
            user_agent: defaults.user_agent,
        }
    }
}

fn env_number(key: &str) -> Option<u64> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}
