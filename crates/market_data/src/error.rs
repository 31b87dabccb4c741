use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider error {code}: {description}")]
    Api { code: String, description: String },

    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("no data returned for {ticker}, check the currency pair or network connection")]
    NoData { ticker: String },
}
