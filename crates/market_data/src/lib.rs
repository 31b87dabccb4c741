pub mod config;
pub mod error;
pub mod remote;
pub mod traits;

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use remote::YahooClient;
pub use traits::PriceProvider;
