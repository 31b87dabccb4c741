pub mod interval;
pub mod pair;
pub mod parameters;
pub mod price_bar;
pub mod series;
pub mod signal;

pub use interval::Interval;
pub use pair::provider_ticker;
pub use parameters::TradingParameters;
pub use price_bar::PriceBar;
pub use series::{PriceSeries, SeriesRow};
pub use signal::{Action, Signal};
