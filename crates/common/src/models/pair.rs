/// Friendly pair name -> Yahoo Finance ticker. Unknown pairs pass through.
const TICKER_MAP: &[(&str, &str)] = &[
    ("XAUUSD", "GC=F"),
    ("EURUSD", "EURUSD=X"),
    ("GBPUSD", "GBPUSD=X"),
    ("USDJPY", "JPY=X"),
];

pub const SUPPORTED_PAIRS: [&str; 4] = ["XAUUSD", "EURUSD", "GBPUSD", "USDJPY"];

pub fn provider_ticker(pair: &str) -> &str {
    TICKER_MAP
        .iter()
        .find(|(name, _)| *name == pair)
        .map(|(_, ticker)| *ticker)
        .unwrap_or(pair)
}
