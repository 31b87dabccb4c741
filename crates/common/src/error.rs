use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("risk_percent must be in (0, 100], got {0}")]
    RiskOutOfRange(f64),

    #[error("currency pair must not be empty")]
    EmptyPair,

    #[error("unsupported interval '{0}', expected one of 1d, 1h, 5m, 1wk")]
    UnknownInterval(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("{column} column has {got} values but the series has {expected} rows")]
    Misaligned {
        column: &'static str,
        expected: usize,
        got: usize,
    },
}
