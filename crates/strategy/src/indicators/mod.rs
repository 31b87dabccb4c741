//! Close-price indicators. Each one is a streaming `ta::Next` that yields
//! `None` until its window has enough history, so a whole column can be
//! produced with [`compute`] and stays aligned with its input.

mod ema;
mod rsi;
mod sma;

pub use ema::SeededEma;
pub use rsi::WilderRsi;
pub use sma::WindowedSma;

use ta::Next;

use crate::error::SignalError;

pub const DEFAULT_WINDOW: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    Sma,
    Ema,
    Rsi,
}

/// Runs `kind` over `closes`; the output has the same length and missing
/// positions are `None`.
pub fn compute(
    kind: IndicatorKind,
    closes: &[f64],
    window: usize,
) -> Result<Vec<Option<f64>>, SignalError> {
    let values = match kind {
        IndicatorKind::Sma => run(WindowedSma::new(window)?, closes),
        IndicatorKind::Ema => run(SeededEma::new(window)?, closes),
        IndicatorKind::Rsi => run(WilderRsi::new(window)?, closes),
    };
    Ok(values)
}

fn run<I>(mut indicator: I, closes: &[f64]) -> Vec<Option<f64>>
where
    I: Next<f64, Output = Option<f64>>,
{
    closes.iter().map(|&close| indicator.next(close)).collect()
}

#[cfg(test)]
pub(crate) fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value should be defined");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
