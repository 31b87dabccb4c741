use ta::indicators::SimpleMovingAverage;
use ta::{Next, Reset};

use crate::error::SignalError;

/// `ta`'s SMA averages whatever it has seen so far; this masks the warm-up so
/// only full windows are reported.
#[derive(Debug, Clone)]
pub struct WindowedSma {
    inner: SimpleMovingAverage,
    window: usize,
    seen: usize,
}

impl WindowedSma {
    pub fn new(window: usize) -> Result<Self, SignalError> {
        if window == 0 {
            return Err(SignalError::Indicator("SMA window must be at least 1".into()));
        }
        let inner = SimpleMovingAverage::new(window)
            .map_err(|e| SignalError::Indicator(format!("SMA({window}): {e:?}")))?;

        Ok(Self {
            inner,
            window,
            seen: 0,
        })
    }
}

impl Next<f64> for WindowedSma {
    type Output = Option<f64>;

    fn next(&mut self, close: f64) -> Self::Output {
        self.seen = self.seen.saturating_add(1);
        let value = self.inner.next(close);
        (self.seen >= self.window).then_some(value)
    }
}

impl Reset for WindowedSma {
    fn reset(&mut self) {
        self.inner.reset();
        self.seen = 0;
    }
}
