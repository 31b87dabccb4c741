use ta::{Next, Reset};

use crate::error::SignalError;

/// EMA with `alpha = 2 / (window + 1)`, seeded with the simple mean of the
/// first `window` closes. Nothing is reported before the seed exists.
#[derive(Debug, Clone)]
pub struct SeededEma {
    window: usize,
    alpha: f64,
    seed_sum: f64,
    count: usize,
    value: Option<f64>,
}

impl SeededEma {
    pub fn new(window: usize) -> Result<Self, SignalError> {
        if window == 0 {
            return Err(SignalError::Indicator("EMA window must be at least 1".into()));
        }
        Ok(Self {
            window,
            alpha: 2.0 / (window as f64 + 1.0),
            seed_sum: 0.0,
            count: 0,
            value: None,
        })
    }
}

impl Next<f64> for SeededEma {
    type Output = Option<f64>;

    fn next(&mut self, close: f64) -> Self::Output {
        match self.value {
            Some(prev) => {
                self.value = Some(self.alpha * close + (1.0 - self.alpha) * prev);
            }
            None => {
                self.seed_sum += close;
                self.count += 1;
                if self.count == self.window {
                    self.value = Some(self.seed_sum / self.window as f64);
                }
            }
        }
        self.value
    }
}

impl Reset for SeededEma {
    fn reset(&mut self) {
        self.seed_sum = 0.0;
        self.count = 0;
        self.value = None;
    }
}
