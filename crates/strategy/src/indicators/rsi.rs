use ta::{Next, Reset};

use crate::error::SignalError;

/// RSI with Wilder's smoothing. The first averages are plain means of the
/// first `window` price changes, so the first value lands on close number
/// `window + 1`. A zero average loss reads as 100.
#[derive(Debug, Clone)]
pub struct WilderRsi {
    window: usize,
    prev_close: Option<f64>,
    changes: usize,
    gain_sum: f64,
    loss_sum: f64,
    avg_gain: f64,
    avg_loss: f64,
    warm: bool,
}

impl WilderRsi {
    pub fn new(window: usize) -> Result<Self, SignalError> {
        if window == 0 {
            return Err(SignalError::Indicator("RSI window must be at least 1".into()));
        }
        Ok(Self {
            window,
            prev_close: None,
            changes: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            avg_gain: 0.0,
            avg_loss: 0.0,
            warm: false,
        })
    }

    fn value(&self) -> f64 {
        if self.avg_loss == 0.0 {
            return 100.0;
        }
        let rs = self.avg_gain / self.avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

impl Next<f64> for WilderRsi {
    type Output = Option<f64>;

    fn next(&mut self, close: f64) -> Self::Output {
        let Some(prev) = self.prev_close.replace(close) else {
            return None;
        };

        let change = close - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        if self.warm {
            let w = self.window as f64;
            self.avg_gain = (self.avg_gain * (w - 1.0) + gain) / w;
            self.avg_loss = (self.avg_loss * (w - 1.0) + loss) / w;
        } else {
            self.gain_sum += gain;
            self.loss_sum += loss;
            self.changes += 1;
            if self.changes < self.window {
                return None;
            }
            self.avg_gain = self.gain_sum / self.window as f64;
            self.avg_loss = self.loss_sum / self.window as f64;
            self.warm = true;
        }

        Some(self.value())
    }
}

impl Reset for WilderRsi {
    fn reset(&mut self) {
        self.prev_close = None;
        self.changes = 0;
        self.gain_sum = 0.0;
        self.loss_sum = 0.0;
        self.avg_gain = 0.0;
        self.avg_loss = 0.0;
        self.warm = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_close;

    #[test]
    fn wilder_smoothing_by_hand() {
        let mut rsi = WilderRsi::new(2).unwrap();
        assert_eq!(rsi.next(1.0), None);
        assert_eq!(rsi.next(2.0), None);
        // gains [1, 0], losses [0, 1]
        assert_close(rsi.next(1.0), 50.0);
        // avg_gain (0.5 + 1) / 2 = 0.75, avg_loss 0.5 / 2 = 0.25
        assert_close(rsi.next(2.0), 75.0);
    }

    #[test]
    fn first_value_matches_window_ratio() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 + (i as f64 * 1.3).sin() * 4.0).collect();

        let (mut gains, mut losses) = (0.0, 0.0);
        for pair in closes.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }

        let mut rsi = WilderRsi::new(14).unwrap();
        let last = closes.iter().map(|&c| rsi.next(c)).last().flatten();
        assert_close(last, 100.0 * gains / (gains + losses));
    }

    #[test]
    fn only_gains_read_as_100_and_only_losses_as_0() {
        let mut up = WilderRsi::new(3).unwrap();
        let last_up = [1.0, 2.0, 3.0, 4.0, 5.0].map(|c| up.next(c));
        assert_close(last_up[4], 100.0);

        let mut down = WilderRsi::new(3).unwrap();
        let last_down = [5.0, 4.0, 3.0, 2.0, 1.0].map(|c| down.next(c));
        assert_close(last_down[4], 0.0);
    }

    #[test]
    fn reset_forgets_previous_close() {
        let mut rsi = WilderRsi::new(1).unwrap();
        rsi.next(1.0);
        assert_close(rsi.next(2.0), 100.0);
        rsi.reset();
        assert_eq!(rsi.next(1.0), None);
    }
}
