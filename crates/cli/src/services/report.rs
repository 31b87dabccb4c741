use serde::Serialize;

use common::models::{Action, Interval, SeriesRow, Signal};

use crate::services::chart;

/// Everything one run produced, rendered only once the whole pipeline
/// succeeded.
#[derive(Debug, Serialize)]
pub struct SignalReport<'a> {
    pub pair: &'a str,
    pub ticker: &'a str,
    pub interval: Interval,
    pub period: &'a str,
    pub signal: Signal,
    pub lot_size: f64,
    pub series: &'a [SeriesRow],
}

impl SignalReport<'_> {
    pub fn to_text(&self, with_chart: bool) -> String {
        let mut out = format!(
            "Forex Trading Signal: {} ({}, {} bars over {})\n\n",
            self.pair, self.ticker, self.interval, self.period
        );
        out.push_str(&format!("Trade Signal: {}\n", self.signal.action));
        out.push_str(&format!("Entry Price: {}\n", format_price(self.signal.entry_price)));

        if self.signal.action != Action::Hold {
            if let Some(tp) = self.signal.take_profit {
                out.push_str(&format!("Take Profit: {}\n", format_price(tp)));
            }
            if let Some(sl) = self.signal.stop_loss {
                out.push_str(&format!("Stop Loss: {}\n", format_price(sl)));
            }
        }
        out.push_str(&format!("Recommended Lot Size: {:.2} lots\n", self.lot_size));

        if with_chart {
            out.push('\n');
            out.push_str(&chart::render(
                self.series,
                chart::DEFAULT_WIDTH,
                chart::DEFAULT_HEIGHT,
            ));
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn format_price(price: f64) -> String {
    if price.abs() >= 100.0 {
        format!("{price:.2}")
    } else {
        format!("{price:.5}")
    }
}
