use common::models::TradingParameters;

/// Lots such that hitting the stop loses `risk_percent` of the balance,
/// rounded to two decimals.
pub fn lot_size(params: &TradingParameters) -> f64 {
    let risk_amount = params.account_balance() * (params.risk_percent() / 100.0);
    round_to(risk_amount / params.stop_distance(), 2)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
