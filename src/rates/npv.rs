//! Net present value of an equally spaced cash-flow series
//!
//! Index 0 is undiscounted; index `i` is discounted by `(1 + rate)^i`.

/// NPV of `cashflows` at a periodic `rate`
pub fn net_present_value(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Derivative of NPV with respect to the rate.
///
/// The period-0 flow is rate independent and contributes nothing.
pub fn npv_derivative(cashflows: &[f64], rate: f64) -> f64 {
    npv_and_derivative(cashflows, rate).1
}

/// NPV and its rate derivative in a single pass
pub fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

/// Convert a periodic rate to its effective annual equivalent: `(1 + r)^k - 1`
pub fn annualize_rate(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}
