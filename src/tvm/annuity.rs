//! Level-payment annuity solver and amortization schedule

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FinanceError, FinanceResult};
use crate::input::numeric;

/// Constant per-period payment that amortizes `principal` over `periods` at `rate`.
///
/// * `rate == 0`: `principal / periods` (zero periods is a `DivisionByZero`)
/// * otherwise: `P * r * (1+r)^n / ((1+r)^n - 1)`
///
/// Negative `periods` are not rejected; with a zero rate they yield a
/// payment of the opposite sign.
pub fn annuity_payment(principal: f64, rate: f64, periods: f64) -> FinanceResult<f64> {
    if rate == 0.0 {
        if periods == 0.0 {
            return Err(FinanceError::DivisionByZero {
                operation: "zero-rate annuity payment",
            });
        }
        return Ok(principal / periods);
    }

    let growth = (1.0 + rate).powf(periods);
    let denominator = growth - 1.0;
    if denominator == 0.0 {
        // Reachable with zero periods, or a rate too small to move 1 + rate
        return Err(FinanceError::DivisionByZero {
            operation: "annuity payment",
        });
    }

    Ok(principal * rate * growth / denominator)
}

/// Annuity payment with a loosely typed period count.
///
/// `periods` must be a JSON number; text such as `"10"` is never coerced
/// and fails with `TypeMismatch`.
pub fn annuity_payment_value(principal: f64, rate: f64, periods: &Value) -> FinanceResult<f64> {
    let periods = numeric(periods, "periods")?;
    annuity_payment(principal, rate, periods)
}

/// One period of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Outstanding balance after this period's payment
    pub balance: f64,
}

/// Period-by-period breakdown of the level payment into interest and principal
pub fn amortization_schedule(principal: f64, rate: f64, periods: u32) -> FinanceResult<Vec<AmortizationRow>> {
    let payment = annuity_payment(principal, rate, periods as f64)?;
    debug!("Amortizing {:.2} over {} periods: payment {:.6}", principal, periods, payment);

    let mut balance = principal;
    let rows = (1..=periods)
        .map(|period| {
            let interest = balance * rate;
            let principal_part = payment - interest;
            balance -= principal_part;
            AmortizationRow {
                period,
                payment,
                interest,
                principal: principal_part,
                balance,
            }
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use serde_json::json;

    #[test]
    fn test_zero_rate_is_linear() {
        assert_relative_eq!(annuity_payment(1000.0, 0.0, 10.0).unwrap(), 100.0);
    }

    #[test]
    fn test_nonzero_rate_formula() {
        let (p, r, n) = (1000.0_f64, 0.05_f64, 10.0_f64);
        let expected = p * (r * (1.0 + r).powf(n)) / ((1.0 + r).powf(n) - 1.0);
        assert_relative_eq!(annuity_payment(p, r, n).unwrap(), expected, max_relative = 1e-12);
        // Standard table value: 129.5046
        assert_abs_diff_eq!(expected, 129.5046, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_rate_zero_periods_is_division_by_zero() {
        let err = annuity_payment(1000.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, FinanceError::DivisionByZero { .. }));
    }

    #[test]
    fn test_nonzero_rate_zero_periods_is_division_by_zero() {
        let err = annuity_payment(1000.0, 0.05, 0.0).unwrap_err();
        assert!(matches!(err, FinanceError::DivisionByZero { .. }));
    }

    #[test]
    fn test_negative_periods_with_zero_rate() {
        assert_eq!(annuity_payment(1000.0, 0.0, -10.0).unwrap(), 1000.0 / -10.0);
    }

    #[test]
    fn test_string_periods_type_mismatch() {
        let err = annuity_payment_value(1000.0, 0.05, &json!("10")).unwrap_err();
        assert!(matches!(err, FinanceError::TypeMismatch { ref field, .. } if field == "periods"));
    }

    #[test]
    fn test_numeric_value_periods() {
        let direct = annuity_payment(1000.0, 0.05, 10.0).unwrap();
        let via_value = annuity_payment_value(1000.0, 0.05, &json!(10)).unwrap();
        assert_eq!(direct, via_value);
    }

    #[test]
    fn test_schedule_pays_off_balance() {
        let schedule = amortization_schedule(1000.0, 0.05, 10).unwrap();
        assert_eq!(schedule.len(), 10);
        assert_eq!(schedule[0].period, 1);
        assert_abs_diff_eq!(schedule[0].interest, 50.0, epsilon = 1e-12);

        let last = schedule.last().unwrap();
        assert_abs_diff_eq!(last.balance, 0.0, epsilon = 1e-9);

        let total_principal: f64 = schedule.iter().map(|r| r.principal).sum();
        assert_abs_diff_eq!(total_principal, 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_schedule_zero_rate_zero_periods() {
        assert!(amortization_schedule(1000.0, 0.0, 0).is_err());
    }
}
