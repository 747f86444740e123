//! Behavioural properties of the public calculators

use approx::{assert_abs_diff_eq, assert_relative_eq};
use serde_json::json;
use tvm_calc::{
    annuity_payment, annuity_payment_value, calculate_irr, compound_interest,
    internal_rate_of_return, net_present_value, FinanceError,
};

#[test]
fn compound_identities_hold() {
    for &principal in &[100.0, -100.0, 0.0, 12_345.67] {
        for &rate in &[0.05, -0.01, 0.0, 1.5] {
            assert_eq!(compound_interest(principal, rate, 0.0), principal);
        }
        for &periods in &[0.0, 1.0, 7.0, -4.0] {
            assert_eq!(compound_interest(principal, 0.0, periods), principal);
        }
    }
}

#[test]
fn compound_matches_formula() {
    for &(p, r, n) in &[(100.0_f64, 0.05_f64, 2.0_f64), (100.0, -0.01, 3.0), (-100.0, 0.05, 2.0), (5_000.0, 0.004, 360.0)] {
        assert_relative_eq!(compound_interest(p, r, n), p * (1.0 + r).powf(n), max_relative = 1e-12);
    }
}

#[test]
fn annuity_zero_rate_divides_evenly() {
    for &n in &[1.0, 10.0, 12.5, -10.0] {
        assert_eq!(annuity_payment(1000.0, 0.0, n).unwrap(), 1000.0 / n);
    }
}

#[test]
fn annuity_zero_rate_zero_periods_fails() {
    match annuity_payment(1000.0, 0.0, 0.0) {
        Err(FinanceError::DivisionByZero { .. }) => {}
        other => panic!("expected DivisionByZero, got {:?}", other),
    }
}

#[test]
fn annuity_non_numeric_periods_fail() {
    for periods in [json!("10"), json!(null), json!(true), json!([10])] {
        match annuity_payment_value(1000.0, 0.05, &periods) {
            Err(FinanceError::TypeMismatch { .. }) => {}
            other => panic!("expected TypeMismatch for {}, got {:?}", periods, other),
        }
    }
}

#[test]
fn annuity_nonzero_rate_formula() {
    let (p, r, n) = (1000.0_f64, 0.05_f64, 10.0_f64);
    let expected = p * (r * (1.0 + r).powf(n)) / ((1.0 + r).powf(n) - 1.0);
    assert_relative_eq!(annuity_payment(p, r, n).unwrap(), expected, max_relative = 1e-12);
}

#[test]
fn irr_absent_series_fails_for_any_budget() {
    for iterations in [0, 10, 100, 10_000] {
        assert!(matches!(
            internal_rate_of_return(None, iterations),
            Err(FinanceError::TypeMismatch { .. })
        ));
    }
}

#[test]
fn irr_degenerate_series_return_initial_guess() {
    assert_eq!(calculate_irr(&[0.0, 0.0, 0.0], 10), 0.1);
    assert_eq!(calculate_irr(&[-100.0], 10), 0.1);
    assert_eq!(internal_rate_of_return(Some(&[0.0, 0.0, 0.0][..]), 10).unwrap(), 0.1);
}

#[test]
fn irr_two_period_root() {
    assert_relative_eq!(calculate_irr(&[-100.0, 110.0], 100), 0.10, max_relative = 1e-6);
}

#[test]
fn irr_zeroes_npv_for_single_sign_change() {
    let series: [&[f64]; 4] = [
        &[-100.0, 60.0, 60.0],
        &[-1000.0, 300.0, 400.0, 500.0],
        &[-250.0, 0.0, 0.0, 400.0],
        &[5000.0, -1200.0, -1200.0, -1200.0, -1200.0, -1200.0],
    ];
    for flows in series {
        let irr = calculate_irr(flows, 200);
        assert_abs_diff_eq!(net_present_value(flows, irr), 0.0, epsilon = 1e-6);
    }
}

#[test]
fn irr_is_deterministic() {
    let flows = [-100.0, 60.0, 60.0];
    let first = calculate_irr(&flows, 200);
    for _ in 0..5 {
        assert_eq!(calculate_irr(&flows, 200).to_bits(), first.to_bits());
    }
}
