//! Internal Rate of Return (IRR) estimation
//!
//! Newton-Raphson on the NPV function with a caller-supplied iteration
//! budget. The loop always runs the full budget unless the NPV derivative
//! is exactly zero, in which case the current estimate is returned as is.
//! Rates are never clamped between steps; a divergent series simply
//! produces a divergent (possibly non-finite) estimate.

use log::{debug, trace, warn};
use serde::Serialize;

use super::npv::{annualize_rate, net_present_value, npv_and_derivative};
use crate::error::{FinanceError, FinanceResult};

/// Starting rate for every estimate (10% per period)
pub const DEFAULT_INITIAL_GUESS: f64 = 0.1;

/// Estimate the periodic IRR of `cashflows` using `iterations` Newton steps.
///
/// # Arguments
/// * `cashflows` - Flows per period, index 0 undiscounted (negative = outflow)
/// * `iterations` - Hard upper bound on Newton steps
///
/// # Returns
/// The final rate estimate. Single-entry, all-zero and empty series have a
/// structurally zero derivative and return `DEFAULT_INITIAL_GUESS` unchanged.
pub fn calculate_irr(cashflows: &[f64], iterations: u32) -> f64 {
    IrrSolver::new().iterations(iterations).solve(cashflows).rate
}

/// Checked entry point: an absent series is a usage error, not a domain answer
pub fn internal_rate_of_return(cashflows: Option<&[f64]>, iterations: u32) -> FinanceResult<f64> {
    let cashflows = cashflows
        .ok_or_else(|| FinanceError::type_mismatch("cashflows", "sequence of numbers", "null"))?;
    Ok(calculate_irr(cashflows, iterations))
}

/// Periodic IRR converted to an effective annual rate.
///
/// Monthly flows use `periods_per_year = 12`.
pub fn calculate_annual_irr(cashflows: &[f64], periods_per_year: u32, iterations: u32) -> f64 {
    annualize_rate(calculate_irr(cashflows, iterations), periods_per_year)
}

/// Diagnostics from a single estimator run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IrrOutcome {
    /// Final rate estimate
    pub rate: f64,
    /// Newton steps actually applied
    pub iterations_run: u32,
    /// NPV evaluated at `rate`
    pub npv_at_rate: f64,
    /// True when the loop stopped because the derivative was exactly zero
    pub stopped_on_flat_derivative: bool,
}

impl IrrOutcome {
    pub fn is_finite(&self) -> bool {
        self.rate.is_finite()
    }
}

/// Configurable Newton-Raphson IRR estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrSolver {
    initial_guess: f64,
    iterations: u32,
    tolerance: Option<f64>,
}

impl Default for IrrSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IrrSolver {
    pub fn new() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            iterations: crate::config::DEFAULT_IRR_ITERATIONS,
            tolerance: None,
        }
    }

    /// Solver configured from shared calculation settings.
    ///
    /// The starting guess is always `DEFAULT_INITIAL_GUESS`.
    pub fn from_config(config: &crate::config::CalcConfig) -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            iterations: config.iterations,
            tolerance: config.tolerance,
        }
    }

    pub fn initial_guess(mut self, guess: f64) -> Self {
        self.initial_guess = guess;
        self
    }

    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Stop early once a Newton step moves the rate by less than `tolerance`.
    ///
    /// Without a tolerance the full iteration budget is always spent.
    pub fn tolerance(mut self, tolerance: Option<f64>) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Run the estimator on `cashflows`
    pub fn solve(&self, cashflows: &[f64]) -> IrrOutcome {
        let mut rate = self.initial_guess;
        let mut iterations_run = 0;
        let mut stopped_on_flat_derivative = false;

        for _ in 0..self.iterations {
            let (npv, dnpv) = npv_and_derivative(cashflows, rate);

            // Exact comparison: only a structurally flat NPV curve stops here
            if dnpv == 0.0 {
                debug!("NPV derivative is zero at rate {}, returning current estimate", rate);
                stopped_on_flat_derivative = true;
                break;
            }

            let step = npv / dnpv;
            rate -= step;
            iterations_run += 1;
            trace!("IRR iteration {}: rate={} npv={} dnpv={}", iterations_run, rate, npv, dnpv);

            if let Some(tol) = self.tolerance {
                if step.abs() < tol {
                    break;
                }
            }
        }

        if !rate.is_finite() {
            warn!(
                "IRR estimate diverged after {} iterations over {} cash flows",
                iterations_run,
                cashflows.len()
            );
        }

        IrrOutcome {
            rate,
            iterations_run,
            npv_at_rate: net_present_value(cashflows, rate),
            stopped_on_flat_derivative,
        }
    }
}
