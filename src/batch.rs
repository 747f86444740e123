//! Batch runner for estimating IRRs over many cash-flow series
//!
//! Each series is independent, so the batch is evaluated in parallel with
//! rayon. Output order always matches input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::config::CalcConfig;
use crate::input::CashflowSeries;
use crate::rates::{annualize_rate, IrrSolver};

/// Per-series IRR result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrrResult {
    pub id: String,
    /// Periodic rate
    pub rate: f64,
    /// Effective annual rate using the configured periods per year
    pub annual_rate: f64,
    pub iterations_run: u32,
    pub npv_at_rate: f64,
    pub stopped_on_flat_derivative: bool,
}

/// Runs IRR estimates with one shared configuration
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::new(CalcConfig::from_env());
/// let results = runner.irr_batch(&load_cashflows("flows.csv")?);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    config: CalcConfig,
}

impl BatchRunner {
    pub fn new(config: CalcConfig) -> Self {
        Self { config }
    }

    /// Estimate the IRR of a single series
    pub fn run(&self, series: &CashflowSeries) -> IrrResult {
        let outcome = IrrSolver::from_config(&self.config).solve(&series.flows);
        IrrResult {
            id: series.id.clone(),
            rate: outcome.rate,
            annual_rate: annualize_rate(outcome.rate, self.config.periods_per_year),
            iterations_run: outcome.iterations_run,
            npv_at_rate: outcome.npv_at_rate,
            stopped_on_flat_derivative: outcome.stopped_on_flat_derivative,
        }
    }

    /// Estimate IRRs for every series in parallel
    pub fn irr_batch(&self, series: &[CashflowSeries]) -> Vec<IrrResult> {
        log::info!(
            "Estimating IRR for {} series ({} iterations each)",
            series.len(),
            self.config.iterations
        );
        series.par_iter().map(|s| self.run(s)).collect()
    }

    pub fn config(&self) -> &CalcConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_series() -> Vec<CashflowSeries> {
        (1..=40)
            .map(|i| {
                let payoff = 100.0 + i as f64;
                CashflowSeries::new(format!("s{}", i), vec![-100.0, payoff])
            })
            .collect()
    }

    #[test]
    fn test_batch_matches_sequential() {
        let runner = BatchRunner::default();
        let series = sample_series();

        let parallel = runner.irr_batch(&series);
        let sequential: Vec<_> = series.iter().map(|s| runner.run(s)).collect();

        assert_eq!(parallel.len(), series.len());
        for (p, s) in parallel.iter().zip(&sequential) {
            assert_eq!(p.id, s.id);
            assert_eq!(p.rate.to_bits(), s.rate.to_bits());
        }
    }

    #[test]
    fn test_batch_rates() {
        let runner = BatchRunner::default();
        let results = runner.irr_batch(&sample_series());

        // -100 then 100 + i one period later is an i% return
        for (i, result) in results.iter().enumerate() {
            let expected = (i + 1) as f64 / 100.0;
            assert_relative_eq!(result.rate, expected, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_degenerate_series_in_batch() {
        let runner = BatchRunner::default();
        let results = runner.irr_batch(&[CashflowSeries::new("flat", vec![0.0, 0.0, 0.0])]);
        assert_eq!(results[0].rate, 0.1);
        assert!(results[0].stopped_on_flat_derivative);
    }

    #[test]
    fn test_annualized_output() {
        let runner = BatchRunner::new(CalcConfig {
            periods_per_year: 12,
            ..CalcConfig::default()
        });
        assert_eq!(runner.config().periods_per_year, 12);

        let mut flows = vec![-1000.0];
        flows.extend(vec![0.0; 11]);
        flows.push(1100.0);

        let result = runner.run(&CashflowSeries::new("monthly", flows));
        assert_relative_eq!(result.annual_rate, 0.10, max_relative = 1e-6);
    }
}
