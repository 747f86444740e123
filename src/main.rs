//! TVM command-line interface
//!
//! Evaluates compound interest, annuity payments and IRR estimates from the
//! command line. Defaults for the IRR estimator come from `TVM_*`
//! environment variables (see `CalcConfig::from_env`); flags override them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use tvm_calc::input::load_cashflows;
use tvm_calc::rates::annualize_rate;
use tvm_calc::{
    amortization_schedule, annuity_payment, compound_interest, BatchRunner, CalcConfig, IrrSolver,
};

#[derive(Parser, Debug)]
#[command(name = "tvm", version, about = "Time-value-of-money calculator")]
struct Cli {
    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Future value of a principal under compound interest
    Compound {
        #[arg(long, allow_hyphen_values = true)]
        principal: f64,
        /// Per-period rate as a decimal (0.05 = 5%)
        #[arg(long, allow_hyphen_values = true)]
        rate: f64,
        #[arg(long, allow_hyphen_values = true)]
        periods: f64,
    },
    /// Level payment that amortizes a principal
    Annuity {
        #[arg(long, allow_hyphen_values = true)]
        principal: f64,
        #[arg(long, allow_hyphen_values = true)]
        rate: f64,
        #[arg(long, allow_hyphen_values = true)]
        periods: f64,
        /// Also print the period-by-period amortization schedule
        #[arg(long)]
        schedule: bool,
    },
    /// Internal rate of return of a comma-separated cash-flow series
    Irr {
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        cashflows: Vec<f64>,
        #[arg(long)]
        iterations: Option<u32>,
        /// Periods per year used to annualize the periodic rate
        #[arg(long)]
        periods_per_year: Option<u32>,
    },
    /// IRR for every series in a CSV file (series_id,period,amount)
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        iterations: Option<u32>,
        #[arg(long)]
        periods_per_year: Option<u32>,
    },
}

#[derive(Serialize)]
struct ValueOutput {
    operation: &'static str,
    value: f64,
}

#[derive(Serialize)]
struct IrrOutput {
    rate: f64,
    annual_rate: f64,
    iterations_run: u32,
    npv_at_rate: f64,
    stopped_on_flat_derivative: bool,
}

fn config_with_overrides(iterations: Option<u32>, periods_per_year: Option<u32>) -> CalcConfig {
    let mut config = CalcConfig::from_env();
    if let Some(n) = iterations {
        config.iterations = n;
    }
    if let Some(k) = periods_per_year.filter(|&k| k > 0) {
        config.periods_per_year = k;
    }
    config
}

/// Largest schedule the CLI will build (100 years of daily periods)
const MAX_SCHEDULE_PERIODS: u32 = 36_500;

/// Period count for `--schedule`: whole, non-negative and within `MAX_SCHEDULE_PERIODS`
fn schedule_periods(periods: f64) -> Result<u32> {
    if !periods.is_finite() || periods < 0.0 || periods.fract() != 0.0 {
        anyhow::bail!("--schedule requires a whole, non-negative period count, got {}", periods);
    }
    if periods > MAX_SCHEDULE_PERIODS as f64 {
        anyhow::bail!(
            "--schedule supports at most {} periods, got {}",
            MAX_SCHEDULE_PERIODS,
            periods
        );
    }
    Ok(periods as u32)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Compound { principal, rate, periods } => {
            let value = compound_interest(principal, rate, periods);
            if cli.json {
                print_json(&ValueOutput { operation: "compound", value })?;
            } else {
                println!("Future value: {:.6}", value);
            }
        }

        Command::Annuity { principal, rate, periods, schedule } => {
            let payment = annuity_payment(principal, rate, periods)
                .context("Failed to compute annuity payment")?;

            let rows = if schedule {
                Some(amortization_schedule(principal, rate, schedule_periods(periods)?)?)
            } else {
                None
            };

            if cli.json {
                match rows {
                    Some(rows) => print_json(&rows)?,
                    None => print_json(&ValueOutput { operation: "annuity", value: payment })?,
                }
            } else {
                println!("Payment per period: {:.6}", payment);
                if let Some(rows) = rows {
                    println!("{:>6} {:>14} {:>14} {:>14} {:>14}", "Period", "Payment", "Interest", "Principal", "Balance");
                    println!("{}", "-".repeat(66));
                    for row in &rows {
                        println!("{:>6} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
                            row.period, row.payment, row.interest, row.principal, row.balance);
                    }
                }
            }
        }

        Command::Irr { cashflows, iterations, periods_per_year } => {
            let config = config_with_overrides(iterations, periods_per_year);
            let outcome = IrrSolver::from_config(&config).solve(&cashflows);
            let output = IrrOutput {
                rate: outcome.rate,
                annual_rate: annualize_rate(outcome.rate, config.periods_per_year),
                iterations_run: outcome.iterations_run,
                npv_at_rate: outcome.npv_at_rate,
                stopped_on_flat_derivative: outcome.stopped_on_flat_derivative,
            };

            if cli.json {
                print_json(&output)?;
            } else {
                println!("IRR (periodic): {:.8}", output.rate);
                if config.periods_per_year > 1 {
                    println!("IRR (annual):   {:.8}", output.annual_rate);
                }
                println!("NPV at rate:    {:.3e}", output.npv_at_rate);
                println!("Iterations:     {}", output.iterations_run);
            }
        }

        Command::Batch { input, iterations, periods_per_year } => {
            let series = load_cashflows(&input)
                .with_context(|| format!("Failed to load cash flows from {}", input.display()))?;
            let runner = BatchRunner::new(config_with_overrides(iterations, periods_per_year));
            let results = runner.irr_batch(&series);

            if cli.json {
                print_json(&results)?;
            } else {
                let config = runner.config();
                println!("{} series, {} iterations each, {} periods per year\n",
                    results.len(), config.iterations, config.periods_per_year);
                println!("{:<20} {:>14} {:>14} {:>12}", "Series", "Rate", "Annual", "NPV");
                println!("{}", "-".repeat(63));
                for r in &results {
                    println!("{:<20} {:>14.8} {:>14.8} {:>12.3e}", r.id, r.rate, r.annual_rate, r.npv_at_rate);
                }
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    run(Cli::parse())
}
