//! JSON request evaluation shared by the Lambda handler
//!
//! Numeric fields are kept as raw JSON values and decoded strictly, so a
//! period count sent as `"10"` surfaces as `TypeMismatch` instead of being
//! silently coerced or rejected by the deserializer with a generic message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::CalcConfig;
use crate::error::{FinanceError, FinanceResult};
use crate::input::{cashflow_series, iteration_count, numeric, whole_count};
use crate::rates::{annualize_rate, IrrSolver};
use crate::tvm::{annuity_payment_value, compound_interest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Compound,
    Annuity,
    Irr,
}

/// Input for a single calculation
#[derive(Debug, Clone, Deserialize)]
pub struct CalcRequest {
    pub operation: Operation,

    #[serde(default)]
    pub principal: Value,

    #[serde(default)]
    pub rate: Value,

    #[serde(default)]
    pub periods: Value,

    /// Cash-flow series for `irr`; null or missing is a type mismatch
    #[serde(default)]
    pub cashflows: Value,

    /// Overrides the configured iteration budget
    #[serde(default)]
    pub iterations: Option<Value>,

    /// Overrides the configured periods per year for annualization; zero keeps the configured value
    #[serde(default)]
    pub periods_per_year: Option<Value>,
}

/// Output of a single calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalcResponse {
    pub operation: Operation,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations_run: Option<u32>,
}

impl CalcResponse {
    fn scalar(operation: Operation, value: f64) -> Self {
        Self {
            operation,
            value,
            annual_rate: None,
            iterations_run: None,
        }
    }
}

/// Evaluate `request` against the shared `config`
pub fn evaluate(request: &CalcRequest, config: &CalcConfig) -> FinanceResult<CalcResponse> {
    match request.operation {
        Operation::Compound => {
            let principal = numeric(&request.principal, "principal")?;
            let rate = numeric(&request.rate, "rate")?;
            let periods = numeric(&request.periods, "periods")?;
            Ok(CalcResponse::scalar(Operation::Compound, compound_interest(principal, rate, periods)))
        }

        Operation::Annuity => {
            let principal = numeric(&request.principal, "principal")?;
            let rate = numeric(&request.rate, "rate")?;
            let payment = annuity_payment_value(principal, rate, &request.periods)?;
            Ok(CalcResponse::scalar(Operation::Annuity, payment))
        }

        Operation::Irr => {
            let cashflows = cashflow_series(&request.cashflows)?.ok_or_else(|| {
                FinanceError::type_mismatch("cashflows", "sequence of numbers", "null")
            })?;

            let iterations = match &request.iterations {
                Some(value) => iteration_count(value)?,
                None => config.iterations,
            };
            let periods_per_year = request
                .periods_per_year
                .as_ref()
                .map(|value| whole_count(value, "periods_per_year"))
                .transpose()?
                .filter(|&k| k > 0)
                .unwrap_or(config.periods_per_year);

            let outcome = IrrSolver::from_config(config)
                .iterations(iterations)
                .solve(&cashflows);

            Ok(CalcResponse {
                operation: Operation::Irr,
                value: outcome.rate,
                annual_rate: Some(annualize_rate(outcome.rate, periods_per_year)),
                iterations_run: Some(outcome.iterations_run),
            })
        }
    }
}
