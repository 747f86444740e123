//! Strict numeric decoding of JSON values
//!
//! Only JSON numbers are accepted where a number is expected. Text, booleans
//! and null are rejected with `TypeMismatch` rather than coerced.

use serde_json::Value;

use crate::error::{FinanceError, FinanceResult};

/// Short description of a value's JSON type for error messages
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(items) => format!("array of {} items", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

/// Decode a number, failing on any other JSON type
pub fn numeric(value: &Value, field: &str) -> FinanceResult<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| FinanceError::type_mismatch(field, "number", describe(value))),
        other => Err(FinanceError::type_mismatch(field, "number", describe(other))),
    }
}

/// Decode a cash-flow series.
///
/// `null` means the series is absent and is returned as `None`; the caller
/// decides whether that is an error. Every element must be a number.
pub fn cashflow_series(value: &Value) -> FinanceResult<Option<Vec<f64>>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| numeric(item, &format!("cashflows[{}]", i)))
            .collect::<FinanceResult<Vec<f64>>>()
            .map(Some),
        other => Err(FinanceError::type_mismatch(
            "cashflows",
            "sequence of numbers",
            describe(other),
        )),
    }
}

/// Decode a non-negative integer that fits in `u32`
pub fn whole_count(value: &Value, field: &str) -> FinanceResult<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| FinanceError::type_mismatch(field, "non-negative integer", describe(value)))
}

/// Decode a non-negative integer iteration budget
pub fn iteration_count(value: &Value) -> FinanceResult<u32> {
    whole_count(value, "iterations")
}
