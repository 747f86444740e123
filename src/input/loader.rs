//! Load cash-flow series from CSV
//!
//! Expected columns: `series_id,period,amount`. Rows may appear in any
//! order; each series must cover periods 0..=k with no gaps or duplicates.

use csv::Reader;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{FinanceError, FinanceResult};

/// Raw CSV row
#[derive(Debug, Deserialize)]
struct CsvRow {
    series_id: String,
    period: u32,
    amount: f64,
}

/// A named, equally spaced cash-flow series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowSeries {
    pub id: String,
    pub flows: Vec<f64>,
}

impl CashflowSeries {
    pub fn new(id: impl Into<String>, flows: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            flows,
        }
    }
}

/// Load all series from a CSV file
pub fn load_cashflows<P: AsRef<Path>>(path: P) -> FinanceResult<Vec<CashflowSeries>> {
    let reader = Reader::from_path(path)?;
    collect_series(reader)
}

/// Load series from any reader (e.g., string buffer, stdin)
pub fn load_cashflows_from_reader<R: std::io::Read>(reader: R) -> FinanceResult<Vec<CashflowSeries>> {
    collect_series(Reader::from_reader(reader))
}

fn collect_series<R: std::io::Read>(mut reader: Reader<R>) -> FinanceResult<Vec<CashflowSeries>> {
    let mut grouped: BTreeMap<String, BTreeMap<u32, f64>> = BTreeMap::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let periods = grouped.entry(row.series_id.clone()).or_default();
        if periods.insert(row.period, row.amount).is_some() {
            return Err(FinanceError::invalid_input(format!(
                "series {} has duplicate period {}",
                row.series_id, row.period
            )));
        }
    }

    let mut series = Vec::with_capacity(grouped.len());
    for (id, periods) in grouped {
        for (expected, &actual) in periods.keys().enumerate() {
            if actual as usize != expected {
                return Err(FinanceError::invalid_input(format!(
                    "series {} is missing period {}",
                    id, expected
                )));
            }
        }
        series.push(CashflowSeries::new(id, periods.into_values().collect()));
    }

    log::debug!("Loaded {} cash-flow series", series.len());
    Ok(series)
}
