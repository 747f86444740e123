//! Input boundary: loosely typed values and CSV cash-flow files

mod value;
pub mod loader;

pub use value::{numeric, cashflow_series, iteration_count, whole_count, describe};
pub use loader::{CashflowSeries, load_cashflows, load_cashflows_from_reader};
