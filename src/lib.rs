//! TVM Calc - Time-value-of-money primitives
//!
//! This library provides:
//! - Compound interest (future value of a single principal)
//! - Level annuity payments and amortization schedules
//! - Internal rate of return estimation (Newton-Raphson with a fixed budget)
//! - Strict decoding of loosely typed inputs and CSV cash-flow loading
//! - Parallel batch IRR evaluation
//! - JSON request evaluation for the Lambda front end

pub mod error;
pub mod config;
pub mod tvm;
pub mod rates;
pub mod input;
pub mod batch;
pub mod request;

// Re-export commonly used types
pub use error::{FinanceError, FinanceResult};
pub use config::CalcConfig;
pub use tvm::{compound_interest, annuity_payment, annuity_payment_value, amortization_schedule, AmortizationRow};
pub use rates::{calculate_irr, internal_rate_of_return, net_present_value, IrrSolver, IrrOutcome};
pub use input::CashflowSeries;
pub use batch::{BatchRunner, IrrResult};
