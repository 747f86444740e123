//! Closed-form time-value-of-money formulas
//!
//! - Compound growth of a single principal
//! - Level annuity payments and their amortization schedules

mod compound;
mod annuity;

pub use compound::compound_interest;
pub use annuity::{annuity_payment, annuity_payment_value, amortization_schedule, AmortizationRow};
