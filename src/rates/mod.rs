//! Discounting and rate-of-return estimation for periodic cash-flow series

mod npv;
mod irr;

pub use npv::{net_present_value, npv_derivative, npv_and_derivative, annualize_rate};
pub use irr::{
    calculate_irr, calculate_annual_irr, internal_rate_of_return,
    IrrSolver, IrrOutcome, DEFAULT_INITIAL_GUESS,
};
