//! Compound interest

/// Future value of `principal` after `periods` periods at a per-period `rate`.
///
/// Computes `principal * (1 + rate)^periods`. Total over finite inputs;
/// extreme values may overflow to infinity.
pub fn compound_interest(principal: f64, rate: f64, periods: f64) -> f64 {
    principal * (1.0 + rate).powf(periods)
}
