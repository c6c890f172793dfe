//! Valuation metrics on free-float market capitalization.
//!
//! - Current PE and PR at the matching period
//! - 2-year and 5-year average multiples, and their reval/deval
//! - 10-quarter P/R low and high
//!
//! Market, TTM and quarterly totals are aligned by offset: the multiple at
//! offset `k` divides the market total at `k` by the fundamental total at `k`.

mod averages;
mod extremes;
mod multiples;

pub use averages::{AverageMultiple, RevalDeval};
pub use extremes::PrExtreme;
pub use multiples::CurrentMultiple;
