//! Alpha over the bond benchmark and its inputs.
//!
//! - PE yield: earnings yield of the portfolio, `1 / PE`
//! - Growth: a compound growth series passed through unchanged
//! - Bond rate: the benchmark constant
//! - Alpha (bond CAGR) and alpha (absolute)

mod bond;
mod inputs;

pub use bond::{AlphaAbsolute, AlphaBondCagr, BondRate, absolute_alpha, alpha_over_bond};
pub use inputs::{Growth, PeYield};
