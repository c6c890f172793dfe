//! Profitability metrics computed on portfolio totals.
//!
//! - PATM: profit after tax as a percentage of revenue

mod patm;

pub use patm::Patm;
