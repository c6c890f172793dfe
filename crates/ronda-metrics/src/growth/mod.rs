//! Growth metrics computed on portfolio totals.
//!
//! - Sequential growth: quarter-over-quarter and year-over-year change
//! - Compound growth: six-year compound annual growth rate

mod cagr;
mod sequential;

pub use cagr::CompoundGrowth;
pub use sequential::{SequentialGrowth, Step};
