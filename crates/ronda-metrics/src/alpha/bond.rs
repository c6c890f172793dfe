//! Bond benchmark and alpha over it.

use crate::alpha::{Growth, PeYield};
use crate::math::{finite, power, root};
use crate::{Metric, MetricId};
use ronda_totals::AlignmentIndex;
use ronda_traits::Field;

/// Alpha over the bond benchmark, in percent.
///
/// Starts from 100, accrues `100 * pe_yield * (1 + growth)^y` for each year
/// `y` in `0..years`, annualises the compounded total over `years` and
/// subtracts `bond_rate`:
///
/// ```text
/// total = 100 + sum(100 * pe_yield * (1 + growth)^y)
/// alpha = ((total / 100)^(1 / years) - 1) * 100 - bond_rate
/// ```
///
/// `pe_yield` and `growth` are decimals, `bond_rate` is in percent. Returns
/// `None` when the compounded total is not strictly positive.
#[must_use]
pub fn alpha_over_bond(pe_yield: f64, growth: f64, bond_rate: f64, years: u32) -> Option<f64> {
    let accrued: f64 = (0..years)
        .map(|y| 100.0 * pe_yield * (1.0 + growth).powf(f64::from(y)))
        .sum();
    let annual = root((100.0 + accrued) / 100.0, years)?;
    finite((annual - 1.0) * 100.0 - bond_rate)
}

/// Absolute alpha over `years`, `((1 + alpha / 100)^years - 1) * 100`.
///
/// Both input and output are in percent. Returns `None` when
/// `1 + alpha / 100` is not strictly positive.
#[must_use]
pub fn absolute_alpha(alpha_bond_cagr: f64, years: u32) -> Option<f64> {
    power(1.0 + alpha_bond_cagr / 100.0, years).map(|v| (v - 1.0) * 100.0)
}

/// The bond benchmark rate, in percent. Always present.
#[derive(Debug, Clone, Copy)]
pub struct BondRate {
    rate: f64,
}

impl BondRate {
    /// Create the bond rate metric.
    #[must_use]
    pub const fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl Metric for BondRate {
    fn id(&self) -> MetricId {
        MetricId::BondRate
    }

    fn lookback(&self) -> usize {
        0
    }

    fn required_fields(&self) -> Vec<Field> {
        Vec::new()
    }

    fn evaluate(&self, _index: &AlignmentIndex, _offset: usize) -> Option<f64> {
        Some(self.rate)
    }
}

/// Alpha over the bond benchmark from PE yield and growth, in percent.
///
/// See [`alpha_over_bond`]. Absent when PE yield or growth is absent.
#[derive(Debug, Clone, Copy)]
pub struct AlphaBondCagr {
    pe_yield: PeYield,
    growth: Growth,
    bond_rate: f64,
    years: u32,
}

impl AlphaBondCagr {
    /// Create the alpha metric.
    #[must_use]
    pub const fn new(growth: Growth, bond_rate: f64, years: u32) -> Self {
        Self {
            pe_yield: PeYield::new(),
            growth,
            bond_rate,
            years,
        }
    }
}

impl Metric for AlphaBondCagr {
    fn id(&self) -> MetricId {
        MetricId::AlphaBondCagr
    }

    fn lookback(&self) -> usize {
        self.growth.lookback()
    }

    fn required_fields(&self) -> Vec<Field> {
        let mut fields = self.pe_yield.required_fields();
        fields.extend(self.growth.required_fields());
        fields.dedup();
        fields
    }

    fn evaluate(&self, index: &AlignmentIndex, offset: usize) -> Option<f64> {
        let pe_yield = self.pe_yield.evaluate(index, offset)?;
        let growth = self.growth.evaluate(index, offset)?;
        alpha_over_bond(pe_yield, growth, self.bond_rate, self.years)
    }
}

/// Absolute alpha compounded from [`AlphaBondCagr`], in percent.
#[derive(Debug, Clone, Copy)]
pub struct AlphaAbsolute {
    alpha: AlphaBondCagr,
}

impl AlphaAbsolute {
    /// Create the absolute alpha metric.
    #[must_use]
    pub const fn new(alpha: AlphaBondCagr) -> Self {
        Self { alpha }
    }
}

impl Metric for AlphaAbsolute {
    fn id(&self) -> MetricId {
        MetricId::AlphaAbsolute
    }

    fn lookback(&self) -> usize {
        self.alpha.lookback()
    }

    fn required_fields(&self) -> Vec<Field> {
        self.alpha.required_fields()
    }

    fn evaluate(&self, index: &AlignmentIndex, offset: usize) -> Option<f64> {
        absolute_alpha(self.alpha.evaluate(index, offset)?, self.alpha.years)
    }
}
