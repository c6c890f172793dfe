//! Engine configuration.

use ronda_traits::{Measure, Result, RondaError, Variant};
use serde::{Deserialize, Serialize};

/// Bond benchmark: 7.31% long bond yield at a 70% post-tax factor.
pub const DEFAULT_BOND_RATE: f64 = 7.31 * 0.7;

/// The compound growth series the Growth metric passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthSource {
    /// Revenue or profit after tax.
    pub measure: Measure,
    /// Which of the four column series to read.
    pub variant: Variant,
}

impl Default for GrowthSource {
    fn default() -> Self {
        Self {
            measure: Measure::Revenue,
            variant: Variant::Ttm,
        }
    }
}

/// Configuration for the metric derivation engine.
///
/// Window sizes and lags are counted in periods of the relevant family. The
/// averaging and extremes windows are checked against reference exports
/// rather than derived, so they are configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Periods averaged for 2-year PE/PR averages (default: 8)
    pub two_year_window: usize,

    /// Periods averaged for 5-year PE/PR averages (default: 20)
    pub five_year_window: usize,

    /// Quarters scanned for the P/R low and high (default: 10)
    pub extremes_window: usize,

    /// Lag of the quarter-over-quarter comparison (default: 1)
    pub qoq_lag: usize,

    /// Lag of the year-over-year comparison (default: 4)
    pub yoy_lag: usize,

    /// Lag of the start point of the compound growth rate (default: 23)
    pub cagr_lag: usize,

    /// Years the compound growth rate is annualised over (default: 6)
    pub cagr_years: u32,

    /// Bond benchmark rate in percent (default: 5.117)
    pub bond_rate: f64,

    /// Compounding horizon of the alpha metrics in years (default: 10)
    pub alpha_years: u32,

    /// Series feeding the Growth metric (default: TTM revenue)
    pub growth_source: GrowthSource,

    /// Maximum number of period columns emitted per family (default: all)
    pub max_periods: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            two_year_window: 8,
            five_year_window: 20,
            extremes_window: 10,
            qoq_lag: 1,
            yoy_lag: 4,
            cagr_lag: 23,
            cagr_years: 6,
            bond_rate: DEFAULT_BOND_RATE,
            alpha_years: 10,
            growth_source: GrowthSource::default(),
            max_periods: None,
        }
    }
}

impl EngineConfig {
    /// Checks that every window, lag and horizon is usable.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::Config`] naming the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("two_year_window", self.two_year_window),
            ("five_year_window", self.five_year_window),
            ("extremes_window", self.extremes_window),
            ("qoq_lag", self.qoq_lag),
            ("yoy_lag", self.yoy_lag),
            ("cagr_lag", self.cagr_lag),
            ("cagr_years", self.cagr_years as usize),
            ("alpha_years", self.alpha_years as usize),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(RondaError::Config(format!("{name} must be greater than zero")));
        }
        if !self.bond_rate.is_finite() {
            return Err(RondaError::Config("bond_rate must be finite".to_string()));
        }
        if self.max_periods == Some(0) {
            return Err(RondaError::Config(
                "max_periods must be greater than zero when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of period columns to emit for a family with `available` periods.
    #[must_use]
    pub fn columns(&self, available: usize) -> usize {
        self.max_periods.map_or(available, |cap| available.min(cap))
    }
}
