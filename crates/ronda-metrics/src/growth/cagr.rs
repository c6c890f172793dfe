//! Compound annual growth rate.

use crate::math::compound_rate;
use crate::{Metric, MetricId};
use ronda_totals::AlignmentIndex;
use ronda_traits::{Field, Measure, Variant};

/// Compound annual growth rate `(Total(0) / Total(lag))^(1 / years) - 1`.
///
/// The default shape compares the current total with the one 23 periods
/// back, annualised over six years. Absent unless both totals are present and
/// strictly positive.
#[derive(Debug, Clone, Copy)]
pub struct CompoundGrowth {
    measure: Measure,
    variant: Variant,
    lag: usize,
    years: u32,
}

impl CompoundGrowth {
    /// Create a compound growth metric.
    #[must_use]
    pub const fn new(measure: Measure, variant: Variant, lag: usize, years: u32) -> Self {
        Self {
            measure,
            variant,
            lag,
            years,
        }
    }
}

impl Metric for CompoundGrowth {
    fn id(&self) -> MetricId {
        MetricId::SixYearCagr(self.measure)
    }

    fn variant(&self) -> Option<Variant> {
        Some(self.variant)
    }

    fn lookback(&self) -> usize {
        self.lag
    }

    fn required_fields(&self) -> Vec<Field> {
        vec![self.variant.field(self.measure)]
    }

    fn evaluate(&self, index: &AlignmentIndex, offset: usize) -> Option<f64> {
        let series = index.series(self.variant.field(self.measure));
        let start = series.value_at(offset.checked_add(self.lag)?);
        compound_rate(series.value_at(offset), start, self.years)
    }
}
