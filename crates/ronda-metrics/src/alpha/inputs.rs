//! PE yield and growth.

use crate::growth::CompoundGrowth;
use crate::math::ratio;
use crate::valuation::CurrentMultiple;
use crate::{GrowthSource, Metric, MetricId, Multiple};
use ronda_totals::AlignmentIndex;
use ronda_traits::Field;

/// Earnings yield `1 / CurrentPE`, as a decimal.
///
/// Absent when the current PE is absent or zero.
#[derive(Debug, Clone, Copy)]
pub struct PeYield {
    pe: CurrentMultiple,
}

impl PeYield {
    /// Create a PE yield metric.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pe: CurrentMultiple::new(Multiple::Pe),
        }
    }
}

impl Default for PeYield {
    fn default() -> Self {
        Self::new()
    }
}

impl Metric for PeYield {
    fn id(&self) -> MetricId {
        MetricId::PeYield
    }

    fn lookback(&self) -> usize {
        0
    }

    fn required_fields(&self) -> Vec<Field> {
        self.pe.required_fields()
    }

    fn evaluate(&self, index: &AlignmentIndex, offset: usize) -> Option<f64> {
        ratio(Some(1.0), self.pe.evaluate(index, offset))
    }
}

/// Growth rate feeding the alpha metrics, as a decimal.
///
/// Passes the configured compound growth series through unchanged; it is
/// never re-derived from other totals. Absent when the source is absent.
#[derive(Debug, Clone, Copy)]
pub struct Growth {
    source: CompoundGrowth,
}

impl Growth {
    /// Create a growth pass-through of `source`, using the given compound
    /// growth shape.
    #[must_use]
    pub const fn new(source: GrowthSource, lag: usize, years: u32) -> Self {
        Self {
            source: CompoundGrowth::new(source.measure, source.variant, lag, years),
        }
    }
}

impl Metric for Growth {
    fn id(&self) -> MetricId {
        MetricId::Growth
    }

    fn lookback(&self) -> usize {
        self.source.lookback()
    }

    fn required_fields(&self) -> Vec<Field> {
        self.source.required_fields()
    }

    fn evaluate(&self, index: &AlignmentIndex, offset: usize) -> Option<f64> {
        self.source.evaluate(index, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timeline;
    use crate::testing::{flat, index};
    use approx::assert_relative_eq;
    use ronda_traits::{Measure, Variant};

    #[test]
    fn test_pe_yield() {
        let index = index(&[
            (Field::MarketCapFreeFloat, &[Some(2000.0), Some(1000.0)]),
            (Field::TtmPat, &[Some(100.0), Some(0.0)]),
        ]);

        assert_relative_eq!(PeYield::new().evaluate(&index, 0).unwrap(), 0.05, epsilon = 1e-12);
        assert_eq!(PeYield::new().evaluate(&index, 1), None);
    }

    #[test]
    fn test_growth_passes_source_through() {
        let mut revenue = flat(100.0, 24);
        revenue[0] = Some(200.0);
        let index = index(&[(Field::TtmRevenue, &revenue)]);
        let source = CompoundGrowth::new(Measure::Revenue, Variant::Ttm, 23, 6);
        let growth = Growth::new(GrowthSource::default(), 23, 6);

        assert_eq!(growth.evaluate(&index, 0), source.evaluate(&index, 0));
        assert_eq!(growth.evaluate(&index, 1), None);
        assert_eq!(growth.timeline(), Timeline::Portfolio);
        assert_eq!(growth.lookback(), 23);
    }

    #[test]
    fn test_growth_source_is_configurable() {
        let mut pat = flat(50.0, 24);
        pat[0] = Some(100.0);
        let index = index(&[(Field::TtmPatFreeFloat, &pat)]);
        let source = GrowthSource {
            measure: Measure::Pat,
            variant: Variant::TtmFreeFloat,
        };

        let growth = Growth::new(source, 23, 6).evaluate(&index, 0).unwrap();
        assert_relative_eq!(growth, 2.0_f64.powf(1.0 / 6.0) - 1.0, epsilon = 1e-12);
        assert_eq!(
            Growth::new(GrowthSource::default(), 23, 6).evaluate(&index, 0),
            None
        );
    }
}
