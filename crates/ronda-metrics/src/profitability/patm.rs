//! Profit after tax margin.

use crate::math::ratio;
use crate::{Metric, MetricId};
use ronda_totals::AlignmentIndex;
use ronda_traits::{Field, Measure, Variant};

/// Profit after tax margin on totals, `100 * PAT / Revenue`.
///
/// Computed at the same period; the sign follows the totals, so a loss
/// gives a negative margin. Absent when revenue is absent or zero.
///
/// # Example
///
/// ```ignore
/// use ronda_metrics::profitability::Patm;
/// use ronda_traits::Variant;
///
/// let margin = Patm::new(Variant::TtmFreeFloat);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Patm {
    variant: Variant,
}

impl Patm {
    /// Create a PATM metric for one column series.
    #[must_use]
    pub const fn new(variant: Variant) -> Self {
        Self { variant }
    }
}

impl Metric for Patm {
    fn id(&self) -> MetricId {
        MetricId::Patm
    }

    fn variant(&self) -> Option<Variant> {
        Some(self.variant)
    }

    fn lookback(&self) -> usize {
        0
    }

    fn required_fields(&self) -> Vec<Field> {
        vec![
            self.variant.field(Measure::Pat),
            self.variant.field(Measure::Revenue),
        ]
    }

    fn evaluate(&self, index: &AlignmentIndex, offset: usize) -> Option<f64> {
        let pat = index.series(self.variant.field(Measure::Pat)).value_at(offset);
        let revenue = index
            .series(self.variant.field(Measure::Revenue))
            .value_at(offset);
        ratio(pat, revenue).map(|r| 100.0 * r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::index;
    use approx::assert_relative_eq;

    #[test]
    fn test_patm_scenario() {
        let index = index(&[
            (Field::TtmPat, &[Some(150.0)]),
            (Field::TtmRevenue, &[Some(1000.0)]),
        ]);
        let patm = Patm::new(Variant::Ttm);

        assert_relative_eq!(patm.evaluate(&index, 0).unwrap(), 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_revenue_is_not_applicable() {
        let index = index(&[
            (Field::TtmPat, &[Some(150.0), Some(10.0)]),
            (Field::TtmRevenue, &[Some(0.0), None]),
        ]);
        let patm = Patm::new(Variant::Ttm);

        assert_eq!(patm.evaluate(&index, 0), None);
        assert_eq!(patm.evaluate(&index, 1), None);
        assert_eq!(patm.evaluate(&index, 2), None);
    }

    #[test]
    fn test_negative_pat_keeps_sign() {
        let index = index(&[
            (Field::QuarterlyPatFreeFloat, &[Some(-20.0)]),
            (Field::QuarterlyRevenueFreeFloat, &[Some(400.0)]),
        ]);
        let patm = Patm::new(Variant::QuarterlyFreeFloat);

        assert_relative_eq!(patm.evaluate(&index, 0).unwrap(), -5.0, epsilon = 1e-12);
        assert_eq!(
            patm.required_fields(),
            vec![Field::QuarterlyPatFreeFloat, Field::QuarterlyRevenueFreeFloat]
        );
    }

    #[test]
    fn test_variants_read_their_own_fields() {
        let index = index(&[
            (Field::TtmPat, &[Some(10.0)]),
            (Field::TtmRevenue, &[Some(100.0)]),
        ]);

        assert!(Patm::new(Variant::Ttm).evaluate(&index, 0).is_some());
        assert_eq!(Patm::new(Variant::TtmFreeFloat).evaluate(&index, 0), None);
    }
}
