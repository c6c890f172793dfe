//! Ten-quarter price-to-revenue low and high.

use crate::math::ratio;
use crate::{Extreme, Metric, MetricId};
use ronda_totals::AlignmentIndex;
use ronda_traits::Field;

/// Minimum or maximum of `Total(MarketCap_FF) / Total(QuarterlyRevenue)` over
/// a trailing window of quarters.
///
/// Every ratio in the window must be present; a single absent or undefined
/// ratio makes the extreme absent.
#[derive(Debug, Clone, Copy)]
pub struct PrExtreme {
    extreme: Extreme,
    window: usize,
}

impl PrExtreme {
    /// Create a P/R extreme over `window` quarters.
    #[must_use]
    pub const fn new(extreme: Extreme, window: usize) -> Self {
        Self { extreme, window }
    }
}

impl Metric for PrExtreme {
    fn id(&self) -> MetricId {
        MetricId::PrExtreme(self.extreme)
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn required_fields(&self) -> Vec<Field> {
        vec![Field::MarketCapFreeFloat, Field::QuarterlyRevenue]
    }

    fn evaluate(&self, index: &AlignmentIndex, offset: usize) -> Option<f64> {
        let market_cap = index.series(Field::MarketCapFreeFloat);
        let revenue = index.series(Field::QuarterlyRevenue);
        let end = offset.checked_add(self.window)?;

        let mut ratios = (offset..end).map(|k| ratio(market_cap.value_at(k), revenue.value_at(k)));
        let first = ratios.next()??;
        ratios.try_fold(first, |acc, r| {
            let r = r?;
            Some(match self.extreme {
                Extreme::Low => acc.min(r),
                Extreme::High => acc.max(r),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{flat, index};
    use approx::assert_relative_eq;

    fn sample() -> ronda_totals::AlignmentIndex {
        let market_cap: Vec<_> = (0..10).map(|k| Some(1000.0 + 100.0 * k as f64)).collect();
        index(&[
            (Field::MarketCapFreeFloat, &market_cap),
            (Field::QuarterlyRevenue, &flat(100.0, 10)),
        ])
    }

    #[test]
    fn test_low_and_high() {
        let index = sample();

        let low = PrExtreme::new(Extreme::Low, 10).evaluate(&index, 0);
        let high = PrExtreme::new(Extreme::High, 10).evaluate(&index, 0);
        assert_relative_eq!(low.unwrap(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(high.unwrap(), 19.0, epsilon = 1e-12);
    }

    #[test]
    fn test_requires_full_window() {
        let index = sample();

        assert_eq!(PrExtreme::new(Extreme::Low, 10).evaluate(&index, 1), None);
        assert_eq!(PrExtreme::new(Extreme::High, 11).evaluate(&index, 0), None);
        assert_eq!(PrExtreme::new(Extreme::High, 0).evaluate(&index, 0), None);
    }

    #[test]
    fn test_any_absent_ratio_is_not_applicable() {
        let mut revenue = flat(100.0, 10);
        revenue[9] = Some(0.0);
        let index = index(&[
            (Field::MarketCapFreeFloat, &flat(1000.0, 10)),
            (Field::QuarterlyRevenue, &revenue),
        ]);

        assert_eq!(PrExtreme::new(Extreme::Low, 10).evaluate(&index, 0), None);
        assert_relative_eq!(
            PrExtreme::new(Extreme::Low, 9).evaluate(&index, 0).unwrap(),
            10.0,
            epsilon = 1e-12
        );
    }
}
