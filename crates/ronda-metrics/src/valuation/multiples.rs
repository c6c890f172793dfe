//! Current PE and PR.

use crate::math::ratio;
use crate::{Metric, MetricId, Multiple};
use ronda_totals::AlignmentIndex;
use ronda_traits::{Field, FieldFamily};

/// Current multiple, `Total(MarketCap_FF) / Total(TTM denominator)`.
///
/// PE divides by TTM profit after tax, PR by TTM revenue. Absent when the
/// denominator total is absent or zero.
#[derive(Debug, Clone, Copy)]
pub struct CurrentMultiple {
    multiple: Multiple,
}

impl CurrentMultiple {
    /// Create a current multiple metric.
    #[must_use]
    pub const fn new(multiple: Multiple) -> Self {
        Self { multiple }
    }

    /// The multiple computed.
    #[must_use]
    pub const fn multiple(&self) -> Multiple {
        self.multiple
    }

    /// Periods on which both the market and TTM totals exist.
    pub(crate) fn available(index: &AlignmentIndex) -> usize {
        index
            .period_count(FieldFamily::Market)
            .min(index.period_count(FieldFamily::Ttm))
    }
}

impl Metric for CurrentMultiple {
    fn id(&self) -> MetricId {
        MetricId::Current(self.multiple)
    }

    fn lookback(&self) -> usize {
        0
    }

    fn required_fields(&self) -> Vec<Field> {
        vec![Field::MarketCapFreeFloat, self.multiple.denominator()]
    }

    fn evaluate(&self, index: &AlignmentIndex, offset: usize) -> Option<f64> {
        let market_cap = index.series(Field::MarketCapFreeFloat).value_at(offset);
        let denominator = index.series(self.multiple.denominator()).value_at(offset);
        ratio(market_cap, denominator)
    }
}
