//! Average multiples and revaluation/devaluation.

use crate::math::{mean_present, ratio};
use crate::valuation::CurrentMultiple;
use crate::{Horizon, Metric, MetricId, Multiple};
use ronda_totals::AlignmentIndex;
use ronda_traits::Field;

/// Arithmetic mean of the current multiple over a trailing window.
///
/// The window covers offsets `offset..offset + window`. It is absent when the
/// window runs past the available periods. Periods whose multiple is absent
/// are skipped rather than counted as zero.
#[derive(Debug, Clone, Copy)]
pub struct AverageMultiple {
    current: CurrentMultiple,
    horizon: Horizon,
    window: usize,
}

impl AverageMultiple {
    /// Create an average multiple over `window` periods.
    #[must_use]
    pub const fn new(multiple: Multiple, horizon: Horizon, window: usize) -> Self {
        Self {
            current: CurrentMultiple::new(multiple),
            horizon,
            window,
        }
    }

    /// The averaging window in periods.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }
}

impl Metric for AverageMultiple {
    fn id(&self) -> MetricId {
        MetricId::Average(self.current.multiple(), self.horizon)
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn required_fields(&self) -> Vec<Field> {
        self.current.required_fields()
    }

    fn evaluate(&self, index: &AlignmentIndex, offset: usize) -> Option<f64> {
        let end = offset.checked_add(self.window)?;
        if self.window == 0 || end > CurrentMultiple::available(index) {
            return None;
        }
        mean_present((offset..end).map(|k| self.current.evaluate(index, k)))
    }
}

/// Deviation of the average multiple from the current one,
/// `(Average - Current) / Current`.
///
/// Absent when the current multiple is absent or zero, or when the average is
/// absent.
#[derive(Debug, Clone, Copy)]
pub struct RevalDeval {
    average: AverageMultiple,
}

impl RevalDeval {
    /// Create a reval/deval metric over `window` periods.
    #[must_use]
    pub const fn new(multiple: Multiple, horizon: Horizon, window: usize) -> Self {
        Self {
            average: AverageMultiple::new(multiple, horizon, window),
        }
    }
}

impl Metric for RevalDeval {
    fn id(&self) -> MetricId {
        MetricId::RevalDeval(self.average.current.multiple(), self.average.horizon)
    }

    fn lookback(&self) -> usize {
        self.average.lookback()
    }

    fn required_fields(&self) -> Vec<Field> {
        self.average.required_fields()
    }

    fn evaluate(&self, index: &AlignmentIndex, offset: usize) -> Option<f64> {
        let current = self.average.current.evaluate(index, offset)?;
        let average = self.average.evaluate(index, offset)?;
        ratio(Some(average - current), Some(current))
    }
}
