//! Quarter-over-quarter and year-over-year change.

use crate::math::change;
use crate::{EngineConfig, Metric, MetricId};
use ronda_totals::AlignmentIndex;
use ronda_traits::{Field, Measure, Variant};
use serde::{Deserialize, Serialize};

/// Comparison step of a sequential growth metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Against the previous period.
    QuarterOverQuarter,
    /// Against the same period one year earlier.
    YearOverYear,
}

impl Step {
    /// Periods back the step compares against under `config`.
    #[must_use]
    pub const fn lag(self, config: &EngineConfig) -> usize {
        match self {
            Self::QuarterOverQuarter => config.qoq_lag,
            Self::YearOverYear => config.yoy_lag,
        }
    }
}

/// Sequential change `Total(0) / Total(lag) - 1`, as a decimal.
///
/// Absent when either total is absent, when the prior total is zero, or when
/// fewer than `lag` earlier periods exist.
#[derive(Debug, Clone, Copy)]
pub struct SequentialGrowth {
    step: Step,
    measure: Measure,
    variant: Variant,
    lag: usize,
}

impl SequentialGrowth {
    /// Create a sequential growth metric with the step's configured lag.
    #[must_use]
    pub const fn new(
        step: Step,
        measure: Measure,
        variant: Variant,
        config: &EngineConfig,
    ) -> Self {
        Self {
            step,
            measure,
            variant,
            lag: step.lag(config),
        }
    }

    /// The comparison step.
    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    fn field(&self) -> Field {
        self.variant.field(self.measure)
    }
}

impl Metric for SequentialGrowth {
    fn id(&self) -> MetricId {
        match self.step {
            Step::QuarterOverQuarter => MetricId::QoQ(self.measure),
            Step::YearOverYear => MetricId::YoY(self.measure),
        }
    }

    fn variant(&self) -> Option<Variant> {
        Some(self.variant)
    }

    fn lookback(&self) -> usize {
        self.lag
    }

    fn required_fields(&self) -> Vec<Field> {
        vec![self.field()]
    }

    fn evaluate(&self, index: &AlignmentIndex, offset: usize) -> Option<f64> {
        let series = index.series(self.field());
        let prior = series.value_at(offset.checked_add(self.lag)?);
        change(series.value_at(offset), prior)
    }
}
