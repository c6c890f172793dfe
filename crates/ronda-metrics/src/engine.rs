//! The metric derivation engine.

use crate::alpha::{AlphaAbsolute, AlphaBondCagr, BondRate, Growth, PeYield};
use crate::growth::{CompoundGrowth, SequentialGrowth, Step};
use crate::profitability::Patm;
use crate::valuation::{AverageMultiple, CurrentMultiple, PrExtreme, RevalDeval};
use crate::{EngineConfig, Extreme, Horizon, Metric, MetricKey, MetricTable, Multiple};
use ronda_totals::AlignmentIndex;
use ronda_traits::{FieldFamily, Measure, Result, Variant};
use tracing::{debug, info, info_span};

/// Runs the metric catalogue over an alignment index.
///
/// The engine holds only its configuration and the immutable catalogue built
/// from it, so one engine can serve several generations at once.
///
/// # Examples
///
/// ```rust,no_run
/// use ronda_metrics::{EngineConfig, MetricEngine, MetricId};
/// use ronda_totals::{AlignmentIndex, InclusionSet, Totals};
/// use ronda_traits::{Field, InMemoryStore, Period, Variant};
///
/// let p = Period::month(2024, 3).unwrap();
/// let store = InMemoryStore::builder()
///     .value("INFY", Field::TtmPat, p, 150.0)
///     .value("INFY", Field::TtmRevenue, p, 1000.0)
///     .build();
/// let index = AlignmentIndex::new(Totals::aggregate(&store, &InclusionSet::all(&store)));
///
/// let engine = MetricEngine::new(EngineConfig::default()).unwrap();
/// let table = engine.generate(&index);
/// assert_eq!(table.value(MetricId::Patm, Some(Variant::Ttm), 0), Some(15.0));
/// ```
#[derive(Debug)]
pub struct MetricEngine {
    config: EngineConfig,
    metrics: Vec<Box<dyn Metric>>,
}

impl MetricEngine {
    /// Create an engine with the full catalogue for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::Config`](ronda_traits::RondaError::Config) if the
    /// configuration is invalid.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let metrics = catalogue(&config);
        Ok(Self { config, metrics })
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The metric instances, one per (metric, variant).
    #[must_use]
    pub fn metrics(&self) -> &[Box<dyn Metric>] {
        &self.metrics
    }

    /// Evaluates every metric at every emitted period of its timeline.
    ///
    /// Each (metric, variant, offset) is evaluated independently; an absent
    /// result never suppresses another. Metrics without a variant run over
    /// the longest family, so they keep their keys when one family is short
    /// or unreported.
    #[must_use]
    pub fn generate(&self, index: &AlignmentIndex) -> MetricTable {
        let span = info_span!("generate", scope = index.totals().scope_size());
        let _guard = span.enter();

        let periods = FieldFamily::ALL.map(|family| index.periods(family).to_vec());
        let longest = index.longest_family();
        let mut table = MetricTable::new(periods, longest);

        for metric in &self.metrics {
            let family = metric.timeline().resolve(longest);
            let columns = self.config.columns(index.period_count(family));
            for offset in 0..columns {
                let key = MetricKey::new(metric.id(), metric.variant(), offset);
                table.insert(key, metric.evaluate(index, offset));
            }
            debug!(
                metric = %metric.id(),
                variant = metric.variant().map(|v| v.name()),
                columns,
                "Evaluated metric"
            );
        }

        info!(
            metrics = self.metrics.len(),
            values = table.len(),
            present = table.present(),
            not_applicable = table.len() - table.present(),
            "Generated metrics"
        );
        table
    }
}

/// Builds the full catalogue for a configuration, in report order.
fn catalogue(config: &EngineConfig) -> Vec<Box<dyn Metric>> {
    let mut metrics: Vec<Box<dyn Metric>> = Vec::new();

    for variant in Variant::ALL {
        metrics.push(Box::new(Patm::new(variant)));
    }
    for measure in Measure::ALL {
        for variant in Variant::ALL {
            metrics.push(Box::new(SequentialGrowth::new(
                Step::QuarterOverQuarter,
                measure,
                variant,
                config,
            )));
        }
        for variant in Variant::ALL {
            metrics.push(Box::new(SequentialGrowth::new(
                Step::YearOverYear,
                measure,
                variant,
                config,
            )));
        }
        for variant in Variant::ALL {
            metrics.push(Box::new(CompoundGrowth::new(
                measure,
                variant,
                config.cagr_lag,
                config.cagr_years,
            )));
        }
    }

    for multiple in Multiple::ALL {
        metrics.push(Box::new(CurrentMultiple::new(multiple)));
        for horizon in Horizon::ALL {
            let window = window(config, horizon);
            metrics.push(Box::new(AverageMultiple::new(multiple, horizon, window)));
        }
        for horizon in Horizon::ALL {
            let window = window(config, horizon);
            metrics.push(Box::new(RevalDeval::new(multiple, horizon, window)));
        }
    }
    metrics.push(Box::new(PrExtreme::new(Extreme::Low, config.extremes_window)));
    metrics.push(Box::new(PrExtreme::new(Extreme::High, config.extremes_window)));

    let growth = Growth::new(config.growth_source, config.cagr_lag, config.cagr_years);
    let alpha = AlphaBondCagr::new(growth, config.bond_rate, config.alpha_years);
    metrics.push(Box::new(alpha));
    metrics.push(Box::new(AlphaAbsolute::new(alpha)));
    metrics.push(Box::new(PeYield::new()));
    metrics.push(Box::new(growth));
    metrics.push(Box::new(BondRate::new(config.bond_rate)));

    metrics
}

const fn window(config: &EngineConfig, horizon: Horizon) -> usize {
    match horizon {
        Horizon::TwoYear => config.two_year_window,
        Horizon::FiveYear => config.five_year_window,
    }
}
