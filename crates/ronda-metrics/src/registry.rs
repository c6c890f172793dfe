//! Metric registry for discovering and categorizing the catalogue.
//!
//! This module provides static metadata for every metric the engine emits.

use crate::{Extreme, Horizon, MetricId, Multiple};
use ronda_traits::Measure;
use serde::{Deserialize, Serialize};

/// Metric category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetricCategory {
    /// Margins on totals
    Profitability,
    /// Sequential and compound growth
    Growth,
    /// Multiples of free-float market capitalization
    Valuation,
    /// Returns over the bond benchmark
    Alpha,
}

impl MetricCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Profitability => "Profit margins on portfolio totals",
            Self::Growth => "Quarter, year and multi-year growth of totals",
            Self::Valuation => "PE and PR multiples, averages and extremes",
            Self::Alpha => "Earnings yield, growth and alpha over the bond rate",
        }
    }
}

/// Metadata about a metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricInfo {
    /// The metric identifier
    pub id: MetricId,

    /// Unique snake_case name
    pub name: &'static str,

    /// Row label in reports
    pub label: &'static str,

    /// Category classification
    pub category: MetricCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Periods read before the evaluated one, with the default configuration
    pub typical_lookback: usize,

    /// Whether the metric is emitted for each of the four variants
    pub has_variants: bool,
}

impl MetricInfo {
    fn new(
        id: MetricId,
        label: &'static str,
        category: MetricCategory,
        description: &'static str,
        typical_lookback: usize,
    ) -> Self {
        Self {
            id,
            name: id.name(),
            label,
            category,
            description,
            typical_lookback,
            has_variants: id.has_variants(),
        }
    }
}

fn describe(id: MetricId) -> MetricInfo {
    use MetricCategory::{Alpha, Growth, Profitability, Valuation};

    match id {
        MetricId::Patm => MetricInfo::new(id, "PATM", Profitability, "100 x PAT / revenue", 0),
        MetricId::QoQ(Measure::Revenue) => {
            MetricInfo::new(id, "QoQ", Growth, "Revenue change on the prior period", 1)
        }
        MetricId::QoQ(Measure::Pat) => {
            MetricInfo::new(id, "QoQ", Growth, "PAT change on the prior period", 1)
        }
        MetricId::YoY(Measure::Revenue) => {
            MetricInfo::new(id, "YoY", Growth, "Revenue change on four periods back", 4)
        }
        MetricId::YoY(Measure::Pat) => {
            MetricInfo::new(id, "YoY", Growth, "PAT change on four periods back", 4)
        }
        MetricId::SixYearCagr(Measure::Revenue) => {
            MetricInfo::new(id, "6 year CAGR", Growth, "Revenue compound annual growth", 23)
        }
        MetricId::SixYearCagr(Measure::Pat) => {
            MetricInfo::new(id, "6 year CAGR", Growth, "PAT compound annual growth", 23)
        }
        MetricId::Current(Multiple::Pe) => {
            MetricInfo::new(id, "Current PE", Valuation, "Market cap FF / TTM PAT", 0)
        }
        MetricId::Current(Multiple::Pr) => {
            MetricInfo::new(id, "Current PR", Valuation, "Market cap FF / TTM revenue", 0)
        }
        MetricId::Average(multiple, horizon) => {
            let (label, lookback) = match horizon {
                Horizon::TwoYear => ("2 year average", 7),
                Horizon::FiveYear => ("5 year average", 19),
            };
            let description = match multiple {
                Multiple::Pe => "Mean current PE over the window, absent periods skipped",
                Multiple::Pr => "Mean current PR over the window, absent periods skipped",
            };
            MetricInfo::new(id, label, Valuation, description, lookback)
        }
        MetricId::RevalDeval(_, horizon) => {
            let (label, lookback) = match horizon {
                Horizon::TwoYear => ("2 years - Reval / Deval", 7),
                Horizon::FiveYear => ("5 years - Reval / Deval", 19),
            };
            MetricInfo::new(id, label, Valuation, "(average - current) / current", lookback)
        }
        MetricId::PrExtreme(Extreme::Low) => MetricInfo::new(
            id,
            "10 quarter- PR- low",
            Valuation,
            "Lowest market cap FF / quarterly revenue over ten quarters",
            9,
        ),
        MetricId::PrExtreme(Extreme::High) => MetricInfo::new(
            id,
            "10 quarter- PR- high",
            Valuation,
            "Highest market cap FF / quarterly revenue over ten quarters",
            9,
        ),
        MetricId::PeYield => MetricInfo::new(id, "PE Yield", Alpha, "1 / current PE", 0),
        MetricId::Growth => {
            MetricInfo::new(id, "Growth", Alpha, "Configured compound growth, passed through", 23)
        }
        MetricId::BondRate => MetricInfo::new(id, "Bond Rate", Alpha, "7.31% x 0.7", 0),
        MetricId::AlphaBondCagr => MetricInfo::new(
            id,
            "Alpha over the bond- CAGR",
            Alpha,
            "Ten-year compounded yield and growth, annualised, less the bond rate",
            23,
        ),
        MetricId::AlphaAbsolute => MetricInfo::new(
            id,
            "Alpha- Absolute",
            Alpha,
            "Bond CAGR alpha compounded over ten years",
            23,
        ),
    }
}

/// Get information about all available metrics, in report order.
#[must_use]
pub fn available_metrics() -> Vec<MetricInfo> {
    MetricId::all().into_iter().map(describe).collect()
}

/// Get all metrics in a specific category.
#[must_use]
pub fn metrics_by_category(category: &MetricCategory) -> Vec<MetricInfo> {
    available_metrics()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a specific metric by name.
#[must_use]
pub fn get_metric_info(name: &str) -> Option<MetricInfo> {
    let id = name.parse::<MetricId>().ok()?;
    Some(describe(id))
}

/// Get all metric categories with metrics.
#[must_use]
pub fn available_categories() -> Vec<MetricCategory> {
    let mut categories: Vec<_> = available_metrics()
        .into_iter()
        .map(|info| info.category)
        .collect();
    categories.sort();
    categories.dedup();
    categories
}
