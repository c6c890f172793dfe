//! The metric trait and the typed keys of the output mapping.

use ronda_totals::AlignmentIndex;
use ronda_traits::{Field, FieldFamily, Measure, RondaError, Variant};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Averaging horizon of PE/PR averages and their reval/deval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    /// Two years of periods.
    TwoYear,
    /// Five years of periods.
    FiveYear,
}

impl Horizon {
    /// Both horizons.
    pub const ALL: [Self; 2] = [Self::TwoYear, Self::FiveYear];
}

/// Valuation multiple on free-float market capitalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Multiple {
    /// Price to earnings: market cap over TTM profit after tax.
    Pe,
    /// Price to revenue: market cap over TTM revenue.
    Pr,
}

impl Multiple {
    /// Both multiples.
    pub const ALL: [Self; 2] = [Self::Pe, Self::Pr];

    /// The TTM field in the denominator.
    #[must_use]
    pub const fn denominator(&self) -> Field {
        match self {
            Self::Pe => Field::TtmPat,
            Self::Pr => Field::TtmRevenue,
        }
    }
}

/// Which end of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extreme {
    /// Minimum.
    Low,
    /// Maximum.
    High,
}

/// Period sequence a metric is emitted over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeline {
    /// The periods of one field family.
    Family(FieldFamily),
    /// The periods of whichever family has the most.
    Portfolio,
}

impl Timeline {
    /// The family whose periods this timeline follows, given the longest one.
    #[must_use]
    pub const fn resolve(self, longest: FieldFamily) -> FieldFamily {
        match self {
            Self::Family(family) => family,
            Self::Portfolio => longest,
        }
    }
}

/// Identifier of a metric in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    /// Profit after tax margin, in percent.
    Patm,
    /// Quarter-over-quarter change.
    QoQ(Measure),
    /// Year-over-year change.
    YoY(Measure),
    /// Six-year compound annual growth rate.
    SixYearCagr(Measure),
    /// Current PE or PR.
    Current(Multiple),
    /// Average PE or PR over a horizon.
    Average(Multiple, Horizon),
    /// Deviation of the average multiple from the current one.
    RevalDeval(Multiple, Horizon),
    /// Ten-quarter P/R low or high.
    PrExtreme(Extreme),
    /// Earnings yield, `1 / PE`.
    PeYield,
    /// Growth rate feeding the alpha metrics.
    Growth,
    /// Bond benchmark rate.
    BondRate,
    /// Compounded return over the bond benchmark, in percent.
    AlphaBondCagr,
    /// Absolute alpha over the compounding horizon, in percent.
    AlphaAbsolute,
}

impl MetricId {
    /// Stable snake_case name used in exports and lookups.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Patm => "patm",
            Self::QoQ(Measure::Revenue) => "qoq_revenue",
            Self::QoQ(Measure::Pat) => "qoq_pat",
            Self::YoY(Measure::Revenue) => "yoy_revenue",
            Self::YoY(Measure::Pat) => "yoy_pat",
            Self::SixYearCagr(Measure::Revenue) => "revenue_6yr_cagr",
            Self::SixYearCagr(Measure::Pat) => "pat_6yr_cagr",
            Self::Current(Multiple::Pe) => "current_pe",
            Self::Current(Multiple::Pr) => "current_pr",
            Self::Average(Multiple::Pe, Horizon::TwoYear) => "pe_2yr_avg",
            Self::Average(Multiple::Pe, Horizon::FiveYear) => "pe_5yr_avg",
            Self::Average(Multiple::Pr, Horizon::TwoYear) => "pr_2yr_avg",
            Self::Average(Multiple::Pr, Horizon::FiveYear) => "pr_5yr_avg",
            Self::RevalDeval(Multiple::Pe, Horizon::TwoYear) => "pe_2yr_reval_deval",
            Self::RevalDeval(Multiple::Pe, Horizon::FiveYear) => "pe_5yr_reval_deval",
            Self::RevalDeval(Multiple::Pr, Horizon::TwoYear) => "pr_2yr_reval_deval",
            Self::RevalDeval(Multiple::Pr, Horizon::FiveYear) => "pr_5yr_reval_deval",
            Self::PrExtreme(Extreme::Low) => "pr_10q_low",
            Self::PrExtreme(Extreme::High) => "pr_10q_high",
            Self::PeYield => "pe_yield",
            Self::Growth => "growth_rate",
            Self::BondRate => "bond_rate",
            Self::AlphaBondCagr => "alpha_bond_cagr",
            Self::AlphaAbsolute => "alpha_absolute",
        }
    }

    /// Every metric identifier, in report order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut ids = vec![Self::Patm];
        for measure in Measure::ALL {
            ids.extend([Self::QoQ(measure), Self::YoY(measure), Self::SixYearCagr(measure)]);
        }
        for multiple in Multiple::ALL {
            ids.push(Self::Current(multiple));
            ids.extend(Horizon::ALL.map(|h| Self::Average(multiple, h)));
            ids.extend(Horizon::ALL.map(|h| Self::RevalDeval(multiple, h)));
        }
        ids.extend([
            Self::PrExtreme(Extreme::Low),
            Self::PrExtreme(Extreme::High),
            Self::AlphaBondCagr,
            Self::AlphaAbsolute,
            Self::PeYield,
            Self::Growth,
            Self::BondRate,
        ]);
        ids
    }

    /// Whether the metric is emitted once per [`Variant`].
    #[must_use]
    pub const fn has_variants(&self) -> bool {
        matches!(
            self,
            Self::Patm | Self::QoQ(_) | Self::YoY(_) | Self::SixYearCagr(_)
        )
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricId {
    type Err = RondaError;

    fn from_str(s: &str) -> ronda_traits::Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|id| id.name() == key)
            .ok_or_else(|| RondaError::InvalidData(format!("unknown metric: {s}")))
    }
}

/// Key of one value in the output mapping: metric, variant, period offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MetricKey {
    /// The metric.
    pub metric: MetricId,
    /// The column series, for metrics that have variants.
    pub variant: Option<Variant>,
    /// Period offset, 0 = most recent.
    pub period: usize,
}

impl MetricKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(metric: MetricId, variant: Option<Variant>, period: usize) -> Self {
        Self {
            metric,
            variant,
            period,
        }
    }

    /// The period sequence the offset refers to.
    #[must_use]
    pub const fn timeline(&self) -> Timeline {
        match self.variant {
            Some(variant) => Timeline::Family(variant.family()),
            None => Timeline::Portfolio,
        }
    }
}

/// A formula evaluated over aligned totals.
///
/// Metrics are pure: `evaluate` reads the index and returns `None` for any
/// business-level absence (missing totals, zero denominators, short history,
/// non-positive bases). Implementations must be thread-safe so several
/// generations can share one catalogue.
pub trait Metric: Send + Sync + fmt::Debug {
    /// The metric identifier.
    fn id(&self) -> MetricId;

    /// The column series this instance computes, if the metric has variants.
    fn variant(&self) -> Option<Variant> {
        None
    }

    /// The periods this metric is emitted over.
    ///
    /// Variant metrics follow their variant's family. The rest span families
    /// and follow the longest one, so a family with fewer periods leaves
    /// their later keys not applicable instead of unwritten.
    fn timeline(&self) -> Timeline {
        self.variant()
            .map_or(Timeline::Portfolio, |v| Timeline::Family(v.family()))
    }

    /// Number of periods before the evaluated one the formula reads.
    fn lookback(&self) -> usize;

    /// Fields whose totals the formula reads.
    fn required_fields(&self) -> Vec<Field>;

    /// Evaluates the formula at `offset` periods back.
    fn evaluate(&self, index: &AlignmentIndex, offset: usize) -> Option<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique_and_parse_back() {
        let ids = MetricId::all();
        assert_eq!(ids.len(), 24);

        let names: HashSet<_> = ids.iter().map(MetricId::name).collect();
        assert_eq!(names.len(), ids.len());

        for id in ids {
            assert_eq!(id.name().parse::<MetricId>().unwrap(), id);
        }
        assert!("pe_10yr_avg".parse::<MetricId>().is_err());
    }

    #[test]
    fn test_key_timeline() {
        let key = MetricKey::new(MetricId::Patm, Some(Variant::QuarterlyFreeFloat), 0);
        assert_eq!(key.timeline(), Timeline::Family(FieldFamily::Quarterly));
        assert_eq!(key.timeline().resolve(FieldFamily::Ttm), FieldFamily::Quarterly);

        let key = MetricKey::new(MetricId::BondRate, None, 3);
        assert_eq!(key.timeline(), Timeline::Portfolio);
        assert_eq!(key.timeline().resolve(FieldFamily::Ttm), FieldFamily::Ttm);
    }

    #[test]
    fn test_has_variants() {
        assert!(MetricId::SixYearCagr(Measure::Pat).has_variants());
        assert!(!MetricId::AlphaAbsolute.has_variants());
    }
}
