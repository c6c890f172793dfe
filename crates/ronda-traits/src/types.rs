//! Common types used throughout the ronda engine.
//!
//! This module defines the identifiers the engine is keyed by: holdings,
//! financial fields, field families and calendar periods.

use crate::{Result, RondaError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a single portfolio constituent.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HoldingId(String);

impl HoldingId {
    /// Creates a new holding identifier, trimming surrounding whitespace.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HoldingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HoldingId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for HoldingId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Family of fields that share one ordered period sequence.
///
/// TTM and quarterly figures are reported on their own period sequences;
/// market figures (market capitalization, price) on a third. Families are
/// aligned by offset: offset `k` in every family refers to the same step back
/// in the calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFamily {
    /// Trailing-twelve-month aggregates.
    Ttm,
    /// Single-quarter figures.
    Quarterly,
    /// Market capitalization and price observations.
    Market,
}

impl FieldFamily {
    /// All families, in storage order.
    pub const ALL: [Self; 3] = [Self::Ttm, Self::Quarterly, Self::Market];

    /// Position of this family in [`FieldFamily::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Ttm => 0,
            Self::Quarterly => 1,
            Self::Market => 2,
        }
    }

    /// Short name used in logs and exports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ttm => "ttm",
            Self::Quarterly => "quarterly",
            Self::Market => "market",
        }
    }
}

impl fmt::Display for FieldFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named financial quantity reported per holding and period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// TTM revenue.
    TtmRevenue,
    /// TTM profit after tax.
    TtmPat,
    /// TTM revenue, free-float adjusted.
    TtmRevenueFreeFloat,
    /// TTM profit after tax, free-float adjusted.
    TtmPatFreeFloat,
    /// Quarterly revenue.
    QuarterlyRevenue,
    /// Quarterly profit after tax.
    QuarterlyPat,
    /// Quarterly revenue, free-float adjusted.
    QuarterlyRevenueFreeFloat,
    /// Quarterly profit after tax, free-float adjusted.
    QuarterlyPatFreeFloat,
    /// Market capitalization.
    MarketCap,
    /// Market capitalization, free-float adjusted.
    MarketCapFreeFloat,
    /// Share price.
    Price,
}

impl Field {
    /// Every supported field, in storage order.
    pub const ALL: [Self; 11] = [
        Self::TtmRevenue,
        Self::TtmPat,
        Self::TtmRevenueFreeFloat,
        Self::TtmPatFreeFloat,
        Self::QuarterlyRevenue,
        Self::QuarterlyPat,
        Self::QuarterlyRevenueFreeFloat,
        Self::QuarterlyPatFreeFloat,
        Self::MarketCap,
        Self::MarketCapFreeFloat,
        Self::Price,
    ];

    /// Number of supported fields.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this field in [`Field::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The family whose period sequence this field is reported on.
    #[must_use]
    pub const fn family(&self) -> FieldFamily {
        match self {
            Self::TtmRevenue | Self::TtmPat | Self::TtmRevenueFreeFloat | Self::TtmPatFreeFloat => {
                FieldFamily::Ttm
            }
            Self::QuarterlyRevenue
            | Self::QuarterlyPat
            | Self::QuarterlyRevenueFreeFloat
            | Self::QuarterlyPatFreeFloat => FieldFamily::Quarterly,
            Self::MarketCap | Self::MarketCapFreeFloat | Self::Price => FieldFamily::Market,
        }
    }

    /// Whether this is a free-float adjusted figure.
    #[must_use]
    pub const fn is_free_float(&self) -> bool {
        matches!(
            self,
            Self::TtmRevenueFreeFloat
                | Self::TtmPatFreeFloat
                | Self::QuarterlyRevenueFreeFloat
                | Self::QuarterlyPatFreeFloat
                | Self::MarketCapFreeFloat
        )
    }

    /// Canonical snake_case name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TtmRevenue => "ttm_revenue",
            Self::TtmPat => "ttm_pat",
            Self::TtmRevenueFreeFloat => "ttm_revenue_free_float",
            Self::TtmPatFreeFloat => "ttm_pat_free_float",
            Self::QuarterlyRevenue => "quarterly_revenue",
            Self::QuarterlyPat => "quarterly_pat",
            Self::QuarterlyRevenueFreeFloat => "quarterly_revenue_free_float",
            Self::QuarterlyPatFreeFloat => "quarterly_pat_free_float",
            Self::MarketCap => "market_cap",
            Self::MarketCapFreeFloat => "market_cap_free_float",
            Self::Price => "price",
        }
    }

    /// Fields reported on the given family's period sequence.
    pub fn in_family(family: FieldFamily) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |f| f.family() == family)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = RondaError;

    /// Parses canonical names and the abbreviated section keys
    /// (`ttm_rev`, `q_pat_ff`, `mcap_ff`, ...). Matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        let field = match key.as_str() {
            "ttm_revenue" | "ttm_rev" => Self::TtmRevenue,
            "ttm_pat" => Self::TtmPat,
            "ttm_revenue_free_float" | "ttm_revenue_ff" | "ttm_rev_ff" => {
                Self::TtmRevenueFreeFloat
            }
            "ttm_pat_free_float" | "ttm_pat_ff" => Self::TtmPatFreeFloat,
            "quarterly_revenue" | "q_rev" => Self::QuarterlyRevenue,
            "quarterly_pat" | "q_pat" => Self::QuarterlyPat,
            "quarterly_revenue_free_float" | "quarterly_revenue_ff" | "q_rev_ff" => {
                Self::QuarterlyRevenueFreeFloat
            }
            "quarterly_pat_free_float" | "quarterly_pat_ff" | "q_pat_ff" => {
                Self::QuarterlyPatFreeFloat
            }
            "market_cap" | "mcap" => Self::MarketCap,
            "market_cap_free_float" | "market_cap_ff" | "mcap_ff" => Self::MarketCapFreeFloat,
            "price" => Self::Price,
            _ => return Err(RondaError::UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

/// Which line of the income statement a growth or margin input refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Revenue.
    Revenue,
    /// Profit after tax.
    Pat,
}

impl Measure {
    /// Both measures.
    pub const ALL: [Self; 2] = [Self::Revenue, Self::Pat];

    /// Short name used in metric names.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Pat => "pat",
        }
    }
}

/// One of the four parallel column series computed for margin and growth
/// metrics: raw or free-float figures, on the TTM or quarterly sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Raw TTM figures.
    Ttm,
    /// Free-float TTM figures.
    TtmFreeFloat,
    /// Raw quarterly figures.
    Quarterly,
    /// Free-float quarterly figures.
    QuarterlyFreeFloat,
}

impl Variant {
    /// All four variants.
    pub const ALL: [Self; 4] = [
        Self::Ttm,
        Self::TtmFreeFloat,
        Self::Quarterly,
        Self::QuarterlyFreeFloat,
    ];

    /// The family whose periods this variant's columns follow.
    #[must_use]
    pub const fn family(&self) -> FieldFamily {
        match self {
            Self::Ttm | Self::TtmFreeFloat => FieldFamily::Ttm,
            Self::Quarterly | Self::QuarterlyFreeFloat => FieldFamily::Quarterly,
        }
    }

    /// The input field carrying `measure` for this variant.
    #[must_use]
    pub const fn field(&self, measure: Measure) -> Field {
        match (self, measure) {
            (Self::Ttm, Measure::Revenue) => Field::TtmRevenue,
            (Self::Ttm, Measure::Pat) => Field::TtmPat,
            (Self::TtmFreeFloat, Measure::Revenue) => Field::TtmRevenueFreeFloat,
            (Self::TtmFreeFloat, Measure::Pat) => Field::TtmPatFreeFloat,
            (Self::Quarterly, Measure::Revenue) => Field::QuarterlyRevenue,
            (Self::Quarterly, Measure::Pat) => Field::QuarterlyPat,
            (Self::QuarterlyFreeFloat, Measure::Revenue) => Field::QuarterlyRevenueFreeFloat,
            (Self::QuarterlyFreeFloat, Measure::Pat) => Field::QuarterlyPatFreeFloat,
        }
    }

    /// Short name used in exports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ttm => "ttm",
            Self::TtmFreeFloat => "ttm_ff",
            Self::Quarterly => "quarterly",
            Self::QuarterlyFreeFloat => "quarterly_ff",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered, named time bucket anchored on a calendar date.
///
/// Reporting periods (TTM windows, quarters) are identified by their closing
/// month, written `YYYYMM`; market observations carry a full date. Periods
/// order by date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    date: NaiveDate,
}

impl Period {
    /// Creates a period anchored on the given date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Creates a period for the first day of the given month.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidPeriod`] if the month is out of range.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self::new)
            .ok_or_else(|| RondaError::InvalidPeriod(format!("{year:04}{month:02}")))
    }

    /// The anchoring date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Identifier in the form it is written in input files.
    #[must_use]
    pub fn label(&self) -> String {
        if self.date.day() == 1 {
            format!("{:04}{:02}", self.date.year(), self.date.month())
        } else {
            self.date.format("%Y-%m-%d").to_string()
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Period {
    type Err = RondaError;

    /// Parses `YYYYMM` month identifiers and `YYYY-MM-DD` dates.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit()) {
            let year: i32 = s[..4]
                .parse()
                .map_err(|_| RondaError::InvalidPeriod(s.to_string()))?;
            let month: u32 = s[4..]
                .parse()
                .map_err(|_| RondaError::InvalidPeriod(s.to_string()))?;
            return Self::month(year, month).map_err(|_| RondaError::InvalidPeriod(s.to_string()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::new)
            .map_err(|_| RondaError::InvalidPeriod(s.to_string()))
    }
}
