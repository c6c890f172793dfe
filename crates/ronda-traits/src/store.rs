//! The period series store contract.
//!
//! A [`SeriesStore`] is the read-only snapshot the engine aggregates from: a
//! lookup of one holding's value for a field at a period, plus the ordered
//! period sequence of each field family. [`InMemoryStore`] is the in-process
//! implementation, assembled with a [`StoreBuilder`].

use crate::{Field, FieldFamily, HoldingId, Period, Result, RondaError};
use std::collections::{BTreeMap, BTreeSet};

/// Read-only source of per-holding financial figures.
///
/// Implementations must be thread-safe (`Send + Sync`) so that several report
/// generations can read one snapshot concurrently.
///
/// # Example
///
/// ```no_run
/// use ronda_traits::{Field, FieldFamily, HoldingId, Period, SeriesStore};
///
/// fn latest_revenue(store: &dyn SeriesStore, holding: &HoldingId) -> Option<f64> {
///     let period = store.periods(FieldFamily::Ttm).first()?;
///     store.get(holding, Field::TtmRevenue, period)
/// }
/// ```
pub trait SeriesStore: Send + Sync {
    /// Returns the value of `field` for `holding` at `period`, or `None` when
    /// the holding did not report it.
    fn get(&self, holding: &HoldingId, field: Field, period: &Period) -> Option<f64>;

    /// Returns the period sequence of a family, newest first.
    ///
    /// Offset 0 is the most recent period.
    fn periods(&self, family: FieldFamily) -> &[Period];

    /// Returns every holding known to the store, in a stable order.
    fn holdings(&self) -> Vec<HoldingId>;

    /// Returns the offset of `period` within its family's sequence.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::UnknownPeriod`] if the period is not part of the
    /// family's sequence.
    fn offset_of(&self, family: FieldFamily, period: &Period) -> Result<usize> {
        self.periods(family)
            .iter()
            .position(|p| p == period)
            .ok_or_else(|| RondaError::UnknownPeriod(format!("{period} ({family})")))
    }
}

/// In-memory [`SeriesStore`] backed by ordered maps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    holdings: Vec<HoldingId>,
    values: BTreeMap<HoldingId, BTreeMap<(Field, Period), f64>>,
    periods: [Vec<Period>; 3],
}

impl InMemoryStore {
    /// Starts building a new store.
    #[must_use]
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Number of stored (holding, field, period) values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.values().map(BTreeMap::len).sum()
    }

    /// Whether the store holds no values at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.values().all(BTreeMap::is_empty)
    }
}

impl SeriesStore for InMemoryStore {
    fn get(&self, holding: &HoldingId, field: Field, period: &Period) -> Option<f64> {
        self.values.get(holding)?.get(&(field, *period)).copied()
    }

    fn periods(&self, family: FieldFamily) -> &[Period] {
        &self.periods[family.index()]
    }

    fn holdings(&self) -> Vec<HoldingId> {
        self.holdings.clone()
    }
}

/// Builder for [`InMemoryStore`].
///
/// The period sequence of each family is discovered from the data: it is the
/// union of every period declared for any field of the family, sorted newest
/// first. A holding that lacks a period contributes absence there.
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    values: BTreeMap<HoldingId, BTreeMap<(Field, Period), f64>>,
    periods: [BTreeSet<Period>; 3],
}

impl StoreBuilder {
    /// Registers a holding, even if it reports no values.
    #[must_use]
    pub fn holding(mut self, holding: impl Into<HoldingId>) -> Self {
        self.values.entry(holding.into()).or_default();
        self
    }

    /// Records one value.
    ///
    /// Non-finite values are stored as absent, but the period is still
    /// declared for the field's family.
    #[must_use]
    pub fn value(
        mut self,
        holding: impl Into<HoldingId>,
        field: Field,
        period: Period,
        value: f64,
    ) -> Self {
        self.insert(holding.into(), field, period, Some(value));
        self
    }

    /// Declares that `holding` has no value for `field` at `period`.
    #[must_use]
    pub fn absent(mut self, holding: impl Into<HoldingId>, field: Field, period: Period) -> Self {
        self.insert(holding.into(), field, period, None);
        self
    }

    /// Records a series of values for one holding and field.
    #[must_use]
    pub fn series(
        mut self,
        holding: impl Into<HoldingId>,
        field: Field,
        values: &[(Period, f64)],
    ) -> Self {
        let holding = holding.into();
        for &(period, value) in values {
            self.insert(holding.clone(), field, period, Some(value));
        }
        self
    }

    /// Records a value through a mutable reference, for use in loops.
    ///
    /// A later call for the same (holding, field, period) replaces the earlier one.
    pub fn insert(&mut self, holding: HoldingId, field: Field, period: Period, value: Option<f64>) {
        self.periods[field.family().index()].insert(period);
        let series = self.values.entry(holding).or_default();
        match value.filter(|v| v.is_finite()) {
            Some(v) => {
                series.insert((field, period), v);
            }
            None => {
                series.remove(&(field, period));
            }
        }
    }

    /// Finishes the store.
    #[must_use]
    pub fn build(self) -> InMemoryStore {
        let periods = self
            .periods
            .map(|set| set.into_iter().rev().collect::<Vec<_>>());
        InMemoryStore {
            holdings: self.values.keys().cloned().collect(),
            values: self.values,
            periods,
        }
    }
}
