//! The set of holdings a report generation aggregates over.

use ronda_traits::{HoldingId, SeriesStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Holdings currently in scope.
///
/// A holding absent from the set is excluded from every total, whatever the
/// store returns for it. Sets are immutable once built; a filtered scope is a
/// new set derived with [`InclusionSet::excluding`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionSet {
    members: BTreeSet<HoldingId>,
}

impl InclusionSet {
    /// Every holding known to the store (the full portfolio scope).
    pub fn all<S: SeriesStore + ?Sized>(store: &S) -> Self {
        Self {
            members: store.holdings().into_iter().collect(),
        }
    }

    /// A scope made of exactly the given holdings.
    pub fn from_ids<I, H>(ids: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<HoldingId>,
    {
        Self {
            members: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// A copy of this scope without the given holdings.
    #[must_use]
    pub fn excluding<I, H>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<HoldingId>,
    {
        let mut members = self.members.clone();
        for id in ids {
            members.remove(&id.into());
        }
        Self { members }
    }

    /// Whether `holding` contributes to totals.
    pub fn contains(&self, holding: &HoldingId) -> bool {
        self.members.contains(holding)
    }

    /// Number of holdings in scope.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the scope is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Holdings in scope, in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &HoldingId> {
        self.members.iter()
    }
}

impl<H: Into<HoldingId>> FromIterator<H> for InclusionSet {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}
