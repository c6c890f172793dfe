//! Offset lookups over aligned total series.
//!
//! Every "N periods back" lookup in the engine goes through
//! [`AlignedSeries::value_at`] or [`AlignedSeries::window`]. Offset 0 is the
//! most recent period of the field's family; an offset past the end of the
//! sequence is absence, not an error.

use crate::Totals;
use ronda_traits::{Field, FieldFamily, Period};

/// Read-only view of one field's totals, indexed by offset.
#[derive(Debug, Clone, Copy)]
pub struct AlignedSeries<'a> {
    field: Field,
    values: &'a [Option<f64>],
}

impl<'a> AlignedSeries<'a> {
    /// The field this series carries.
    pub const fn field(&self) -> Field {
        self.field
    }

    /// Number of periods in the field's family.
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the family has no periods.
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The total at `offset` periods back, or `None` when the total is
    /// absent or the offset exceeds the available range.
    pub fn value_at(&self, offset: usize) -> Option<f64> {
        self.values.get(offset).copied().flatten()
    }

    /// The `len` totals starting at `offset`, newest first.
    ///
    /// Returns `None` unless the whole window lies within the available
    /// range. Entries inside the window may still be absent.
    pub fn window(&self, offset: usize, len: usize) -> Option<&'a [Option<f64>]> {
        let end = offset.checked_add(len)?;
        self.values.get(offset..end)
    }
}

/// Offset index over a generation's [`Totals`].
#[derive(Debug, Clone)]
pub struct AlignmentIndex {
    totals: Totals,
}

impl AlignmentIndex {
    /// Wraps the totals of one generation.
    pub const fn new(totals: Totals) -> Self {
        Self { totals }
    }

    /// The aligned series of `field`.
    pub fn series(&self, field: Field) -> AlignedSeries<'_> {
        AlignedSeries {
            field,
            values: self.totals.series(field),
        }
    }

    /// Number of periods in a family.
    pub fn period_count(&self, family: FieldFamily) -> usize {
        self.totals.periods(family).len()
    }

    /// The family with the most periods.
    ///
    /// Ties go to the market family, then TTM.
    pub fn longest_family(&self) -> FieldFamily {
        [FieldFamily::Ttm, FieldFamily::Quarterly]
            .into_iter()
            .fold(FieldFamily::Market, |longest, family| {
                if self.period_count(family) > self.period_count(longest) {
                    family
                } else {
                    longest
                }
            })
    }

    /// Period sequence of a family, newest first.
    pub fn periods(&self, family: FieldFamily) -> &[Period] {
        self.totals.periods(family)
    }

    /// The period at `offset` in a family, if any.
    pub fn period_at(&self, family: FieldFamily, offset: usize) -> Option<&Period> {
        self.totals.periods(family).get(offset)
    }

    /// The underlying totals.
    pub const fn totals(&self) -> &Totals {
        &self.totals
    }
}
