//! Fixtures for formula tests.

use ronda_totals::{AlignmentIndex, InclusionSet, Totals};
use ronda_traits::{Field, InMemoryStore, Period};

/// The period `quarters_back` quarters before March 2024.
pub(crate) fn quarter(quarters_back: usize) -> Period {
    let months = 2024 * 12 + 2 - 3 * quarters_back as i32;
    Period::month(months / 12, (months % 12) as u32 + 1).unwrap()
}

/// An index whose totals are exactly the given series, newest first.
pub(crate) fn index(series: &[(Field, &[Option<f64>])]) -> AlignmentIndex {
    let mut builder = InMemoryStore::builder();
    for &(field, values) in series {
        for (offset, value) in values.iter().enumerate() {
            builder.insert("A".into(), field, quarter(offset), *value);
        }
    }
    let store = builder.build();
    AlignmentIndex::new(Totals::aggregate(&store, &InclusionSet::all(&store)))
}

/// `n` copies of a present value.
pub(crate) fn flat(value: f64, n: usize) -> Vec<Option<f64>> {
    vec![Some(value); n]
}
