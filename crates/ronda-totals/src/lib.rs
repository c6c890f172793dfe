//! Totals aggregation for ronda.
//!
//! This crate sums holding-level figures into portfolio TOTALS and exposes
//! them through a period alignment index. Aggregation is a pure fold over an
//! explicit [`InclusionSet`]: nothing is cached between generations, so a
//! filtered ("recalculated") scope never sees totals computed for another.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ronda_totals::{AlignmentIndex, InclusionSet, Totals};
//! use ronda_traits::{Field, InMemoryStore, Period};
//!
//! let q = Period::month(2024, 3).unwrap();
//! let store = InMemoryStore::builder()
//!     .value("INFY", Field::TtmPat, q, 26.0)
//!     .value("TCS", Field::TtmPat, q, 46.0)
//!     .build();
//!
//! let scope = InclusionSet::all(&store).excluding(["TCS"]);
//! let index = AlignmentIndex::new(Totals::aggregate(&store, &scope));
//! assert_eq!(index.series(Field::TtmPat).value_at(0), Some(26.0));
//! ```

mod aggregator;
mod alignment;
mod inclusion;

// Re-export main types
pub use aggregator::Totals;
pub use alignment::{AlignedSeries, AlignmentIndex};
pub use inclusion::InclusionSet;
