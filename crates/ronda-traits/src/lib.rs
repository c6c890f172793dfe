#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the ronda portfolio metrics engine.
//!
//! This crate provides the vocabulary shared by every other ronda crate:
//! holdings, fields and their families, periods, the [`SeriesStore`] contract
//! the engine reads from, and the long-format [`SeriesFrame`] loader.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod frame;
pub mod store;
pub mod types;

// Re-exports
pub use error::{Result, RondaError};
pub use frame::SeriesFrame;
pub use store::{InMemoryStore, SeriesStore, StoreBuilder};
pub use types::{Field, FieldFamily, HoldingId, Measure, Period, Variant};
