//! Metric implementations for the ronda engine.
//!
//! This crate provides the formula catalogue applied to portfolio totals:
//! - Profitability: PATM
//! - Growth: QoQ, YoY and six-year CAGR, each for four variants
//! - Valuation: current, average and reval/deval PE and PR, P/R extremes
//! - Alpha: PE yield, growth, bond rate and alpha over the bond benchmark
//!
//! Every formula returns `Option<f64>`; `None` means "not applicable" and is
//! never an error.
//!
//! # Example
//!
//! ```ignore
//! use ronda_metrics::{EngineConfig, MetricEngine};
//! use ronda_metrics::registry::available_metrics;
//!
//! let engine = MetricEngine::new(EngineConfig::default())?;
//! let table = engine.generate(&index);
//!
//! // Discover available metrics
//! let metrics = available_metrics();
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod alpha;
pub mod growth;
pub mod profitability;
pub mod registry;
pub mod valuation;

mod config;
mod engine;
mod math;
mod metric;
mod result;

#[cfg(test)]
mod testing;

// Re-export key types
pub use config::{DEFAULT_BOND_RATE, EngineConfig, GrowthSource};
pub use engine::MetricEngine;
pub use metric::{Extreme, Horizon, Metric, MetricId, MetricKey, Multiple, Timeline};
pub use registry::{MetricCategory, MetricInfo};
pub use result::{MetricRow, MetricTable};
