#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # ronda
//!
//! Portfolio totals and fundamental metrics engine.
//!
//! ronda is an umbrella crate that re-exports all ronda sub-crates for
//! convenience, plus [`generate_report`], the one-call pipeline from a store
//! snapshot to a [`MetricTable`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use ronda::{EngineConfig, InclusionSet, SeriesFrame, generate_report};
//!
//! # fn main() -> ronda::Result<()> {
//! let store = SeriesFrame::new(df).to_store()?;
//!
//! // Full portfolio, and the same portfolio without one holding
//! let full = InclusionSet::all(&store);
//! let recalculated = full.excluding(["TCS"]);
//!
//! let report = generate_report(&store, &full, &EngineConfig::default())?;
//! let filtered = generate_report(&store, &recalculated, &EngineConfig::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types and the [`SeriesStore`] contract
//! - [`totals`] - Totals aggregation and period alignment
//! - [`metrics`] - The metric catalogue and engine
//!
//! ## Architecture
//!
//! 1. **Store**: a read-only snapshot of per-holding figures
//! 2. **Totals**: a pure fold of included holdings into one total per field and period
//! 3. **Alignment**: offset lookups over the totals, 0 = most recent
//! 4. **Engine**: every formula at every period, absence as a value

use tracing::info;

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types for ronda.
///
/// Holdings, fields, periods, the [`SeriesStore`] contract, and the
/// long-format [`SeriesFrame`] loader.
pub mod traits {
    pub use ronda_traits::*;
}

// Re-export error types
pub use ronda_traits::{Result, RondaError};

// Re-export common types
pub use ronda_traits::{
    Field, FieldFamily, HoldingId, InMemoryStore, Measure, Period, SeriesFrame, SeriesStore,
    StoreBuilder, Variant,
};

// ============================================================================
// Totals
// ============================================================================

/// Totals aggregation and period alignment.
///
/// ## Key Components
///
/// - **InclusionSet**: the holdings in scope for one generation
/// - **Totals**: sums per field and period, absent when no holding reports
/// - **AlignmentIndex**: `value_at(offset)` lookups shared by every formula
pub mod totals {
    pub use ronda_totals::*;
}

pub use ronda_totals::{AlignedSeries, AlignmentIndex, InclusionSet, Totals};

// ============================================================================
// Metrics
// ============================================================================

/// The metric catalogue and engine.
///
/// ## Available Metrics
///
/// - **Profitability**: PATM
/// - **Growth**: QoQ, YoY and six-year CAGR
/// - **Valuation**: current and average PE/PR, reval/deval, 10-quarter P/R extremes
/// - **Alpha**: PE yield, growth, bond rate, alpha over the bond benchmark
pub mod metrics {
    pub use ronda_metrics::*;
}

pub use ronda_metrics::{
    EngineConfig, Metric, MetricEngine, MetricId, MetricKey, MetricRow, MetricTable,
};

// ============================================================================
// Pipeline
// ============================================================================

/// Aggregates `store` over `scope` and evaluates the full catalogue.
///
/// Totals are computed fresh from `scope` on every call and dropped with the
/// index afterwards; nothing is shared between calls, so concurrent calls
/// with different scopes cannot see each other's totals.
///
/// # Errors
///
/// Returns [`RondaError::Config`] if `config` is invalid.
pub fn generate_report<S: SeriesStore + ?Sized>(
    store: &S,
    scope: &InclusionSet,
    config: &EngineConfig,
) -> Result<MetricTable> {
    let engine = MetricEngine::new(config.clone())?;
    let index = AlignmentIndex::new(Totals::aggregate(store, scope));
    info!(
        holdings = scope.len(),
        ttm_periods = index.period_count(FieldFamily::Ttm),
        quarterly_periods = index.period_count(FieldFamily::Quarterly),
        market_periods = index.period_count(FieldFamily::Market),
        "Aggregated totals"
    );
    Ok(engine.generate(&index))
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use ronda::prelude::*;
/// ```
pub mod prelude {
    pub use crate::generate_report;
    pub use crate::traits::*;
    pub use crate::{AlignmentIndex, InclusionSet, Totals};
    pub use crate::{EngineConfig, Metric, MetricEngine, MetricId, MetricKey, MetricTable};
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_store(_store: &dyn SeriesStore) {}
        fn _accept_metric(_metric: &dyn Metric) {}
    }

    #[test]
    fn test_invalid_config() {
        let store = InMemoryStore::default();
        let config = EngineConfig {
            cagr_years: 0,
            ..Default::default()
        };

        let result = generate_report(&store, &InclusionSet::all(&store), &config);
        assert!(matches!(result, Err(RondaError::Config(_))));
    }
}
