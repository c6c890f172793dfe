//! End-to-end report generation over small portfolios.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ronda::metrics::{DEFAULT_BOND_RATE, Multiple};
use ronda::{
    EngineConfig, Field, InMemoryStore, InclusionSet, Measure, MetricId, MetricKey, Period,
    StoreBuilder, Variant, generate_report,
};

fn quarter(quarters_back: usize) -> Period {
    let months = 2024 * 12 + 2 - 3 * quarters_back as i32;
    Period::month(months / 12, (months % 12) as u32 + 1).unwrap()
}

fn series(builder: StoreBuilder, holding: &str, field: Field, values: &[f64]) -> StoreBuilder {
    let points: Vec<_> = values
        .iter()
        .enumerate()
        .map(|(k, v)| (quarter(k), *v))
        .collect();
    builder.series(holding, field, &points)
}

/// Two holdings whose totals give PATM 15 and PE 20, with a 24-quarter TTM
/// revenue history growing 10% a year over six years.
fn portfolio() -> InMemoryStore {
    let mut revenue_a = vec![300.0; 24];
    let mut revenue_b = vec![700.0; 24];
    let growth = 1.1_f64.powi(6);
    revenue_a[0] = 300.0 * growth;
    revenue_b[0] = 700.0 * growth;

    let mut builder = InMemoryStore::builder();
    builder = series(builder, "A", Field::TtmRevenue, &revenue_a);
    builder = series(builder, "B", Field::TtmRevenue, &revenue_b);
    builder = series(builder, "A", Field::TtmPat, &[60.0, 50.0]);
    builder = series(builder, "B", Field::TtmPat, &[40.0, 50.0]);
    builder = series(builder, "A", Field::QuarterlyRevenue, &[66.0, 60.0]);
    builder = series(builder, "B", Field::QuarterlyRevenue, &[44.0, 40.0]);
    builder = series(builder, "A", Field::MarketCapFreeFloat, &[1200.0, 900.0]);
    builder = series(builder, "B", Field::MarketCapFreeFloat, &[800.0, 600.0]);
    builder
        .value("C", Field::Price, quarter(0), 12.5)
        .build()
}

fn default_report(store: &InMemoryStore, scope: &InclusionSet) -> ronda::MetricTable {
    generate_report(store, scope, &EngineConfig::default()).unwrap()
}

#[test]
fn test_patm_on_totals() {
    let mut builder = InMemoryStore::builder();
    builder = series(builder, "A", Field::TtmPat, &[90.0, 10.0]);
    builder = series(builder, "B", Field::TtmPat, &[60.0, 10.0]);
    builder = series(builder, "A", Field::TtmRevenue, &[600.0, 0.0]);
    builder = series(builder, "B", Field::TtmRevenue, &[400.0, 0.0]);
    let store = builder.build();

    let table = default_report(&store, &InclusionSet::all(&store));

    let patm = table.value(MetricId::Patm, Some(Variant::Ttm), 0).unwrap();
    assert_relative_eq!(patm, 15.0, epsilon = 1e-12);
    // Zero revenue total: emitted, not applicable.
    let key = MetricKey::new(MetricId::Patm, Some(Variant::Ttm), 1);
    assert_eq!(table.get(&key), Some(None));
}

#[test]
fn test_absent_totals_are_not_zero() {
    let store = portfolio();
    let table = default_report(&store, &InclusionSet::all(&store));

    // Nobody reports free-float TTM figures: every free-float TTM metric is
    // not applicable rather than zero.
    for (key, value) in table.entries() {
        if key.variant == Some(Variant::TtmFreeFloat) {
            assert_eq!(value, None, "{} should be not applicable", key.metric);
        }
    }
}

#[test]
fn test_sequential_growth() {
    let store = portfolio();
    let table = default_report(&store, &InclusionSet::all(&store));

    let qoq = table
        .value(MetricId::QoQ(Measure::Revenue), Some(Variant::Quarterly), 0)
        .unwrap();
    assert_abs_diff_eq!(qoq, 0.10, epsilon = 1e-12);

    // Only two quarters: YoY is emitted but not applicable at every offset.
    for offset in 0..2 {
        let key = MetricKey::new(
            MetricId::YoY(Measure::Revenue),
            Some(Variant::Quarterly),
            offset,
        );
        assert_eq!(table.get(&key), Some(None));
    }
}

#[test]
fn test_flat_cagr_is_zero() {
    let mut builder = InMemoryStore::builder();
    builder = series(builder, "A", Field::QuarterlyPat, &[42.0; 24]);
    let store = builder.build();

    let table = default_report(&store, &InclusionSet::all(&store));
    let cagr = table
        .value(MetricId::SixYearCagr(Measure::Pat), Some(Variant::Quarterly), 0)
        .unwrap();
    assert_abs_diff_eq!(cagr, 0.0, epsilon = 1e-9);
}

#[test]
fn test_alpha_from_totals() {
    let store = portfolio();
    let table = default_report(&store, &InclusionSet::all(&store));

    let pe = table.value(MetricId::Current(Multiple::Pe), None, 0).unwrap();
    assert_relative_eq!(pe, 20.0, epsilon = 1e-12);
    let pe_yield = table.value(MetricId::PeYield, None, 0).unwrap();
    assert_relative_eq!(pe_yield, 0.05, epsilon = 1e-12);
    let growth = table.value(MetricId::Growth, None, 0).unwrap();
    assert_abs_diff_eq!(growth, 0.10, epsilon = 1e-12);

    let alpha = table.value(MetricId::AlphaBondCagr, None, 0).unwrap();
    assert_abs_diff_eq!(alpha, 0.918_599_353_004_217_4, epsilon = 1e-6);

    let absolute = table.value(MetricId::AlphaAbsolute, None, 0).unwrap();
    let expected = ((1.0 + alpha / 100.0).powi(10) - 1.0) * 100.0;
    assert_abs_diff_eq!(absolute, expected, epsilon = 1e-9);

    let bond = table.value(MetricId::BondRate, None, 1).unwrap();
    assert_relative_eq!(bond, 5.117, epsilon = 1e-12);
}

#[test]
fn test_recalculated_scope_isolation() {
    let store = portfolio();
    let full_scope = InclusionSet::all(&store);
    let full = default_report(&store, &full_scope);
    let without_c = default_report(&store, &full_scope.excluding(["C"]));
    let without_b = default_report(&store, &full_scope.excluding(["B"]));

    // C only reports a price, which no metric reads.
    assert_eq!(full.rows(), without_c.rows());

    // B moves every total it contributed to.
    let pe_full = full.value(MetricId::Current(Multiple::Pe), None, 0).unwrap();
    let pe_without_b = without_b
        .value(MetricId::Current(Multiple::Pe), None, 0)
        .unwrap();
    assert_relative_eq!(pe_full, 20.0, epsilon = 1e-12);
    assert_relative_eq!(pe_without_b, 20.0, epsilon = 1e-12);

    let patm_full = full.value(MetricId::Patm, Some(Variant::Ttm), 0).unwrap();
    let patm_without_b = without_b
        .value(MetricId::Patm, Some(Variant::Ttm), 0)
        .unwrap();
    assert!((patm_full - patm_without_b).abs() > 1e-6);
}

#[test]
fn test_concurrent_generations_do_not_share_totals() {
    let store = portfolio();
    let full_scope = InclusionSet::all(&store);
    let filtered_scope = full_scope.excluding(["B"]);

    let expected_full = default_report(&store, &full_scope).rows();
    let expected_filtered = default_report(&store, &filtered_scope).rows();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let scope = if i % 2 == 0 { &full_scope } else { &filtered_scope };
                let store = &store;
                s.spawn(move || (i, default_report(store, scope).rows()))
            })
            .collect();

        for handle in handles {
            let (i, rows) = handle.join().unwrap();
            if i % 2 == 0 {
                assert_eq!(rows, expected_full);
            } else {
                assert_eq!(rows, expected_filtered);
            }
        }
    });
}

#[test]
fn test_latest_snapshot() {
    let store = portfolio();
    let table = default_report(&store, &InclusionSet::all(&store));

    let latest: Vec<_> = table.latest().collect();
    assert!(latest.iter().all(|(key, _)| key.period == 0));
    // 4 variants x 7 variant metrics + 17 market metrics.
    assert_eq!(latest.len(), 4 * 7 + 17);
    assert_eq!(
        table.period_of(latest[0].0).map(Period::label).as_deref(),
        Some("202403")
    );
}

#[test]
fn test_uneven_family_lengths() {
    // 24 TTM quarters against two market observations.
    let store = portfolio();
    let table = default_report(&store, &InclusionSet::all(&store));

    let bond = MetricKey::new(MetricId::BondRate, None, 23);
    assert_eq!(table.get(&bond), Some(Some(DEFAULT_BOND_RATE)));
    assert_eq!(
        table.period_of(&bond).map(Period::label).as_deref(),
        Some("201806")
    );

    // Market-backed metrics keep their keys past the market history.
    let pe = MetricKey::new(MetricId::Current(Multiple::Pe), None, 5);
    assert_eq!(table.get(&pe), Some(None));
    let growth = MetricKey::new(MetricId::Growth, None, 5);
    assert_eq!(table.get(&growth), Some(None));
}

#[test]
fn test_ttm_only_snapshot_keeps_bond_rate_and_growth() {
    let mut revenue = vec![1000.0; 24];
    revenue[0] = 1000.0 * 1.1_f64.powi(6);
    let store = series(InMemoryStore::builder(), "A", Field::TtmRevenue, &revenue).build();
    let table = default_report(&store, &InclusionSet::all(&store));

    let bond = MetricKey::new(MetricId::BondRate, None, 0);
    assert_eq!(table.get(&bond), Some(Some(DEFAULT_BOND_RATE)));

    let cagr = table
        .value(MetricId::SixYearCagr(Measure::Revenue), Some(Variant::Ttm), 0)
        .unwrap();
    let growth = table.value(MetricId::Growth, None, 0).unwrap();
    assert_abs_diff_eq!(growth, 0.10, epsilon = 1e-12);
    assert_relative_eq!(growth, cagr, epsilon = 1e-12);

    // No market data: emitted, not applicable.
    for metric in [MetricId::Current(Multiple::Pe), MetricId::PeYield, MetricId::AlphaBondCagr] {
        let key = MetricKey::new(metric, None, 0);
        assert_eq!(table.get(&key), Some(None), "{metric}");
    }
    // Quarterly variants have no periods to report on.
    assert_eq!(table.latest().count(), 2 * 7 + 17);
}
