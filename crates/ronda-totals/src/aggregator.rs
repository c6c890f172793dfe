//! Portfolio totals per field and period.

use crate::InclusionSet;
use ronda_traits::{Field, FieldFamily, HoldingId, Period, Result, RondaError, SeriesStore};
use tracing::{debug, warn};

/// Totals of every field over every period of its family.
///
/// A total is the sum over included holdings of the field's value at the
/// period. It is `None` when no included holding reports a value; absence is
/// never turned into zero.
#[derive(Debug, Clone)]
pub struct Totals {
    periods: [Vec<Period>; 3],
    values: [Vec<Option<f64>>; Field::COUNT],
    scope_size: usize,
}

impl Totals {
    /// Aggregates the store snapshot over `scope`.
    ///
    /// This is a pure fold: it reads the store, writes nothing back and keeps
    /// no state between calls.
    pub fn aggregate<S: SeriesStore + ?Sized>(store: &S, scope: &InclusionSet) -> Self {
        let periods = FieldFamily::ALL.map(|family| store.periods(family).to_vec());

        let values = std::array::from_fn(|i| {
            let field = Field::ALL[i];
            periods[field.family().index()]
                .iter()
                .map(|period| sum_included(store, scope, field, period))
                .collect::<Vec<_>>()
        });

        let totals = Self {
            periods,
            values,
            scope_size: scope.len(),
        };
        totals.report_quality(store, scope);
        totals
    }

    /// The total of `field` at `period`.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::UnknownPeriod`] if `period` is not part of the field family's sequence.
    pub fn total(&self, field: Field, period: &Period) -> Result<Option<f64>> {
        let family = field.family();
        let offset = self.periods[family.index()]
            .iter()
            .position(|p| p == period)
            .ok_or_else(|| RondaError::UnknownPeriod(format!("{period} ({family})")))?;
        Ok(self.values[field.index()][offset])
    }

    /// Totals of `field`, aligned with [`Totals::periods`] of its family.
    pub fn series(&self, field: Field) -> &[Option<f64>] {
        &self.values[field.index()]
    }

    /// Period sequence of a family, newest first.
    pub fn periods(&self, family: FieldFamily) -> &[Period] {
        &self.periods[family.index()]
    }

    /// Number of holdings the totals were aggregated over.
    pub const fn scope_size(&self) -> usize {
        self.scope_size
    }

    fn report_quality<S: SeriesStore + ?Sized>(&self, store: &S, scope: &InclusionSet) {
        for family in FieldFamily::ALL {
            let periods = self.periods(family);
            let present = Field::in_family(family)
                .map(|f| self.series(f).iter().flatten().count())
                .sum::<usize>();
            debug!(
                family = %family,
                periods = periods.len(),
                present,
                "Aggregated totals"
            );

            let Some(latest) = periods.first() else {
                continue;
            };
            for field in Field::in_family(family) {
                if self.series(field)[0].is_none() {
                    warn!(
                        target: "ronda::data_quality",
                        field = %field,
                        period = %latest,
                        "No included holding reports a value for the latest period"
                    );
                }
            }

            for holding in scope.iter() {
                if !reports_family(store, holding, family, periods) {
                    warn!(
                        target: "ronda::data_quality",
                        holding = %holding,
                        family = %family,
                        "Included holding reports no values for family"
                    );
                }
            }
        }
    }
}

fn sum_included<S: SeriesStore + ?Sized>(
    store: &S,
    scope: &InclusionSet,
    field: Field,
    period: &Period,
) -> Option<f64> {
    scope
        .iter()
        .filter_map(|holding| store.get(holding, field, period))
        .fold(None, |acc, v| Some(acc.unwrap_or(0.0) + v))
}

fn reports_family<S: SeriesStore + ?Sized>(
    store: &S,
    holding: &HoldingId,
    family: FieldFamily,
    periods: &[Period],
) -> bool {
    Field::in_family(family).any(|field| {
        periods
            .iter()
            .any(|period| store.get(holding, field, period).is_some())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ronda_traits::InMemoryStore;

    fn month(year: i32, month: u32) -> Period {
        Period::month(year, month).unwrap()
    }

    fn sample_store() -> InMemoryStore {
        InMemoryStore::builder()
            .value("A", Field::TtmRevenue, month(2024, 3), 600.0)
            .value("B", Field::TtmRevenue, month(2024, 3), 400.0)
            .value("A", Field::TtmPat, month(2024, 3), 90.0)
            .value("B", Field::TtmPat, month(2024, 3), 60.0)
            .value("A", Field::TtmRevenue, month(2023, 12), 550.0)
            .absent("B", Field::TtmRevenue, month(2023, 12))
            .value("B", Field::MarketCapFreeFloat, month(2024, 3), 2500.0)
            .build()
    }

    #[test]
    fn test_sum_over_included_holdings() {
        let store = sample_store();
        let totals = Totals::aggregate(&store, &InclusionSet::all(&store));

        assert_relative_eq!(
            totals.total(Field::TtmRevenue, &month(2024, 3)).unwrap().unwrap(),
            1000.0
        );
        assert_relative_eq!(
            totals.total(Field::TtmPat, &month(2024, 3)).unwrap().unwrap(),
            150.0
        );
        // B is absent in December; A alone makes the total.
        assert_relative_eq!(
            totals.total(Field::TtmRevenue, &month(2023, 12)).unwrap().unwrap(),
            550.0
        );
        assert_eq!(totals.scope_size(), 2);
    }

    #[test]
    fn test_total_is_absent_not_zero() {
        let store = sample_store();
        let totals = Totals::aggregate(&store, &InclusionSet::all(&store));

        assert_eq!(totals.total(Field::TtmPat, &month(2023, 12)).unwrap(), None);
        assert_eq!(totals.total(Field::TtmPatFreeFloat, &month(2024, 3)).unwrap(), None);
        assert_eq!(totals.series(Field::Price), &[None]);
    }

    #[test]
    fn test_excluded_holding_only_changes_its_fields() {
        let store = sample_store();
        let full = Totals::aggregate(&store, &InclusionSet::all(&store));
        let without_b = Totals::aggregate(&store, &InclusionSet::all(&store).excluding(["B"]));

        assert_relative_eq!(
            without_b.total(Field::TtmRevenue, &month(2024, 3)).unwrap().unwrap(),
            600.0
        );
        assert_eq!(
            without_b.total(Field::MarketCapFreeFloat, &month(2024, 3)).unwrap(),
            None
        );
        // B was absent here, so excluding it changes nothing.
        assert_eq!(
            without_b.total(Field::TtmRevenue, &month(2023, 12)).unwrap(),
            full.total(Field::TtmRevenue, &month(2023, 12)).unwrap()
        );
        // Fields B never reported are identical in both scopes.
        for field in [Field::Price, Field::QuarterlyPat, Field::TtmPatFreeFloat] {
            assert_eq!(without_b.series(field), full.series(field));
        }
    }

    #[test]
    fn test_empty_scope_gives_absent_totals() {
        let store = sample_store();
        let totals = Totals::aggregate(&store, &InclusionSet::default());

        for field in Field::ALL {
            assert!(totals.series(field).iter().all(Option::is_none));
        }
        assert_eq!(totals.periods(FieldFamily::Ttm).len(), 2);
    }

    #[test]
    fn test_unknown_period_is_structural_error() {
        let store = sample_store();
        let totals = Totals::aggregate(&store, &InclusionSet::all(&store));

        let result = totals.total(Field::TtmRevenue, &month(2019, 3));
        assert!(matches!(result, Err(RondaError::UnknownPeriod(_))));
    }
}
