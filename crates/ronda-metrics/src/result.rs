//! The typed output mapping of one report generation.

use crate::{MetricId, MetricKey};
use polars::prelude::*;
use ronda_traits::{FieldFamily, Period, Result, Variant};
use serde::Serialize;
use std::collections::BTreeMap;

/// One flattened entry of a [`MetricTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    /// Metric name.
    pub metric: &'static str,
    /// Variant name, for metrics that have variants.
    pub variant: Option<&'static str>,
    /// Period offset, 0 = most recent.
    pub period_index: usize,
    /// Period identifier, when the offset maps to a known period.
    pub period: Option<String>,
    /// The value, or `None` when not applicable.
    pub value: Option<f64>,
}

/// Mapping from (metric, variant, period offset) to a value or "not
/// applicable".
///
/// Every emitted key is present; a `None` value means the formula was
/// evaluated and did not apply. Keys that were never emitted are reported as
/// missing by [`MetricTable::get`].
#[derive(Debug, Clone)]
pub struct MetricTable {
    values: BTreeMap<MetricKey, Option<f64>>,
    periods: [Vec<Period>; 3],
    longest: FieldFamily,
}

impl MetricTable {
    /// Creates an empty table over the given period sequences.
    ///
    /// `longest` is the family whose periods label metrics without a variant.
    #[must_use]
    pub fn new(periods: [Vec<Period>; 3], longest: FieldFamily) -> Self {
        Self {
            values: BTreeMap::new(),
            periods,
            longest,
        }
    }

    /// Records one evaluated value.
    pub fn insert(&mut self, key: MetricKey, value: Option<f64>) {
        self.values.insert(key, value);
    }

    /// The entry for `key`: `None` if never emitted, `Some(None)` if not
    /// applicable.
    #[must_use]
    pub fn get(&self, key: &MetricKey) -> Option<Option<f64>> {
        self.values.get(key).copied()
    }

    /// The value of a metric at a period offset, `None` if not applicable or
    /// not emitted.
    #[must_use]
    pub fn value(&self, metric: MetricId, variant: Option<Variant>, period: usize) -> Option<f64> {
        self.get(&MetricKey::new(metric, variant, period)).flatten()
    }

    /// All entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&MetricKey, Option<f64>)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }

    /// Offset-0 entries: the latest value of every (metric, variant) pair.
    pub fn latest(&self) -> impl Iterator<Item = (&MetricKey, Option<f64>)> {
        self.entries().filter(|(k, _)| k.period == 0)
    }

    /// The period an entry's offset refers to.
    #[must_use]
    pub fn period_of(&self, key: &MetricKey) -> Option<&Period> {
        self.periods(key.timeline().resolve(self.longest)).get(key.period)
    }

    /// Period sequence of a family, newest first.
    #[must_use]
    pub fn periods(&self, family: FieldFamily) -> &[Period] {
        &self.periods[family.index()]
    }

    /// Number of emitted entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of entries with a value.
    #[must_use]
    pub fn present(&self) -> usize {
        self.values.values().filter(|v| v.is_some()).count()
    }

    /// Flattens the table into rows, in key order.
    #[must_use]
    pub fn rows(&self) -> Vec<MetricRow> {
        self.entries()
            .map(|(key, value)| MetricRow {
                metric: key.metric.name(),
                variant: key.variant.map(|v| v.name()),
                period_index: key.period,
                period: self.period_of(key).map(Period::label),
                value,
            })
            .collect()
    }

    /// Renders the table as a DataFrame with columns `metric`, `variant`,
    /// `period_index`, `period` and `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the DataFrame cannot be assembled.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let rows = self.rows();
        let metric: Vec<&str> = rows.iter().map(|r| r.metric).collect();
        let variant: Vec<Option<&str>> = rows.iter().map(|r| r.variant).collect();
        let period_index: Vec<u32> = rows
            .iter()
            .map(|r| u32::try_from(r.period_index).unwrap_or(u32::MAX))
            .collect();
        let period: Vec<Option<&str>> = rows.iter().map(|r| r.period.as_deref()).collect();
        let value: Vec<Option<f64>> = rows.iter().map(|r| r.value).collect();

        let df = df! {
            "metric" => metric,
            "variant" => variant,
            "period_index" => period_index,
            "period" => period,
            "value" => value,
        }?;
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Multiple;

    fn sample() -> MetricTable {
        let periods = [
            vec![Period::month(2024, 3).unwrap(), Period::month(2023, 12).unwrap()],
            Vec::new(),
            vec![Period::month(2024, 3).unwrap()],
        ];
        let mut table = MetricTable::new(periods, FieldFamily::Ttm);
        table.insert(MetricKey::new(MetricId::Patm, Some(Variant::Ttm), 0), Some(15.0));
        table.insert(MetricKey::new(MetricId::Patm, Some(Variant::Ttm), 1), None);
        table.insert(MetricKey::new(MetricId::Current(Multiple::Pe), None, 0), Some(20.0));
        table
    }

    #[test]
    fn test_get_distinguishes_missing_and_not_applicable() {
        let table = sample();

        let key = MetricKey::new(MetricId::Patm, Some(Variant::Ttm), 1);
        assert_eq!(table.get(&key), Some(None));
        let key = MetricKey::new(MetricId::Patm, Some(Variant::Ttm), 2);
        assert_eq!(table.get(&key), None);
        assert_eq!(table.value(MetricId::Patm, Some(Variant::Ttm), 0), Some(15.0));
        assert_eq!(table.len(), 3);
        assert_eq!(table.present(), 2);
    }

    #[test]
    fn test_latest() {
        let table = sample();
        let latest: Vec<_> = table.latest().map(|(k, v)| (k.metric, v)).collect();

        assert_eq!(latest.len(), 2);
        assert!(latest.contains(&(MetricId::Patm, Some(15.0))));
        assert!(latest.contains(&(MetricId::Current(Multiple::Pe), Some(20.0))));
    }

    #[test]
    fn test_rows_carry_period_labels() {
        let table = sample();
        let rows = table.rows();

        let patm_old = rows
            .iter()
            .find(|r| r.metric == "patm" && r.period_index == 1)
            .unwrap();
        assert_eq!(patm_old.period.as_deref(), Some("202312"));
        assert_eq!(patm_old.variant, Some("ttm"));
        assert_eq!(patm_old.value, None);
    }

    #[test]
    fn test_keys_without_variant_follow_longest_family() {
        let table = sample();
        let key = MetricKey::new(MetricId::BondRate, None, 1);

        assert_eq!(table.period_of(&key), Some(&Period::month(2023, 12).unwrap()));
    }

    #[test]
    fn test_to_frame() {
        let df = sample().to_frame().unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 5);
        let values = df.column("value").unwrap().as_materialized_series().f64().unwrap().clone();
        assert_eq!(values.null_count(), 1);
    }
}
