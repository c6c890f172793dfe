//! Long-format series frames.
//!
//! A [`SeriesFrame`] wraps a Polars DataFrame holding one row per
//! (holding, field, period) observation and converts it into an
//! [`InMemoryStore`].

use crate::{Field, HoldingId, InMemoryStore, Period, Result, RondaError};
use polars::prelude::*;
use std::collections::BTreeSet;

/// Container for long-format holding data.
///
/// # Expected Schema
///
/// - `holding`: holding identifier
/// - `field`: field name, e.g. `ttm_revenue` or `q_pat_ff` (see [`Field`])
/// - `period`: `YYYYMM` or `YYYY-MM-DD`
/// - `value`: the figure; null marks an absent value
///
/// # Example
///
/// ```no_run
/// use ronda_traits::SeriesFrame;
/// use polars::prelude::*;
///
/// let df = df! {
///     "holding" => &["INFY", "TCS"],
///     "field" => &["ttm_revenue", "ttm_revenue"],
///     "period" => &["202403", "202403"],
///     "value" => &[Some(1530.0), None],
/// }
/// .unwrap();
///
/// let store = SeriesFrame::new(df).to_store().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SeriesFrame {
    data: DataFrame,
}

impl SeriesFrame {
    /// Columns every series frame must carry.
    pub const REQUIRED_COLUMNS: [&'static str; 4] = ["holding", "field", "period", "value"];

    /// Creates a new `SeriesFrame` from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether the frame is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Converts the frame into an in-memory store.
    ///
    /// Rows with a null value still declare their period for the field's
    /// family. Identifier columns are cast to strings and the value column to
    /// `f64`, so integer-typed CSV columns are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing, if an identifier cell
    /// is null, if a field name or period identifier is not recognised, or if
    /// two rows describe the same (holding, field, period).
    pub fn to_store(&self) -> Result<InMemoryStore> {
        for col in Self::REQUIRED_COLUMNS {
            if !self.has_column(col) {
                return Err(RondaError::MissingColumn(col.to_string()));
            }
        }

        let holdings = self.string_column("holding")?;
        let fields = self.string_column("field")?;
        let periods = self.string_column("period")?;
        let values = self
            .data
            .column("value")?
            .as_materialized_series()
            .cast(&DataType::Float64)?;

        let holdings = holdings.str()?;
        let fields = fields.str()?;
        let periods = periods.str()?;
        let values = values.f64()?;

        let mut builder = InMemoryStore::builder();
        let mut seen = BTreeSet::new();
        let rows = holdings
            .into_iter()
            .zip(fields.into_iter())
            .zip(periods.into_iter())
            .zip(values.into_iter());

        for (row, (((holding, field), period), value)) in rows.enumerate() {
            let (Some(holding), Some(field), Some(period)) = (holding, field, period) else {
                return Err(RondaError::InvalidData(format!(
                    "row {row}: holding, field and period must not be null"
                )));
            };
            let field: Field = field.parse()?;
            let period: Period = period.parse()?;
            let holding = HoldingId::new(holding);
            if !seen.insert((holding.clone(), field, period)) {
                return Err(RondaError::InvalidData(format!(
                    "row {row}: duplicate entry for {holding} {field} {period}"
                )));
            }
            builder.insert(holding, field, period, value);
        }

        Ok(builder.build())
    }

    fn string_column(&self, name: &str) -> Result<Series> {
        Ok(self
            .data
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::String)?)
    }
}

impl From<DataFrame> for SeriesFrame {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for SeriesFrame {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldFamily, SeriesStore};

    #[test]
    fn test_to_store() {
        let df = df! {
            "holding" => &["INFY", "INFY", "TCS"],
            "field" => &["ttm_revenue", "ttm_pat", "ttm_revenue"],
            "period" => &["202403", "202403", "202312"],
            "value" => &[Some(1530.0), Some(262.0), None],
        }
        .unwrap();

        let store = SeriesFrame::new(df).to_store().unwrap();
        let infy = HoldingId::from("INFY");
        let march = Period::month(2024, 3).unwrap();

        assert_eq!(store.get(&infy, Field::TtmRevenue, &march), Some(1530.0));
        assert_eq!(store.get(&infy, Field::TtmPat, &march), Some(262.0));
        assert_eq!(store.holdings().len(), 2);
        assert_eq!(store.periods(FieldFamily::Ttm).len(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_integer_columns_are_cast() {
        let df = df! {
            "holding" => &["A"],
            "field" => &["market_cap_ff"],
            "period" => &[202406_i64],
            "value" => &[5000_i64],
        }
        .unwrap();

        let store = SeriesFrame::new(df).to_store().unwrap();
        let june = Period::month(2024, 6).unwrap();
        assert_eq!(
            store.get(&HoldingId::from("A"), Field::MarketCapFreeFloat, &june),
            Some(5000.0)
        );
    }

    #[test]
    fn test_duplicate_rows_are_rejected() {
        // A later empty cell must not erase the earlier figure.
        let df = df! {
            "holding" => &["INFY", "INFY"],
            "field" => &["ttm_revenue", "ttm_revenue"],
            "period" => &["202403", "202403"],
            "value" => &[Some(1530.0), None],
        }
        .unwrap();

        let result = SeriesFrame::new(df).to_store();
        assert!(matches!(result, Err(RondaError::InvalidData(m)) if m.contains("row 1")));
    }

    #[test]
    fn test_missing_column() {
        let df = df! {
            "holding" => &["A"],
            "field" => &["ttm_pat"],
            "period" => &["202406"],
        }
        .unwrap();

        let result = SeriesFrame::new(df).to_store();
        assert!(matches!(result, Err(RondaError::MissingColumn(c)) if c == "value"));
    }

    #[test]
    fn test_unknown_field_is_structural_error() {
        let df = df! {
            "holding" => &["A"],
            "field" => &["ttm_ebitda"],
            "period" => &["202406"],
            "value" => &[1.0],
        }
        .unwrap();

        let result = SeriesFrame::new(df).to_store();
        assert!(matches!(result, Err(RondaError::UnknownField(_))));
    }

    #[test]
    fn test_has_column() {
        let df = df! {
            "holding" => &["A"],
        }
        .unwrap();

        let frame = SeriesFrame::from(df);
        assert!(frame.has_column("holding"));
        assert!(!frame.has_column("value"));
        assert_eq!(frame.len(), 1);
    }
}
