//! Trade Data Loader Module
//! Reads the category/value/type trade CSV using Polars.

use polars::prelude::*;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const CATEGORY_COL: &str = "Category";
pub const VALUE_COL: &str = "Value";
pub const TYPE_COL: &str = "Type";

#[derive(Error, Debug)]
pub enum TradeLoadError {
    #[error("trade data file not found: {0}")]
    Missing(PathBuf),
    #[error("failed to read trade data: {0}")]
    Csv(#[from] PolarsError),
}

/// Direction of a trade flow relative to the reporting country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeType {
    Import,
    Export,
}

impl TradeType {
    /// Exact, case-sensitive match on the CSV spelling.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Import" => Some(TradeType::Import),
            "Export" => Some(TradeType::Export),
            _ => None,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Import => write!(f, "Import"),
            TradeType::Export => write!(f, "Export"),
        }
    }
}

/// One category's trade value in USD billions.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRow {
    pub category: String,
    pub value: f64,
    pub trade_type: TradeType,
}

impl TradeRow {
    pub fn new(category: impl Into<String>, value: f64, trade_type: TradeType) -> Self {
        Self {
            category: category.into(),
            value,
            trade_type,
        }
    }
}

/// Why a file row did not become a [`TradeRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SkipReason {
    MissingCategory,
    MissingValue,
    UnknownType,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingCategory => write!(f, "missing category"),
            SkipReason::MissingValue => write!(f, "missing or non-numeric value"),
            SkipReason::UnknownType => write!(f, "Type other than Import/Export"),
        }
    }
}

/// Rows loaded from the trade file plus the reason for every row left out.
#[derive(Debug, Clone, Default)]
pub struct TradeData {
    pub rows: Vec<TradeRow>,
    pub skipped: Vec<SkipReason>,
}

impl TradeData {
    pub fn skipped_rows(&self) -> usize {
        self.skipped.len()
    }
}

/// Loads the trade CSV from a fixed location.
pub struct TradeLoader {
    path: PathBuf,
}

impl TradeLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load every qualifying row in file order.
    pub fn load(&self) -> Result<TradeData, TradeLoadError> {
        if !self.path.is_file() {
            return Err(TradeLoadError::Missing(self.path.clone()));
        }

        let df = LazyCsvReader::new(&self.path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let data = Self::rows_from_dataframe(&df)?;
        tracing::info!(
            path = %self.path.display(),
            rows = data.rows.len(),
            skipped = data.skipped_rows(),
            "Loaded trade data"
        );
        Ok(data)
    }

    /// Extract trade rows from a frame with `Category`, `Value` and `Type` columns.
    pub fn rows_from_dataframe(df: &DataFrame) -> Result<TradeData, TradeLoadError> {
        let category = df.column(CATEGORY_COL)?.cast(&DataType::String)?;
        let category = category.as_materialized_series().str()?.clone();
        let value = df.column(VALUE_COL)?.cast(&DataType::Float64)?;
        let value = value.as_materialized_series().f64()?.clone();
        let kind = df.column(TYPE_COL)?.cast(&DataType::String)?;
        let kind = kind.as_materialized_series().str()?.clone();

        let mut data = TradeData::default();
        for i in 0..df.height() {
            let raw_type = kind.get(i).unwrap_or_default();
            match Self::classify(category.get(i), value.get(i), raw_type) {
                Ok(row) => data.rows.push(row),
                Err(reason) => {
                    tracing::warn!(
                        row = i + 1,
                        trade_type = raw_type,
                        %reason,
                        "Skipping trade row"
                    );
                    data.skipped.push(reason);
                }
            }
        }

        Ok(data)
    }

    /// Category text is kept verbatim; `Type` must match exactly.
    fn classify(
        category: Option<&str>,
        value: Option<f64>,
        raw_type: &str,
    ) -> Result<TradeRow, SkipReason> {
        let category = category.ok_or(SkipReason::MissingCategory)?;
        let value = value
            .filter(|v| !v.is_nan())
            .ok_or(SkipReason::MissingValue)?;
        let trade_type = TradeType::parse(raw_type).ok_or(SkipReason::UnknownType)?;
        Ok(TradeRow::new(category, value, trade_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "econ_monitor_{}_{}.csv",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_preserves_file_order() {
        let path = write_fixture(
            "order",
            "Category,Value,Type\nOil,100,Import\nTea,30,Export\nGold,50.5,Import\n",
        );

        let data = TradeLoader::new(&path).load().unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(data.skipped_rows(), 0);
        assert_eq!(
            data.rows,
            vec![
                TradeRow::new("Oil", 100.0, TradeType::Import),
                TradeRow::new("Tea", 30.0, TradeType::Export),
                TradeRow::new("Gold", 50.5, TradeType::Import),
            ]
        );
    }

    #[test]
    fn test_unknown_type_rows_are_skipped() {
        let path = write_fixture(
            "unknown",
            "Category,Value,Type\nOil,100,Import\nRice,12,import\nServices,80,Transit\n",
        );

        let data = TradeLoader::new(&path).load().unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(data.rows.len(), 1);
        assert_eq!(data.skipped, vec![SkipReason::UnknownType, SkipReason::UnknownType]);
    }

    #[test]
    fn test_skip_reasons_name_the_missing_field() {
        let path = write_fixture(
            "reasons",
            "Category,Value,Type
Oil,100,Import
,5,Import
Tea,,Export
Rice,12,import
",
        );

        let data = TradeLoader::new(&path).load().unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(data.rows.len(), 1);
        assert_eq!(
            data.skipped,
            vec![
                SkipReason::MissingCategory,
                SkipReason::MissingValue,
                SkipReason::UnknownType,
            ]
        );
        assert_eq!(SkipReason::MissingValue.to_string(), "missing or non-numeric value");
    }

    #[test]
    fn test_category_text_is_verbatim() {
        let path = write_fixture("verbatim", "Category,Value,Type
 Crude Oil ,10,Import
");
        let data = TradeLoader::new(&path).load().unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(data.rows[0].category, " Crude Oil ");
    }

    #[test]
    fn test_missing_file_is_distinct_error() {
        let loader = TradeLoader::new("/definitely/not/here/rbi_data.csv");
        assert!(matches!(loader.load(), Err(TradeLoadError::Missing(_))));
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let path = write_fixture("nocol", "Category,Amount\nOil,100\n");
        let result = TradeLoader::new(&path).load();
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(TradeLoadError::Csv(_))));
    }

    #[test]
    fn test_trade_type_parse_is_exact() {
        assert_eq!(TradeType::parse("Import"), Some(TradeType::Import));
        assert_eq!(TradeType::parse("Export"), Some(TradeType::Export));
        assert_eq!(TradeType::parse("EXPORT"), None);
        assert_eq!(TradeType::parse(" Import"), None);
    }
}
