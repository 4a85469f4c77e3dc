//! Indicator Table Module
//! Fetches the two indicator series and aligns them into one row per year.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Failure of a single remote indicator query.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("source reported: {0}")]
    Api(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// One raw value as returned by the source, keyed by its textual year label.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub year_label: String,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(year_label: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            year_label: year_label.into(),
            value,
        }
    }
}

/// A remote statistical data source queried by indicator, country and years.
pub trait IndicatorSource: Send + Sync {
    fn fetch(
        &self,
        indicator: &str,
        country: &str,
        years: RangeInclusive<i32>,
    ) -> Result<Vec<Observation>, FetchError>;
}

/// Inflation and unemployment for one year. Either value may be absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyIndicatorRow {
    pub year: i32,
    pub inflation: Option<f64>,
    pub unemployment: Option<f64>,
}

impl YearlyIndicatorRow {
    /// `(unemployment, inflation)` when both values are present.
    pub fn pair(&self) -> Option<(f64, f64)> {
        match (self.unemployment, self.inflation) {
            (Some(u), Some(i)) => Some((u, i)),
            _ => None,
        }
    }
}

/// One series keyed by year, values already filtered to the window.
pub type YearSeries = BTreeMap<i32, Option<f64>>;

/// Year-ordered indicator table covering the whole configured window.
#[derive(Debug, Clone, Default)]
pub struct IndicatorTable {
    pub rows: Vec<YearlyIndicatorRow>,
}

impl IndicatorTable {
    /// Parse one series' year labels and keep the observations inside `years`.
    ///
    /// For repeated years the first observation wins.
    pub fn index_by_year(
        observations: &[Observation],
        years: &RangeInclusive<i32>,
    ) -> Result<YearSeries, FetchError> {
        let mut by_year = BTreeMap::new();
        for obs in observations {
            let year = parse_year_label(&obs.year_label)?;
            if years.contains(&year) {
                // NaN is how some sources spell "no value"
                let value = obs.value.filter(|v| !v.is_nan());
                by_year.entry(year).or_insert(value);
            }
        }
        Ok(by_year)
    }

    /// Join two indexed series by exact year equality, one row per year of `years`.
    pub fn from_series(
        inflation: &YearSeries,
        unemployment: &YearSeries,
        years: RangeInclusive<i32>,
    ) -> Self {
        let rows = years
            .map(|year| YearlyIndicatorRow {
                year,
                inflation: inflation.get(&year).copied().flatten(),
                unemployment: unemployment.get(&year).copied().flatten(),
            })
            .collect();

        Self { rows }
    }

    /// `(unemployment, inflation)` pairs of the clean rows.
    pub fn clean_pairs(&self) -> Vec<(f64, f64)> {
        self.rows.iter().filter_map(YearlyIndicatorRow::pair).collect()
    }

    /// True when no year carries any value at all.
    pub fn has_no_values(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.inflation.is_none() && row.unemployment.is_none())
    }

    /// Rows ordered most recent year first, for the raw data view.
    pub fn rows_descending(&self) -> Vec<YearlyIndicatorRow> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.year.cmp(&a.year));
        rows
    }

    /// Year with the highest inflation reading, if any.
    pub fn peak_inflation(&self) -> Option<(i32, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.inflation.map(|v| (row.year, v)))
            .fold(None, |best, (year, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((year, v)),
            })
    }
}

/// Convert a source year label such as `"2005"` or `"YR2005"` to an integer.
pub fn parse_year_label(label: &str) -> Result<i32, FetchError> {
    let trimmed = label.trim();
    let digits = trimmed.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    digits
        .parse::<i32>()
        .map_err(|_| FetchError::Malformed(format!("unrecognised year label '{}'", label)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(label: &str, value: Option<f64>) -> Observation {
        Observation::new(label, value)
    }

    fn join(
        inflation: &[Observation],
        unemployment: &[Observation],
        years: RangeInclusive<i32>,
    ) -> Result<IndicatorTable, FetchError> {
        let inflation = IndicatorTable::index_by_year(inflation, &years)?;
        let unemployment = IndicatorTable::index_by_year(unemployment, &years)?;
        Ok(IndicatorTable::from_series(&inflation, &unemployment, years))
    }

    #[test]
    fn test_parse_year_label_strips_prefix() {
        assert_eq!(parse_year_label("YR2005").unwrap(), 2005);
        assert_eq!(parse_year_label("2019").unwrap(), 2019);
        assert_eq!(parse_year_label(" 2001 ").unwrap(), 2001);
        assert!(matches!(
            parse_year_label("YR20x1"),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn test_join_has_one_row_per_year() {
        let inflation = vec![obs("YR2001", Some(3.8)), obs("YR2000", Some(4.0))];
        let unemployment = vec![obs("YR2002", Some(7.9))];

        let table = join(&inflation, &unemployment, 2000..=2003).unwrap();

        let years: Vec<i32> = table.rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2000, 2001, 2002, 2003]);
        assert_eq!(table.rows[0].inflation, Some(4.0));
        assert_eq!(table.rows[0].unemployment, None);
        assert_eq!(table.rows[2].unemployment, Some(7.9));
        assert_eq!(table.rows[3], YearlyIndicatorRow {
            year: 2003,
            inflation: None,
            unemployment: None,
        });
    }

    #[test]
    fn test_join_ignores_out_of_window_and_keeps_first_duplicate() {
        let inflation = vec![
            obs("1999", Some(9.9)),
            obs("2000", Some(1.0)),
            obs("2000", Some(2.0)),
        ];
        let table = join(&inflation, &[], 2000..=2000).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].inflation, Some(1.0));
    }

    #[test]
    fn test_clean_pairs_require_both_values() {
        let inflation = vec![obs("2000", Some(4.0)), obs("2001", Some(3.7)), obs("2002", None)];
        let unemployment = vec![obs("2000", Some(7.8)), obs("2002", Some(8.1))];
        let table = join(&inflation, &unemployment, 2000..=2002).unwrap();

        assert_eq!(table.clean_pairs(), vec![(7.8, 4.0)]);
        // Unclean rows stay in the table for display
        assert_eq!(table.rows.len(), 3);
    }

    #[test]
    fn test_bad_label_fails_its_own_series() {
        let err = IndicatorTable::index_by_year(&[obs("garbage", Some(7.0))], &(2000..=2001))
            .unwrap_err();
        assert!(matches!(err, FetchError::Malformed(ref m) if m.contains("garbage")));
    }

    #[test]
    fn test_nan_values_count_as_absent() {
        let inflation = vec![obs("2000", Some(f64::NAN))];
        let table = join(&inflation, &[], 2000..=2000).unwrap();
        assert!(table.has_no_values());
    }

    #[test]
    fn test_rows_descending_and_peak() {
        let inflation = vec![obs("2000", Some(4.0)), obs("2001", Some(10.9)), obs("2002", Some(3.0))];
        let table = join(&inflation, &[], 2000..=2002).unwrap();
        let years: Vec<i32> = table.rows_descending().iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2002, 2001, 2000]);
        assert_eq!(table.peak_inflation(), Some((2001, 10.9)));
    }
}
