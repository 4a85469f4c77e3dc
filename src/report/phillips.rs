//! Phillips curve report: inflation against unemployment with a fitted trend.

use super::{ReportContext, ReportError};
use crate::data::{FetchError, IndicatorTable, YearSeries, YearlyIndicatorRow};
use crate::stats::{TrendEstimator, TrendLine};

pub const INTRO: &str = "The Phillips Curve illustrates the inverse relationship between \
inflation and unemployment. Lower unemployment tends to come with higher inflation (the \
economy runs hot); higher unemployment with lower inflation (the economy cools). It helps \
policymakers balance growth against price stability.";

pub const HOW_TO_READ: &[&str] = &[
    "Each point represents one year of the window",
    "X-axis: unemployment rate (% of labour force)",
    "Y-axis: inflation rate (% change in consumer prices)",
    "Red dashed line: least-squares trend across all years with both values",
    "Hover over a point to see its year and exact values",
];

#[derive(Debug, Clone)]
pub struct PhillipsReport {
    pub title: String,
    pub table: IndicatorTable,
    pub trend: Option<TrendLine>,
    pub correlation: Option<f64>,
    pub clean_count: usize,
    pub commentary: Vec<String>,
    /// `(label, url)` for each indicator used.
    pub sources: Vec<(String, String)>,
}

impl PhillipsReport {
    /// Fetch both indicators, join them by year and fit the trend.
    pub fn build(ctx: &ReportContext) -> Result<Self, ReportError> {
        let settings = &ctx.settings;
        let years = settings.years();

        let mut series: Vec<YearSeries> = Vec::with_capacity(2);
        for (code, name) in [
            (&settings.inflation_indicator, "Inflation"),
            (&settings.unemployment_indicator, "Unemployment"),
        ] {
            let named = |source: FetchError| ReportError::RemoteFetch {
                indicator: name.to_string(),
                source,
            };
            let observations = ctx
                .source
                .fetch(code, &settings.country_code, years.clone())
                .map_err(named)?;
            series.push(IndicatorTable::index_by_year(&observations, &years).map_err(named)?);
        }

        let table = IndicatorTable::from_series(&series[0], &series[1], years);
        if table.has_no_values() {
            return Err(ReportError::EmptyResult);
        }

        Ok(Self::from_table(ctx, table))
    }

    /// Compute the trend and commentary for an already joined table.
    pub fn from_table(ctx: &ReportContext, table: IndicatorTable) -> Self {
        let settings = &ctx.settings;
        let pairs = table.clean_pairs();
        let trend = TrendEstimator::fit(&pairs);
        let correlation = TrendEstimator::correlation(&pairs);
        tracing::info!(
            rows = table.rows.len(),
            clean = pairs.len(),
            has_trend = trend.is_some(),
            "Indicator table ready"
        );

        let commentary = Self::commentary(&table, trend.as_ref(), correlation, pairs.len());
        let sources = vec![
            (
                format!("Inflation, consumer prices ({})", settings.inflation_indicator),
                indicator_page(&settings.inflation_indicator, &settings.country_code),
            ),
            (
                format!("Unemployment, total % ({})", settings.unemployment_indicator),
                indicator_page(&settings.unemployment_indicator, &settings.country_code),
            ),
        ];

        Self {
            title: format!(
                "Phillips Curve: {} ({}-{})",
                settings.country_label, settings.start_year, settings.end_year
            ),
            clean_count: pairs.len(),
            table,
            trend,
            correlation,
            commentary,
            sources,
        }
    }

    fn commentary(
        table: &IndicatorTable,
        trend: Option<&TrendLine>,
        correlation: Option<f64>,
        clean_count: usize,
    ) -> Vec<String> {
        let mut lines = Vec::new();

        match trend {
            Some(t) if t.slope < 0.0 => lines.push(format!(
                "The fitted slope is {:.2}: each extra point of unemployment goes with {:.2} points less inflation, the classic inverse relationship.",
                t.slope,
                t.slope.abs()
            )),
            Some(t) => lines.push(format!(
                "The fitted slope is {:.2}: the data does not show the inverse relationship classical theory predicts.",
                t.slope
            )),
            None => lines.push(
                "Too few years with both values to fit a trend line.".to_string(),
            ),
        }

        if let Some(r) = correlation {
            let strength = match r.abs() {
                a if a < 0.3 => "weak",
                a if a < 0.6 => "moderate",
                _ => "strong",
            };
            lines.push(format!(
                "Correlation between unemployment and inflation is {} (r = {:.2}).",
                strength, r
            ));
        }

        if let Some((year, value)) = table.peak_inflation() {
            lines.push(format!("Inflation peaked at {:.1}% in {}.", value, year));
        }

        let excluded = table.rows.len() - clean_count;
        if excluded > 0 {
            lines.push(format!(
                "{} of {} years lack one of the two values and are left out of the fit.",
                excluded,
                table.rows.len()
            ));
        }

        lines
    }

    /// Raw rows for the data table, most recent first.
    pub fn table_rows(&self) -> Vec<YearlyIndicatorRow> {
        self.table.rows_descending()
    }
}

/// Public World Bank page for `indicator`, filtered to `country` when its ISO2 code is known.
fn indicator_page(indicator: &str, country: &str) -> String {
    let base = format!("https://data.worldbank.org/indicator/{}", indicator);
    match location_code(country) {
        Some(iso2) => format!("{}?locations={}", base, iso2),
        None => base,
    }
}

/// The data site filters by ISO2 while the API is queried with ISO3.
fn location_code(country: &str) -> Option<&'static str> {
    let iso2 = match country.to_ascii_uppercase().as_str() {
        "IND" => "IN",
        "USA" => "US",
        "GBR" => "GB",
        "CHN" => "CN",
        "BRA" => "BR",
        "JPN" => "JP",
        "DEU" => "DE",
        "FRA" => "FR",
        "ITA" => "IT",
        "CAN" => "CA",
        "AUS" => "AU",
        "RUS" => "RU",
        "ZAF" => "ZA",
        "MEX" => "MX",
        "IDN" => "ID",
        "KOR" => "KR",
        "TUR" => "TR",
        "SAU" => "SA",
        "ARG" => "AR",
        "PAK" => "PK",
        "BGD" => "BD",
        "NGA" => "NG",
        "EGY" => "EG",
        "LKA" => "LK",
        "NPL" => "NP",
        _ => return None,
    };
    Some(iso2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::report::testing::FakeSource;
    use std::sync::Arc;

    const INFLATION: &str = "FP.CPI.TOTL.ZG";
    const UNEMPLOYMENT: &str = "SL.UEM.TOTL.ZS";

    fn ctx(source: FakeSource) -> ReportContext {
        ReportContext::new(
            Settings {
                start_year: 2000,
                end_year: 2004,
                ..Settings::default()
            },
            Arc::new(source),
        )
    }

    #[test]
    fn test_full_window_and_trend() {
        let source = FakeSource::default()
            .with_series(
                INFLATION,
                &[("YR2000", Some(4.0)), ("YR2001", Some(3.8)), ("YR2002", Some(4.3)), ("YR2003", Some(3.8))],
            )
            .with_series(
                UNEMPLOYMENT,
                &[("YR2000", Some(7.8)), ("YR2001", Some(8.0)), ("YR2002", Some(7.5)), ("YR2004", Some(8.1))],
            );

        let report = PhillipsReport::build(&ctx(source)).unwrap();

        assert_eq!(report.table.rows.len(), 5);
        assert_eq!(report.clean_count, 3);
        let trend = report.trend.as_ref().unwrap();
        assert_eq!(trend.sample_points.len(), 100);
        assert!(trend.slope < 0.0);
        assert!(report.commentary.iter().any(|l| l.contains("2 of 5 years")));
        assert_eq!(report.table_rows()[0].year, 2004);
        assert!(report.sources[0].1.ends_with("locations=IN"));
    }

    #[test]
    fn test_unknown_country_links_unfiltered_page() {
        assert_eq!(
            indicator_page(INFLATION, "ZZZ"),
            "https://data.worldbank.org/indicator/FP.CPI.TOTL.ZG"
        );
        assert_eq!(
            indicator_page(UNEMPLOYMENT, "bra"),
            "https://data.worldbank.org/indicator/SL.UEM.TOTL.ZS?locations=BR"
        );
    }

    #[test]
    fn test_single_clean_row_has_no_trend() {
        let source = FakeSource::default()
            .with_series(INFLATION, &[("YR2000", Some(4.0)), ("YR2001", Some(3.8))])
            .with_series(UNEMPLOYMENT, &[("YR2000", Some(7.8))]);

        let report = PhillipsReport::build(&ctx(source)).unwrap();
        assert_eq!(report.clean_count, 1);
        assert!(report.trend.is_none());
        assert!(report.correlation.is_none());
        assert_eq!(report.table.rows.len(), 5);
    }

    #[test]
    fn test_failed_query_names_indicator() {
        let source = FakeSource::default()
            .with_series(INFLATION, &[("YR2000", Some(4.0))])
            .failing_on(UNEMPLOYMENT);

        match PhillipsReport::build(&ctx(source)) {
            Err(ReportError::RemoteFetch { indicator, source }) => {
                assert_eq!(indicator, "Unemployment");
                assert!(matches!(source, FetchError::Status(503)));
            }
            other => panic!("expected RemoteFetch, got {:?}", other.map(|r| r.title)),
        }
    }

    #[test]
    fn test_no_values_is_empty_result() {
        let source = FakeSource::default()
            .with_series(INFLATION, &[("YR2000", None)])
            .with_series(UNEMPLOYMENT, &[]);
        assert!(matches!(
            PhillipsReport::build(&ctx(source)),
            Err(ReportError::EmptyResult)
        ));
    }

    #[test]
    fn test_bad_year_label_names_its_indicator() {
        let source = FakeSource::default()
            .with_series(INFLATION, &[("YR2000", Some(4.0))])
            .with_series(UNEMPLOYMENT, &[("garbage", Some(7.0))]);

        match PhillipsReport::build(&ctx(source)) {
            Err(ReportError::RemoteFetch { indicator, source }) => {
                assert_eq!(indicator, "Unemployment");
                assert!(matches!(source, FetchError::Malformed(_)));
            }
            other => panic!("expected RemoteFetch, got {:?}", other.map(|r| r.title)),
        }
    }
}
