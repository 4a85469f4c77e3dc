//! Report module - pure report generation, one function per navigation choice.
//!
//! Nothing here touches the GUI: the selected page comes in as a [`ReportKind`],
//! a finished [`Report`] or a [`ReportError`] comes out.

pub mod phillips;
pub mod trade_pulse;

pub use phillips::PhillipsReport;
pub use trade_pulse::TradeReport;

use crate::settings::Settings;
use crate::data::{FetchError, IndicatorSource, TradeLoadError};
use polars::prelude::PolarsError;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// The two pages of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportKind {
    #[default]
    PhillipsCurve,
    TradePulse,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::PhillipsCurve, ReportKind::TradePulse];

    /// Name shown in the navigation panel.
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::PhillipsCurve => "Real-Time Phillips Curve",
            ReportKind::TradePulse => "EXIM Trade Pulse",
        }
    }
}

/// Every failure aborts the report; there is no partial output.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Could not retrieve data for {indicator}: {source}")]
    RemoteFetch {
        indicator: String,
        #[source]
        source: FetchError,
    },
    #[error("The indicator source returned no data. Please check the internet connection.")]
    EmptyResult,
    #[error("Data file not found. Please ensure '{}' is in the folder.", .path.display())]
    TradeFileMissing { path: PathBuf },
    #[error("Trade data file could not be read: {0}")]
    TradeFileInvalid(#[from] PolarsError),
}

impl From<TradeLoadError> for ReportError {
    fn from(err: TradeLoadError) -> Self {
        match err {
            TradeLoadError::Missing(path) => ReportError::TradeFileMissing { path },
            TradeLoadError::Csv(e) => ReportError::TradeFileInvalid(e),
        }
    }
}

/// Inputs shared by both reports. Cheap to clone into a worker thread.
#[derive(Clone)]
pub struct ReportContext {
    pub settings: Settings,
    pub source: Arc<dyn IndicatorSource>,
}

impl ReportContext {
    pub fn new(settings: Settings, source: Arc<dyn IndicatorSource>) -> Self {
        Self { settings, source }
    }
}

/// A fully computed page, ready for display or export.
#[derive(Debug, Clone)]
pub enum Report {
    Phillips(PhillipsReport),
    Trade(TradeReport),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::Phillips(_) => ReportKind::PhillipsCurve,
            Report::Trade(_) => ReportKind::TradePulse,
        }
    }
}

/// Generate the report selected in the navigation panel.
pub fn generate_report(kind: ReportKind, ctx: &ReportContext) -> Result<Report, ReportError> {
    tracing::info!(report = kind.title(), "Generating report");

    let result = match kind {
        ReportKind::PhillipsCurve => PhillipsReport::build(ctx).map(Report::Phillips),
        ReportKind::TradePulse => TradeReport::build(ctx).map(Report::Trade),
    };

    if let Err(e) = &result {
        tracing::error!(report = kind.title(), error = %e, "Report aborted");
    }
    result
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::data::{FetchError, IndicatorSource, Observation};
    use std::collections::HashMap;
    use std::ops::RangeInclusive;

    /// In-memory indicator source keyed by indicator code.
    #[derive(Default)]
    pub struct FakeSource {
        pub series: HashMap<String, Vec<Observation>>,
        pub failing: Option<String>,
    }

    impl FakeSource {
        pub fn with_series(mut self, indicator: &str, points: &[(&str, Option<f64>)]) -> Self {
            self.series.insert(
                indicator.to_string(),
                points
                    .iter()
                    .map(|&(label, value)| Observation::new(label, value))
                    .collect(),
            );
            self
        }

        pub fn failing_on(mut self, indicator: &str) -> Self {
            self.failing = Some(indicator.to_string());
            self
        }
    }

    impl IndicatorSource for FakeSource {
        fn fetch(
            &self,
            indicator: &str,
            _country: &str,
            _years: RangeInclusive<i32>,
        ) -> Result<Vec<Observation>, FetchError> {
            if self.failing.as_deref() == Some(indicator) {
                return Err(FetchError::Status(503));
            }
            Ok(self.series.get(indicator).cloned().unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeSource;
    use super::*;

    #[test]
    fn test_kind_selects_report() {
        let settings = Settings {
            trade_data_path: PathBuf::from("/no/such/dir/rbi_data.csv"),
            ..Settings::default()
        };
        let source = FakeSource::default()
            .with_series("FP.CPI.TOTL.ZG", &[("YR2000", Some(4.0)), ("YR2001", Some(3.8))])
            .with_series("SL.UEM.TOTL.ZS", &[("YR2000", Some(7.8)), ("YR2001", Some(8.0))]);
        let ctx = ReportContext::new(settings, Arc::new(source));

        let report = generate_report(ReportKind::PhillipsCurve, &ctx).unwrap();
        assert_eq!(report.kind(), ReportKind::PhillipsCurve);

        // Trade page is independent of the indicator source
        let err = generate_report(ReportKind::TradePulse, &ctx).unwrap_err();
        assert!(matches!(err, ReportError::TradeFileMissing { .. }));
    }

    #[test]
    fn test_missing_file_message_names_file() {
        let err = ReportError::TradeFileMissing {
            path: PathBuf::from("rbi_data.csv"),
        };
        assert!(err.to_string().contains("'rbi_data.csv'"));
    }

    #[test]
    fn test_titles_are_distinct() {
        assert_ne!(ReportKind::ALL[0].title(), ReportKind::ALL[1].title());
    }
}
