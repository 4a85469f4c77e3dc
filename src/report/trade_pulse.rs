//! EXIM trade pulse report: flow diagram, totals and commentary.

use super::{ReportContext, ReportError};
use crate::charts::FlowGraph;
use crate::data::{SkipReason, TradeData, TradeLoader, TradeRow};
use crate::settings::Settings;
use crate::stats::{DualCategory, SummaryAggregator, TradePartition, TradeSummary};
use std::collections::BTreeMap;

pub const INTRO: &str = "This Sankey diagram shows the major import and export categories, \
with goods flowing into the country on the left and out of it on the right. Trade balance \
is a key indicator of economic health and competitiveness.";

/// Differences below the one-decimal display precision count as balanced.
const BALANCE_EPSILON: f64 = 0.05;

pub const HOW_TO_READ: &[&str] = &[
    "Left side (red): import categories flowing into the country",
    "Centre (blue): the country",
    "Right side (green): export categories flowing out of the country",
    "Width of each flow is proportional to its value in USD billions",
];

#[derive(Debug, Clone)]
pub struct TradeReport {
    pub title: String,
    pub partition: TradePartition,
    pub graph: FlowGraph,
    pub summary: TradeSummary,
    pub dual_categories: Vec<DualCategory>,
    pub skipped: Vec<SkipReason>,
    pub commentary: Vec<String>,
    /// `(label, url)` for the publications behind the trade file.
    pub sources: Vec<(String, String)>,
}

impl TradeReport {
    /// Load the trade file and derive everything shown on the page.
    pub fn build(ctx: &ReportContext) -> Result<Self, ReportError> {
        let data = TradeLoader::new(&ctx.settings.trade_data_path).load()?;
        Ok(Self::from_data(&ctx.settings, data))
    }

    pub fn from_data(settings: &Settings, data: TradeData) -> Self {
        let country_label = settings.country_label.as_str();
        let partition = TradePartition::from_rows(&data.rows);
        let graph = FlowGraph::build(&partition, country_label);
        let summary = SummaryAggregator::summarize(&partition);
        let dual_categories = SummaryAggregator::dual_categories(&partition);
        let commentary = Self::commentary(country_label, &summary, &dual_categories);

        Self {
            title: format!("{}'s Trade Composition (USD Billion)", country_label),
            partition,
            graph,
            summary,
            dual_categories,
            skipped: data.skipped,
            commentary,
            sources: vec![(
                settings.trade_source_label.clone(),
                settings.trade_source_url.clone(),
            )],
        }
    }

    /// Label and formatted value for the balance metric.
    pub fn balance_metric(&self) -> (&'static str, String) {
        if self.summary.is_surplus() {
            ("Trade Surplus", format!("${:.1}B", self.summary.deficit.abs()))
        } else {
            ("Trade Deficit", format!("${:.1}B", self.summary.deficit))
        }
    }

    /// One caption line per skip reason, e.g. "2 row(s) left out: missing category."
    pub fn skipped_summary(&self) -> Vec<String> {
        let mut counts: BTreeMap<SkipReason, usize> = BTreeMap::new();
        for reason in &self.skipped {
            *counts.entry(*reason).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(reason, n)| format!("{} row(s) left out: {}.", n, reason))
            .collect()
    }

    pub fn imports_by_value(&self) -> Vec<TradeRow> {
        SummaryAggregator::sorted_desc(&self.partition.imports)
    }

    pub fn exports_by_value(&self) -> Vec<TradeRow> {
        SummaryAggregator::sorted_desc(&self.partition.exports)
    }

    fn commentary(
        country_label: &str,
        summary: &TradeSummary,
        duals: &[DualCategory],
    ) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(top) = summary.top_imports.first() {
            if summary.total_imports > 0.0 {
                lines.push(format!(
                    "{} (${:.1}B) is the largest import, {:.0}% of the import bill.",
                    top.category,
                    top.value,
                    100.0 * top.value / summary.total_imports
                ));
            }
        }
        if let Some(top) = summary.top_exports.first() {
            if summary.total_exports > 0.0 {
                lines.push(format!(
                    "{} (${:.1}B) leads exports with {:.0}% of export earnings.",
                    top.category,
                    top.value,
                    100.0 * top.value / summary.total_exports
                ));
            }
        }

        for dual in duals {
            let net = dual.net_imports();
            if net.abs() < BALANCE_EPSILON {
                lines.push(format!(
                    "{}: ${:.1}B imported and exported, {} is balanced in this category.",
                    dual.category, dual.imported, country_label
                ));
                continue;
            }
            let position = if net > 0.0 { "net importer" } else { "net exporter" };
            lines.push(format!(
                "{}: ${:.1}B imported vs ${:.1}B exported, {} is a {} (${:.1}B).",
                dual.category,
                dual.imported,
                dual.exported,
                country_label,
                position,
                net.abs()
            ));
        }

        lines.push(if summary.deficit.abs() < BALANCE_EPSILON {
            format!(
                "Imports and exports are balanced at ${:.1}B each.",
                summary.total_imports
            )
        } else if summary.is_surplus() {
            format!(
                "Exports exceed imports by ${:.1}B, a trade surplus.",
                summary.deficit.abs()
            )
        } else {
            format!(
                "Imports exceed exports by ${:.1}B, a trade deficit to be financed through services exports, remittances or reserves.",
                summary.deficit
            )
        });

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TradeType;
    use crate::report::testing::FakeSource;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn data(rows: Vec<TradeRow>, skipped: Vec<SkipReason>) -> TradeData {
        TradeData { rows, skipped }
    }

    fn settings() -> Settings {
        Settings {
            country_label: "Country".to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_scenario_report() {
        let report = TradeReport::from_data(
            &settings(),
            data(
                vec![
                    TradeRow::new("Oil", 100.0, TradeType::Import),
                    TradeRow::new("Gold", 50.0, TradeType::Import),
                    TradeRow::new("Tea", 30.0, TradeType::Export),
                ],
                Vec::new(),
            ),
        );

        assert_eq!(report.summary.total_imports, 150.0);
        assert_eq!(report.summary.total_exports, 30.0);
        assert_eq!(report.summary.deficit, 120.0);
        assert_eq!(report.graph.nodes.len(), 4);
        assert_eq!(report.balance_metric(), ("Trade Deficit", "$120.0B".to_string()));
        assert!(report.commentary[0].starts_with("Oil ($100.0B)"));
    }

    #[test]
    fn test_surplus_metric_and_sorted_details() {
        let report = TradeReport::from_data(
            &settings(),
            data(
                vec![
                    TradeRow::new("Tea", 30.0, TradeType::Export),
                    TradeRow::new("Software", 90.0, TradeType::Export),
                    TradeRow::new("Oil", 20.0, TradeType::Import),
                ],
                vec![SkipReason::UnknownType],
            ),
        );
        assert_eq!(report.balance_metric(), ("Trade Surplus", "$100.0B".to_string()));
        assert_eq!(report.exports_by_value()[0].category, "Software");
        assert_eq!(report.skipped_summary(), vec!["1 row(s) left out: Type other than Import/Export."]);
        assert!(report.commentary.last().unwrap().contains("surplus"));
    }

    #[test]
    fn test_skipped_summary_groups_reasons() {
        let report = TradeReport::from_data(
            &settings(),
            data(
                vec![TradeRow::new("Oil", 10.0, TradeType::Import)],
                vec![
                    SkipReason::MissingValue,
                    SkipReason::MissingCategory,
                    SkipReason::MissingValue,
                ],
            ),
        );
        assert_eq!(
            report.skipped_summary(),
            vec![
                "1 row(s) left out: missing category.".to_string(),
                "2 row(s) left out: missing or non-numeric value.".to_string(),
            ]
        );
    }

    #[test]
    fn test_balanced_category_and_trade() {
        let report = TradeReport::from_data(
            &settings(),
            data(
                vec![
                    TradeRow::new("Tea", 40.0, TradeType::Import),
                    TradeRow::new("Tea", 40.0, TradeType::Export),
                ],
                Vec::new(),
            ),
        );
        assert!(report
            .commentary
            .iter()
            .any(|l| l.starts_with("Tea:") && l.contains("balanced")));
        assert!(!report.commentary.iter().any(|l| l.contains("net exporter")));
        assert_eq!(
            report.commentary.last().unwrap(),
            "Imports and exports are balanced at $40.0B each."
        );
    }

    #[test]
    fn test_sources_follow_settings() {
        let custom = Settings {
            trade_source_label: "Customs yearbook".to_string(),
            trade_source_url: "https://example.org/trade".to_string(),
            ..settings()
        };
        let report = TradeReport::from_data(&custom, data(Vec::new(), Vec::new()));
        assert_eq!(
            report.sources,
            vec![("Customs yearbook".to_string(), "https://example.org/trade".to_string())]
        );
    }

    #[test]
    fn test_missing_file_aborts() {
        let ctx = ReportContext::new(
            Settings {
                trade_data_path: PathBuf::from("/no/such/dir/rbi_data.csv"),
                ..Settings::default()
            },
            Arc::new(FakeSource::default()),
        );
        assert!(matches!(
            TradeReport::build(&ctx),
            Err(ReportError::TradeFileMissing { .. })
        ));
    }

    #[test]
    fn test_bundled_sample_data_loads() {
        let ctx = ReportContext::new(
            Settings {
                trade_data_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("rbi_data.csv"),
                ..Settings::default()
            },
            Arc::new(FakeSource::default()),
        );
        let report = TradeReport::build(&ctx).unwrap();
        assert!(!report.partition.imports.is_empty());
        assert!(!report.partition.exports.is_empty());
        assert_eq!(report.summary.top_imports[0].category, "Crude Oil");
        assert!(report
            .dual_categories
            .iter()
            .any(|d| d.category == "Electronic Goods"));
    }
}
