//! Report Viewer Widget
//! Central scrollable panel showing the selected report.

use crate::charts::ChartPlotter;
use crate::data::TradeRow;
use crate::report::{phillips, trade_pulse, PhillipsReport, Report, ReportKind, TradeReport};
use egui::{Color32, RichText, ScrollArea};

const SCATTER_HEIGHT: f32 = 480.0;
const SANKEY_HEIGHT: f32 = 520.0;
const INFO_COLOR: Color32 = Color32::from_rgb(59, 130, 246);
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

#[derive(Default)]
pub enum ViewerState {
    #[default]
    Empty,
    Loading(ReportKind),
    Ready(Report),
    Failed(ReportKind, String),
}

#[derive(Default)]
pub struct ReportViewer {
    pub state: ViewerState,
}

impl ReportViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self) -> Option<&Report> {
        match &self.state {
            ViewerState::Ready(report) => Some(report),
            _ => None,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        match &self.state {
            ViewerState::Empty => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
            }
            ViewerState::Loading(kind) => {
                ui.centered_and_justified(|ui| {
                    ui.horizontal_centered(|ui| {
                        ui.spinner();
                        ui.label(RichText::new(format!("Loading {}...", kind.title())).size(16.0));
                    });
                });
            }
            ViewerState::Failed(kind, message) => {
                ui.heading(kind.title());
                ui.add_space(10.0);
                Self::callout(ui, ERROR_COLOR, "⚠", &[message.as_str()]);
            }
            ViewerState::Ready(report) => {
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| match report {
                        Report::Phillips(r) => Self::show_phillips(ui, r),
                        Report::Trade(r) => Self::show_trade(ui, r),
                    });
            }
        }
    }

    fn callout(ui: &mut egui::Ui, color: Color32, icon: &str, lines: &[&str]) {
        egui::Frame::none()
            .rounding(6.0)
            .stroke(egui::Stroke::new(1.5, color))
            .fill(color.gamma_multiply(0.08))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                for line in lines {
                    ui.label(RichText::new(format!("{} {}", icon, line)).color(color));
                }
            });
    }

    fn bullets(ui: &mut egui::Ui, lines: &[String]) {
        for line in lines {
            ui.label(format!("• {}", line));
        }
    }

    fn sources(ui: &mut egui::Ui, sources: &[(String, String)]) {
        ui.collapsing("📊 Data Sources", |ui| {
            for (label, url) in sources {
                ui.hyperlink_to(label.as_str(), url);
            }
        });
    }

    fn show_phillips(ui: &mut egui::Ui, report: &PhillipsReport) {
        ui.heading("📈 Macro-Stability: The Phillips Curve Analysis");
        ui.add_space(6.0);
        ui.label(phillips::INTRO);
        ui.add_space(8.0);
        Self::callout(ui, INFO_COLOR, "💡", phillips::HOW_TO_READ);
        ui.add_space(10.0);

        ui.label(RichText::new(&report.title).size(17.0).strong());
        ChartPlotter::draw_scatter_chart(ui, &report.table, report.trend.as_ref(), SCATTER_HEIGHT);
        let first = report.table.rows.first().map(|r| r.year).unwrap_or_default();
        let last = report.table.rows.last().map(|r| r.year).unwrap_or_default();
        ChartPlotter::draw_year_key(ui, first, last);
        if report.trend.is_none() {
            ui.label(
                RichText::new("Not enough complete years to draw a trend line.")
                    .italics()
                    .color(Color32::GRAY),
            );
        }

        ui.add_space(12.0);
        ui.label(RichText::new("🔍 Key Insights").size(16.0).strong());
        Self::bullets(ui, &report.commentary);

        ui.add_space(10.0);
        ui.collapsing("📋 View Raw Data Table", |ui| {
            egui::Grid::new("phillips_raw_table")
                .striped(true)
                .min_col_width(90.0)
                .show(ui, |ui| {
                    ui.label(RichText::new("Year").strong());
                    ui.label(RichText::new("Inflation (%)").strong());
                    ui.label(RichText::new("Unemployment (%)").strong());
                    ui.end_row();
                    let fmt = |v: Option<f64>| v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string());
                    for row in report.table_rows() {
                        ui.label(row.year.to_string());
                        ui.label(fmt(row.inflation));
                        ui.label(fmt(row.unemployment));
                        ui.end_row();
                    }
                });
        });
        Self::sources(ui, &report.sources);
    }

    fn show_trade(ui: &mut egui::Ui, report: &TradeReport) {
        ui.heading("🚢 Trade Balance: Import/Export Composition");
        ui.add_space(6.0);
        ui.label(trade_pulse::INTRO);
        ui.add_space(8.0);
        Self::callout(ui, INFO_COLOR, "💡", trade_pulse::HOW_TO_READ);
        ui.add_space(10.0);

        ui.label(RichText::new(&report.title).size(17.0).strong());
        ChartPlotter::draw_sankey(ui, &report.graph, SANKEY_HEIGHT);
        for line in report.skipped_summary() {
            ui.label(RichText::new(line).italics().color(Color32::GRAY));
        }

        ui.add_space(12.0);
        let (balance_label, balance_value) = report.balance_metric();
        ui.columns(3, |cols| {
            Self::metric(&mut cols[0], "Total Imports", &format!("${:.1}B", report.summary.total_imports));
            Self::metric(&mut cols[1], "Total Exports", &format!("${:.1}B", report.summary.total_exports));
            Self::metric(&mut cols[2], balance_label, &balance_value);
        });

        ui.add_space(12.0);
        ui.label(RichText::new("🔍 Trade Composition Analysis").size(16.0).strong());
        ui.columns(2, |cols| {
            cols[0].label(RichText::new("🔴 Top Import Categories").strong());
            for row in &report.summary.top_imports {
                cols[0].label(format!("• {}: ${:.1}B", row.category, row.value));
            }
            cols[1].label(RichText::new("🟢 Top Export Categories").strong());
            for row in &report.summary.top_exports {
                cols[1].label(format!("• {}: ${:.1}B", row.category, row.value));
            }
        });

        ui.add_space(10.0);
        ui.label(RichText::new("📊 Key Observations").size(16.0).strong());
        Self::bullets(ui, &report.commentary);

        ui.add_space(10.0);
        ui.collapsing("📋 View Detailed Trade Data", |ui| {
            ui.columns(2, |cols| {
                Self::trade_table(&mut cols[0], "import_details", "Import Details", &report.imports_by_value());
                Self::trade_table(&mut cols[1], "export_details", "Export Details", &report.exports_by_value());
            });
        });
        Self::sources(ui, &report.sources);
    }

    fn metric(ui: &mut egui::Ui, label: &str, value: &str) {
        ui.vertical(|ui| {
            ui.label(RichText::new(label).size(13.0).color(Color32::GRAY));
            ui.label(RichText::new(value).size(24.0).strong());
        });
    }

    fn trade_table(ui: &mut egui::Ui, id: &str, title: &str, rows: &[TradeRow]) {
        ui.label(RichText::new(title).strong());
        egui::Grid::new(id).striped(true).min_col_width(80.0).show(ui, |ui| {
            ui.label(RichText::new("Category").strong());
            ui.label(RichText::new("Value (USD B)").strong());
            ui.end_row();
            for row in rows {
                ui.label(row.category.as_str());
                ui.label(format!("{:.1}", row.value));
                ui.end_row();
            }
        });
    }
}
