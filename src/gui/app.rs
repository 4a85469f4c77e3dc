//! Economic Monitor Main Application
//! Main window with navigation panel and report viewer.

use crate::charts::{ExportError, StaticChartRenderer};
use crate::gui::report_viewer::ViewerState;
use crate::gui::{NavAction, NavPanel, ReportViewer};
use crate::report::{generate_report, Report, ReportContext, ReportError, ReportKind};
use egui::SidePanel;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

const EXPORT_WIDTH: u32 = 1400;
const EXPORT_HEIGHT: u32 = 900;
const WORKER_LOST: &str = "Report worker stopped unexpectedly";

/// Report result from the background thread
struct RenderResult {
    kind: ReportKind,
    result: Result<Report, ReportError>,
}

/// Main application window.
pub struct EconMonitorApp {
    ctx: ReportContext,
    nav_panel: NavPanel,
    report_viewer: ReportViewer,

    // One render in flight; replacing the receiver drops a superseded result
    render_rx: Option<Receiver<RenderResult>>,
}

impl EconMonitorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, ctx: ReportContext) -> Self {
        let nav_panel = NavPanel::new(ctx.settings.country_label.clone());
        let mut app = Self {
            ctx,
            nav_panel,
            report_viewer: ReportViewer::new(),
            render_rx: None,
        };
        app.start_render(app.nav_panel.selected);
        app
    }

    /// Recompute `kind` from scratch on a worker thread.
    fn start_render(&mut self, kind: ReportKind) {
        let (tx, rx) = channel();
        self.render_rx = Some(rx);
        self.report_viewer.state = ViewerState::Loading(kind);
        self.nav_panel.busy = true;
        self.nav_panel.export_enabled = false;
        self.nav_panel.set_status(format!("Loading {}...", kind.title()));

        let ctx = self.ctx.clone();
        thread::spawn(move || {
            let result = generate_report(kind, &ctx);
            // Receiver gone means the user already moved on
            let _ = tx.send(RenderResult { kind, result });
        });
    }

    /// Check for a finished render
    fn check_render_results(&mut self) {
        let Some(rx) = self.render_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(RenderResult { kind, result }) => {
                self.nav_panel.busy = false;
                match result {
                    Ok(report) => {
                        self.nav_panel.set_status(format!("{} ready", kind.title()));
                        self.nav_panel.export_enabled = true;
                        self.report_viewer.state = ViewerState::Ready(report);
                    }
                    Err(e) => {
                        self.nav_panel.set_status("Report aborted");
                        self.report_viewer.state = ViewerState::Failed(kind, e.to_string());
                    }
                }
            }
            Err(TryRecvError::Empty) => {
                self.render_rx = Some(rx);
            }
            Err(TryRecvError::Disconnected) => {
                // Worker panicked before sending
                let kind = match self.report_viewer.state {
                    ViewerState::Loading(kind) => kind,
                    _ => self.nav_panel.selected,
                };
                self.nav_panel.busy = false;
                self.nav_panel.set_status("Report aborted");
                self.report_viewer.state =
                    ViewerState::Failed(kind, WORKER_LOST.to_string());
                tracing::error!(report = kind.title(), "Report worker exited without a result");
            }
        }
    }

    /// Render the current figure to PNG, save it and open it.
    fn handle_export_png(&mut self) {
        let Some(report) = self.report_viewer.report() else {
            self.nav_panel.set_status("No chart to export");
            return;
        };

        let default_name = match report.kind() {
            ReportKind::PhillipsCurve => "phillips_curve.png",
            ReportKind::TradePulse => "trade_flows.png",
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(default_name)
            .save_file()
        else {
            return; // User cancelled
        };

        match Self::export_report(report, &path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Exported chart");
                self.nav_panel
                    .set_status(format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    tracing::warn!(error = %e, "Could not open exported chart");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Chart export failed");
                self.nav_panel.set_status(format!("Export error: {}", e));
            }
        }
    }

    fn export_report(report: &Report, path: &Path) -> Result<(), ExportError> {
        let png = match report {
            Report::Phillips(r) => StaticChartRenderer::render_scatter_png(
                &r.table,
                r.trend.as_ref(),
                &r.title,
                EXPORT_WIDTH,
                EXPORT_HEIGHT,
            )?,
            Report::Trade(r) => StaticChartRenderer::render_sankey_png(
                &r.graph,
                &r.title,
                EXPORT_WIDTH,
                EXPORT_HEIGHT,
            )?,
        };
        std::fs::write(path, png)?;
        Ok(())
    }
}

impl eframe::App for EconMonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_render_results();

        // Keep polling while a report is being generated
        if self.render_rx.is_some() {
            ctx.request_repaint();
        }

        // Left panel - Navigation
        let action = SidePanel::left("nav_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| self.nav_panel.show(ui))
                    .inner
            })
            .inner;

        match action {
            NavAction::Select(kind) => self.start_render(kind),
            NavAction::Refresh => self.start_render(self.nav_panel.selected),
            NavAction::ExportPng => self.handle_export_png(),
            NavAction::None => {}
        }

        // Central panel - Report Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.report_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::testing::FakeSource;
    use crate::settings::Settings;
    use std::sync::Arc;

    fn app() -> EconMonitorApp {
        let ctx = ReportContext::new(Settings::default(), Arc::new(FakeSource::default()));
        EconMonitorApp {
            nav_panel: NavPanel::new(ctx.settings.country_label.clone()),
            report_viewer: ReportViewer::new(),
            render_rx: None,
            ctx,
        }
    }

    #[test]
    fn test_lost_worker_shows_failure() {
        let mut app = app();
        let (tx, rx) = channel::<RenderResult>();
        drop(tx);
        app.render_rx = Some(rx);
        app.nav_panel.busy = true;
        app.report_viewer.state = ViewerState::Loading(ReportKind::TradePulse);

        app.check_render_results();

        assert!(app.render_rx.is_none());
        assert!(!app.nav_panel.busy);
        match &app.report_viewer.state {
            ViewerState::Failed(kind, message) => {
                assert_eq!(*kind, ReportKind::TradePulse);
                assert_eq!(message, WORKER_LOST);
            }
            _ => panic!("viewer should show the failure"),
        }
    }

    #[test]
    fn test_pending_render_keeps_receiver() {
        let mut app = app();
        let (_tx, rx) = channel::<RenderResult>();
        app.render_rx = Some(rx);
        app.report_viewer.state = ViewerState::Loading(ReportKind::PhillipsCurve);

        app.check_render_results();

        assert!(app.render_rx.is_some());
        assert!(matches!(
            app.report_viewer.state,
            ViewerState::Loading(ReportKind::PhillipsCurve)
        ));
    }

    #[test]
    fn test_report_error_shows_message() {
        let mut app = app();
        let (tx, rx) = channel();
        app.render_rx = Some(rx);
        tx.send(RenderResult {
            kind: ReportKind::PhillipsCurve,
            result: Err(ReportError::EmptyResult),
        })
        .unwrap();

        app.check_render_results();

        assert!(matches!(
            &app.report_viewer.state,
            ViewerState::Failed(ReportKind::PhillipsCurve, m) if m.contains("no data")
        ));
        assert!(!app.nav_panel.export_enabled);
    }
}
