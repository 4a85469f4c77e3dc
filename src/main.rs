//! Economic Monitor - Phillips Curve & EXIM Trade Dashboard
//!
//! A Rust application that charts live World Bank indicators and a local trade
//! composition file.

mod charts;
mod data;
mod gui;
mod logging;
mod report;
mod settings;
mod stats;

use anyhow::Context;
use data::WorldBankClient;
use eframe::egui;
use gui::EconMonitorApp;
use report::ReportContext;
use settings::Settings;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading configuration")?;
    logging::init_logger(&settings.log_level);
    tracing::info!(
        country = %settings.country_code,
        years = ?settings.years(),
        trade_file = %settings.trade_data_path.display(),
        "Starting Economic Monitor"
    );

    let source = Arc::new(
        WorldBankClient::new(settings.api_base_url.clone()).context("building HTTP client")?,
    );
    let title = format!("{} Economic Policy Monitor", settings.country_label);
    let ctx = ReportContext::new(settings, source);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title(&title),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(EconMonitorApp::new(cc, ctx)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {}", e))
}
