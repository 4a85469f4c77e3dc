//! GUI module - User interface components

mod app;
mod nav_panel;
mod report_viewer;

pub use app::EconMonitorApp;
pub use nav_panel::{NavAction, NavPanel};
pub use report_viewer::ReportViewer;
