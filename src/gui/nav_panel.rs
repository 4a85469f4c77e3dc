//! Navigation Panel Widget
//! Left side panel: report selector, refresh/export buttons and status line.

use crate::report::ReportKind;
use egui::{Color32, RichText};

/// What the user asked for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    None,
    Select(ReportKind),
    Refresh,
    ExportPng,
}

pub struct NavPanel {
    pub selected: ReportKind,
    pub status: String,
    pub busy: bool,
    pub export_enabled: bool,
    country_label: String,
}

impl NavPanel {
    pub fn new(country_label: impl Into<String>) -> Self {
        Self {
            selected: ReportKind::default(),
            status: "Ready".to_string(),
            busy: false,
            export_enabled: false,
            country_label: country_label.into(),
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> NavAction {
        let mut action = NavAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new(format!("{} Economic Monitor", self.country_label))
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("World Bank & RBI data")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Navigation =====
        ui.label(RichText::new("🧭 Navigation").size(14.0).strong());
        ui.add_space(5.0);
        ui.label("Select Module:");
        for kind in ReportKind::ALL {
            if ui
                .radio_value(&mut self.selected, kind, kind.title())
                .changed()
            {
                action = NavAction::Select(kind);
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Actions =====
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.busy, egui::Button::new("🔄 Refresh"))
                .clicked()
            {
                action = NavAction::Refresh;
            }
            if ui
                .add_enabled(
                    self.export_enabled && !self.busy,
                    egui::Button::new("💾 Export PNG"),
                )
                .clicked()
            {
                action = NavAction::ExportPng;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Status =====
        ui.horizontal(|ui| {
            if self.busy {
                ui.spinner();
            }
            ui.label(RichText::new(&self.status).size(12.0));
        });

        action
    }
}
