//! Bottom status bar

use eframe::egui;

use crate::app::SmartDocApp;

/// Single-line status display
pub struct StatusBar;

impl StatusBar {
    /// Show the status bar
    pub fn show(ui: &mut egui::Ui, app: &SmartDocApp) {
        ui.horizontal(|ui| {
            ui.label(&app.status);
        });
    }
}
