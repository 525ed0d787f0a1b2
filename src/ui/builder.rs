//! Central panel: file pickers, format selectors, generate action

use std::path::PathBuf;

use eframe::egui;

use crate::app::{can_generate, SmartDocApp};
use crate::core::report::{InputFormat, OutputFormat};

/// Main builder panel
pub struct BuilderPanel;

impl BuilderPanel {
    /// Show the builder panel
    pub fn show(ui: &mut egui::Ui, app: &mut SmartDocApp) {
        ui.add_space(8.0);
        ui.heading("SmartDoc Builder");
        ui.label("Merge a data file into a Word template and export the result.");
        ui.add_space(12.0);

        egui::Grid::new("builder_grid")
            .num_columns(3)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Data file:");
                ui.label(Self::file_label(&app.data_path));
                if ui.button("Browse...").clicked() {
                    app.pick_data_file();
                }
                ui.end_row();

                ui.label("Input format:");
                egui::ComboBox::from_id_salt("input_format")
                    .selected_text(app.input_format.label())
                    .show_ui(ui, |ui| {
                        for format in InputFormat::ALL {
                            ui.selectable_value(&mut app.input_format, format, format.label());
                        }
                    });
                ui.label("");
                ui.end_row();

                ui.label("Template:");
                ui.label(Self::file_label(&app.template_path));
                if ui.button("Browse...").clicked() {
                    app.pick_template();
                }
                ui.end_row();

                ui.label("Output format:");
                egui::ComboBox::from_id_salt("output_format")
                    .selected_text(app.output_format.label())
                    .show_ui(ui, |ui| {
                        for format in OutputFormat::ALL {
                            ui.selectable_value(&mut app.output_format, format, format.label());
                        }
                    });
                ui.label("");
                ui.end_row();
            });

        ui.add_space(16.0);

        let enabled = can_generate(app.data_path.is_some(), app.template_path.is_some());
        let button = egui::Button::new("Generate Document");
        if ui
            .add_enabled(enabled, button)
            .on_disabled_hover_text("Load a data file and a template first")
            .clicked()
        {
            app.generate();
        }
    }

    /// File name shown next to each picker, or a placeholder.
    fn file_label(path: &Option<PathBuf>) -> String {
        match path {
            Some(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            None => "(none selected)".to_string(),
        }
    }
}
