//! Main application state and UI coordination

use std::path::PathBuf;

use eframe::egui;

use crate::core::config::{AppConfig, Theme};
use crate::core::report::{InputFormat, OutputFormat};
use crate::engine::{self, template::DocxTemplate};
use crate::ingest;
use crate::ui::{builder::BuilderPanel, status::StatusBar};

/// Whether the generate action is available. Pure function of the selection
/// state, re-evaluated every frame.
pub fn can_generate(data_loaded: bool, template_loaded: bool) -> bool {
    data_loaded && template_loaded
}

/// Main application state
pub struct SmartDocApp {
    /// Selected data file
    pub data_path: Option<PathBuf>,
    /// Selected template file
    pub template_path: Option<PathBuf>,
    /// Declared data-file format (auto-detected on pick, user-overridable)
    pub input_format: InputFormat,
    /// Format of the generated document
    pub output_format: OutputFormat,
    /// Status line text
    pub status: String,
    /// Application configuration
    pub config: AppConfig,
}

impl SmartDocApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load().unwrap_or_default();
        Self::apply_theme(&cc.egui_ctx, config.theme);

        Self {
            data_path: None,
            template_path: None,
            input_format: InputFormat::default(),
            output_format: OutputFormat::default(),
            status: "Load a data file and a template to begin".to_string(),
            config,
        }
    }

    fn apply_theme(ctx: &egui::Context, theme: Theme) {
        ctx.set_visuals(match theme {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        });
    }

    /// Flip the theme and persist the choice.
    pub fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.config.theme = self.config.theme.toggled();
        Self::apply_theme(ctx, self.config.theme);
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    /// Pick a data file. The input format is auto-detected from the
    /// extension but stays overridable through the selector.
    pub fn pick_data_file(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("Data files", &InputFormat::EXTENSIONS)
            .add_filter("All files", &["*"]);
        if let Some(ref dir) = self.config.last_data_dir {
            dialog = dialog.set_directory(dir);
        }

        if let Some(path) = dialog.pick_file() {
            if let Some(format) = InputFormat::from_path(&path) {
                self.input_format = format;
            }
            self.config.remember_data_dir(&path);
            if let Err(e) = self.config.save() {
                tracing::warn!("Failed to save config: {}", e);
            }
            self.status = format!(
                "Data file loaded: {} ({})",
                path.display(),
                self.input_format.label()
            );
            self.data_path = Some(path);
        }
    }

    /// Pick a template file. The template is probed for merge fields so the
    /// status line can report what was found; a probe failure is only a
    /// warning here and resurfaces as the generate error.
    pub fn pick_template(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("Word templates", &["docx"]);
        if let Some(ref dir) = self.config.last_template_dir {
            dialog = dialog.set_directory(dir);
        }

        if let Some(path) = dialog.pick_file() {
            self.config.remember_template_dir(&path);
            if let Err(e) = self.config.save() {
                tracing::warn!("Failed to save config: {}", e);
            }

            match DocxTemplate::open(&path).and_then(|t| t.merge_field_names()) {
                Ok(names) => {
                    self.status = format!(
                        "Template loaded: {} ({} merge fields)",
                        path.display(),
                        names.len()
                    );
                }
                Err(e) => {
                    tracing::warn!("Template probe failed: {}", e);
                    self.status = format!("Template loaded with warnings: {e}");
                }
            }
            self.template_path = Some(path);
        }
    }

    /// Run ingest + merge + export. Every failure is caught here and
    /// rendered in the status line; the app stays responsive.
    pub fn generate(&mut self) {
        let (Some(data_path), Some(template_path)) = (&self.data_path, &self.template_path)
        else {
            self.status = "Load a data file and a template first".to_string();
            return;
        };

        let result = ingest::load_report(data_path, self.input_format)
            .and_then(|data| engine::generate(template_path, &data, self.output_format));

        match result {
            Ok(output_path) => {
                self.status = format!("Saved {}", output_path.display());
            }
            Err(e) => {
                tracing::error!("Generation failed: {}", e);
                self.status = format!("Error: {e}");
            }
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Data File...").clicked() {
                        self.pick_data_file();
                        ui.close();
                    }
                    if ui.button("Open Template...").clicked() {
                        self.pick_template();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    let label = match self.config.theme {
                        Theme::Light => "Switch to Dark Theme",
                        Theme::Dark => "Switch to Light Theme",
                    };
                    if ui.button(label).clicked() {
                        self.toggle_theme(ctx);
                        ui.close();
                    }
                });
            });
        });
    }
}

impl eframe::App for SmartDocApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        ctx.input(|i| {
            if i.modifiers.ctrl && i.key_pressed(egui::Key::D) {
                self.pick_data_file();
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::T) {
                self.pick_template();
            }
            if i.modifiers.ctrl
                && i.key_pressed(egui::Key::G)
                && can_generate(self.data_path.is_some(), self.template_path.is_some())
            {
                self.generate();
            }
        });

        self.render_menu_bar(ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            StatusBar::show(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            BuilderPanel::show(ui, self);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_generate_requires_both_inputs() {
        assert!(!can_generate(false, false));
        assert!(!can_generate(true, false));
        assert!(!can_generate(false, true));
        assert!(can_generate(true, true));
    }
}
