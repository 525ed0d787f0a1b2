//! SmartDoc Builder - mail-merge report generator
//!
//! Desktop utility: structured data + Word template -> PDF/DOCX/HTML/TXT.

use eframe::egui;
use smartdoc::app::SmartDocApp;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting SmartDoc Builder...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([680.0, 420.0])
            .with_min_inner_size([520.0, 320.0])
            .with_title("SmartDoc Builder"),
        ..Default::default()
    };

    eframe::run_native(
        "SmartDoc Builder",
        native_options,
        Box::new(|cc| Ok(Box::new(SmartDocApp::new(cc)))),
    )
}
