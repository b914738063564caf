pub mod api;
pub mod app;
pub mod config;
pub mod image_ref;
pub mod models;
pub mod navigation;
pub mod report;

use eframe::{self, egui};

pub use app::SafeBitesApp;

/// Launches the egui application with default window options.
pub fn run_frontend() -> Result<(), eframe::Error> {
    run_frontend_with_options(default_native_options())
}

/// Launches the egui app with caller-provided options.
pub fn run_frontend_with_options(options: eframe::NativeOptions) -> Result<(), eframe::Error> {
    let _ = env_logger::builder().is_test(false).try_init();
    eframe::run_native(
        "SafeBites",
        options,
        Box::new(|cc| Ok(Box::new(SafeBitesApp::new(cc)?))),
    )
}

fn default_native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 820.0])
            .with_min_inner_size([360.0, 600.0]),
        ..Default::default()
    }
}
