// Prevents an extra console window on Windows in release builds.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod convert;
mod platform;
mod style;

use app::{AppConfig, ImageFlowApp};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let services = platform::detect();
    let config = AppConfig {
        platform_name: services.name(),
        default_save_dir: services.default_save_dir(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([620.0, 780.0])
            .with_min_inner_size([540.0, 640.0])
            .with_title("ImageFlow")
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "ImageFlow",
        options,
        Box::new(|cc| Ok(Box::new(ImageFlowApp::new(cc, config)))),
    )
}
