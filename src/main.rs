use eframe::egui;
use tracing::info;

mod log_formatter;
use log_formatter::BracketedFormatter;

mod app;
mod config;
mod core;
mod state;
mod ui;

use app::SplitImgApp;
use config::AppConfig;

fn main() -> Result<(), eframe::Error> {
    // Initialize tracing subscriber with custom bracketed format
    tracing_subscriber::fmt()
        .event_format(BracketedFormatter)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting SplitImg application");

    let app_config = AppConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([app_config.window_width, app_config.window_height])
            .with_title(app_config.app_title),
        ..Default::default()
    };

    info!("Launching application window");
    eframe::run_native(
        app_config.app_title,
        options,
        Box::new(|_cc| Ok(Box::new(SplitImgApp::new()))),
    )
}
