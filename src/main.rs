#![forbid(unsafe_code)]

mod cli;
mod config;
mod constants;
mod decode;
mod overlay;
mod panel;

use anyhow::{Result, anyhow};
use clap::Parser;
use eframe::egui;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use cli::Args;
use constants::panel::{WINDOW_HEIGHT, WINDOW_WIDTH};
use panel::PanelApp;

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    info!(?args, "Starting refpin");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_title("Refpin"),
        ..Default::default()
    };

    eframe::run_native(
        "Refpin",
        options,
        Box::new(|cc| Ok(Box::new(PanelApp::new(cc, args)))),
    )
    .map_err(|err| anyhow!("Failed to launch control panel: {err}"))
}
