mod app;
mod color;
mod config;
mod data;
mod projection;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use app::WineExplorerApp;
use config::ExplorerConfig;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = ExplorerConfig::default();
    config.validate().context("invalid explorer configuration")?;

    // Load failure is fatal.
    let dataset = data::loader::load_wine()?;
    debug_assert!(!dataset.is_empty());
    log::info!(
        "Loaded {} records with {} classes",
        dataset.len(),
        dataset.classes().len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Wine Dataset Explorer",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(WineExplorerApp::new(dataset, config)))
        }),
    )
    .map_err(|e| anyhow!("UI event loop failed: {e}"))
}
