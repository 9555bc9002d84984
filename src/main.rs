mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use app::PpgViewerApp;
use config::ViewerConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let cwd = std::env::current_dir().context("reading working directory")?;
    let config =
        ViewerConfig::resolve(explicit.as_deref(), &cwd).context("loading configuration")?;

    // Extraction failures are fatal here: no window is opened.
    let mut state = AppState::new(config);
    let path = state.config.path.clone();
    state.load(&path)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 1000.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "PPG Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(PpgViewerApp::new(state)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
