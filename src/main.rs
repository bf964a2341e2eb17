mod app;
mod chart;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::TenureTunesApp;
use clap::Parser;
use cli::Args;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState {
        selection: args.selection(),
        ..AppState::default()
    };

    if let (Some(out), Some(path)) = (&args.export, &args.data) {
        // Headless: a bad dataset is fatal here rather than a status message.
        let table = data::loader::load_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        log::info!("Loaded {} respondents from {}", table.len(), path.display());
        state.set_table(table);
        return state.export(out);
    }

    if let Some(path) = &args.data {
        state.open(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Spotify Users in Focus: Plan Selection and Mood-Driven Listening",
        options,
        Box::new(|_cc| Ok(Box::new(TenureTunesApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
