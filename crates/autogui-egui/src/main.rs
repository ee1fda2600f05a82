//! autogui demo - edits a sample scene with undo/redo and autosave.

use autogui_egui::DemoApp;
use autogui_egui::settings::{load_settings, state_path};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    // Initialize logging (RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = load_settings();
    let state_path = state_path();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("autogui demo")
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "autogui demo",
        options,
        Box::new(move |_cc| {
            let app = DemoApp::new(config, state_path)?;
            Ok(Box::new(app))
        }),
    )
}
