//! Where the demo keeps its configuration and autosaved state.
//!
//! Files live in the platform-specific application folders:
//! - macOS: ~/Library/Application Support/org.autogui.autogui-demo/
//! - Windows: %APPDATA%/autogui/autogui-demo/
//! - Linux: ~/.config/autogui-demo/ and ~/.local/share/autogui-demo/

use autogui_core::{AutoGuiConfig, load_config, save_config};
use directories::ProjectDirs;
use std::path::PathBuf;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "autogui";
const APP_NAME: &str = "autogui-demo";
const CONFIG_FILENAME: &str = "config.toml";
const STATE_FILENAME: &str = "demo-state.json";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Path to the configuration file, if the platform has a config folder.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Path the demo state is autosaved to. Falls back to the working
/// directory when no data folder can be determined.
pub fn state_path() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from(STATE_FILENAME),
        |dirs| dirs.data_dir().join(STATE_FILENAME),
    )
}

/// Load the configuration, writing the defaults out on first run so they
/// can be edited.
pub fn load_settings() -> AutoGuiConfig {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config path, using defaults");
        return AutoGuiConfig::default();
    };

    let config = load_config(&path);
    if !path.exists() {
        match save_config(&config, &path) {
            Ok(()) => tracing::info!("Wrote default config to {:?}", path),
            Err(e) => tracing::warn!("Failed to write default config: {}", e),
        }
    }
    config
}
