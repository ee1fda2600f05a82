//! Session configuration.
//!
//! Stored as TOML. Every section and field has a default, so partial files
//! (or none at all) are fine.

use crate::autosave::DebouncePolicy;
use crate::backend::Chord;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoGuiConfig {
    pub autosave: AutosaveConfig,
    pub history: HistoryConfig,
    pub shortcuts: ShortcutConfig,
    pub latex: LatexConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveConfig {
    pub enabled: bool,
    /// Quiet period after the last edit before saving.
    pub debounce_ms: u64,
    /// Force a save after this long under continuous editing.
    pub max_delay_ms: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 500,
            max_delay_ms: 30_000,
        }
    }
}

impl AutosaveConfig {
    pub fn policy(&self) -> DebouncePolicy {
        DebouncePolicy {
            enabled: self.enabled,
            debounce: Duration::from_millis(self.debounce_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

/// Snapshot timing for undo/redo histories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub debounce_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            max_delay_ms: 30_000,
        }
    }
}

impl HistoryConfig {
    pub fn policy(&self) -> DebouncePolicy {
        DebouncePolicy {
            enabled: true,
            debounce: Duration::from_millis(self.debounce_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    pub undo: Chord,
    pub redo: Chord,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            undo: Chord::ctrl('z'),
            redo: Chord::ctrl('y'),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatexConfig {
    /// Resolution passed to `dvipng -D`.
    pub dpi: u32,
    /// Directory for `.tex` sources and rendered images. Defaults to a
    /// folder under the system temp dir.
    pub cache_dir: Option<PathBuf>,
    /// Number of images kept in memory.
    pub capacity: usize,
}

impl Default for LatexConfig {
    fn default() -> Self {
        Self {
            dpi: 120,
            cache_dir: None,
            capacity: 64,
        }
    }
}

impl LatexConfig {
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("autogui-latex"))
    }
}

/// Load configuration from `path`.
///
/// Returns the default configuration if the file doesn't exist or cannot
/// be parsed.
pub fn load_config(path: &Path) -> AutoGuiConfig {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file: {}, using defaults", e);
                AutoGuiConfig::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No config file found at {:?}, using defaults", path);
            AutoGuiConfig::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read config file: {}, using defaults", e);
            AutoGuiConfig::default()
        }
    }
}

/// Save configuration to `path`, creating the parent directory if needed.
pub fn save_config(config: &AutoGuiConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            operation: "create directory for",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let content = toml::to_string_pretty(config)?;

    fs::write(path, content).map_err(|e| ConfigError::Io {
        operation: "write",
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_serializable() {
        let config = AutoGuiConfig::default();
        let toml = toml::to_string_pretty(&config);
        assert!(toml.is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: AutoGuiConfig = toml::from_str(
            r#"
            [autosave]
            debounce_ms = 250

            [shortcuts]
            redo = "Ctrl+Shift+Z"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.autosave.debounce_ms, 250);
        assert!(parsed.autosave.enabled);
        assert_eq!(parsed.shortcuts.undo, Chord::ctrl('z'));
        assert_eq!(parsed.shortcuts.redo.to_string(), "Ctrl+Shift+Z");
        assert_eq!(parsed.latex.dpi, 120);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conf").join("autogui.toml");
        let mut config = AutoGuiConfig::default();
        config.history.debounce_ms = 1000;
        config.latex.cache_dir = Some(dir.path().join("latex"));

        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path), config);
    }

    #[test]
    fn test_corrupt_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("autogui.toml");
        fs::write(&path, "[autosave\nenabled = maybe").unwrap();
        assert_eq!(load_config(&path), AutoGuiConfig::default());
    }

    #[test]
    fn test_policy_from_config() {
        let policy = AutosaveConfig::default().policy();
        assert_eq!(policy, DebouncePolicy::default());
    }
}
