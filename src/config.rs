//! Widget configuration: element ids, marker classes and limits.

use crate::dom::Key;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "jvdoc-nav";
const CONFIG_FILE: &str = "config.toml";

/// Names the page layer looks for, plus the suggestion cap and shortcut key.
///
/// Defaults match the pages the generator emits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    pub search_input_id: String,
    pub go_control_id: String,
    /// Marker on the search box container while the widget is not yet live.
    pub inactive_class: String,
    /// Marker on collapsed content blocks.
    pub hidden_class: String,
    pub max_suggestions: usize,
    /// Moves focus into the search box from anywhere else on the page.
    pub shortcut_key: Key,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            search_input_id: "search".to_string(),
            go_control_id: "go".to_string(),
            inactive_class: "off".to_string(),
            hidden_class: "hidden".to_string(),
            max_suggestions: 20,
            shortcut_key: Key::Char('f'),
        }
    }
}

impl WidgetConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the user config file under
    /// the platform config directory is used when present, defaults otherwise.
    /// A file that exists but does not parse is always an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_suggestions == 0 {
            tracing::warn!("Rejecting config with max_suggestions = 0");
            return Err(Error::InvalidConfig {
                reason: "max_suggestions must be at least 1".to_string(),
            });
        }
        for (field, value) in [
            ("search_input_id", &self.search_input_id),
            ("go_control_id", &self.go_control_id),
            ("inactive_class", &self.inactive_class),
            ("hidden_class", &self.hidden_class),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidConfig {
                    reason: format!("{} must not be empty", field),
                });
            }
        }
        Ok(())
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}
