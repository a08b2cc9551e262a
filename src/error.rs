//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for jvdoc-nav operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that stop the page layer from initializing.
///
/// An unresolved symbol is not one of these: it is ordinary user input and is
/// reported through [`crate::widget::Confirmation::Unresolved`] and an alert.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A global the generated page is expected to define was not found.
    #[error("host data missing: `{name}` is not defined")]
    MissingHostData { name: &'static str },

    /// Host data was present but could not be interpreted.
    #[error("host data malformed: {reason}")]
    MalformedHostData { reason: String },

    /// A cross-reference entry points at an empty document path.
    #[error("symbol `{symbol}` maps to an empty document path")]
    EmptyPath { symbol: String },

    /// A required page element is absent.
    #[error("page element missing: {what}")]
    MissingElement { what: String },

    /// A hidden content block has no child element to act as its trigger.
    #[error("hidden block #{block} has no trigger element")]
    MissingTrigger { block: usize },

    /// A key name could not be parsed.
    #[error("invalid key: '{0}'")]
    InvalidKey(String),

    /// Configuration parsed but holds an unusable value.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// Configuration file is not valid TOML for [`crate::config::WidgetConfig`].
    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Filesystem failure while reading host data or configuration.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn missing_element(what: impl Into<String>) -> Self {
        Self::MissingElement { what: what.into() }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
