use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("browser command '{operation}' failed: {reason}")]
    Driver {
        operation: &'static str,
        reason: String,
    },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("navigation to {url} did not complete within {timeout:?}")]
    NavigationTimeout { url: String, timeout: Duration },

    #[error("control \"{selector}\" did not appear within {timeout:?}")]
    ControlNotFound { selector: String, timeout: Duration },

    #[error("element \"{selector}\" has no numeric token in its text {text:?}")]
    MalformedContent { selector: String, text: String },

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ScraperError {
    /// Wraps a browser-engine failure for the named driver operation.
    pub(crate) fn driver(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Driver {
            operation,
            reason: err.to_string(),
        }
    }
}
