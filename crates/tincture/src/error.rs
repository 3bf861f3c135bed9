//! Error types for loading style sheets, tokens and renderer configuration.
//!
//! Style processing itself never fails: malformed values are skipped and
//! produce partial CSS. Errors only surface at the loading boundary, where
//! YAML is parsed or files are read.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading style definitions, tokens or configuration.
#[derive(Debug, Error)]
pub enum StyleError {
    /// YAML parse error.
    #[error("failed to parse {what}{}: {message}", location(.path))]
    Parse {
        /// What was being parsed ("style sheet", "tokens", ...).
        what: &'static str,
        /// Optional source file path.
        path: Option<PathBuf>,
        /// Error message from the YAML parser.
        message: String,
    },

    /// File could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Load {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A rule entry is structurally valid YAML but not a usable rule.
    #[error("invalid rule {index} in slot '{slot}': {message}")]
    InvalidRule {
        /// Slot the rule belongs to.
        slot: String,
        /// Zero-based position of the rule within the slot.
        index: usize,
        /// Description of what was wrong.
        message: String,
    },

    /// A selector assignment was not of the form `key=value`.
    #[error("invalid selector assignment '{0}' (expected key=value)")]
    InvalidAssignment(String),
}

impl StyleError {
    pub(crate) fn parse(what: &'static str, path: Option<&Path>, err: impl ToString) -> Self {
        StyleError::Parse {
            what,
            path: path.map(Path::to_path_buf),
            message: err.to_string(),
        }
    }

    pub(crate) fn load(path: &Path, source: std::io::Error) -> Self {
        StyleError::Load {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, StyleError>;
