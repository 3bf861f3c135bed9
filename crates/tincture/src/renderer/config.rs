//! Renderer configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleError};

/// Class prefix used when none is configured.
pub const DEFAULT_CLASS_PREFIX: &str = "f";

/// Settings for a [`StyleSheetRenderer`](super::StyleSheetRenderer).
///
/// # Example
///
/// ```rust
/// use tincture::RendererConfig;
///
/// let config = RendererConfig::from_yaml("id: preview-frame\nclass_prefix: tc").unwrap();
/// assert_eq!(config.id.as_deref(), Some("preview-frame"));
/// assert_eq!(config.class_prefix, "tc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Renderer id; generated when absent.
    pub id: Option<String>,
    /// Prefix for generated class names. Must start with a letter.
    pub class_prefix: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            id: None,
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
        }
    }
}

impl RendererConfig {
    /// Parses a configuration from YAML. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Parse`] for invalid YAML, unknown fields, or a
    /// class prefix that does not start with an ASCII letter.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::parse(yaml, None)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Load`] if the file cannot be read, or
    /// [`StyleError::Parse`] if it is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| StyleError::load(path, e))?;
        Self::parse(&content, Some(path))
    }

    fn parse(yaml: &str, path: Option<&Path>) -> Result<Self> {
        let config: RendererConfig = if yaml.trim().is_empty() {
            RendererConfig::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| StyleError::parse("renderer config", path, e))?
        };
        if !config
            .class_prefix
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
        {
            return Err(StyleError::parse(
                "renderer config",
                path,
                format!("class_prefix '{}' must start with a letter", config.class_prefix),
            ));
        }
        Ok(config)
    }
}
