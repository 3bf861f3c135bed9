//! Design tokens: named values substituted into styles.
//!
//! A [`TokenSet`] maps token names to CSS values. Style functions can read
//! it directly, and string values may reference tokens with `$name`:
//!
//! ```rust
//! use tincture::{StyleObject, TokenSet};
//!
//! let tokens = TokenSet::new()
//!     .with("colorBrand", "#0f6cbd")
//!     .with("spacing.m", "12px");
//!
//! let style = StyleObject::new()
//!     .with("color", "$colorBrand")
//!     .with("padding", "0 $spacing.m");
//!
//! let applied = tokens.apply(&style);
//! assert_eq!(applied.get("padding").and_then(|v| v.as_scalar()).as_deref(), Some("0 12px"));
//! ```
//!
//! ## YAML
//!
//! Nested groups flatten with `.`:
//!
//! ```yaml
//! colorBrand: "#0f6cbd"
//! spacing:
//!   s: 4px
//!   m: 12px
//! ```
//!
//! yields `colorBrand`, `spacing.s` and `spacing.m`.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::warn;

use crate::error::{Result, StyleError};
use crate::style::{StyleObject, StyleValue};

/// A named set of design-token values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSet {
    tokens: BTreeMap<String, String>,
}

impl TokenSet {
    /// Creates an empty token set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token, returning `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces a token.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tokens.insert(name.into(), value.into());
    }

    /// Looks up a token value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }

    /// Iterates over tokens sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no tokens are defined.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Merges another token set into this one; `other` wins on conflicts.
    pub fn merge(mut self, other: TokenSet) -> Self {
        self.tokens.extend(other.tokens);
        self
    }

    /// Parses a token set from YAML, flattening nested groups.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Parse`] for invalid YAML, a non-mapping root, or
    /// list values.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::parse(yaml, None)
    }

    /// Loads a token set from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Load`] if the file cannot be read, or
    /// [`StyleError::Parse`] if it is not a valid token file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| StyleError::load(path, e))?;
        Self::parse(&content, Some(path))
    }

    fn parse(yaml: &str, path: Option<&Path>) -> Result<Self> {
        let root: Value = serde_yaml::from_str(yaml).map_err(|e| StyleError::parse("tokens", path, e))?;
        let mut set = TokenSet::new();
        match root {
            Value::Null => {}
            Value::Mapping(_) => flatten(&root, "", &mut set)
                .map_err(|message| StyleError::parse("tokens", path, message))?,
            _ => {
                return Err(StyleError::parse(
                    "tokens",
                    path,
                    "expected a mapping of token names to values",
                ))
            }
        }
        Ok(set)
    }

    /// Replaces every `$name` reference in `value`.
    ///
    /// Returns `None` if any referenced token is missing. Values without
    /// references are borrowed unchanged.
    pub fn substitute<'a>(&self, value: &'a str) -> Option<Cow<'a, str>> {
        if !value.contains('$') {
            return Some(Cow::Borrowed(value));
        }

        let mut out = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(start) = rest.find('$') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'))
                .unwrap_or(after.len());
            let name = after[..len].trim_end_matches('.');
            if name.is_empty() {
                out.push('$');
                rest = after;
                continue;
            }
            out.push_str(self.get(name)?);
            rest = &after[name.len()..];
        }
        out.push_str(rest);
        Some(Cow::Owned(out))
    }

    /// Substitutes token references throughout a style object.
    ///
    /// Declarations referencing unknown tokens are dropped and logged.
    pub fn apply(&self, style: &StyleObject) -> StyleObject {
        let mut out = StyleObject::new();
        for (key, value) in style.iter() {
            match value {
                StyleValue::Str(text) => match self.substitute(text) {
                    Some(resolved) => out.set(key, resolved.into_owned()),
                    None => warn!(property = key, value = %text, "unresolved token reference"),
                },
                StyleValue::Block(block) => out.set(key, self.apply(block)),
                StyleValue::Number(_) => out.set(key, value.clone()),
            }
        }
        out
    }
}

/// Returns true if any string value in `style` contains a `$` reference.
pub fn has_token_references(style: &StyleObject) -> bool {
    style.iter().any(|(_, value)| match value {
        StyleValue::Str(text) => text.contains('$'),
        StyleValue::Block(block) => has_token_references(block),
        StyleValue::Number(_) => false,
    })
}

fn flatten(value: &Value, prefix: &str, out: &mut TokenSet) -> std::result::Result<(), String> {
    let Value::Mapping(map) = value else {
        return Ok(());
    };
    for (key, value) in map {
        let key = scalar_text(key).ok_or_else(|| format!("invalid token name under '{}'", prefix))?;
        let name = if prefix.is_empty() {
            key
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Mapping(_) => flatten(value, &name, out)?,
            Value::Null => {}
            Value::Sequence(_) => return Err(format!("token '{}' must not be a list", name)),
            other => {
                let text = scalar_text(other).ok_or_else(|| format!("token '{}' has an unsupported value", name))?;
                out.insert(name, text);
            }
        }
    }
    Ok(())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
