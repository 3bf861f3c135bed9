//! Style value types for scalar declarations and nested blocks.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::object::StyleObject;

/// A single value in a [`StyleObject`].
///
/// Scalars compile straight to `property:value` declarations. Blocks hold
/// nested style objects: keyframe frames under `animationName`, pseudo
/// selectors such as `:hover`, or `@media` queries.
///
/// # Example
///
/// ```rust
/// use tincture::{StyleObject, StyleValue};
///
/// let size: StyleValue = 12.into();
/// assert_eq!(size.as_scalar().as_deref(), Some("12"));
///
/// let hover: StyleValue = StyleObject::new().with("color", "blue").into();
/// assert!(hover.is_block());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// A numeric value, stringified without any unit suffix.
    Number(f64),
    /// A textual value emitted verbatim.
    Str(String),
    /// A nested block of declarations.
    Block(StyleObject),
}

impl StyleValue {
    /// Returns the textual form of a scalar value, or `None` for blocks.
    pub fn as_scalar(&self) -> Option<Cow<'_, str>> {
        match self {
            StyleValue::Str(s) => Some(Cow::Borrowed(s.as_str())),
            StyleValue::Number(n) => Some(Cow::Owned(n.to_string())),
            StyleValue::Block(_) => None,
        }
    }

    /// Returns the nested block, if this value is one.
    pub fn as_block(&self) -> Option<&StyleObject> {
        match self {
            StyleValue::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Returns true for nested blocks.
    pub fn is_block(&self) -> bool {
        matches!(self, StyleValue::Block(_))
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Str(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Str(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<u32> for StyleValue {
    fn from(value: u32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<StyleObject> for StyleValue {
    fn from(value: StyleObject) -> Self {
        StyleValue::Block(value)
    }
}
