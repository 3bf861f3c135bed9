//! A dynamic selectors context and declarative conditions over it.
//!
//! Code-defined styles usually match on their own state struct. Styles
//! loaded from files need a dynamic equivalent: [`SelectorState`] holds
//! named flags and text values, and [`SelectorCondition`] matches against it.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, StyleError};

/// A selector value: a boolean flag or a text variant.
///
/// When deserializing, numeric scalars become text (`size: 12` reads as
/// `Text("12")`), matching `key=value` assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SelectorValue {
    /// On/off state such as `disabled` or `rtl`.
    Flag(bool),
    /// Variant name such as `appearance: primary`.
    Text(String),
}

struct SelectorValueVisitor;

impl<'de> Visitor<'de> for SelectorValueVisitor {
    type Value = SelectorValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a boolean, string or number")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<Self::Value, E> {
        Ok(SelectorValue::Flag(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Self::Value, E> {
        Ok(SelectorValue::Text(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Self::Value, E> {
        Ok(SelectorValue::Text(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Self::Value, E> {
        Ok(SelectorValue::Text(value.to_string()))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
        Ok(SelectorValue::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<Self::Value, E> {
        Ok(SelectorValue::Text(value))
    }
}

impl<'de> Deserialize<'de> for SelectorValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(SelectorValueVisitor)
    }
}

impl From<bool> for SelectorValue {
    fn from(value: bool) -> Self {
        SelectorValue::Flag(value)
    }
}

impl From<&str> for SelectorValue {
    fn from(value: &str) -> Self {
        SelectorValue::Text(value.to_string())
    }
}

impl From<String> for SelectorValue {
    fn from(value: String) -> Self {
        SelectorValue::Text(value)
    }
}

/// Runtime selector state for file-defined styles.
///
/// # Example
///
/// ```rust
/// use tincture::{SelectorState, SelectorValue};
///
/// let state = SelectorState::new()
///     .with("disabled", true)
///     .with("size", "small");
///
/// assert!(state.flag("disabled"));
/// assert!(!state.flag("checked"));
/// assert_eq!(state.get("size"), Some(&SelectorValue::Text("small".into())));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectorState {
    values: BTreeMap<String, SelectorValue>,
}

impl SelectorState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, returning `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<SelectorValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<SelectorValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Looks up a value.
    pub fn get(&self, name: &str) -> Option<&SelectorValue> {
        self.values.get(name)
    }

    /// Reads a flag; missing or non-flag values read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(SelectorValue::Flag(true)))
    }

    /// Applies a `key=value` assignment. `true`/`false` become flags and a
    /// bare `key` sets the flag to `true`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidAssignment`] when the key is empty.
    pub fn parse_assignment(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = match assignment.split_once('=') {
            Some((key, value)) => (key.trim(), Some(value.trim())),
            None => (assignment.trim(), None),
        };
        if key.is_empty() {
            return Err(StyleError::InvalidAssignment(assignment.to_string()));
        }
        let value = match value {
            None | Some("true") => SelectorValue::Flag(true),
            Some("false") => SelectorValue::Flag(false),
            Some(text) => SelectorValue::Text(text.to_string()),
        };
        self.set(key, value);
        Ok(())
    }

    /// Returns true if no values are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A conjunction of required selector values.
///
/// An empty condition has no opinion and answers `None`, which counts as a
/// match. A required `false` flag is satisfied by a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectorCondition {
    required: BTreeMap<String, SelectorValue>,
}

impl SelectorCondition {
    /// Creates an empty condition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `name` to equal `value`.
    pub fn require(mut self, name: impl Into<String>, value: impl Into<SelectorValue>) -> Self {
        self.required.insert(name.into(), value.into());
        self
    }

    /// Iterates over the required entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SelectorValue)> {
        self.required.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if nothing is required.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }

    /// Evaluates the condition against a state.
    pub fn evaluate(&self, state: &SelectorState) -> Option<bool> {
        if self.required.is_empty() {
            return None;
        }
        Some(self.required.iter().all(|(name, expected)| {
            match (expected, state.get(name)) {
                (SelectorValue::Flag(false), None) => true,
                (expected, Some(actual)) => expected == actual,
                (_, None) => false,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_condition_has_no_opinion() {
        assert_eq!(SelectorCondition::new().evaluate(&SelectorState::new()), None);
    }

    #[test]
    fn test_condition_requires_all() {
        let cond = SelectorCondition::new()
            .require("primary", true)
            .require("size", "small");
        let state = SelectorState::new().with("primary", true);
        assert_eq!(cond.evaluate(&state), Some(false));
        let state = state.with("size", "small");
        assert_eq!(cond.evaluate(&state), Some(true));
    }

    #[test]
    fn test_false_flag_matches_missing_key() {
        let cond = SelectorCondition::new().require("disabled", false);
        assert_eq!(cond.evaluate(&SelectorState::new()), Some(true));
        assert_eq!(
            cond.evaluate(&SelectorState::new().with("disabled", true)),
            Some(false)
        );
    }

    #[test]
    fn test_parse_assignment() {
        let mut state = SelectorState::new();
        state.parse_assignment("primary").unwrap();
        state.parse_assignment("disabled=false").unwrap();
        state.parse_assignment("size = large").unwrap();
        assert!(state.flag("primary"));
        assert!(!state.flag("disabled"));
        assert_eq!(state.get("size"), Some(&SelectorValue::Text("large".into())));
    }

    #[test]
    fn test_parse_assignment_rejects_empty_key() {
        let mut state = SelectorState::new();
        assert!(matches!(
            state.parse_assignment("=x"),
            Err(StyleError::InvalidAssignment(_))
        ));
    }

    #[test]
    fn test_numeric_yaml_values_read_as_text() {
        let cond: SelectorCondition = serde_yaml::from_str("{ size: 12, scale: 1.5 }").unwrap();
        let mut state = SelectorState::new();
        state.parse_assignment("size=12").unwrap();
        state.parse_assignment("scale=1.5").unwrap();
        assert_eq!(cond.evaluate(&state), Some(true));
    }

    #[test]
    fn test_yaml_rejects_lists() {
        assert!(serde_yaml::from_str::<SelectorValue>("[a, b]").is_err());
    }

    #[test]
    fn test_condition_from_yaml() {
        let cond: SelectorCondition = serde_yaml::from_str("{ primary: true, size: small }").unwrap();
        let state = SelectorState::new().with("primary", true).with("size", "small");
        assert_eq!(cond.evaluate(&state), Some(true));
    }
}
