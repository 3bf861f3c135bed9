//! Ordered style objects and last-write-wins merging.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::value::StyleValue;

/// Reserved key holding keyframe blocks.
pub const ANIMATION_NAME: &str = "animationName";

/// An ordered mapping from camelCase CSS property names to values.
///
/// Keys keep insertion order, which is also the order declarations compile
/// in. Setting an existing key replaces its value in place, so an overridden
/// property keeps the position it was first declared at.
///
/// # Example
///
/// ```rust
/// use tincture::StyleObject;
///
/// let base = StyleObject::new().with("color", "red").with("fontSize", 12);
/// let hover = StyleObject::new().with("color", "blue");
///
/// let merged = base.merged(&hover);
/// assert_eq!(merged.get("color").and_then(|v| v.as_scalar()).as_deref(), Some("blue"));
/// assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["color", "fontSize"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleObject {
    entries: Vec<(String, StyleValue)>,
}

impl StyleObject {
    /// Creates an empty style object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a property. An existing key is replaced in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Looks up a property value.
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Removes a property, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates over entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over property names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges `other` into this object; `other` wins on conflicting keys.
    ///
    /// Nested selector blocks present on both sides merge recursively.
    /// Keyframes under [`ANIMATION_NAME`] and any block/scalar mismatch are
    /// replaced wholesale.
    pub fn merge(&mut self, other: &StyleObject) {
        for (key, value) in &other.entries {
            let nested = match (self.get_mut(key), value) {
                (Some(StyleValue::Block(existing)), StyleValue::Block(incoming))
                    if key != ANIMATION_NAME =>
                {
                    existing.merge(incoming);
                    true
                }
                _ => false,
            };
            if !nested {
                self.set(key.clone(), value.clone());
            }
        }
    }

    /// Returns a copy of this object with `other` merged on top.
    pub fn merged(&self, other: &StyleObject) -> StyleObject {
        let mut out = self.clone();
        out.merge(other);
        out
    }

    /// Serializes the object to compact JSON, preserving key order.
    ///
    /// Equal objects always produce equal strings, which makes the output
    /// usable as a memoization key.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut StyleValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = StyleObject::new();
        for (key, value) in iter {
            object.set(key, value);
        }
        object
    }
}

impl Serialize for StyleObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct StyleObjectVisitor;

impl<'de> Visitor<'de> for StyleObjectVisitor {
    type Value = StyleObject;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of CSS properties to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut object = StyleObject::new();
        while let Some((key, value)) = access.next_entry::<String, StyleValue>()? {
            object.set(key, value);
        }
        Ok(object)
    }
}

impl<'de> Deserialize<'de> for StyleObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StyleObjectVisitor)
    }
}
