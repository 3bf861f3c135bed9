//! YAML style sheet files.
//!
//! A style sheet file maps slot names to ordered rule lists. Each rule has
//! an optional `when` condition over [`SelectorState`] and a `style` object:
//!
//! ```yaml
//! root:
//!   - style:
//!       display: flex
//!       paddingLeft: 8px
//!   - when: { primary: true }
//!     style:
//!       color: $colors.brand
//!       ":hover":
//!         color: $colors.brandHover
//! icon:
//!   - style: { width: 16px }
//! ```
//!
//! Slots and rules keep document order. A rule whose style mentions a
//! `$token` becomes a computed rule that substitutes from the [`TokenSet`]
//! passed at call time.

use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::definition::{MatcherFn, StyleDefinition, StyleDefinitions, StyleRule};
use crate::error::{Result, StyleError};
use crate::selectors::{SelectorCondition, SelectorState};
use crate::style::StyleObject;
use crate::tokens::{has_token_references, TokenSet};

/// Definitions loaded from a style sheet file.
pub type SheetDefinitions = StyleDefinitions<SelectorState, TokenSet>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRule {
    #[serde(default)]
    when: SelectorCondition,
    style: StyleObject,
}

/// A parsed style sheet: named slots, each with its definition list.
#[derive(Debug, Default)]
pub struct StyleSheetFile {
    slots: Vec<(String, SheetDefinitions)>,
}

impl StyleSheetFile {
    /// Loads and parses a style sheet file.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Load`] if the file cannot be read, otherwise the
    /// same errors as [`parse_style_sheet`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| StyleError::load(path, e))?;
        parse(&content, Some(path))
    }

    /// Slot names in document order.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(name, _)| name.as_str())
    }

    /// Definitions for one slot.
    pub fn get(&self, slot: &str) -> Option<&SheetDefinitions> {
        self.slots
            .iter()
            .find(|(name, _)| name == slot)
            .map(|(_, defs)| defs)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the sheet has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Consumes the sheet, yielding slots in document order.
    pub fn into_slots(self) -> Vec<(String, SheetDefinitions)> {
        self.slots
    }
}

/// Parses a style sheet from YAML.
///
/// An empty document is an empty sheet.
///
/// # Errors
///
/// Returns [`StyleError::Parse`] when the YAML is malformed or not shaped as
/// slot lists, and [`StyleError::InvalidRule`] when a rule is unusable.
///
/// # Example
///
/// ```rust
/// use tincture::{parse_style_sheet, resolve_definitions, SelectorState, TokenSet};
///
/// let sheet = parse_style_sheet(r#"
/// root:
///   - style: { color: black }
///   - when: { primary: true }
///     style: { color: $brand }
/// "#).unwrap();
///
/// let root = sheet.get("root").unwrap();
/// let tokens = TokenSet::new().with("brand", "navy");
/// let state = SelectorState::new().with("primary", true);
///
/// let resolved = resolve_definitions(root, &state, &tokens);
/// assert_eq!(resolved.style.get("color").and_then(|v| v.as_scalar()).as_deref(), Some("navy"));
/// ```
pub fn parse_style_sheet(yaml: &str) -> Result<StyleSheetFile> {
    parse(yaml, None)
}

fn parse(yaml: &str, path: Option<&Path>) -> Result<StyleSheetFile> {
    const WHAT: &str = "style sheet";

    let root: Value = serde_yaml::from_str(yaml).map_err(|e| StyleError::parse(WHAT, path, e))?;
    let mapping = match root {
        Value::Null => return Ok(StyleSheetFile::default()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(StyleError::parse(WHAT, path, "expected a mapping of slot names")),
    };

    let mut slots = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let slot = match key {
            Value::String(s) if !s.trim().is_empty() => s,
            Value::String(_) => {
                return Err(StyleError::parse(WHAT, path, "slot names must not be empty"))
            }
            other => {
                return Err(StyleError::parse(
                    WHAT,
                    path,
                    format!("slot names must be strings, found {:?}", other),
                ))
            }
        };

        let rules = match value {
            Value::Sequence(rules) => rules,
            Value::Null => Vec::new(),
            _ => {
                return Err(StyleError::parse(
                    WHAT,
                    path,
                    format!("slot '{}' must be a list of rules", slot),
                ))
            }
        };

        let mut definitions = StyleDefinitions::named(slot.clone());
        for (index, rule) in rules.into_iter().enumerate() {
            let raw: RawRule = serde_yaml::from_value(rule).map_err(|e| StyleError::InvalidRule {
                slot: slot.clone(),
                index,
                message: e.to_string(),
            })?;
            definitions.push(build_definition(&slot, index, raw)?);
        }
        slots.push((slot, definitions));
    }

    Ok(StyleSheetFile { slots })
}

fn build_definition(
    slot: &str,
    index: usize,
    raw: RawRule,
) -> Result<StyleDefinition<SelectorState, TokenSet>> {
    if raw.when.iter().any(|(name, _)| name.trim().is_empty()) {
        return Err(StyleError::InvalidRule {
            slot: slot.to_string(),
            index,
            message: "condition keys must not be empty".to_string(),
        });
    }

    let matcher = if raw.when.is_empty() {
        None
    } else {
        let condition = raw.when;
        let matcher: Box<MatcherFn<SelectorState>> =
            Box::new(move |state: &SelectorState| condition.evaluate(state));
        Some(matcher)
    };

    let style = raw.style;
    let rule = if has_token_references(&style) {
        StyleRule::computed(move |tokens: &TokenSet| tokens.apply(&style))
    } else {
        StyleRule::Static(style)
    };

    Ok(StyleDefinition::new(matcher, rule))
}
