//! Style definitions: ordered `[matcher, rule]` pairs.
//!
//! A definition list is authored once, typically at startup, and describes
//! every style a component can take. Each entry pairs an optional matcher
//! over a selectors context `S` with a rule that is either a static
//! [`StyleObject`] or a function of the token set `T`.
//!
//! # Matchers
//!
//! Matchers are tri-state:
//!
//! - `Some(true)`: the rule applies
//! - `Some(false)`: the rule is skipped
//! - `None`: the rule always applies, like a rule with no matcher at all
//!
//! # Example
//!
//! ```rust
//! use tincture::{StyleDefinitions, StyleObject, StyleRule};
//!
//! struct ButtonState { primary: bool, disabled: bool }
//! struct Tokens { brand: String }
//!
//! let definitions = StyleDefinitions::<ButtonState, Tokens>::named("button")
//!     .base(StyleObject::new().with("padding", "4px 8px"))
//!     .when(
//!         |s| s.primary,
//!         StyleRule::computed(|t: &Tokens| StyleObject::new().with("backgroundColor", t.brand.as_str())),
//!     )
//!     .rule(|s| if s.disabled { Some(true) } else { None }, StyleObject::new().with("opacity", 0.5));
//!
//! assert_eq!(definitions.len(), 3);
//! ```

use std::fmt;

use crate::style::StyleObject;

/// Predicate deciding whether a rule applies to a selectors context.
pub type MatcherFn<S> = dyn Fn(&S) -> Option<bool>;

/// Function producing a style object from a token set.
pub type StyleFn<T> = dyn Fn(&T) -> StyleObject;

/// The style half of a definition: literal, or computed from tokens.
pub enum StyleRule<T> {
    /// A literal style object.
    Static(StyleObject),
    /// A style computed from the current token set.
    Computed(Box<StyleFn<T>>),
}

impl<T> StyleRule<T> {
    /// Wraps a token function as a rule.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&T) -> StyleObject + 'static,
    {
        StyleRule::Computed(Box::new(f))
    }

    /// Produces the style object for the given tokens.
    pub fn evaluate(&self, tokens: &T) -> StyleObject {
        match self {
            StyleRule::Static(style) => style.clone(),
            StyleRule::Computed(f) => f(tokens),
        }
    }
}

impl<T> From<StyleObject> for StyleRule<T> {
    fn from(style: StyleObject) -> Self {
        StyleRule::Static(style)
    }
}

impl<T> fmt::Debug for StyleRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleRule::Static(style) => f.debug_tuple("Static").field(style).finish(),
            StyleRule::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A single `[matcher, rule]` pair.
pub struct StyleDefinition<S, T> {
    matcher: Option<Box<MatcherFn<S>>>,
    rule: StyleRule<T>,
}

impl<S, T> StyleDefinition<S, T> {
    /// Builds a definition from parts. `None` makes it a base rule.
    pub fn new(matcher: Option<Box<MatcherFn<S>>>, rule: StyleRule<T>) -> Self {
        Self { matcher, rule }
    }

    /// Evaluates the matcher. Rules without a matcher always match, and a
    /// matcher answering `None` counts as a match.
    pub fn matches(&self, selectors: &S) -> bool {
        match &self.matcher {
            None => true,
            Some(matcher) => matcher(selectors).unwrap_or(true),
        }
    }

    /// Returns true if this rule has no matcher.
    pub fn is_base(&self) -> bool {
        self.matcher.is_none()
    }

    /// The style rule.
    pub fn rule(&self) -> &StyleRule<T> {
        &self.rule
    }
}

impl<S, T> fmt::Debug for StyleDefinition<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleDefinition")
            .field("matcher", &self.matcher.as_ref().map(|_| ".."))
            .field("rule", &self.rule)
            .finish()
    }
}

/// An ordered list of style definitions.
///
/// Order is significant: when several matching rules set the same property,
/// the one declared last wins.
pub struct StyleDefinitions<S, T> {
    name: Option<String>,
    definitions: Vec<StyleDefinition<S, T>>,
}

impl<S, T> StyleDefinitions<S, T> {
    /// Creates an empty, unnamed definition list.
    pub fn new() -> Self {
        Self {
            name: None,
            definitions: Vec::new(),
        }
    }

    /// Creates an empty definition list with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            definitions: Vec::new(),
        }
    }

    /// Returns the name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Adds a rule with no matcher. It always contributes.
    pub fn base(mut self, rule: impl Into<StyleRule<T>>) -> Self {
        self.definitions.push(StyleDefinition {
            matcher: None,
            rule: rule.into(),
        });
        self
    }

    /// Adds a rule guarded by a tri-state matcher.
    pub fn rule<M>(mut self, matcher: M, rule: impl Into<StyleRule<T>>) -> Self
    where
        M: Fn(&S) -> Option<bool> + 'static,
    {
        self.definitions.push(StyleDefinition {
            matcher: Some(Box::new(matcher)),
            rule: rule.into(),
        });
        self
    }

    /// Adds a rule guarded by a boolean predicate.
    pub fn when<P>(self, predicate: P, rule: impl Into<StyleRule<T>>) -> Self
    where
        P: Fn(&S) -> bool + 'static,
    {
        self.rule(move |selectors| Some(predicate(selectors)), rule)
    }

    /// Appends an already-built definition.
    pub fn push(&mut self, definition: StyleDefinition<S, T>) {
        self.definitions.push(definition);
    }

    /// Iterates over definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleDefinition<S, T>> {
        self.definitions.iter()
    }

    /// Returns the number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if no definitions exist.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<S, T> Default for StyleDefinitions<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> fmt::Debug for StyleDefinitions<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleDefinitions")
            .field("name", &self.name)
            .field("definitions", &self.definitions)
            .finish()
    }
}
