//! In-memory stylesheet renderer.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use super::config::RendererConfig;
use super::Renderer;
use crate::classes::join_classes;
use crate::compile::{MatchedDefinitions, ResolvedRule};

static NEXT_RENDERER: AtomicUsize = AtomicUsize::new(0);

/// A lookup-table entry: the declaration slot a class fills and its rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupEntry {
    /// Declaration slot (media, selector and property).
    pub slot: String,
    /// The compiled rule.
    pub rule: ResolvedRule,
}

#[derive(Debug, Default)]
struct SheetState {
    rules: Vec<String>,
    /// `@media` rules; always emitted after `rules`.
    media_rules: Vec<String>,
    inserted: HashSet<String>,
    lookup: HashMap<String, LookupEntry>,
}

/// Renderer that collects CSS rules in insertion order.
///
/// The collected text can be served inline, written to a file, or injected
/// into a document by the host.
///
/// # Example
///
/// ```rust
/// use tincture::{resolve_style_rules, Renderer, StyleObject, StyleSheetRenderer};
///
/// let renderer = StyleSheetRenderer::with_id("doc");
/// let matched = resolve_style_rules(&StyleObject::new().with("color", "red"), renderer.class_prefix());
///
/// let first = renderer.insert_definitions(&matched, false);
/// let second = renderer.insert_definitions(&matched, false);
/// assert_eq!(first, second);
/// assert_eq!(renderer.len(), 1);
/// ```
#[derive(Debug)]
pub struct StyleSheetRenderer {
    id: String,
    instance: usize,
    class_prefix: String,
    state: RefCell<SheetState>,
}

impl StyleSheetRenderer {
    /// Creates a renderer with a generated id and the default prefix.
    pub fn new() -> Self {
        Self::from_config(&RendererConfig::default())
    }

    /// Creates a renderer with an explicit id and the default prefix.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self::from_config(&RendererConfig {
            id: Some(id.into()),
            ..RendererConfig::default()
        })
    }

    /// Creates a renderer from configuration.
    pub fn from_config(config: &RendererConfig) -> Self {
        let instance = NEXT_RENDERER.fetch_add(1, Ordering::Relaxed);
        let id = config.id.clone().unwrap_or_else(|| format!("r{}", instance));
        Self {
            id,
            instance,
            class_prefix: config.class_prefix.clone(),
            state: RefCell::new(SheetState::default()),
        }
    }

    /// Returns the inserted rules in stylesheet order: plain rules in
    /// insertion order, then `@media` rules in insertion order.
    pub fn rules(&self) -> Vec<String> {
        let state = self.state.borrow();
        state.rules.iter().chain(&state.media_rules).cloned().collect()
    }

    /// Returns the stylesheet text, one rule per line.
    pub fn css_text(&self) -> String {
        self.rules().join("\n")
    }

    /// Returns the number of inserted rules.
    pub fn len(&self) -> usize {
        let state = self.state.borrow();
        state.rules.len() + state.media_rules.len()
    }

    /// Returns true if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if a rule for `class_name` has been inserted.
    pub fn is_inserted(&self, class_name: &str) -> bool {
        self.state.borrow().inserted.contains(class_name)
    }

    /// Looks up the rule behind an inserted class.
    pub fn lookup(&self, class_name: &str) -> Option<LookupEntry> {
        self.state.borrow().lookup.get(class_name).cloned()
    }
}

impl Default for StyleSheetRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for StyleSheetRenderer {
    fn id(&self) -> &str {
        &self.id
    }

    fn instance(&self) -> usize {
        self.instance
    }

    fn class_prefix(&self) -> &str {
        &self.class_prefix
    }

    fn insert_definitions(&self, matched: &MatchedDefinitions, rtl: bool) -> String {
        let mut state = self.state.borrow_mut();
        let mut classes = Vec::with_capacity(matched.len());

        for (slot, rule) in matched.iter() {
            let (class_name, css) = rule.for_direction(rtl);
            if !state.inserted.contains(&*class_name) {
                state.inserted.insert(class_name.to_string());
                if css.starts_with("@media") {
                    state.media_rules.push(css.to_string());
                } else {
                    state.rules.push(css.to_string());
                }
                state.lookup.insert(
                    class_name.to_string(),
                    LookupEntry {
                        slot: slot.to_string(),
                        rule: rule.clone(),
                    },
                );
                debug!(renderer = %self.id, class = %class_name, "inserted rule");
            }
            classes.push(class_name.into_owned());
        }

        join_classes(classes.iter().map(String::as_str))
    }

    fn merge_classes(&self, classes: &[&str]) -> String {
        let state = self.state.borrow();
        let mut merged: Vec<(Option<&str>, &str)> = Vec::new();

        for class in classes.iter().flat_map(|c| c.split_whitespace()) {
            let slot = state.lookup.get(class).map(|entry| entry.slot.as_str());
            let existing = merged.iter_mut().find(|(s, c)| match slot {
                Some(_) => *s == slot,
                None => *c == class,
            });
            match existing {
                Some(entry) => entry.1 = class,
                None => merged.push((slot, class)),
            }
        }

        join_classes(merged.into_iter().map(|(_, class)| class))
    }
}
