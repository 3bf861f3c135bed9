//! The `make_styles` hook: definitions in, class names out.
//!
//! [`make_styles`] wraps a definition list in a [`MakeStyles`] value that a
//! component keeps for its whole lifetime. Each render calls
//! [`class_name`](MakeStyles::class_name) with the current selectors and
//! [`StyleOptions`]; the hook resolves matching rules, compiles them to
//! atomic CSS, inserts the CSS through the renderer and returns the class
//! string.
//!
//! ## Memoization
//!
//! Results are cached per renderer instance and direction, keyed by the
//! serialized merged style and the indices of the rules that matched. A
//! cache hit skips compilation and insertion entirely, which is safe because
//! a renderer never forgets an inserted rule.
//!
//! Entries are keyed by [`Renderer::instance`] rather than the id string,
//! so renderers with matching ids still get their own CSS.
//!
//! # Example
//!
//! ```rust
//! use tincture::{make_styles, StyleDefinitions, StyleObject, StyleOptions, StyleRule,
//!     StyleSheetRenderer, TokenSet};
//!
//! struct Button { primary: bool }
//!
//! let styles = make_styles(
//!     StyleDefinitions::<Button, TokenSet>::named("button")
//!         .base(StyleObject::new().with("paddingLeft", "8px").with("color", "black"))
//!         .when(|b: &Button| b.primary, StyleRule::computed(|t: &TokenSet| {
//!             t.apply(&StyleObject::new().with("color", "$brand"))
//!         })),
//! );
//!
//! let renderer = StyleSheetRenderer::with_id("doc");
//! let tokens = TokenSet::new().with("brand", "#0f6cbd");
//! let options = StyleOptions::new(&renderer, &tokens);
//!
//! let classes = styles.class_name(&Button { primary: true }, &options);
//! assert_eq!(classes.split(' ').count(), 2);
//! assert!(renderer.css_text().contains("color:#0f6cbd"));
//!
//! let rtl = styles.class_name(&Button { primary: true }, &options.with_rtl(true));
//! assert_ne!(classes, rtl);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::trace;

use crate::compile::resolve_style_rules;
use crate::definition::StyleDefinitions;
use crate::renderer::Renderer;
use crate::resolve::resolve_definitions;

/// Per-call options: direction, target renderer and token set.
pub struct StyleOptions<'a, T> {
    /// Emit the mirrored right-to-left variant.
    pub rtl: bool,
    /// Where compiled CSS is inserted.
    pub renderer: &'a dyn Renderer,
    /// Token values available to style functions.
    pub tokens: &'a T,
}

impl<'a, T> StyleOptions<'a, T> {
    /// Creates left-to-right options.
    pub fn new(renderer: &'a dyn Renderer, tokens: &'a T) -> Self {
        Self {
            rtl: false,
            renderer,
            tokens,
        }
    }

    /// Returns a copy with the direction set.
    pub fn with_rtl(&self, rtl: bool) -> Self {
        Self {
            rtl,
            renderer: self.renderer,
            tokens: self.tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    renderer: usize,
    rtl: bool,
    resolved: String,
}

/// A memoizing style hook built from a definition list.
pub struct MakeStyles<S, T> {
    definitions: StyleDefinitions<S, T>,
    cache: RefCell<HashMap<CacheKey, String>>,
}

/// Builds a style hook from a definition list.
pub fn make_styles<S, T>(definitions: StyleDefinitions<S, T>) -> MakeStyles<S, T> {
    MakeStyles {
        definitions,
        cache: RefCell::new(HashMap::new()),
    }
}

impl<S, T> MakeStyles<S, T> {
    /// Resolves, compiles and inserts styles for `selectors`, returning the
    /// element's class string.
    pub fn class_name(&self, selectors: &S, options: &StyleOptions<'_, T>) -> String {
        let resolved = resolve_definitions(&self.definitions, selectors, options.tokens);
        let key = CacheKey {
            renderer: options.renderer.instance(),
            rtl: options.rtl,
            resolved: resolved.cache_key(),
        };

        if let Some(hit) = self.cache.borrow().get(&key) {
            trace!(
                definitions = self.definitions.name().unwrap_or("<anonymous>"),
                renderer = options.renderer.id(),
                "style cache hit"
            );
            return hit.clone();
        }

        let matched = resolve_style_rules(&resolved.style, options.renderer.class_prefix());
        let class_name = options.renderer.insert_definitions(&matched, options.rtl);
        self.cache.borrow_mut().insert(key, class_name.clone());
        class_name
    }

    /// Like [`class_name`](Self::class_name), then merges `extra` classes on
    /// top so that caller-supplied atomic classes override the hook's own for
    /// the same declaration slot.
    pub fn class_name_with(&self, selectors: &S, options: &StyleOptions<'_, T>, extra: &str) -> String {
        let own = self.class_name(selectors, options);
        options.renderer.merge_classes(&[own.as_str(), extra])
    }

    /// The wrapped definitions.
    pub fn definitions(&self) -> &StyleDefinitions<S, T> {
        &self.definitions
    }

    /// Number of memoized results.
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }
}
