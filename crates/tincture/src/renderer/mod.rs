//! Renderers: where compiled CSS is inserted.
//!
//! A [`Renderer`] owns a stylesheet and the lookup table of rules already
//! inserted into it. Renderers are explicit context objects: each document
//! (or isolated frame) gets its own, passed to every call through
//! [`StyleOptions`](crate::StyleOptions). Memoization caches are partitioned
//! by [`instance`](Renderer::instance), so two renderers never share results
//! even when their ids match.
//!
//! Insertion is idempotent. A rule is inserted at most once per renderer and
//! is never updated or removed afterwards.

mod config;
mod stylesheet;

pub use config::{RendererConfig, DEFAULT_CLASS_PREFIX};
pub use stylesheet::{LookupEntry, StyleSheetRenderer};

use crate::compile::MatchedDefinitions;

/// Target for compiled CSS.
///
/// # Single-Threaded Design
///
/// Style resolution runs synchronously inside a render pass, so renderers
/// use interior mutability behind `&self` and are not required to be
/// `Send + Sync`.
pub trait Renderer {
    /// Identifier distinguishing this renderer from other instances.
    fn id(&self) -> &str;

    /// Process-unique number for this renderer instance.
    fn instance(&self) -> usize;

    /// Prefix for generated class names.
    fn class_prefix(&self) -> &str;

    /// Inserts every not-yet-inserted rule in `matched` and returns the
    /// element's class string.
    ///
    /// With `rtl` set, rules that have a mirrored variant contribute their
    /// RTL CSS and class name instead.
    fn insert_definitions(&self, matched: &MatchedDefinitions, rtl: bool) -> String;

    /// Merges class strings so that, for atomic classes this renderer knows,
    /// the last class for each declaration slot wins. Unknown classes are
    /// kept in order.
    fn merge_classes(&self, classes: &[&str]) -> String;
}
