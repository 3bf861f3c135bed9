//! Tincture - atomic CSS from ordered style definitions.
//!
//! Tincture turns declarative style definitions into atomic CSS classes. A
//! component describes every style it can take as an ordered list of
//! `[matcher, rule]` pairs; at render time the matching rules are merged,
//! compiled to one class per declaration, inserted into a stylesheet and the
//! class string is handed back.
//!
//! - Rules are static style objects or functions of a token set
//! - Matchers are tri-state: yes, no, or no opinion
//! - Class names are content hashes, so equal declarations share a class
//! - Right-to-left variants are generated alongside the left-to-right CSS
//! - Renderers are explicit context objects; nothing is global
//!
//! # Quick Start
//!
//! ```rust
//! use tincture::{make_styles, StyleDefinitions, StyleObject, StyleOptions, StyleSheetRenderer};
//!
//! struct Chip { selected: bool }
//!
//! let styles = make_styles(
//!     StyleDefinitions::<Chip, ()>::named("chip")
//!         .base(
//!             StyleObject::new()
//!                 .with("display", "inline-flex")
//!                 .with("color", "black")
//!                 .with(":hover", StyleObject::new().with("color", "blue")),
//!         )
//!         .when(|c: &Chip| c.selected, StyleObject::new().with("color", "white")),
//! );
//!
//! let renderer = StyleSheetRenderer::new();
//! let options = StyleOptions::new(&renderer, &());
//!
//! let idle = styles.class_name(&Chip { selected: false }, &options);
//! let selected = styles.class_name(&Chip { selected: true }, &options);
//!
//! assert_eq!(idle.split(' ').count(), 3);
//! assert_ne!(idle, selected);
//! assert!(renderer.css_text().contains(":hover{color:blue}"));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! StyleDefinitions ──resolve_definitions──▶ StyleObject
//!                  ──resolve_style_rules──▶ MatchedDefinitions (slot → rule)
//!                  ──Renderer::insert_definitions──▶ "class class class"
//! ```
//!
//! [`make_styles`] wires these together and memoizes the result.
//!
//! # Style Sheet Files
//!
//! Definitions can also be loaded from YAML with [`parse_style_sheet`] or
//! [`StyleSheetFile::from_file`], using [`SelectorState`] as the selectors
//! context and [`TokenSet`] for `$token` substitution.

mod classes;
mod compile;
mod definition;
mod error;
mod hash;
mod make_styles;
mod renderer;
mod resolve;
mod selectors;
mod sheet;
mod style;
mod tokens;

// Re-export public API
pub use classes::join_classes;
pub use compile::{
    compile_keyframe_rule, compile_keyframes_css, cssify_object, flip_property, flip_style,
    flip_value, hyphenate_property, resolve_style_rules, MatchedDefinitions, ResolvedRule,
};
pub use definition::{MatcherFn, StyleDefinition, StyleDefinitions, StyleFn, StyleRule};
pub use error::{Result, StyleError};
pub use make_styles::{make_styles, MakeStyles, StyleOptions};
pub use renderer::{
    LookupEntry, Renderer, RendererConfig, StyleSheetRenderer, DEFAULT_CLASS_PREFIX,
};
pub use resolve::{resolve_definitions, ResolvedStyle};
pub use selectors::{SelectorCondition, SelectorState, SelectorValue};
pub use sheet::{parse_style_sheet, SheetDefinitions, StyleSheetFile};
pub use style::{StyleObject, StyleValue, ANIMATION_NAME};
pub use tokens::{has_token_references, TokenSet};
