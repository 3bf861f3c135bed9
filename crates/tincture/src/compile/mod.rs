//! CSS compilation: declarations, keyframes, atomic rules and RTL mirroring.
//!
//! The compiler is layered:
//!
//! 1. [`cssify_object`] turns the scalar entries of a style object into
//!    `property:value` declarations, and [`compile_keyframe_rule`] does the
//!    same for keyframe frames.
//! 2. [`flip_style`] mirrors a style object for right-to-left layout.
//! 3. [`resolve_style_rules`] splits a merged style object into atomic
//!    [`ResolvedRule`]s, one hashed class per declaration, each with an
//!    optional RTL variant.
//!
//! Every function here is pure: compiling the same input twice yields the
//! same text.

mod atomic;
mod declarations;
mod rtl;

pub use atomic::{resolve_style_rules, MatchedDefinitions, ResolvedRule};
pub use declarations::{
    compile_keyframe_rule, compile_keyframes_css, cssify_object, hyphenate_property,
};
pub use rtl::{flip_property, flip_style, flip_value};
