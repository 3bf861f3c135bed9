//! Declaration and keyframe text generation.

use crate::style::StyleObject;

/// Converts a camelCase property name to its hyphenated CSS form.
///
/// Capitalized vendor prefixes (`WebkitTransform`, `MozAppearance`) gain a
/// leading dash naturally; the lowercase `ms` prefix is special-cased.
/// Custom properties (`--brand-color`) are returned unchanged.
///
/// # Example
///
/// ```rust
/// use tincture::hyphenate_property;
///
/// assert_eq!(hyphenate_property("backgroundColor"), "background-color");
/// assert_eq!(hyphenate_property("msTransform"), "-ms-transform");
/// assert_eq!(hyphenate_property("WebkitLineClamp"), "-webkit-line-clamp");
/// ```
pub fn hyphenate_property(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }

    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}

/// Compiles the scalar entries of a style object into declaration text.
///
/// Nested blocks are skipped; they compile separately. Declarations are
/// joined with `;` and carry no trailing semicolon.
///
/// # Example
///
/// ```rust
/// use tincture::{cssify_object, StyleObject};
///
/// let style = StyleObject::new().with("color", "red").with("fontSize", 12);
/// assert_eq!(cssify_object(&style), "color:red;font-size:12");
/// ```
pub fn cssify_object(style: &StyleObject) -> String {
    let mut css = String::new();

    for (property, value) in style.iter() {
        let Some(value) = value.as_scalar() else {
            continue;
        };
        if !css.is_empty() {
            css.push(';');
        }
        css.push_str(&hyphenate_property(property));
        css.push(':');
        css.push_str(&value);
    }

    css
}

/// Compiles a keyframes object into the body of an `@keyframes` rule.
///
/// Each key is a frame selector (`0%`, `from`, ...) whose block compiles via
/// [`cssify_object`]. Scalar entries at the frame level are ignored.
///
/// # Example
///
/// ```rust
/// use tincture::{compile_keyframe_rule, StyleObject};
///
/// let frames = StyleObject::new()
///     .with("0%", StyleObject::new().with("opacity", 0))
///     .with("100%", StyleObject::new().with("opacity", 1));
/// assert_eq!(compile_keyframe_rule(&frames), "0%{opacity:0}100%{opacity:1}");
/// ```
pub fn compile_keyframe_rule(frames: &StyleObject) -> String {
    let mut css = String::new();

    for (percentage, value) in frames.iter() {
        if let Some(frame) = value.as_block() {
            css.push_str(percentage);
            css.push('{');
            css.push_str(&cssify_object(frame));
            css.push('}');
        }
    }

    css
}

/// Wraps compiled frames in a named `@keyframes` rule.
pub fn compile_keyframes_css(name: &str, frames: &StyleObject) -> String {
    format!("@keyframes {}{{{}}}", name, compile_keyframe_rule(frames))
}
