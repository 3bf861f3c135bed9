//! Right-to-left mirroring of style objects.
//!
//! Property names containing a `Left`/`Right` word swap sides, and values of
//! direction-sensitive properties are rewritten. Values are tokenized with
//! `cssparser` so functions like `calc(...)` and `var(...)` stay intact.
//!
//! | Property | Transformation |
//! |----------|----------------|
//! | `marginLeft`, `borderTopLeftRadius`, `left`, ... | name swaps side |
//! | `float`, `clear`, `textAlign` | `left` ↔ `right` |
//! | `direction` | `ltr` ↔ `rtl` |
//! | `margin`, `padding`, `inset`, `borderWidth`, `borderColor`, `borderStyle` | 2nd ↔ 4th value |
//! | `borderRadius` | corners mirror |
//! | `boxShadow`, `textShadow` | x offset negated |
//! | `backgroundPosition`, `objectPosition`, `transformOrigin` | `left` ↔ `right` keywords |
//! | `cursor` | `e-resize` ↔ `w-resize`, ... |

use std::borrow::Cow;
use std::collections::HashMap;

use cssparser::{ParseError, Parser, ParserInput, Token};
use once_cell::sync::Lazy;

use crate::style::{StyleObject, StyleValue};

static CURSOR_SWAPS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let pairs = [
        ("e-resize", "w-resize"),
        ("ne-resize", "nw-resize"),
        ("se-resize", "sw-resize"),
        ("nesw-resize", "nwse-resize"),
    ];
    let mut map = HashMap::new();
    for (a, b) in pairs {
        map.insert(a, b);
        map.insert(b, a);
    }
    map
});

const FOUR_VALUE_PROPERTIES: &[&str] = &[
    "margin",
    "padding",
    "inset",
    "borderWidth",
    "borderColor",
    "borderStyle",
];

const POSITION_PROPERTIES: &[&str] = &["backgroundPosition", "objectPosition", "transformOrigin"];

/// Mirrors a style object for right-to-left layout.
///
/// Nested blocks (pseudo selectors, media queries, keyframe frames) are
/// mirrored recursively. Frame selectors and selector keys themselves are
/// never renamed.
///
/// # Example
///
/// ```rust
/// use tincture::{flip_style, cssify_object, StyleObject};
///
/// let style = StyleObject::new()
///     .with("marginLeft", "4px")
///     .with("textAlign", "left");
/// assert_eq!(cssify_object(&flip_style(&style)), "margin-right:4px;text-align:right");
/// ```
pub fn flip_style(style: &StyleObject) -> StyleObject {
    style
        .iter()
        .map(|(key, value)| match value {
            StyleValue::Block(block) => (key.to_string(), StyleValue::Block(flip_style(block))),
            StyleValue::Str(text) => (
                flip_property(key).into_owned(),
                StyleValue::Str(flip_value(key, text).into_owned()),
            ),
            StyleValue::Number(_) => (flip_property(key).into_owned(), value.clone()),
        })
        .collect()
}

/// Swaps `Left`/`Right` words in a camelCase or hyphenated property name.
pub fn flip_property(property: &str) -> Cow<'_, str> {
    if property.starts_with("--") || !contains_side(property) {
        return Cow::Borrowed(property);
    }

    let mut out = String::with_capacity(property.len() + 1);
    for word in split_words(property) {
        out.push_str(match word {
            "left" => "right",
            "right" => "left",
            "Left" => "Right",
            "Right" => "Left",
            other => other,
        });
    }
    Cow::Owned(out)
}

/// Rewrites the value of a direction-sensitive property.
///
/// Values of other properties are returned unchanged.
pub fn flip_value<'a>(property: &str, value: &'a str) -> Cow<'a, str> {
    match property {
        "float" | "clear" | "textAlign" => swap_keyword(value, "left", "right"),
        "direction" => swap_keyword(value, "ltr", "rtl"),
        "cursor" => match CURSOR_SWAPS.get(value.trim()) {
            Some(swapped) => Cow::Owned((*swapped).to_string()),
            None => Cow::Borrowed(value),
        },
        "borderRadius" => flip_border_radius(value),
        "boxShadow" | "textShadow" => flip_shadow(value),
        p if FOUR_VALUE_PROPERTIES.contains(&p) => flip_four_values(value),
        p if POSITION_PROPERTIES.contains(&p) => flip_position(value),
        _ => Cow::Borrowed(value),
    }
}

fn contains_side(property: &str) -> bool {
    property.contains("Left")
        || property.contains("Right")
        || property.contains("left")
        || property.contains("right")
}

/// Splits at camelCase humps and around dashes, keeping dashes as words.
fn split_words(property: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    for (i, c) in property.char_indices() {
        if c == '-' {
            if start < i {
                words.push(&property[start..i]);
            }
            words.push(&property[i..i + 1]);
            start = i + 1;
        } else if c.is_ascii_uppercase() && start < i {
            words.push(&property[start..i]);
            start = i;
        }
    }
    if start < property.len() {
        words.push(&property[start..]);
    }
    words
}

fn swap_keyword<'a>(value: &'a str, a: &str, b: &str) -> Cow<'a, str> {
    let trimmed = value.trim();
    if trimmed == a {
        Cow::Owned(b.to_string())
    } else if trimmed == b {
        Cow::Owned(a.to_string())
    } else {
        Cow::Borrowed(value)
    }
}

/// Splits a value into whitespace-separated components.
///
/// Function calls and bracketed blocks stay whole; each comma is its own
/// component.
fn split_components(value: &str) -> Vec<String> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut parts = Vec::new();

    loop {
        parser.skip_whitespace();
        let start = parser.position();
        let opens_block = match parser.next() {
            Ok(token) => matches!(
                token,
                Token::Function(_)
                    | Token::ParenthesisBlock
                    | Token::SquareBracketBlock
                    | Token::CurlyBracketBlock
            ),
            Err(_) => break,
        };
        if opens_block {
            let _ = parser.parse_nested_block(|nested| {
                while nested.next().is_ok() {}
                Ok::<(), ParseError<'_, ()>>(())
            });
        }
        parts.push(parser.slice_from(start).trim().to_string());
    }

    parts
}

/// Splits components into comma-separated groups.
fn split_groups(value: &str) -> Vec<Vec<String>> {
    let mut groups = vec![Vec::new()];
    for part in split_components(value) {
        if part == "," {
            groups.push(Vec::new());
        } else if let Some(group) = groups.last_mut() {
            group.push(part);
        }
    }
    groups
}

fn join_groups(groups: &[Vec<String>]) -> String {
    groups
        .iter()
        .map(|group| group.join(" "))
        .collect::<Vec<_>>()
        .join(", ")
}

fn flip_four_values(value: &str) -> Cow<'_, str> {
    let parts = split_components(value);
    if parts.len() != 4 || parts.iter().any(|p| p == ",") || parts[1] == parts[3] {
        return Cow::Borrowed(value);
    }
    Cow::Owned(format!("{} {} {} {}", parts[0], parts[3], parts[2], parts[1]))
}

fn flip_border_radius(value: &str) -> Cow<'_, str> {
    let parts = split_components(value);
    if parts.iter().any(|p| p == "/" || p == ",") {
        return Cow::Borrowed(value);
    }
    let flipped = match parts.as_slice() {
        [a, b] if a != b => vec![b, a],
        [a, b, c] if a != b => vec![b, a, b, c],
        [a, b, c, d] if a != b || c != d => vec![b, a, d, c],
        _ => return Cow::Borrowed(value),
    };
    Cow::Owned(
        flipped
            .into_iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn is_length(component: &str) -> bool {
    component
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
}

fn negate(component: &str) -> String {
    if let Some(rest) = component.strip_prefix('-') {
        rest.to_string()
    } else if let Some(rest) = component.strip_prefix('+') {
        format!("-{}", rest)
    } else if component.trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
        .chars()
        .all(|c| c == '0' || c == '.')
    {
        component.to_string()
    } else {
        format!("-{}", component)
    }
}

fn flip_shadow(value: &str) -> Cow<'_, str> {
    let mut groups = split_groups(value);
    let mut changed = false;
    for group in &mut groups {
        if let Some(offset) = group.iter_mut().find(|c| is_length(c)) {
            let negated = negate(offset);
            if negated != *offset {
                *offset = negated;
                changed = true;
            }
        }
    }
    if changed {
        Cow::Owned(join_groups(&groups))
    } else {
        Cow::Borrowed(value)
    }
}

fn flip_position(value: &str) -> Cow<'_, str> {
    let mut groups = split_groups(value);
    let mut changed = false;
    for part in groups.iter_mut().flatten() {
        let swapped = match part.as_str() {
            "left" => "right",
            "right" => "left",
            _ => continue,
        };
        *part = swapped.to_string();
        changed = true;
    }
    if changed {
        Cow::Owned(join_groups(&groups))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_property_names() {
        assert_eq!(flip_property("marginLeft"), "marginRight");
        assert_eq!(flip_property("paddingRight"), "paddingLeft");
        assert_eq!(flip_property("left"), "right");
        assert_eq!(flip_property("borderTopLeftRadius"), "borderTopRightRadius");
        assert_eq!(flip_property("border-left-color"), "border-right-color");
    }

    #[test]
    fn test_flip_property_leaves_others() {
        assert_eq!(flip_property("color"), "color");
        assert_eq!(flip_property("marginInlineStart"), "marginInlineStart");
        assert_eq!(flip_property("--leftGutter"), "--leftGutter");
        // "Leftover" is not the word "Left".
        assert_eq!(flip_property("scrollLeftover"), "scrollLeftover");
    }

    #[test]
    fn test_flip_keywords() {
        assert_eq!(flip_value("float", "left"), "right");
        assert_eq!(flip_value("textAlign", "right"), "left");
        assert_eq!(flip_value("textAlign", "center"), "center");
        assert_eq!(flip_value("direction", "ltr"), "rtl");
        assert_eq!(flip_value("cursor", "ne-resize"), "nw-resize");
    }

    #[test]
    fn test_flip_four_values() {
        assert_eq!(flip_value("margin", "1px 2px 3px 4px"), "1px 4px 3px 2px");
        assert_eq!(flip_value("padding", "1px 2px"), "1px 2px");
        assert_eq!(
            flip_value("padding", "0 calc(1px + 2px) 0 var(--gap)"),
            "0 var(--gap) 0 calc(1px + 2px)"
        );
    }

    #[test]
    fn test_flip_four_values_symmetric_is_borrowed() {
        assert!(matches!(
            flip_value("margin", "1px 2px 3px 2px"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_flip_border_radius() {
        assert_eq!(flip_value("borderRadius", "1px 2px 3px 4px"), "2px 1px 4px 3px");
        assert_eq!(flip_value("borderRadius", "1px 2px"), "2px 1px");
        assert_eq!(flip_value("borderRadius", "1px 2px 3px"), "2px 1px 2px 3px");
        assert_eq!(flip_value("borderRadius", "4px"), "4px");
        assert_eq!(flip_value("borderRadius", "1px 2px / 3px"), "1px 2px / 3px");
    }

    #[test]
    fn test_flip_shadow() {
        assert_eq!(flip_value("boxShadow", "2px 4px 8px #000"), "-2px 4px 8px #000");
        assert_eq!(
            flip_value("boxShadow", "inset -1px 0 red, 3px 3px blue"),
            "inset 1px 0 red, -3px 3px blue"
        );
        assert_eq!(flip_value("textShadow", "0 1px black"), "0 1px black");
    }

    #[test]
    fn test_flip_position() {
        assert_eq!(flip_value("backgroundPosition", "left top"), "right top");
        assert_eq!(flip_value("transformOrigin", "center"), "center");
    }

    #[test]
    fn test_flip_style_recurses() {
        let style = StyleObject::new()
            .with("left", 0)
            .with(":hover", StyleObject::new().with("paddingLeft", "2px"));
        let flipped = flip_style(&style);
        assert!(flipped.get("right").is_some());
        let hover = flipped.get(":hover").and_then(|v| v.as_block()).unwrap();
        assert!(hover.get("paddingRight").is_some());
    }
}
