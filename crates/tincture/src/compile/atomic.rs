//! Atomic rule compilation: one class per declaration.
//!
//! A merged style object is split into [`ResolvedRule`]s, each owning a
//! single declaration under a hashed class name. Identical declarations
//! therefore share a class across every component that uses them.
//!
//! # Nested Blocks
//!
//! | Key | Meaning | Emitted selector |
//! |-----|---------|------------------|
//! | `:hover` | pseudo selector | `.cls:hover` |
//! | `& > span` | nested selector, `&` is the element | `.cls > span` |
//! | `@media (min-width: 600px)` | media query | `@media (min-width: 600px){.cls{..}}` |
//! | `animationName` | keyframe frames | `@keyframes <name>{..}` + `animation-name` |
//!
//! Any other nested block is skipped.

use std::borrow::Cow;

use tracing::debug;

use super::declarations::{compile_keyframe_rule, compile_keyframes_css, hyphenate_property};
use super::rtl::{flip_property, flip_style, flip_value};
use crate::hash::hashed_name;
use crate::style::{StyleObject, StyleValue, ANIMATION_NAME};

/// A compiled atomic rule: class name, CSS text and optional RTL variant.
///
/// When present, `rtl_css` targets [`rtl_class_name`](Self::rtl_class_name)
/// rather than `class_name`, so both variants can live in one stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRule {
    /// Generated class name for the left-to-right rule.
    pub class_name: String,
    /// CSS text for the left-to-right rule.
    pub css: String,
    /// CSS text for the mirrored rule, if mirroring changes anything.
    pub rtl_css: Option<String>,
}

impl ResolvedRule {
    /// Class name used by the RTL variant, if there is one.
    pub fn rtl_class_name(&self) -> Option<String> {
        self.rtl_css
            .as_ref()
            .map(|_| rtl_class_name(&self.class_name))
    }

    /// Returns the class name and CSS to apply for the given direction.
    pub fn for_direction(&self, rtl: bool) -> (Cow<'_, str>, &str) {
        match (&self.rtl_css, rtl) {
            (Some(rtl_css), true) => (Cow::Owned(rtl_class_name(&self.class_name)), rtl_css),
            _ => (Cow::Borrowed(&self.class_name), &self.css),
        }
    }
}

fn rtl_class_name(class_name: &str) -> String {
    format!("{}r", class_name)
}

/// Atomic rules keyed by declaration slot, in declaration order.
///
/// A slot is the combination of media query, selector and property. Inserting
/// a rule for an occupied slot replaces the previous rule in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchedDefinitions {
    entries: Vec<(String, ResolvedRule)>,
}

impl MatchedDefinitions {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rule for a slot; an existing rule for the slot is replaced.
    pub fn insert(&mut self, slot: impl Into<String>, rule: ResolvedRule) {
        let slot = slot.into();
        match self.entries.iter_mut().find(|(s, _)| *s == slot) {
            Some(entry) => entry.1 = rule,
            None => self.entries.push((slot, rule)),
        }
    }

    /// Looks up the rule for a slot.
    pub fn get(&self, slot: &str) -> Option<&ResolvedRule> {
        self.entries.iter().find(|(s, _)| s == slot).map(|(_, r)| r)
    }

    /// Iterates over `(slot, rule)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedRule)> {
        self.entries.iter().map(|(s, r)| (s.as_str(), r))
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
struct RuleContext {
    media: Option<String>,
    /// Selector template where `&` stands for the generated class.
    selector: String,
}

impl RuleContext {
    fn root() -> Self {
        Self {
            media: None,
            selector: "&".to_string(),
        }
    }

    fn nested(&self, key: &str) -> Option<Self> {
        if let Some(query) = key.strip_prefix("@media") {
            let query = query.trim();
            let media = match &self.media {
                Some(outer) => format!("{} and {}", outer, query),
                None => query.to_string(),
            };
            return Some(Self {
                media: Some(media),
                selector: self.selector.clone(),
            });
        }
        if key.starts_with(':') {
            return Some(Self {
                media: self.media.clone(),
                selector: format!("{}{}", self.selector, key),
            });
        }
        if key.contains('&') {
            return Some(Self {
                media: self.media.clone(),
                selector: key.replace('&', &self.selector),
            });
        }
        None
    }

    fn slot(&self, property: &str) -> String {
        format!(
            "{}|{}|{}",
            self.media.as_deref().unwrap_or(""),
            self.selector,
            property
        )
    }

    fn rule(&self, class_name: &str, declaration: &str) -> String {
        let selector = self.selector.replace('&', &format!(".{}", class_name));
        let rule = format!("{}{{{}}}", selector, declaration);
        match &self.media {
            Some(query) => format!("@media {}{{{}}}", query, rule),
            None => rule,
        }
    }
}

/// Compiles a style object into atomic rules.
///
/// `prefix` starts every generated class name; keyframe names use
/// `<prefix>k`. Output is a pure function of the inputs.
///
/// # Example
///
/// ```rust
/// use tincture::{resolve_style_rules, StyleObject};
///
/// let style = StyleObject::new().with("color", "red").with("paddingLeft", "4px");
/// let matched = resolve_style_rules(&style, "f");
///
/// assert_eq!(matched.len(), 2);
/// let (_, color) = matched.iter().next().unwrap();
/// assert_eq!(color.css, format!(".{}{{color:red}}", color.class_name));
/// assert!(color.rtl_css.is_none());
/// ```
pub fn resolve_style_rules(style: &StyleObject, prefix: &str) -> MatchedDefinitions {
    let mut matched = MatchedDefinitions::new();
    compile_block(style, prefix, &RuleContext::root(), &mut matched);
    matched
}

fn compile_block(
    style: &StyleObject,
    prefix: &str,
    ctx: &RuleContext,
    out: &mut MatchedDefinitions,
) {
    for (key, value) in style.iter() {
        match value {
            StyleValue::Block(frames) if key == ANIMATION_NAME => {
                compile_animation(frames, prefix, ctx, out);
            }
            StyleValue::Block(block) => match ctx.nested(key) {
                Some(inner) => compile_block(block, prefix, &inner, out),
                None => debug!(key, "skipping unsupported nested block"),
            },
            StyleValue::Str(_) | StyleValue::Number(_) => {
                compile_declaration(key, value, prefix, ctx, out);
            }
        }
    }
}

fn compile_declaration(
    property: &str,
    value: &StyleValue,
    prefix: &str,
    ctx: &RuleContext,
    out: &mut MatchedDefinitions,
) {
    let Some(text) = value.as_scalar() else {
        return;
    };
    let hyphenated = hyphenate_property(property);
    let declaration = format!("{}:{}", hyphenated, text);

    let rtl_value = match value {
        StyleValue::Str(s) => flip_value(property, s),
        _ => text.clone(),
    };
    let rtl_declaration = format!(
        "{}:{}",
        hyphenate_property(&flip_property(property)),
        rtl_value
    );

    let class_name = hashed_name(prefix, &ctx.slot(&declaration));
    let css = ctx.rule(&class_name, &declaration);
    let rtl_css = (rtl_declaration != declaration)
        .then(|| ctx.rule(&rtl_class_name(&class_name), &rtl_declaration));

    out.insert(
        ctx.slot(&hyphenated),
        ResolvedRule {
            class_name,
            css,
            rtl_css,
        },
    );
}

fn compile_animation(
    frames: &StyleObject,
    prefix: &str,
    ctx: &RuleContext,
    out: &mut MatchedDefinitions,
) {
    let keyframe_prefix = format!("{}k", prefix);
    let body = compile_keyframe_rule(frames);
    let name = hashed_name(&keyframe_prefix, &body);
    let declaration = format!("animation-name:{}", name);

    let class_name = hashed_name(prefix, &ctx.slot(&declaration));
    let css = format!(
        "{}{}",
        compile_keyframes_css(&name, frames),
        ctx.rule(&class_name, &declaration)
    );

    let rtl_frames = flip_style(frames);
    let rtl_body = compile_keyframe_rule(&rtl_frames);
    let rtl_css = (rtl_body != body).then(|| {
        let rtl_name = hashed_name(&keyframe_prefix, &rtl_body);
        format!(
            "{}{}",
            compile_keyframes_css(&rtl_name, &rtl_frames),
            ctx.rule(
                &rtl_class_name(&class_name),
                &format!("animation-name:{}", rtl_name)
            )
        )
    });

    out.insert(
        ctx.slot("animation-name"),
        ResolvedRule {
            class_name,
            css,
            rtl_css,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_rule(matched: &MatchedDefinitions) -> &ResolvedRule {
        assert_eq!(matched.len(), 1);
        matched.iter().next().unwrap().1
    }

    #[test]
    fn test_single_declaration() {
        let matched = resolve_style_rules(&StyleObject::new().with("color", "red"), "f");
        let rule = only_rule(&matched);
        assert!(rule.class_name.starts_with('f'));
        assert_eq!(rule.css, format!(".{}{{color:red}}", rule.class_name));
        assert_eq!(rule.rtl_css, None);
    }

    #[test]
    fn test_same_declaration_same_class() {
        let a = resolve_style_rules(&StyleObject::new().with("color", "red"), "f");
        let b = resolve_style_rules(
            &StyleObject::new().with("margin", 0).with("color", "red"),
            "f",
        );
        assert_eq!(
            only_rule(&a).class_name,
            b.get("|&|color").unwrap().class_name
        );
    }

    #[test]
    fn test_prefix_changes_class() {
        let style = StyleObject::new().with("color", "red");
        let a = resolve_style_rules(&style, "f");
        let b = resolve_style_rules(&style, "x");
        assert!(only_rule(&b).class_name.starts_with('x'));
        assert_ne!(only_rule(&a).class_name, only_rule(&b).class_name);
    }

    #[test]
    fn test_rtl_variant_uses_rtl_class() {
        let matched = resolve_style_rules(&StyleObject::new().with("marginLeft", "4px"), "f");
        let rule = only_rule(&matched);
        let rtl_class = rule.rtl_class_name().unwrap();
        assert_eq!(
            rule.rtl_css.as_deref(),
            Some(format!(".{}{{margin-right:4px}}", rtl_class).as_str())
        );

        let (class, css) = rule.for_direction(true);
        assert_eq!(class, rtl_class);
        assert!(css.contains("margin-right"));

        let (class, css) = rule.for_direction(false);
        assert_eq!(class, rule.class_name);
        assert!(css.contains("margin-left"));
    }

    #[test]
    fn test_pseudo_selector() {
        let style = StyleObject::new().with(":hover", StyleObject::new().with("color", "blue"));
        let matched = resolve_style_rules(&style, "f");
        let rule = only_rule(&matched);
        assert_eq!(rule.css, format!(".{}:hover{{color:blue}}", rule.class_name));
    }

    #[test]
    fn test_pseudo_and_base_are_distinct_slots() {
        let style = StyleObject::new()
            .with("color", "red")
            .with(":hover", StyleObject::new().with("color", "red"));
        let matched = resolve_style_rules(&style, "f");
        assert_eq!(matched.len(), 2);
        let classes: Vec<_> = matched.iter().map(|(_, r)| r.class_name.clone()).collect();
        assert_ne!(classes[0], classes[1]);
    }

    #[test]
    fn test_ampersand_selector() {
        let style = StyleObject::new().with("& > span", StyleObject::new().with("opacity", 0));
        let rule = only_rule(&resolve_style_rules(&style, "f")).clone();
        assert_eq!(rule.css, format!(".{} > span{{opacity:0}}", rule.class_name));
    }

    #[test]
    fn test_media_query() {
        let style = StyleObject::new().with(
            "@media (min-width: 600px)",
            StyleObject::new().with(":focus", StyleObject::new().with("outline", "none")),
        );
        let rule = only_rule(&resolve_style_rules(&style, "f")).clone();
        assert_eq!(
            rule.css,
            format!(
                "@media (min-width: 600px){{.{}:focus{{outline:none}}}}",
                rule.class_name
            )
        );
    }

    #[test]
    fn test_unknown_block_is_skipped() {
        let style = StyleObject::new()
            .with("span", StyleObject::new().with("color", "red"))
            .with("color", "blue");
        let matched = resolve_style_rules(&style, "f");
        assert_eq!(matched.len(), 1);
        assert!(only_rule(&matched).css.contains("color:blue"));
    }

    #[test]
    fn test_keyframes() {
        let frames = StyleObject::new()
            .with("0%", StyleObject::new().with("opacity", 0))
            .with("100%", StyleObject::new().with("opacity", 1));
        let matched = resolve_style_rules(&StyleObject::new().with(ANIMATION_NAME, frames), "f");
        let rule = only_rule(&matched);

        assert!(rule.css.starts_with("@keyframes fk"));
        assert!(rule.css.contains("{0%{opacity:0}100%{opacity:1}}"));
        assert!(rule.css.contains(&format!(".{}{{animation-name:fk", rule.class_name)));
        assert!(rule.rtl_css.is_none());
    }

    #[test]
    fn test_directional_keyframes_get_rtl_variant() {
        let frames = StyleObject::new()
            .with("from", StyleObject::new().with("left", 0))
            .with("to", StyleObject::new().with("left", "100px"));
        let matched = resolve_style_rules(&StyleObject::new().with(ANIMATION_NAME, frames), "f");
        let rule = only_rule(&matched);
        let rtl = rule.rtl_css.as_deref().unwrap();
        assert!(rtl.contains("from{right:0}to{right:100px}"));
        assert!(rtl.contains(&format!(".{}r{{animation-name:", rule.class_name)));
    }

    #[test]
    fn test_matched_insert_replaces_slot() {
        let mut matched = MatchedDefinitions::new();
        let rule = |c: &str| ResolvedRule {
            class_name: c.to_string(),
            css: String::new(),
            rtl_css: None,
        };
        matched.insert("a", rule("one"));
        matched.insert("b", rule("two"));
        matched.insert("a", rule("three"));
        let order: Vec<_> = matched.iter().map(|(_, r)| r.class_name.as_str()).collect();
        assert_eq!(order, vec!["three", "two"]);
    }
}
