//! Rule resolution: evaluate matchers and merge matching styles.

use crate::definition::StyleDefinitions;
use crate::style::StyleObject;

/// The outcome of resolving a definition list against one context.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    /// Matching rules merged in declaration order.
    pub style: StyleObject,
    /// Indices of the rules that contributed, in declaration order.
    pub matched: Vec<usize>,
}

impl ResolvedStyle {
    /// Memoization key: serialized merged style plus the matched rule indices.
    ///
    /// Equal keys always compile to equal class names.
    pub fn cache_key(&self) -> String {
        let indices = self
            .matched
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!("{}#{}", indices, self.style.to_json())
    }
}

/// Resolves `definitions` for a selectors context and token set.
///
/// Rules are visited in order. Each matching rule's style (computed from
/// `tokens` where needed) is merged onto the result, so later rules win on
/// conflicting properties.
///
/// # Example
///
/// ```rust
/// use tincture::{resolve_definitions, StyleDefinitions, StyleObject};
///
/// let definitions = StyleDefinitions::<bool, ()>::new()
///     .base(StyleObject::new().with("color", "black").with("margin", 0))
///     .when(|active| *active, StyleObject::new().with("color", "blue"));
///
/// let resolved = resolve_definitions(&definitions, &true, &());
/// assert_eq!(resolved.matched, vec![0, 1]);
/// assert_eq!(resolved.style, StyleObject::new().with("color", "blue").with("margin", 0));
///
/// let resolved = resolve_definitions(&definitions, &false, &());
/// assert_eq!(resolved.matched, vec![0]);
/// ```
pub fn resolve_definitions<S, T>(
    definitions: &StyleDefinitions<S, T>,
    selectors: &S,
    tokens: &T,
) -> ResolvedStyle {
    let mut style = StyleObject::new();
    let mut matched = Vec::new();

    for (index, definition) in definitions.iter().enumerate() {
        if !definition.matches(selectors) {
            continue;
        }
        style.merge(&definition.rule().evaluate(tokens));
        matched.push(index);
    }

    ResolvedStyle { style, matched }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::StyleRule;

    #[derive(Default)]
    struct Sel {
        primary: bool,
        large: bool,
    }

    struct Tokens {
        brand: &'static str,
    }

    fn definitions() -> StyleDefinitions<Sel, Tokens> {
        StyleDefinitions::new()
            .base(StyleObject::new().with("color", "black").with("fontSize", 12))
            .when(
                |s: &Sel| s.primary,
                StyleRule::computed(|t: &Tokens| StyleObject::new().with("color", t.brand)),
            )
            .when(|s: &Sel| s.large, StyleObject::new().with("fontSize", 16))
    }

    #[test]
    fn test_base_only() {
        let resolved = resolve_definitions(&definitions(), &Sel::default(), &Tokens { brand: "blue" });
        assert_eq!(resolved.matched, vec![0]);
        assert_eq!(
            resolved.style,
            StyleObject::new().with("color", "black").with("fontSize", 12)
        );
    }

    #[test]
    fn test_later_rule_wins() {
        let sel = Sel {
            primary: true,
            large: true,
        };
        let resolved = resolve_definitions(&definitions(), &sel, &Tokens { brand: "blue" });
        assert_eq!(resolved.matched, vec![0, 1, 2]);
        assert_eq!(
            resolved.style,
            StyleObject::new().with("color", "blue").with("fontSize", 16)
        );
    }

    #[test]
    fn test_tokens_feed_computed_rules() {
        let sel = Sel {
            primary: true,
            large: false,
        };
        let resolved = resolve_definitions(&definitions(), &sel, &Tokens { brand: "purple" });
        assert_eq!(
            resolved.style.get("color").and_then(|v| v.as_scalar()).as_deref(),
            Some("purple")
        );
    }

    #[test]
    fn test_undefined_matcher_contributes() {
        let defs = StyleDefinitions::<Sel, ()>::new()
            .rule(|_| None, StyleObject::new().with("display", "flex"));
        for sel in [
            Sel::default(),
            Sel {
                primary: true,
                large: true,
            },
        ] {
            let resolved = resolve_definitions(&defs, &sel, &());
            assert_eq!(resolved.matched, vec![0]);
        }
    }

    #[test]
    fn test_nothing_matches() {
        let defs = StyleDefinitions::<Sel, ()>::new()
            .when(|s| s.primary, StyleObject::new().with("color", "red"));
        let resolved = resolve_definitions(&defs, &Sel::default(), &());
        assert!(resolved.matched.is_empty());
        assert!(resolved.style.is_empty());
    }

    #[test]
    fn test_cache_key_tracks_matched_state() {
        let defs = StyleDefinitions::<Sel, ()>::new()
            .base(StyleObject::new().with("color", "red"))
            .when(|s| s.primary, StyleObject::new().with("color", "red"));
        let a = resolve_definitions(&defs, &Sel::default(), &());
        let b = resolve_definitions(
            &defs,
            &Sel {
                primary: true,
                large: false,
            },
            &(),
        );
        assert_eq!(a.style, b.style);
        assert_ne!(a.cache_key(), b.cache_key());
    }
}
