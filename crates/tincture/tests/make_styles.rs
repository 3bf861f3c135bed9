//! End-to-end tests for definitions, resolution, compilation and insertion.

use tincture::{
    make_styles, resolve_definitions, resolve_style_rules, Renderer, StyleDefinitions, StyleObject,
    StyleOptions, StyleRule, StyleSheetRenderer, TokenSet,
};

#[derive(Default)]
struct Button {
    primary: bool,
    disabled: Option<bool>,
}

fn button_styles() -> StyleDefinitions<Button, TokenSet> {
    StyleDefinitions::named("button")
        .base(
            StyleObject::new()
                .with("display", "inline-flex")
                .with("paddingLeft", "8px")
                .with("color", "black")
                .with(":hover", StyleObject::new().with("color", "gray")),
        )
        .when(
            |b: &Button| b.primary,
            StyleRule::computed(|t: &TokenSet| {
                t.apply(
                    &StyleObject::new()
                        .with("color", "$colorBrand")
                        .with(":hover", StyleObject::new().with("color", "$colorBrandHover")),
                )
            }),
        )
        .rule(
            |b: &Button| b.disabled,
            StyleObject::new().with("opacity", 0.5).with("cursor", "not-allowed"),
        )
}

fn tokens() -> TokenSet {
    TokenSet::new()
        .with("colorBrand", "#0f6cbd")
        .with("colorBrandHover", "#115ea3")
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn no_opinion_matcher_always_applies() {
    let definitions = button_styles();
    let resolved = resolve_definitions(&definitions, &Button::default(), &tokens());
    assert_eq!(resolved.matched, vec![0, 2]);

    let resolved = resolve_definitions(
        &definitions,
        &Button {
            disabled: Some(false),
            ..Button::default()
        },
        &tokens(),
    );
    assert_eq!(resolved.matched, vec![0]);
}

#[test]
fn later_rules_override_nested_blocks() {
    let definitions = button_styles();
    let resolved = resolve_definitions(
        &definitions,
        &Button {
            primary: true,
            disabled: Some(false),
        },
        &tokens(),
    );

    let hover = resolved.style.get(":hover").and_then(|v| v.as_block()).unwrap();
    assert_eq!(
        hover.get("color").and_then(|v| v.as_scalar()).as_deref(),
        Some("#115ea3")
    );
    assert_eq!(
        resolved.style.keys().collect::<Vec<_>>(),
        vec!["display", "paddingLeft", "color", ":hover"]
    );
}

// ============================================================================
// Compilation
// ============================================================================

#[test]
fn atomic_rules_per_declaration() {
    let style = StyleObject::new()
        .with("color", "red")
        .with(":hover", StyleObject::new().with("color", "blue"))
        .with(
            "@media (min-width: 640px)",
            StyleObject::new().with("color", "green"),
        );
    let matched = resolve_style_rules(&style, "f");
    assert_eq!(matched.len(), 3);

    let css: Vec<_> = matched.iter().map(|(_, rule)| rule.css.clone()).collect();
    assert!(css[0].ends_with("{color:red}"));
    assert!(css[1].ends_with(":hover{color:blue}"));
    assert!(css[2].starts_with("@media (min-width: 640px){."));
}

#[test]
fn equal_declarations_share_classes() {
    let a = resolve_style_rules(&StyleObject::new().with("color", "red"), "f");
    let b = resolve_style_rules(
        &StyleObject::new().with("margin", 0).with("color", "red"),
        "f",
    );
    let class_a = &a.iter().next().unwrap().1.class_name;
    let class_b = &b.iter().nth(1).unwrap().1.class_name;
    assert_eq!(class_a, class_b);
}

#[test]
fn keyframes_compile_with_animation_name() {
    let style = StyleObject::new().with(
        "animationName",
        StyleObject::new()
            .with("from", StyleObject::new().with("opacity", 0))
            .with("to", StyleObject::new().with("opacity", 1)),
    );
    let matched = resolve_style_rules(&style, "f");
    assert_eq!(matched.len(), 1);

    let (_, rule) = matched.iter().next().unwrap();
    assert!(rule.css.starts_with("@keyframes fk"));
    assert!(rule.css.contains("from{opacity:0}to{opacity:1}"));
    assert!(rule.css.contains("animation-name:fk"));
    assert!(rule.rtl_css.is_none());
}

// ============================================================================
// Hook
// ============================================================================

#[test]
fn hook_inserts_once_and_memoizes() {
    let styles = make_styles(button_styles());
    let renderer = StyleSheetRenderer::with_id("doc");
    let tokens = tokens();
    let options = StyleOptions::new(&renderer, &tokens);

    let first = styles.class_name(&Button::default(), &options);
    let inserted = renderer.len();
    let second = styles.class_name(&Button::default(), &options);

    assert_eq!(first, second);
    assert_eq!(renderer.len(), inserted);
    assert_eq!(styles.cached_len(), 1);
}

#[test]
fn hook_rtl_mirrors_padding() {
    let styles = make_styles(button_styles());
    let renderer = StyleSheetRenderer::with_id("doc");
    let tokens = tokens();
    let options = StyleOptions::new(&renderer, &tokens).with_rtl(true);

    let classes = styles.class_name(&Button::default(), &options);
    let css = renderer.css_text();
    assert!(css.contains("padding-right:8px"));
    assert!(!css.contains("padding-left:8px"));
    assert!(classes.split(' ').any(|c| c.ends_with('r')));
}

#[test]
fn hook_output_is_valid_class_list() {
    let styles = make_styles(button_styles());
    let renderer = StyleSheetRenderer::with_id("doc");
    let tokens = tokens();
    let options = StyleOptions::new(&renderer, &tokens);

    let classes = styles.class_name(
        &Button {
            primary: true,
            disabled: Some(true),
        },
        &options,
    );
    for class in classes.split(' ') {
        assert!(class.starts_with('f'));
        assert!(class.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(renderer.is_inserted(class));
    }
}

#[test]
fn caller_classes_override_by_slot() {
    let styles = make_styles(button_styles());
    let renderer = StyleSheetRenderer::with_id("doc");
    let tokens = tokens();
    let options = StyleOptions::new(&renderer, &tokens);

    let override_matched = resolve_style_rules(&StyleObject::new().with("color", "purple"), "f");
    let purple = renderer.insert_definitions(&override_matched, false);

    let own = styles.class_name(&Button::default(), &options);
    let merged = styles.class_name_with(&Button::default(), &options, &purple);

    assert_eq!(merged.split(' ').count(), own.split(' ').count());
    assert!(merged.split(' ').any(|c| c == purple));
}

#[test]
fn class_prefix_comes_from_renderer() {
    let styles = make_styles(button_styles());
    let config = tincture::RendererConfig::from_yaml("class_prefix: tc").unwrap();
    let renderer = StyleSheetRenderer::from_config(&config);
    let tokens = tokens();

    let classes = styles.class_name(&Button::default(), &StyleOptions::new(&renderer, &tokens));
    assert!(classes.split(' ').all(|c| c.starts_with("tc")));
}
