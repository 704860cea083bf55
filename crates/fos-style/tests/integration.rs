//! Integration tests for fos-style
//!
//! Stylesheets and state expressions driven through one engine.

use fos_style::{
    ComputedStyle, Config, Dimension, FlagSet, FontName, NodeKey, Size, StateSwitch, StyleEngine,
    StyleError, FONT_NAME, MARGIN_LEFT, WIDTH,
};

const THEME: &str = r#"
    /* Base theme */
    * { margin-left: 0 }
    a { font: link }
    h1, h2 { font: heading; margin-bottom: 12px }
    pre, code { font: monospace }
    div.panel { width: 50%; margin-left: 8px }
    div.panel > h1 { margin-left: 4px }
    #sidebar div.panel { width: 200px }
"#;

const OVERRIDES: &str = r#"
    a { font: default }
    div.panel { width: auto; color: red }
"#;

fn panel_path() -> Vec<NodeKey> {
    vec![
        NodeKey::new("body"),
        NodeKey::new("section").with_id("sidebar"),
        NodeKey::new("div").with_class("panel"),
    ]
}

// ============================================================================
// STYLESHEETS
// ============================================================================

#[test]
fn test_theme_resolution() {
    let mut engine = StyleEngine::default();
    engine.load_stylesheet(THEME).unwrap();

    let heading = [NodeKey::new("div").with_class("panel"), NodeKey::new("h1")];
    assert_eq!(engine.resolve(&FONT_NAME, &heading), FontName::Heading);
    assert_eq!(engine.resolve(&MARGIN_LEFT, &heading), Dimension::px(4.0));

    // Not an immediate child
    let nested = [
        NodeKey::new("div").with_class("panel"),
        NodeKey::new("header"),
        NodeKey::new("h1"),
    ];
    assert_eq!(engine.resolve(&MARGIN_LEFT, &nested), Dimension::ZERO);

    assert_eq!(engine.resolve(&WIDTH, &panel_path()), Size::Length(Dimension::px(200.0)));
}

#[test]
fn test_later_stylesheet_overrides_ties_only() {
    let mut engine = StyleEngine::default();
    engine.load_stylesheet(THEME).unwrap();
    engine.load_stylesheet(OVERRIDES).unwrap();

    assert_eq!(engine.resolve(&FONT_NAME, &[NodeKey::new("a")]), FontName::Default);

    // `#sidebar div.panel` still outranks the override's `div.panel`
    assert_eq!(engine.resolve(&WIDTH, &panel_path()), Size::Length(Dimension::px(200.0)));
    let elsewhere = [NodeKey::new("div").with_class("panel")];
    assert_eq!(engine.resolve(&WIDTH, &elsewhere), Size::Auto);

    assert_eq!(engine.diagnostics().count(), 1);
}

#[test]
fn test_computed_style_serializes() {
    let mut engine = StyleEngine::default();
    engine.load_stylesheet(THEME).unwrap();

    let style = engine.compute(&[NodeKey::new("h2")]);
    assert_eq!(style.font, FontName::Heading);
    assert_eq!(style.margin.bottom, Dimension::px(12.0));

    let json = serde_json::to_value(&style).unwrap();
    assert_eq!(json["font"], "heading");
    assert_eq!(json["width"], "auto");

    let back: ComputedStyle = serde_json::from_value(json).unwrap();
    assert_eq!(back, style);
}

#[test]
fn test_full_scan_config_agrees() {
    let mut indexed = StyleEngine::default();
    let mut scanned = StyleEngine::new(Config::from_json(r#"{ "index_rules": false }"#).unwrap());
    for engine in [&mut indexed, &mut scanned] {
        engine.load_stylesheet(THEME).unwrap();
        engine.load_stylesheet(OVERRIDES).unwrap();
    }

    let paths = [
        panel_path(),
        vec![NodeKey::new("a")],
        vec![NodeKey::new("div").with_class("panel"), NodeKey::new("h1")],
        vec![NodeKey::new("code")],
        vec![NodeKey::new("span").with_id("sidebar")],
    ];
    for path in &paths {
        assert_eq!(indexed.compute(path), scanned.compute(path), "{path:?}");
    }
}

#[test]
fn test_stylesheet_errors_surface() {
    let mut engine = StyleEngine::default();
    let err = engine.load_stylesheet("a { font: link").unwrap_err();
    assert!(matches!(err, StyleError::Css(_)));
    assert!(err.to_string().starts_with("Stylesheet error: Syntax error at 1:3"));
}

// ============================================================================
// STATE EXPRESSIONS
// ============================================================================

#[test]
fn test_state_gated_font() {
    let mut engine = StyleEngine::default();
    engine.load_stylesheet(THEME).unwrap();

    let base = engine.resolve(&FONT_NAME, &[NodeKey::new("a")]);
    let switch = StateSwitch::new(base)
        .case(engine.compile("pressed + !disabled", false).unwrap(), FontName::Heading)
        .case(engine.compile("focus ^ hover", false).unwrap(), FontName::Monospace);

    let pressed = engine.flag("pressed");
    let hover = engine.flag("hover");
    let focus = engine.flag("focus");
    let disabled = engine.flag("disabled");

    let mut flags = FlagSet::new();
    assert_eq!(*switch.select(&flags), FontName::Link);

    flags.set(hover, true);
    assert_eq!(*switch.select(&flags), FontName::Monospace);

    flags.set(focus, true);
    assert_eq!(*switch.select(&flags), FontName::Link);

    flags.set(pressed, true);
    assert_eq!(*switch.select(&flags), FontName::Heading);

    flags.set(disabled, true);
    assert_eq!(*switch.select(&flags), FontName::Link);
}

#[test]
fn test_negated_compile() {
    let mut engine = StyleEngine::default();
    let shown = engine.compile("open | pinned", false).unwrap();
    let hidden = engine.compile("open | pinned", true).unwrap();
    let open = engine.flag("open");

    for flags in [FlagSet::new(), [open].into_iter().collect()] {
        assert_eq!(engine.evaluate(&hidden, &flags), !engine.evaluate(&shown, &flags));
    }
}

#[test]
fn test_expression_errors_surface() {
    let mut engine = StyleEngine::default();
    let err = engine.compile("a + b | c", false).unwrap_err();
    assert!(matches!(err, StyleError::State(_)));
    assert_eq!(
        err.to_string(),
        "State expression error: Syntax error at offset 6: Cannot mix '+' and '|' without parentheses"
    );
}
