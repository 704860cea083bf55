//! Comprehensive tests for fos-css
//!
//! Tests stylesheet parsing and cascade resolution end to end.

use fos_css::{
    CssParser, Dimension, FontName, NodeKey, Size, StyleResolver, FONT_NAME, HEIGHT,
    MARGIN_LEFT, MARGIN_RIGHT, WIDTH,
};

fn path(names: &[&str]) -> Vec<NodeKey> {
    names.iter().map(|name| NodeKey::new(*name)).collect()
}

// ============================================================================
// PARSING
// ============================================================================

#[test]
fn test_parse_empty() {
    let stylesheet = CssParser::new().parse("").unwrap();
    assert_eq!(stylesheet.len(), 0);
    assert!(stylesheet.diagnostics().is_empty());
}

#[test]
fn test_parse_single_rule() {
    let stylesheet = CssParser::new().parse(".foo { font: link; }").unwrap();
    assert_eq!(stylesheet.len(), 1);
}

#[test]
fn test_parse_multiple_rules() {
    let css = r#"
        .foo { font: link; }
        .bar { margin-left: 2px }
        #baz { height: auto; }
    "#;
    let stylesheet = CssParser::new().parse(css).unwrap();
    assert_eq!(stylesheet.len(), 3);
    assert_eq!(stylesheet.rules()[2].order, 2);
}

#[test]
fn test_parse_empty_block() {
    let stylesheet = CssParser::new().parse("div {}").unwrap();
    assert_eq!(stylesheet.len(), 1);
    assert!(stylesheet.rules()[0].declarations.is_empty());
}

#[test]
fn test_parse_comments() {
    let css = r#"
        /* This is a comment */
        a {
            font: link; /* inline comment */
        }
        /* Multi-line
           comment */
        div { margin-left: 1px; }
    "#;
    let stylesheet = CssParser::new().parse(css).unwrap();
    assert_eq!(stylesheet.len(), 2);
}

// ============================================================================
// CASCADE PROPERTIES
// ============================================================================

#[test]
fn test_font_link_example() {
    let sheet = CssParser::new().parse("a { font: link }").unwrap();
    assert_eq!(sheet.resolve(&FONT_NAME, &path(&["a"])), FontName::Link);
    assert_eq!(sheet.resolve(&FONT_NAME, &path(&["td"])), FontName::Default);
}

#[test]
fn test_margin_example() {
    let sheet = CssParser::new()
        .parse("div, img { margin-right: 6px; margin-left: 5px; }")
        .unwrap();
    assert_eq!(sheet.resolve(&MARGIN_LEFT, &path(&["p"])), Dimension::px(0.0));
    assert_eq!(sheet.resolve(&MARGIN_LEFT, &path(&["div"])), Dimension::px(5.0));
    assert_eq!(sheet.resolve(&MARGIN_RIGHT, &path(&["img"])), Dimension::px(6.0));
}

#[test]
fn test_child_vs_descendant() {
    let child = CssParser::new().parse("div > a { font: link }").unwrap();
    let descendant = CssParser::new().parse("div a { font: link }").unwrap();
    let nodes = path(&["div", "p", "a"]);

    assert_eq!(child.resolve(&FONT_NAME, &nodes), FontName::Default);
    assert_eq!(descendant.resolve(&FONT_NAME, &nodes), FontName::Link);
}

#[test]
fn test_id_outranks_regardless_of_order() {
    let leaf = [NodeKey::new("p").with_class("note").with_id("intro")];

    for css in [
        "#intro { margin-left: 9px } p.note { margin-left: 1px } p { margin-left: 2px }",
        "p { margin-left: 2px } p.note { margin-left: 1px } #intro { margin-left: 9px }",
        "p.note { margin-left: 1px } #intro { margin-left: 9px } p { margin-left: 2px }",
    ] {
        let sheet = CssParser::new().parse(css).unwrap();
        assert_eq!(sheet.resolve(&MARGIN_LEFT, &leaf), Dimension::px(9.0), "{css}");
    }
}

#[test]
fn test_wildcard_class_equals_element_class() {
    let wildcard = CssParser::new().parse("*.warn { font: heading }").unwrap();
    let explicit = CssParser::new().parse("span.warn { font: heading }").unwrap();

    for leaf in [
        NodeKey::new("span").with_class("warn"),
        NodeKey::new("span"),
        NodeKey::new("span").with_class("other"),
    ] {
        let nodes = [NodeKey::new("div"), leaf];
        assert_eq!(
            wildcard.resolve(&FONT_NAME, &nodes),
            explicit.resolve(&FONT_NAME, &nodes)
        );
    }

    // Any element bearing the class
    let nodes = [NodeKey::new("td").with_class("warn")];
    assert_eq!(wildcard.resolve(&FONT_NAME, &nodes), FontName::Heading);
}

#[test]
fn test_equal_specificity_permutations() {
    // Every ordering of three equal-specificity rules: the last one wins
    let rules = [
        "p { margin-left: 1px }",
        "p { margin-left: 2px }",
        "p { margin-left: 3px }",
    ];
    let orders = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    for order in orders {
        let css: String = order.iter().map(|&i| rules[i]).collect::<Vec<_>>().join("\n");
        let sheet = CssParser::new().parse(&css).unwrap();
        let expected = Dimension::px((order[2] + 1) as f32);
        assert_eq!(sheet.resolve(&MARGIN_LEFT, &path(&["p"])), expected, "{css}");
    }
}

#[test]
fn test_equal_specificity_different_shapes() {
    // p.x (0, 1, 1) outranks div p (0, 0, 2)
    let sheet = CssParser::new()
        .parse("p.x { margin-left: 1px } div p { margin-left: 2px }")
        .unwrap();
    let nodes = [NodeKey::new("div"), NodeKey::new("p").with_class("x")];
    assert_eq!(sheet.resolve(&MARGIN_LEFT, &nodes), Dimension::px(1.0));

    let sheet = CssParser::new()
        .parse("div *.x { margin-left: 1px } p.x { margin-left: 2px }")
        .unwrap();
    // (0, 1, 1) each: later wins
    assert_eq!(sheet.resolve(&MARGIN_LEFT, &nodes), Dimension::px(2.0));
}

#[test]
fn test_indexed_and_full_scan_agree() {
    let css = r#"
        * { height: 10px }
        div { height: 20px; width: 5% }
        *.wide { width: 100% }
        #hero { height: auto }
        section > div { width: 0 }
        body div.wide { height: 50% }
        a, span.wide { width: 7px }
    "#;

    let mut indexed = StyleResolver::new();
    indexed.add_stylesheet(CssParser::new().parse(css).unwrap());
    let mut scanned = StyleResolver::new().with_index(false);
    scanned.add_stylesheet(CssParser::new().parse(css).unwrap());

    let queries = [
        vec![NodeKey::new("div")],
        vec![NodeKey::new("section"), NodeKey::new("div")],
        vec![NodeKey::new("body"), NodeKey::new("div").with_class("wide")],
        vec![NodeKey::new("body"), NodeKey::new("div").with_id("hero")],
        vec![NodeKey::new("span").with_class("wide")],
        vec![NodeKey::new("a")],
        vec![NodeKey::new("p")],
        vec![],
    ];

    for nodes in &queries {
        assert_eq!(indexed.resolve(&WIDTH, nodes), scanned.resolve(&WIDTH, nodes), "{nodes:?}");
        assert_eq!(indexed.resolve(&HEIGHT, nodes), scanned.resolve(&HEIGHT, nodes), "{nodes:?}");
    }

    let nodes = [NodeKey::new("section"), NodeKey::new("div").with_class("wide")];
    assert_eq!(indexed.resolve(&WIDTH, &nodes), Size::Length(Dimension::percent(100.0)));
}

#[test]
fn test_resolver_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StyleResolver>();

    let mut resolver = StyleResolver::new();
    resolver.add_stylesheet(CssParser::new().parse("a { font: link }").unwrap());

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(resolver.resolve(&FONT_NAME, &path(&["a"])), FontName::Link);
            });
        }
    });
}
