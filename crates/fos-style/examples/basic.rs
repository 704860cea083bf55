//! Example: Basic usage of fOS Style

use fos_style::{Config, FlagSet, FontName, NodeKey, StateSwitch, StyleEngine, FONT_NAME};

const STYLESHEET: &str = r#"
    a { font: link; margin-left: 2px }
    nav > a { font: heading }
    div.toolbar a#home { margin-left: 0; width: 48px }
"#;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = match std::env::var("FOS_STYLE_CONFIG") {
        Ok(json) => Config::from_json(&json)?,
        Err(_) => Config::default(),
    };
    let mut engine = StyleEngine::new(config);
    let rules = engine.load_stylesheet(STYLESHEET)?;
    println!("fOS Style v{} loaded {} rules", fos_style::VERSION, rules);

    let path = [
        NodeKey::new("div").with_class("toolbar"),
        NodeKey::new("a").with_id("home"),
    ];
    let style = engine.compute(&path);
    println!("{} -> {}", NodeKey::new("a").with_id("home"), serde_json::to_string(&style)?);

    // Gate the font on interaction state
    let font = StateSwitch::new(engine.resolve(&FONT_NAME, &path))
        .case(engine.compile("pressed + !disabled", false)?, FontName::Heading)
        .case(engine.compile("hover | focus", false)?, FontName::Monospace);

    let mut flags = FlagSet::new();
    for name in ["hover", "pressed", "disabled"] {
        flags.set(engine.flag(name), true);
        println!("+{name}: font = {}", font.select(&flags));
    }

    Ok(())
}
