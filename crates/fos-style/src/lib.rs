//! fOS Style
//!
//! Declarative styling for fOS widgets: a stylesheet cascade resolved against
//! ancestor paths, plus state expressions that gate values on runtime flags.
//!
//! # Example
//! ```rust,ignore
//! use fos_style::{Config, NodeKey, StyleEngine, FONT_NAME};
//!
//! let mut engine = StyleEngine::new(Config::default());
//! engine.load_stylesheet("a { font: link }")?;
//! let font = engine.resolve(&FONT_NAME, &[NodeKey::new("a")]);
//!
//! let pressed = engine.compile("hover + !disabled", false)?;
//! ```

mod config;
mod engine;

pub use config::Config;
pub use engine::StyleEngine;

// Re-export the building blocks
pub use fos_css::{
    AttributeDescriptor, AttributeId, ComputedStyle, CssError, Dimension, EdgeSizes, FontName,
    NodeKey, Size, StyleValue, Stylesheet, FONT_NAME, HEIGHT, MARGIN_BOTTOM, MARGIN_LEFT,
    MARGIN_RIGHT, MARGIN_TOP, WIDTH,
};
pub use fos_state::{
    Expression, FlagId, FlagLookup, FlagRegistry, FlagSet, StateError, StateSwitch,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Style engine error
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("Stylesheet error: {0}")]
    Css(#[from] CssError),

    #[error("State expression error: {0}")]
    State(#[from] StateError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
