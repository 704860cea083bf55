//! Computed Styles
//!
//! Every catalog attribute resolved for one node in a single pass.

use serde::{Deserialize, Serialize};

use crate::properties::{
    FONT_NAME, HEIGHT, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP, WIDTH,
};
use crate::{Dimension, FontName, NodeKey, Size, StyleResolver};

/// Computed style for a node
///
/// Attributes no rule declares hold their catalog default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub font: FontName,
    pub margin: EdgeSizes,
    pub width: Size,
    pub height: Size,
}

/// Margin edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSizes {
    pub top: Dimension,
    pub right: Dimension,
    pub bottom: Dimension,
    pub left: Dimension,
}

impl Default for EdgeSizes {
    fn default() -> Self {
        Self {
            top: Dimension::ZERO,
            right: Dimension::ZERO,
            bottom: Dimension::ZERO,
            left: Dimension::ZERO,
        }
    }
}

impl ComputedStyle {
    /// Resolve every attribute for the leaf of `path`
    pub fn compute(resolver: &StyleResolver, path: &[NodeKey]) -> Self {
        Self {
            font: resolver.resolve(&FONT_NAME, path),
            margin: EdgeSizes {
                top: resolver.resolve(&MARGIN_TOP, path),
                right: resolver.resolve(&MARGIN_RIGHT, path),
                bottom: resolver.resolve(&MARGIN_BOTTOM, path),
                left: resolver.resolve(&MARGIN_LEFT, path),
            },
            width: resolver.resolve(&WIDTH, path),
            height: resolver.resolve(&HEIGHT, path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_stylesheet;

    #[test]
    fn test_compute_defaults() {
        let resolver = StyleResolver::new();
        let style = ComputedStyle::compute(&resolver, &[NodeKey::new("div")]);
        assert_eq!(style, ComputedStyle::default());
    }

    #[test]
    fn test_compute_mixed() {
        let mut resolver = StyleResolver::new();
        resolver.add_stylesheet(
            parse_stylesheet(
                "img { margin-top: 2px; height: 40%; width: auto } \
                 div img { margin-left: 0; font: heading }",
            )
            .unwrap(),
        );

        let style = ComputedStyle::compute(&resolver, &[NodeKey::new("div"), NodeKey::new("img")]);
        assert_eq!(style.font, FontName::Heading);
        assert_eq!(style.margin.top, Dimension::px(2.0));
        assert_eq!(style.margin.left, Dimension::ZERO);
        assert_eq!(style.height, Size::Length(Dimension::percent(40.0)));
        assert_eq!(style.width, Size::Auto);
    }
}
