//! Attribute Catalog
//!
//! The closed set of style attributes understood by the stylesheet parser,
//! together with their typed values, value domains and defaults.
//! Uses enums for fixed values to save memory vs strings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::values::{Dimension, Value};

/// Attribute identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum AttributeId {
    Font,
    MarginLeft,
    MarginRight,
    MarginTop,
    MarginBottom,
    Width,
    Height,
}

impl AttributeId {
    /// Every attribute in declaration order of the catalog
    pub const ALL: [AttributeId; 7] = [
        Self::Font,
        Self::MarginLeft,
        Self::MarginRight,
        Self::MarginTop,
        Self::MarginBottom,
        Self::Width,
        Self::Height,
    ];

    /// Look up an attribute by its stylesheet name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "font" => Self::Font,
            "margin-left" => Self::MarginLeft,
            "margin-right" => Self::MarginRight,
            "margin-top" => Self::MarginTop,
            "margin-bottom" => Self::MarginBottom,
            "width" => Self::Width,
            "height" => Self::Height,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Font => "font",
            Self::MarginLeft => "margin-left",
            Self::MarginRight => "margin-right",
            Self::MarginTop => "margin-top",
            Self::MarginBottom => "margin-bottom",
            Self::Width => "width",
            Self::Height => "height",
        }
    }

    /// Domain validator: does `value` belong to this attribute's value type?
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Font => FontName::from_value(value).is_some(),
            Self::MarginLeft | Self::MarginRight | Self::MarginTop | Self::MarginBottom => {
                Dimension::from_value(value).is_some()
            }
            Self::Width | Self::Height => Size::from_value(value).is_some(),
        }
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed attribute value that can be read back out of a declared [`Value`]
pub trait StyleValue: Sized + Clone + fmt::Debug {
    /// Convert a declared value, or `None` if it lies outside the domain
    fn from_value(value: &Value) -> Option<Self>;
}

impl StyleValue for Dimension {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_dimension()
    }
}

/// Named font roles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontName {
    #[default]
    Default,
    Link,
    Heading,
    Monospace,
}

impl FontName {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "default" => Self::Default,
            "link" => Self::Link,
            "heading" => Self::Heading,
            "monospace" => Self::Monospace,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Link => "link",
            Self::Heading => "heading",
            Self::Monospace => "monospace",
        }
    }
}

impl StyleValue for FontName {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_keyword().and_then(Self::from_keyword)
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length that may also be `auto`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    #[default]
    Auto,
    Length(Dimension),
}

impl StyleValue for Size {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Auto => Some(Self::Auto),
            other => other.as_dimension().map(Self::Length),
        }
    }
}

/// Describes one attribute of the catalog: its id, value type and default
#[derive(Debug, Clone, Copy)]
pub struct AttributeDescriptor<T: 'static> {
    id: AttributeId,
    default: T,
}

impl<T: StyleValue> AttributeDescriptor<T> {
    pub const fn new(id: AttributeId, default: T) -> Self {
        Self { id, default }
    }

    pub fn id(&self) -> AttributeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// Value used when no rule declares this attribute for a node
    pub fn default_value(&self) -> T {
        self.default.clone()
    }

    /// Typed view of a declared value
    pub fn typed(&self, value: &Value) -> Option<T> {
        T::from_value(value)
    }
}

pub const FONT_NAME: AttributeDescriptor<FontName> =
    AttributeDescriptor::new(AttributeId::Font, FontName::Default);
pub const MARGIN_LEFT: AttributeDescriptor<Dimension> =
    AttributeDescriptor::new(AttributeId::MarginLeft, Dimension::ZERO);
pub const MARGIN_RIGHT: AttributeDescriptor<Dimension> =
    AttributeDescriptor::new(AttributeId::MarginRight, Dimension::ZERO);
pub const MARGIN_TOP: AttributeDescriptor<Dimension> =
    AttributeDescriptor::new(AttributeId::MarginTop, Dimension::ZERO);
pub const MARGIN_BOTTOM: AttributeDescriptor<Dimension> =
    AttributeDescriptor::new(AttributeId::MarginBottom, Dimension::ZERO);
pub const WIDTH: AttributeDescriptor<Size> =
    AttributeDescriptor::new(AttributeId::Width, Size::Auto);
pub const HEIGHT: AttributeDescriptor<Size> =
    AttributeDescriptor::new(AttributeId::Height, Size::Auto);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names_round_trip() {
        for id in AttributeId::ALL {
            assert_eq!(AttributeId::from_name(id.name()), Some(id));
        }
        assert_eq!(AttributeId::from_name("Margin-Left"), None);
        assert_eq!(AttributeId::from_name("color"), None);
    }

    #[test]
    fn test_font_domain() {
        assert!(AttributeId::Font.accepts(&Value::keyword("link")));
        assert!(!AttributeId::Font.accepts(&Value::keyword("LINK")));
        assert!(!AttributeId::Font.accepts(&Value::px(4.0)));
        assert!(!AttributeId::Font.accepts(&Value::Auto));
    }

    #[test]
    fn test_margin_domain() {
        assert!(AttributeId::MarginLeft.accepts(&Value::px(5.0)));
        assert!(AttributeId::MarginLeft.accepts(&Value::percent(10.0)));
        assert!(AttributeId::MarginLeft.accepts(&Value::Zero));
        assert!(!AttributeId::MarginLeft.accepts(&Value::Auto));
        assert!(!AttributeId::MarginLeft.accepts(&Value::keyword("link")));
    }

    #[test]
    fn test_size_domain() {
        assert_eq!(Size::from_value(&Value::Auto), Some(Size::Auto));
        assert_eq!(
            Size::from_value(&Value::Zero),
            Some(Size::Length(Dimension::ZERO))
        );
        assert!(!AttributeId::Height.accepts(&Value::keyword("tall")));
    }

    #[test]
    fn test_descriptor_defaults() {
        assert_eq!(FONT_NAME.default_value(), FontName::Default);
        assert_eq!(MARGIN_LEFT.default_value(), Dimension::ZERO);
        assert_eq!(HEIGHT.default_value(), Size::Auto);
        assert_eq!(WIDTH.name(), "width");
    }
}
