//! Property Values
//!
//! Untyped values as they appear in declarations. Typed attribute values
//! are produced from these by the attribute catalog in `properties`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Units recognized on numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Px,
    Percent,
}

impl Unit {
    /// Parse a unit suffix (`px` or `%`)
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "px" => Some(Self::Px),
            "%" => Some(Self::Percent),
            _ => None,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
        }
    }
}

/// A number tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub value: f32,
    pub unit: Unit,
}

impl Dimension {
    pub const ZERO: Dimension = Dimension { value: 0.0, unit: Unit::Px };

    pub const fn px(value: f32) -> Self {
        Self { value, unit: Unit::Px }
    }

    pub const fn percent(value: f32) -> Self {
        Self { value, unit: Unit::Percent }
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

/// Declared property value
///
/// `Zero` is the unitless `0` and compares equal to `0px`.
#[derive(Debug, Clone)]
pub enum Value {
    /// Number with a `px` or `%` unit
    Dimension(Dimension),
    /// Bare identifier other than `auto`
    Keyword(Box<str>),
    /// `auto`
    Auto,
    /// Unitless `0`
    Zero,
}

impl Value {
    pub fn px(value: f32) -> Self {
        Self::Dimension(Dimension::px(value))
    }

    pub fn percent(value: f32) -> Self {
        Self::Dimension(Dimension::percent(value))
    }

    pub fn keyword(name: &str) -> Self {
        Self::Keyword(name.into())
    }

    /// Length view of this value, with `Zero` widened to `0px`
    pub fn as_dimension(&self) -> Option<Dimension> {
        match self {
            Self::Dimension(dim) => Some(*dim),
            Self::Zero => Some(Dimension::ZERO),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(name) => Some(name),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Keyword(a), Self::Keyword(b)) => a == b,
            (Self::Auto, Self::Auto) => true,
            (Self::Auto, _) | (_, Self::Auto) => false,
            (Self::Keyword(_), _) | (_, Self::Keyword(_)) => false,
            // Zero and 0px are the same length
            _ => self.as_dimension() == other.as_dimension(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimension(dim) => dim.fmt(f),
            Self::Keyword(name) => f.write_str(name),
            Self::Auto => f.write_str("auto"),
            Self::Zero => f.write_str("0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_equals_zero_px() {
        assert_eq!(Value::Zero, Value::px(0.0));
        assert_eq!(Value::px(0.0), Value::Zero);
        assert_ne!(Value::Zero, Value::percent(1.0));
        assert_ne!(Value::Zero, Value::Auto);
    }

    #[test]
    fn test_keyword_equality_is_case_sensitive() {
        assert_eq!(Value::keyword("link"), Value::keyword("link"));
        assert_ne!(Value::keyword("link"), Value::keyword("Link"));
    }

    #[test]
    fn test_unit_suffix() {
        assert_eq!(Unit::from_suffix("px"), Some(Unit::Px));
        assert_eq!(Unit::from_suffix("%"), Some(Unit::Percent));
        assert_eq!(Unit::from_suffix("em"), None);
        assert_eq!(Value::percent(50.0).to_string(), "50%");
        assert_eq!(Value::px(6.0).to_string(), "6px");
    }
}
