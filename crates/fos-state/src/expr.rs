//! Expression Tree
//!
//! Immutable boolean formula produced by [`ExpressionParser`](crate::ExpressionParser).
//! `And`, `Or` and `Xor` are n-ary over every term of their run.

use std::fmt;

use crate::{FlagId, FlagRegistry};

/// Parsed state expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// Flag value, optionally negated (`!name`)
    Leaf { flag: FlagId, negated: bool },
    /// `a + b + ...`: every child true
    And(Vec<Expression>),
    /// `a | b | ...`: some child true
    Or(Vec<Expression>),
    /// `a ^ b ^ ...`: an odd number of children true
    Xor(Vec<Expression>),
    /// Whole-expression negation requested at parse time
    Not(Box<Expression>),
}

impl Expression {
    /// Distinct flags read by this expression, in first-use order
    pub fn flags(&self) -> Vec<FlagId> {
        let mut flags = Vec::new();
        self.collect_flags(&mut flags);
        flags
    }

    fn collect_flags(&self, out: &mut Vec<FlagId>) {
        match self {
            Self::Leaf { flag, .. } => {
                if !out.contains(flag) {
                    out.push(*flag);
                }
            }
            Self::And(children) | Self::Or(children) | Self::Xor(children) => {
                for child in children {
                    child.collect_flags(out);
                }
            }
            Self::Not(inner) => inner.collect_flags(out),
        }
    }

    /// Whether the expression reads `flag`
    pub fn depends_on(&self, flag: FlagId) -> bool {
        match self {
            Self::Leaf { flag: leaf, .. } => *leaf == flag,
            Self::And(children) | Self::Or(children) | Self::Xor(children) => {
                children.iter().any(|child| child.depends_on(flag))
            }
            Self::Not(inner) => inner.depends_on(flag),
        }
    }

    /// Format with flag names from `registry`
    ///
    /// Expressions without `Not` print in a form that parses back to an
    /// equal tree.
    pub fn display<'a>(&'a self, registry: &'a FlagRegistry) -> ExpressionDisplay<'a> {
        ExpressionDisplay { expr: self, registry }
    }
}

/// Helper returned by [`Expression::display`]
pub struct ExpressionDisplay<'a> {
    expr: &'a Expression,
    registry: &'a FlagRegistry,
}

impl ExpressionDisplay<'_> {
    fn write(&self, f: &mut fmt::Formatter<'_>, expr: &Expression, nested: bool) -> fmt::Result {
        let (children, op) = match expr {
            Expression::Leaf { flag, negated } => {
                if *negated {
                    f.write_str("!")?;
                }
                return match self.registry.name(*flag) {
                    Some(name) => f.write_str(name),
                    None => write!(f, "{flag}"),
                };
            }
            Expression::Not(inner) => {
                f.write_str("!(")?;
                self.write(f, inner, false)?;
                return f.write_str(")");
            }
            Expression::And(children) => (children, " + "),
            Expression::Or(children) => (children, " | "),
            Expression::Xor(children) => (children, " ^ "),
        };

        if nested {
            f.write_str("(")?;
        }
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                f.write_str(op)?;
            }
            self.write(f, child, true)?;
        }
        if nested {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for ExpressionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, self.expr, false)
    }
}
