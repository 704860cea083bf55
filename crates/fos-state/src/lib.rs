//! fOS State Expressions
//!
//! Small boolean formulas over named runtime flags, used to gate style
//! values on interaction state (`hover + !disabled`, `a ^ b ^ c`).
//!
//! Flag names are interned into [`FlagId`] handles by a [`FlagRegistry`];
//! parsed [`Expression`] trees store only handles and are evaluated against
//! any [`FlagLookup`], typically a caller-owned [`FlagSet`].

pub mod interner;
mod flags;
mod expr;
mod parser;
mod eval;
mod switch;

pub use interner::{FlagId, FlagRegistry, SharedFlagRegistry};
pub use flags::FlagSet;
pub use expr::{Expression, ExpressionDisplay};
pub use parser::{ExpressionParser, DEFAULT_MAX_DEPTH};
pub use eval::{evaluate, FlagLookup};
pub use switch::StateSwitch;

/// Parse an expression with the default nesting limit
pub fn parse_expression(
    text: &str,
    negate_all: bool,
    registry: &mut FlagRegistry,
) -> Result<Expression, StateError> {
    ExpressionParser::new().parse(text, negate_all, registry)
}

/// State expression error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Malformed expression text
    #[error("Syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },
}

impl StateError {
    /// Byte offset into the expression text
    pub fn offset(&self) -> usize {
        match self {
            Self::Syntax { offset, .. } => *offset,
        }
    }
}
