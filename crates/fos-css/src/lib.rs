//! fOS CSS Parser & Style System
//!
//! Stylesheet parsing and cascade resolution for widget styles.
//! Rules are matched against an ancestor path of node identities and the
//! winning declaration is picked by specificity, then declaration order.

mod tokenizer;
mod parser;
mod cascade;
mod rule_index;
pub mod computed;
pub mod properties;
pub mod selectors;
pub mod values;

use std::fmt;

pub use parser::CssParser;
pub use cascade::StyleResolver;
pub use computed::{ComputedStyle, EdgeSizes};
pub use properties::{
    AttributeDescriptor, AttributeId, FontName, Size, StyleValue, FONT_NAME, HEIGHT,
    MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP, WIDTH,
};
pub use selectors::{Combinator, NodeKey, SelectorChain, SelectorLink, SimpleSelector, Specificity};
pub use values::{Dimension, Unit, Value};

use rule_index::RuleIndex;

/// Parse a stylesheet with default options
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet, CssError> {
    CssParser::new().parse(css)
}

/// Parsed stylesheet
#[derive(Debug, Default)]
pub struct Stylesheet {
    rules: Vec<Rule>,
    /// Declarations skipped while parsing
    diagnostics: Vec<CssError>,
    index: RuleIndex,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_rules(rules: Vec<Rule>, diagnostics: Vec<CssError>) -> Self {
        let index = RuleIndex::build(&rules);
        Self { rules, diagnostics, index }
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Declarations skipped while parsing, in source order
    pub fn diagnostics(&self) -> &[CssError] {
        &self.diagnostics
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve `attribute` for the leaf of `path` against this sheet alone
    pub fn resolve<T: StyleValue>(&self, attribute: &AttributeDescriptor<T>, path: &[NodeKey]) -> T {
        cascade::resolve_in(std::slice::from_ref(self), true, attribute, path)
    }

    /// Indices of rules that could match the leaf of `path`
    pub(crate) fn candidates(&self, path: &[NodeKey]) -> Vec<usize> {
        match path.last() {
            Some(leaf) => self.index.candidates(leaf),
            None => Vec::new(),
        }
    }
}

/// Style rule: selector alternatives sharing one declaration block
#[derive(Debug, Clone)]
pub struct Rule {
    pub selectors: Vec<SelectorChain>,
    pub declarations: Vec<Declaration>,
    /// Position of this rule in its stylesheet
    pub order: usize,
}

impl Rule {
    /// Declared value for `attribute`, if this rule sets it
    pub fn declaration(&self, attribute: AttributeId) -> Option<&Value> {
        self.declarations
            .iter()
            .find(|decl| decl.attribute == attribute)
            .map(|decl| &decl.value)
    }

    /// Highest specificity among the chains matching `path`
    pub fn matching_specificity(&self, path: &[NodeKey]) -> Option<Specificity> {
        self.selectors
            .iter()
            .filter(|chain| chain.matches(path))
            .map(SelectorChain::specificity)
            .max()
    }
}

/// Declaration (attribute: value)
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub attribute: AttributeId,
    pub value: Value,
}

/// Location in stylesheet source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourcePosition {
    /// Byte offset
    pub offset: usize,
    /// 1-based line
    pub line: u32,
    /// 1-based column, in characters
    pub column: u32,
}

impl SourcePosition {
    /// Compute line and column for a byte offset into `source`
    pub fn locate(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let mut line = 1;
        let mut column = 1;
        for (i, c) in source.char_indices() {
            if i >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { offset, line, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// CSS parsing error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CssError {
    /// Malformed stylesheet; aborts the parse
    #[error("Syntax error at {position}: {message}")]
    Syntax { position: SourcePosition, message: String },

    /// Declaration names an attribute outside the catalog; the declaration is skipped
    #[error("Unknown attribute `{name}` at {position}")]
    UnknownAttribute { name: String, position: SourcePosition },

    /// Declaration value outside its attribute's domain; the declaration is skipped
    #[error("Invalid value for {attribute} at {position}: `{value}`")]
    ValueDomain {
        attribute: AttributeId,
        value: String,
        position: SourcePosition,
    },
}

impl CssError {
    pub fn position(&self) -> SourcePosition {
        match self {
            Self::Syntax { position, .. }
            | Self::UnknownAttribute { position, .. }
            | Self::ValueDomain { position, .. } => *position,
        }
    }

    /// Whether the error aborted the parse
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }
}
