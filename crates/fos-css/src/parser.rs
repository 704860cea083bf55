//! Stylesheet Parser
//!
//! Recursive-descent parser turning stylesheet text into rules.
//! Syntax errors abort the parse; declarations naming an unknown attribute
//! or carrying a value outside the attribute's domain are skipped and
//! recorded as diagnostics.

use crate::tokenizer::{Span, Token, TokenKind, Tokenizer};
use crate::{
    AttributeId, Combinator, CssError, Declaration, Rule, SelectorChain, SimpleSelector,
    SourcePosition, Stylesheet, Unit, Value,
};

/// Stylesheet parser
#[derive(Debug, Clone)]
pub struct CssParser {
    record_diagnostics: bool,
}

impl CssParser {
    pub fn new() -> Self {
        Self { record_diagnostics: true }
    }

    /// Keep (default) or drop the diagnostics for skipped declarations
    pub fn with_diagnostics(mut self, record: bool) -> Self {
        self.record_diagnostics = record;
        self
    }

    /// Parse a stylesheet
    pub fn parse(&self, css: &str) -> Result<Stylesheet, CssError> {
        let tokens = Tokenizer::new(css).tokenize()?;
        let mut parser = RuleParser {
            source: css,
            tokens,
            cursor: 0,
            rules: Vec::new(),
            diagnostics: Vec::new(),
        };
        parser.parse_stylesheet()?;

        tracing::debug!(
            "Parsed {} rules ({} declarations skipped)",
            parser.rules.len(),
            parser.diagnostics.len()
        );

        if !self.record_diagnostics {
            parser.diagnostics.clear();
        }
        Ok(Stylesheet::from_rules(parser.rules, parser.diagnostics))
    }
}

impl Default for CssParser {
    fn default() -> Self {
        Self::new()
    }
}

struct RuleParser<'src> {
    source: &'src str,
    tokens: Vec<Token<'src>>,
    cursor: usize,
    rules: Vec<Rule>,
    diagnostics: Vec<CssError>,
}

impl<'src> RuleParser<'src> {
    fn current(&self) -> &Token<'src> {
        // The tokenizer always ends the stream with Eof and we never step past it
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &TokenKind<'src> {
        &self.current().kind
    }

    fn advance(&mut self) {
        if self.cursor < self.tokens.len() - 1 {
            self.cursor += 1;
        }
    }

    /// Skip whitespace; returns whether any was skipped
    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while *self.peek() == TokenKind::Whitespace {
            self.advance();
            skipped = true;
        }
        skipped
    }

    fn position(&self, offset: usize) -> SourcePosition {
        SourcePosition::locate(self.source, offset)
    }

    fn error(&self, message: impl Into<String>) -> CssError {
        CssError::Syntax {
            position: self.position(self.current().span.start),
            message: message.into(),
        }
    }

    fn parse_stylesheet(&mut self) -> Result<(), CssError> {
        loop {
            self.skip_whitespace();
            if *self.peek() == TokenKind::Eof {
                return Ok(());
            }
            self.parse_rule()?;
        }
    }

    /// selector-list '{' declaration* '}'
    fn parse_rule(&mut self) -> Result<(), CssError> {
        let selectors = self.parse_selector_list()?;

        if *self.peek() != TokenKind::LBrace {
            return Err(self.error("Expected '{' after selector"));
        }
        let block_start = self.current().span.start;
        self.advance();

        let declarations = self.parse_declarations(block_start)?;
        let order = self.rules.len();
        self.rules.push(Rule { selectors, declarations, order });
        Ok(())
    }

    fn parse_selector_list(&mut self) -> Result<Vec<SelectorChain>, CssError> {
        let mut chains = vec![self.parse_chain()?];
        loop {
            self.skip_whitespace();
            if *self.peek() != TokenKind::Comma {
                return Ok(chains);
            }
            self.advance();
            self.skip_whitespace();
            chains.push(self.parse_chain()?);
        }
    }

    /// Simple selectors joined by whitespace or '>'
    fn parse_chain(&mut self) -> Result<SelectorChain, CssError> {
        let mut chain = SelectorChain::single(self.parse_simple_selector()?);
        loop {
            let had_whitespace = self.skip_whitespace();
            match self.peek() {
                TokenKind::Greater => {
                    self.advance();
                    self.skip_whitespace();
                    chain.push(Combinator::Child, self.parse_simple_selector()?);
                }
                _ if had_whitespace && self.starts_simple_selector() => {
                    chain.push(Combinator::Descendant, self.parse_simple_selector()?);
                }
                _ => return Ok(chain),
            }
        }
    }

    fn starts_simple_selector(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::Ident(_) | TokenKind::Star | TokenKind::Dot | TokenKind::Hash(_)
        )
    }

    /// (element | '*')? ('.' class | '#' id)*
    fn parse_simple_selector(&mut self) -> Result<SimpleSelector, CssError> {
        if !self.starts_simple_selector() {
            return Err(self.error("Expected selector"));
        }

        let mut selector = SimpleSelector::any();
        match *self.peek() {
            TokenKind::Ident(name) => {
                selector.element = Some(name.to_string());
                self.advance();
            }
            TokenKind::Star => self.advance(),
            _ => {}
        }

        loop {
            match *self.peek() {
                TokenKind::Dot => {
                    self.advance();
                    let TokenKind::Ident(class) = *self.peek() else {
                        return Err(self.error("Expected class name after '.'"));
                    };
                    selector.class = Some(class.to_string());
                    self.advance();
                }
                TokenKind::Hash(id) => {
                    selector.id = Some(id.to_string());
                    self.advance();
                }
                _ => return Ok(selector),
            }
        }
    }

    /// Declarations up to and including the closing '}'
    fn parse_declarations(&mut self, block_start: usize) -> Result<Vec<Declaration>, CssError> {
        let mut declarations: Vec<Declaration> = Vec::new();
        loop {
            self.skip_whitespace();
            match *self.peek() {
                TokenKind::RBrace => {
                    self.advance();
                    return Ok(declarations);
                }
                TokenKind::Eof => {
                    return Err(CssError::Syntax {
                        position: self.position(block_start),
                        message: "Unterminated block".into(),
                    });
                }
                TokenKind::Semicolon => self.advance(),
                TokenKind::Ident(name) => {
                    if let Some(decl) = self.parse_declaration(name)? {
                        // Later declarations of the same attribute replace earlier ones
                        declarations.retain(|d| d.attribute != decl.attribute);
                        declarations.push(decl);
                    }
                }
                _ => return Err(self.error("Expected attribute name")),
            }
        }
    }

    /// identifier ':' value-tokens ';'?
    ///
    /// Returns `None` when the declaration was skipped.
    fn parse_declaration(&mut self, name: &'src str) -> Result<Option<Declaration>, CssError> {
        let name_start = self.current().span.start;
        self.advance();
        self.skip_whitespace();

        if *self.peek() != TokenKind::Colon {
            return Err(self.error(format!("Expected ':' after `{name}`")));
        }
        self.advance();

        // Any token short of the block structure belongs to the value; the
        // attribute's domain decides whether the declaration is kept
        let mut values: Vec<Token<'src>> = Vec::new();
        loop {
            match self.peek() {
                TokenKind::Whitespace => self.advance(),
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                TokenKind::RBrace | TokenKind::Eof => break,
                TokenKind::LBrace => return Err(self.error("Unexpected token in value")),
                _ => {
                    values.push(self.current().clone());
                    self.advance();
                }
            }
        }

        let position = self.position(name_start);
        let Some(attribute) = AttributeId::from_name(name) else {
            tracing::warn!("Skipping unknown attribute `{}` at {}", name, position);
            self.diagnostics.push(CssError::UnknownAttribute { name: name.to_string(), position });
            return Ok(None);
        };

        let value = match values.as_slice() {
            [token] => token_value(&token.kind).filter(|value| attribute.accepts(value)),
            _ => None,
        };

        match value {
            Some(value) => Ok(Some(Declaration { attribute, value })),
            None => {
                let text = self.value_text(&values);
                tracing::warn!("Skipping invalid value `{}` for {} at {}", text, attribute, position);
                self.diagnostics.push(CssError::ValueDomain { attribute, value: text, position });
                Ok(None)
            }
        }
    }

    fn value_text(&self, values: &[Token<'src>]) -> String {
        match (values.first(), values.last()) {
            (Some(first), Some(last)) => {
                let span = Span { start: first.span.start, end: last.span.end };
                self.source[span.start..span.end].to_string()
            }
            _ => String::new(),
        }
    }
}

/// Convert one value token; `None` for units or numbers no attribute accepts
fn token_value(kind: &TokenKind<'_>) -> Option<Value> {
    match *kind {
        TokenKind::Ident("auto") => Some(Value::Auto),
        TokenKind::Ident(name) => Some(Value::keyword(name)),
        TokenKind::Number { value, unit: "" } => (value == 0.0).then_some(Value::Zero),
        TokenKind::Number { value, unit } => {
            let unit = Unit::from_suffix(unit)?;
            Some(Value::Dimension(crate::Dimension { value, unit }))
        }
        _ => None,
    }
}
