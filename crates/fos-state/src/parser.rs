//! Expression Parser
//!
//! Recursive-descent parser for the state expression grammar:
//!
//! ```text
//! Expr := Term (Op Term)*      one Op kind per unparenthesized run
//! Op   := '+' | '|' | '^'
//! Term := '!'? Identifier | '(' Expr ')'
//! ```
//!
//! Identifiers are interned through the caller's [`FlagRegistry`] only once
//! the whole expression parses, in order of first appearance.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::{Expression, FlagId, FlagRegistry, StateError};

/// Default limit on parenthesis nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// State expression parser
#[derive(Debug, Clone)]
pub struct ExpressionParser {
    max_depth: usize,
}

impl ExpressionParser {
    pub fn new() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }

    /// Reject expressions nesting parentheses deeper than `max_depth`
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse `text`; with `negate_all` the whole tree is wrapped in `Not`
    pub fn parse(
        &self,
        text: &str,
        negate_all: bool,
        registry: &mut FlagRegistry,
    ) -> Result<Expression, StateError> {
        let tokens = Lexer::new(text).tokenize()?;
        let mut parser = Parser {
            tokens,
            cursor: 0,
            max_depth: self.max_depth,
            names: Vec::new(),
        };

        if parser.peek() == &Tok::Eof {
            return Err(parser.error("Empty expression"));
        }
        let expr = parser.parse_expr(0)?;
        match parser.peek() {
            Tok::Eof => {}
            Tok::RParen => return Err(parser.error("Unmatched ')'")),
            _ => return Err(parser.error("Expected operator")),
        }

        // Leaves hold indices into `names` until here
        let ids: Vec<FlagId> = parser.names.iter().map(|name| registry.intern(name)).collect();
        let expr = bind(expr, &ids);

        tracing::trace!("Parsed state expression `{}`", text);
        Ok(if negate_all { Expression::Not(Box::new(expr)) } else { expr })
    }
}

impl Default for ExpressionParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    And,
    Or,
    Xor,
}

impl Op {
    fn symbol(self) -> char {
        match self {
            Self::And => '+',
            Self::Or => '|',
            Self::Xor => '^',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok<'src> {
    Ident(&'src str),
    Op(Op),
    Bang,
    LParen,
    RParen,
    Eof,
}

/// Token with its byte offset
type Spanned<'src> = (Tok<'src>, usize);

struct Lexer<'src> {
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self { source, chars: source.char_indices().peekable() }
    }

    fn tokenize(mut self) -> Result<Vec<Spanned<'src>>, StateError> {
        let mut tokens = Vec::new();
        while let Some((start, c)) = self.chars.next() {
            let tok = match c {
                c if c.is_whitespace() => continue,
                '+' => Tok::Op(Op::And),
                '|' => Tok::Op(Op::Or),
                '^' => Tok::Op(Op::Xor),
                '!' => Tok::Bang,
                '(' => Tok::LParen,
                ')' => Tok::RParen,
                c if is_ident_char(c) => {
                    let mut end = start + c.len_utf8();
                    while let Some(&(idx, next)) = self.chars.peek() {
                        if !is_ident_char(next) {
                            break;
                        }
                        end = idx + next.len_utf8();
                        self.chars.next();
                    }
                    Tok::Ident(&self.source[start..end])
                }
                other => {
                    return Err(StateError::Syntax {
                        offset: start,
                        message: format!("Unexpected character '{other}'"),
                    });
                }
            };
            tokens.push((tok, start));
        }
        tokens.push((Tok::Eof, self.source.len()));
        Ok(tokens)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Swap provisional leaf handles for registry ones
fn bind(expr: Expression, ids: &[FlagId]) -> Expression {
    let bind_all = |children: Vec<Expression>| -> Vec<Expression> {
        children.into_iter().map(|child| bind(child, ids)).collect()
    };
    match expr {
        Expression::Leaf { flag, negated } => Expression::Leaf { flag: ids[flag.index()], negated },
        Expression::And(children) => Expression::And(bind_all(children)),
        Expression::Or(children) => Expression::Or(bind_all(children)),
        Expression::Xor(children) => Expression::Xor(bind_all(children)),
        Expression::Not(inner) => Expression::Not(Box::new(bind(*inner, ids))),
    }
}

struct Parser<'src> {
    tokens: Vec<Spanned<'src>>,
    cursor: usize,
    max_depth: usize,
    /// Distinct flag names in first-appearance order
    names: Vec<&'src str>,
}

impl<'src> Parser<'src> {
    fn peek(&self) -> &Tok<'src> {
        // The token list always ends with Eof and the cursor never passes it
        &self.tokens[self.cursor.min(self.tokens.len() - 1)].0
    }

    fn offset(&self) -> usize {
        self.tokens[self.cursor.min(self.tokens.len() - 1)].1
    }

    fn advance(&mut self) {
        if self.cursor < self.tokens.len() - 1 {
            self.cursor += 1;
        }
    }

    /// Provisional handle: the name's index in `names`
    fn local_flag(&mut self, name: &'src str) -> FlagId {
        let idx = match self.names.iter().position(|known| *known == name) {
            Some(idx) => idx,
            None => {
                self.names.push(name);
                self.names.len() - 1
            }
        };
        FlagId(idx as u32)
    }

    fn error(&self, message: impl Into<String>) -> StateError {
        StateError::Syntax { offset: self.offset(), message: message.into() }
    }

    /// Term (Op Term)*, all with the same Op
    fn parse_expr(&mut self, depth: usize) -> Result<Expression, StateError> {
        let mut terms = vec![self.parse_term(depth)?];
        let mut run_op: Option<Op> = None;

        while let Tok::Op(op) = *self.peek() {
            if let Some(prev) = run_op.filter(|prev| *prev != op) {
                return Err(self.error(format!(
                    "Cannot mix '{}' and '{}' without parentheses",
                    prev.symbol(),
                    op.symbol()
                )));
            }
            run_op = Some(op);
            self.advance();
            if !matches!(self.peek(), Tok::Ident(_) | Tok::Bang | Tok::LParen) {
                return Err(self.error(format!("Expected identifier after '{}'", op.symbol())));
            }
            terms.push(self.parse_term(depth)?);
        }

        Ok(match run_op {
            None => terms.swap_remove(0),
            Some(Op::And) => Expression::And(terms),
            Some(Op::Or) => Expression::Or(terms),
            Some(Op::Xor) => Expression::Xor(terms),
        })
    }

    /// '!'? Identifier | '(' Expr ')'
    fn parse_term(&mut self, depth: usize) -> Result<Expression, StateError> {
        match *self.peek() {
            Tok::Ident(name) => {
                self.advance();
                Ok(Expression::Leaf { flag: self.local_flag(name), negated: false })
            }
            Tok::Bang => {
                self.advance();
                match *self.peek() {
                    Tok::Ident(name) => {
                        self.advance();
                        Ok(Expression::Leaf { flag: self.local_flag(name), negated: true })
                    }
                    Tok::LParen => Err(self.error("'!' applies only to a flag name")),
                    _ => Err(self.error("Expected identifier after '!'")),
                }
            }
            Tok::LParen => {
                let open = self.offset();
                if depth >= self.max_depth {
                    return Err(self.error(format!(
                        "Expression nested deeper than {} levels",
                        self.max_depth
                    )));
                }
                self.advance();
                let inner = self.parse_expr(depth + 1)?;
                if *self.peek() != Tok::RParen {
                    return Err(StateError::Syntax {
                        offset: open,
                        message: "Unmatched '('".into(),
                    });
                }
                self.advance();
                Ok(inner)
            }
            Tok::RParen => Err(self.error("Unexpected ')'")),
            _ => Err(self.error("Expected identifier")),
        }
    }
}
