//! Stylesheet Tokenizer
//!
//! Splits stylesheet source into tokens. Whitespace is kept as a token
//! because it separates descendant selectors; comments count as whitespace.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::{CssError, SourcePosition};

/// Source span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Token with kind and span
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind<'src> {
    Ident(&'src str),
    /// Number with its raw unit suffix (empty when unitless)
    Number { value: f32, unit: &'src str },
    /// `#name`
    Hash(&'src str),
    Dot,
    Star,
    Greater,
    Comma,
    Colon,
    Semicolon,
    LBrace,
    RBrace,
    Whitespace,
    Eof,
}

/// Stylesheet lexer
pub struct Tokenizer<'src> {
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    /// Tokenize the whole source; the last token is always `Eof`
    pub fn tokenize(mut self) -> Result<Vec<Token<'src>>, CssError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn pos(&mut self) -> usize {
        self.chars.peek().map_or(self.source.len(), |&(i, _)| i)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peek at the character after next
    fn peek_next(&mut self) -> Option<char> {
        let pos = self.pos();
        let mut rest = self.source[pos..].chars();
        rest.next();
        rest.next()
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> CssError {
        CssError::Syntax {
            position: SourcePosition::locate(self.source, offset),
            message: message.into(),
        }
    }

    fn next_token(&mut self) -> Result<Token<'src>, CssError> {
        let start = self.pos();

        let Some(c) = self.peek() else {
            return Ok(Token { kind: TokenKind::Eof, span: Span { start, end: start } });
        };

        let kind = match c {
            c if c.is_whitespace() => {
                self.skip_whitespace_and_comments()?;
                TokenKind::Whitespace
            }
            '/' if self.peek_next() == Some('*') => {
                self.skip_whitespace_and_comments()?;
                TokenKind::Whitespace
            }
            '0'..='9' => self.scan_number(start)?,
            '.' if self.peek_next().is_some_and(|n| n.is_ascii_digit()) => self.scan_number(start)?,
            '-' if self.peek_next().is_some_and(|n| n.is_ascii_digit() || n == '.') => {
                self.scan_number(start)?
            }
            '-' if self.peek_next().is_some_and(is_ident_start) => {
                self.advance();
                self.scan_ident_rest();
                let end = self.pos();
                TokenKind::Ident(&self.source[start..end])
            }
            c if is_ident_start(c) => {
                self.scan_ident_rest();
                let end = self.pos();
                TokenKind::Ident(&self.source[start..end])
            }
            '#' => {
                self.advance();
                let name_start = self.pos();
                self.scan_ident_rest();
                let name_end = self.pos();
                let name = &self.source[name_start..name_end];
                if name.is_empty() {
                    return Err(self.error(start, "Expected name after '#'"));
                }
                TokenKind::Hash(name)
            }
            _ => {
                self.advance();
                match c {
                    '.' => TokenKind::Dot,
                    '*' => TokenKind::Star,
                    '>' => TokenKind::Greater,
                    ',' => TokenKind::Comma,
                    ':' => TokenKind::Colon,
                    ';' => TokenKind::Semicolon,
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    other => return Err(self.error(start, format!("Unexpected character '{other}'"))),
                }
            }
        };

        let end = self.pos();
        Ok(Token { kind, span: Span { start, end } })
    }

    /// Skip a run of whitespace and `/* */` comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), CssError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('*') => {
                    let start = self.pos();
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                break;
                            }
                            Some(_) => {}
                            None => return Err(self.error(start, "Unterminated comment")),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn scan_ident_rest(&mut self) {
        while self.peek().is_some_and(is_ident_char) {
            self.advance();
        }
    }

    fn scan_number(&mut self, start: usize) -> Result<TokenKind<'src>, CssError> {
        if self.peek() == Some('-') {
            self.advance();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let number_end = self.pos();
        let value: f32 = self.source[start..number_end]
            .parse()
            .map_err(|_| self.error(start, "Malformed number"))?;

        let unit = match self.peek() {
            Some('%') => {
                self.advance();
                &self.source[number_end..number_end + 1]
            }
            Some(c) if is_ident_start(c) => {
                self.scan_ident_rest();
                let unit_end = self.pos();
                &self.source[number_end..unit_end]
            }
            _ => "",
        };

        Ok(TokenKind::Number { value, unit })
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}
