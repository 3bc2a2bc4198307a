//! Shared grammar for schedule text: a comma-separated list of parenthesized tuples whose items
//! are numbers, identifiers or nested tuples. Typed front-ends (dilation events, weight
//! keyframes) interpret the tuples.

use std::fmt;

use crate::foundation::error::MaskError;
use crate::schedule::lexer::{Span, Token, TokenKind, lex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    pub(crate) offset: usize,
    pub(crate) message: String,
}

impl SyntaxError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schedule error at byte {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for SyntaxError {}

impl From<SyntaxError> for MaskError {
    fn from(e: SyntaxError) -> Self {
        MaskError::parse(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Number { value: f64, integral: bool },
    Ident(String),
    Tuple(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Node {
    pub(crate) value: Value,
    pub(crate) span: Span,
}

impl Node {
    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self.value {
            Value::Number { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Integer literal (no fraction, no exponent).
    pub(crate) fn as_u64(&self) -> Option<u64> {
        match self.value {
            Value::Number {
                value,
                integral: true,
            } if value <= u64::MAX as f64 => Some(value as u64),
            _ => None,
        }
    }

    pub(crate) fn as_ident(&self) -> Option<&str> {
        match &self.value {
            Value::Ident(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn as_tuple(&self) -> Option<&[Node]> {
        match &self.value {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

/// Parsed schedule text: the source plus its top-level tuples in order of appearance.
#[derive(Debug, Clone)]
pub(crate) struct Document<'a> {
    pub(crate) src: &'a str,
    pub(crate) entries: Vec<Node>,
}

impl Document<'_> {
    /// Source text of `node`, used to name offending fragments in errors.
    pub(crate) fn fragment(&self, node: &Node) -> &str {
        &self.src[node.span.start..node.span.end]
    }

    /// Error naming the entry that failed to match its declared shape.
    pub(crate) fn malformed(&self, node: &Node, why: impl fmt::Display) -> MaskError {
        MaskError::parse(format!(
            "malformed entry '{}' at byte {}: {why}",
            self.fragment(node),
            node.span.start
        ))
    }
}

/// Parse schedule text into its top-level tuples.
///
/// Text without a single tuple fails with "no events found"; leading, trailing and repeated
/// commas between tuples are tolerated.
pub(crate) fn parse_document(src: &str) -> Result<Document<'_>, MaskError> {
    if !src.contains('(') {
        return Err(no_events(src));
    }
    let tokens = lex(src)?;
    let mut p = Parser { tokens, pos: 0 };

    let mut entries = Vec::new();
    loop {
        match p.peek().kind {
            TokenKind::Comma => {
                p.bump();
            }
            TokenKind::LParen => entries.push(p.parse_tuple()?),
            TokenKind::Eof => break,
            ref other => {
                return Err(SyntaxError::new(
                    p.span().start,
                    format!("expected '(' to start an entry, found {}", describe(other)),
                )
                .into());
            }
        }
    }

    if entries.is_empty() {
        return Err(no_events(src));
    }
    Ok(Document { src, entries })
}

fn no_events(src: &str) -> MaskError {
    MaskError::parse(format!("no events found in '{}'", src.trim()))
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Number { value, .. } => format!("number {value}"),
        TokenKind::Ident(s) => format!("'{s}'"),
        TokenKind::LParen => "'('".to_owned(),
        TokenKind::RParen => "')'".to_owned(),
        TokenKind::Comma => "','".to_owned(),
        TokenKind::Eof => "end of input".to_owned(),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token {
        let t = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn parse_tuple(&mut self) -> Result<Node, SyntaxError> {
        let open = self.bump();
        debug_assert_eq!(open.kind, TokenKind::LParen);

        let mut items = Vec::new();
        loop {
            if self.peek().kind == TokenKind::RParen {
                let close = self.bump();
                return Ok(Node {
                    value: Value::Tuple(items),
                    span: Span {
                        start: open.span.start,
                        end: close.span.end,
                    },
                });
            }

            items.push(self.parse_item()?);

            match self.peek().kind {
                TokenKind::Comma => {
                    self.bump();
                }
                TokenKind::RParen => {}
                ref other => {
                    return Err(SyntaxError::new(
                        self.span().start,
                        format!("expected ',' or ')', found {}", describe(other)),
                    ));
                }
            }
        }
    }

    fn parse_item(&mut self) -> Result<Node, SyntaxError> {
        match self.peek().kind.clone() {
            TokenKind::LParen => self.parse_tuple(),
            TokenKind::Number { value, integral } => {
                let t = self.bump();
                Ok(Node {
                    value: Value::Number { value, integral },
                    span: t.span,
                })
            }
            TokenKind::Ident(s) => {
                let t = self.bump();
                Ok(Node {
                    value: Value::Ident(s),
                    span: t.span,
                })
            }
            other => Err(SyntaxError::new(
                self.span().start,
                format!("expected a value, found {}", describe(&other)),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/parser.rs"]
mod tests;
