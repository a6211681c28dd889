//! Tokenizer for arithmetic expressions.
//!
//! Produces a flat token sequence. Numerals are kept as text here; whether a
//! numeral is well formed (e.g. `1.2.3`) is decided by the parser.

use core::fmt;

use crate::parser::{CompileError, Operator, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Digits and dots, optionally prefixed by a fused unary `-`.
    Numeral(String),
    Operator(Operator),
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Numeral(text) => f.write_str(text),
            TokenKind::Operator(op) => f.write_str(op.symbol()),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
        }
    }
}

/// Accumulates adjacent numeral characters.
struct Pending {
    start: usize,
    text: String,
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    let mut pending: Option<Pending> = None;
    let mut prev: Option<char> = None;

    for (i, ch) in source.char_indices() {
        let end = i + ch.len_utf8();

        if ch.is_whitespace() {
            flush(&mut pending, &mut tokens, i);
        } else if ch.is_ascii_digit() || ch == '.' {
            pending
                .get_or_insert_with(|| Pending {
                    start: i,
                    text: String::new(),
                })
                .text
                .push(ch);
        } else if ch == '-' && prev.is_none_or(|p| Operator::from_char(p).is_some()) {
            // Unary sign: fused into the numeral that follows.
            flush(&mut pending, &mut tokens, i);
            pending = Some(Pending {
                start: i,
                text: String::from("-"),
            });
        } else if let Some(op) = Operator::from_char(ch) {
            flush(&mut pending, &mut tokens, i);
            tokens.push(Token::new(TokenKind::Operator(op), Span::new(i, end)));
        } else if ch == '(' || ch == ')' {
            flush(&mut pending, &mut tokens, i);
            let kind = if ch == '(' {
                TokenKind::LParen
            } else {
                TokenKind::RParen
            };
            tokens.push(Token::new(kind, Span::new(i, end)));
        } else {
            return Err(CompileError::InvalidCharacter {
                ch,
                span: Span::new(i, end),
            });
        }

        prev = Some(ch);
    }

    flush(&mut pending, &mut tokens, source.len());
    Ok(tokens)
}

fn flush(pending: &mut Option<Pending>, tokens: &mut Vec<Token>, end: usize) {
    if let Some(Pending { start, text }) = pending.take() {
        tokens.push(Token::new(TokenKind::Numeral(text), Span::new(start, end)));
    }
}
