//! Infix to postfix conversion (shunting-yard).

use crate::parser::{CompileError, Token, TokenKind};

/// Reorder `tokens` into postfix order.
///
/// `*` and `/` bind tighter than `+` and `-`; all operators are
/// left-associative. Parentheses never appear in the output.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, CompileError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match &token.kind {
            TokenKind::Numeral(text) => {
                if text.parse::<f64>().is_err() {
                    return Err(CompileError::MalformedToken {
                        token: text.clone(),
                        span: token.span,
                    });
                }
                output.push(token);
            }
            TokenKind::LParen => stack.push(token),
            TokenKind::RParen => loop {
                match stack.pop() {
                    Some(Token {
                        kind: TokenKind::LParen,
                        ..
                    }) => break,
                    Some(op) => output.push(op),
                    None => {
                        return Err(CompileError::MismatchedParentheses { span: token.span });
                    }
                }
            },
            TokenKind::Operator(op) => {
                while let Some(top) = stack.last() {
                    match top.kind {
                        TokenKind::Operator(top_op) if top_op.precedence() >= op.precedence() => {
                            if let Some(popped) = stack.pop() {
                                output.push(popped);
                            }
                        }
                        _ => break,
                    }
                }
                stack.push(token);
            }
        }
    }

    while let Some(token) = stack.pop() {
        if matches!(token.kind, TokenKind::LParen | TokenKind::RParen) {
            return Err(CompileError::MismatchedParentheses { span: token.span });
        }
        output.push(token);
    }

    Ok(output)
}
