use pretty_assertions::assert_eq;

use super::{CompileError, Operator, Span, Token, TokenKind, to_postfix, tokenize};

// Build tokens from their textual form, with spans counting token positions.
fn tokens(items: &[&str]) -> Vec<Token> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let kind = match *item {
                "(" => TokenKind::LParen,
                ")" => TokenKind::RParen,
                other => match Operator::from_symbol(other) {
                    Some(op) => TokenKind::Operator(op),
                    None => TokenKind::Numeral(other.to_string()),
                },
            };
            Token::new(kind, Span::new(i, i + 1))
        })
        .collect()
}

fn postfix(items: &[&str]) -> Result<Vec<String>, CompileError> {
    to_postfix(tokens(items)).map(|out| out.iter().map(ToString::to_string).collect())
}

#[test]
fn test_simple() {
    assert_eq!(postfix(&["2", "+", "2"]).unwrap(), ["2", "2", "+"]);
}

#[test]
fn test_parentheses_group() {
    assert_eq!(
        postfix(&["3", "*", "(", "4", "+", "5", ")"]).unwrap(),
        ["3", "4", "5", "+", "*"]
    );
    assert_eq!(
        postfix(&["(", "2", "+", "3", ")", "*", "4"]).unwrap(),
        ["2", "3", "+", "4", "*"]
    );
}

#[test]
fn test_precedence() {
    assert_eq!(
        postfix(&["2", "+", "3", "*", "4"]).unwrap(),
        ["2", "3", "4", "*", "+"]
    );
    assert_eq!(
        postfix(&["10", "/", "2", "+", "5"]).unwrap(),
        ["10", "2", "/", "5", "+"]
    );
}

#[test]
fn test_left_associative() {
    assert_eq!(
        postfix(&["8", "-", "3", "-", "2"]).unwrap(),
        ["8", "3", "-", "2", "-"]
    );
    assert_eq!(
        postfix(&["8", "/", "4", "*", "2"]).unwrap(),
        ["8", "4", "/", "2", "*"]
    );
}

#[test]
fn test_unclosed_paren() {
    assert_eq!(
        postfix(&["2", "+", "(", "3", "*", "4"]),
        Err(CompileError::MismatchedParentheses {
            span: Span::new(2, 3)
        })
    );
}

#[test]
fn test_unopened_paren() {
    assert_eq!(
        postfix(&["2", "+", "3", ")"]),
        Err(CompileError::MismatchedParentheses {
            span: Span::new(3, 4)
        })
    );
}

#[test]
fn test_malformed_numeral() {
    assert_eq!(
        postfix(&["2", "+", "1.2.3"]),
        Err(CompileError::MalformedToken {
            token: "1.2.3".to_string(),
            span: Span::new(2, 3)
        })
    );
    assert!(matches!(
        postfix(&["2", "+", "a"]),
        Err(CompileError::MalformedToken { .. })
    ));
}

#[test]
fn test_empty() {
    assert_eq!(postfix(&[]).unwrap(), Vec::<String>::new());
}

#[test]
fn test_from_source() {
    let out: Vec<String> = to_postfix(tokenize("-1 * (2 - -3)").unwrap())
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    // "- -3": the second '-' follows a space, so it stays a binary operator.
    // Shunting-yard still reorders it; the tree builder rejects it later.
    assert_eq!(out, ["-1", "2", "-", "3", "-", "*"]);
}
