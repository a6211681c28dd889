use pretty_assertions::assert_eq;

use super::{Ast, CompileError, Node, NodeId, Operator, Span, parse, to_postfix, tokenize};

fn render(source: &str) -> String {
    parse(source)
        .unwrap_or_else(|e| panic!("Expression parsing failed: {}\n{}", source, e))
        .to_string()
}

#[test]
fn test_single_number() {
    let ast = parse("42").unwrap();
    assert_eq!(ast.len(), 1);
    assert_eq!(ast.node(ast.root()), &Node::Number(42.0));
    assert_eq!(ast.operator_count(), 0);
    assert_eq!(ast.depth(), 1);
}

#[test]
fn test_left_and_right_children() {
    let ast = parse("7 - 2").unwrap();
    assert_eq!(ast.node(NodeId(0)), &Node::Number(7.0));
    assert_eq!(ast.node(NodeId(1)), &Node::Number(2.0));
    assert_eq!(
        ast.node(ast.root()),
        &Node::Binary {
            op: Operator::Sub,
            left: NodeId(0),
            right: NodeId(1),
        }
    );
    assert_eq!(ast.span(ast.root()), &Span::new(0, 5));
}

#[test]
fn test_children_precede_parents() {
    let ast = parse("(1 + 2) * (3 - 4) / 5").unwrap();
    for i in 0..ast.len() {
        if let Node::Binary { left, right, .. } = ast.node(NodeId(i)) {
            assert!(left.index() < i && right.index() < i);
            assert!(left < right);
        }
    }
    assert_eq!(ast.root(), NodeId(ast.len() - 1));
    assert_eq!(ast.operator_count(), 4);
}

#[test]
fn test_display() {
    assert_eq!(render("2 + 3 * 4"), "(2 + (3 * 4))");
    assert_eq!(render("(2 + 3) * 4"), "((2 + 3) * 4)");
    assert_eq!(render("-1.5 / 2"), "(-1.5 / 2)");
}

#[test]
fn test_display_long_chain() {
    let operators = 50_000;
    let rendered = render(&vec!["1"; operators + 1].join("+"));
    assert!(rendered.starts_with(&format!("{}1 + 1)", "(".repeat(operators))));
    assert!(rendered.ends_with(" + 1)"));
    assert_eq!(rendered.matches(')').count(), operators);
}

#[test]
fn test_depth() {
    assert_eq!(parse("1 + 2 + 3 + 4").unwrap().depth(), 4);
    assert_eq!(parse("(1 + 2) * (3 + 4)").unwrap().depth(), 3);
}

#[test]
fn test_empty_expression() {
    assert!(matches!(
        parse(""),
        Err(CompileError::InvalidPostfix { .. })
    ));
}

#[test]
fn test_missing_operand() {
    let err = parse("2 +").unwrap_err();
    assert_eq!(
        err,
        CompileError::InvalidPostfix {
            reason: "operator '+' is missing an operand".to_string(),
            span: Span::new(2, 3),
        }
    );
}

#[test]
fn test_dangling_operands() {
    let err = parse("1 2").unwrap_err();
    assert!(matches!(err, CompileError::InvalidPostfix { .. }));
    assert_eq!(err.span(), &Span::new(2, 3));
}

#[test]
fn test_binary_minus_after_space() {
    assert!(matches!(
        parse("3 * -5"),
        Err(CompileError::InvalidPostfix { .. })
    ));
}

#[test]
fn test_bare_sign_is_malformed() {
    assert!(matches!(
        parse("- 5"),
        Err(CompileError::MalformedToken { .. })
    ));
}

#[test]
fn test_postfix_with_parenthesis_rejected() {
    let tokens = tokenize("(1)").unwrap();
    assert!(matches!(
        Ast::from_postfix(&tokens),
        Err(CompileError::InvalidPostfix { .. })
    ));
    let postfix = to_postfix(tokens).unwrap();
    assert_eq!(Ast::from_postfix(&postfix).unwrap().to_string(), "1");
}

#[test]
fn test_diagnostic_codes() {
    assert_eq!(
        parse("2 + a").unwrap_err().to_diagnostic().code.as_deref(),
        Some("C001")
    );
    assert_eq!(
        parse("(2 + 3").unwrap_err().to_diagnostic().code.as_deref(),
        Some("C002")
    );
    assert_eq!(
        parse("1..2 + 3").unwrap_err().to_diagnostic().code.as_deref(),
        Some("C003")
    );
    assert_eq!(
        parse("2 + ").unwrap_err().to_diagnostic().code.as_deref(),
        Some("C004")
    );
}
