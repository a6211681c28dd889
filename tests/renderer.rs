use indoc::indoc;
use pretty_assertions::assert_eq;
use quotient::{Coordinator, EngineOptions, render_error_to_string_no_color};

fn rendered(source: &str) -> String {
    let coordinator = Coordinator::new(EngineOptions::default());
    let error = coordinator.compile(source).unwrap_err();
    render_error_to_string_no_color(&error, source)
}

#[test]
fn test_invalid_character_points_at_character() {
    let output = rendered("12 % 5");
    assert!(output.contains("[C001] Error: invalid character: %"), "{output}");
    assert!(output.contains("12 % 5"));
}

#[test]
fn test_help_is_rendered() {
    let output = rendered("1 + 2)");
    assert!(output.contains("Help: Check that every '(' has a matching ')'"), "{output}");
}

#[test]
fn test_missing_operand() {
    let output = rendered("4 *");
    let header = output.lines().next().unwrap_or_default();
    assert_eq!(
        header,
        indoc! {"
            [C004] Error: invalid postfix expression: operator '*' is missing an operand"
        }
    );
}
