use once_cell::sync::Lazy;

/// Expected outcome of evaluating a case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expected {
    Value(f64),
    /// Compile error with this diagnostic code.
    Rejected(&'static str),
    DivisionByZero,
}

pub struct TestCase {
    pub name: &'static str,
    pub expr: &'static str,
    pub expected: Expected,
}

pub static TEST_CASES: Lazy<Vec<TestCase>> = Lazy::new(|| {
    use Expected::*;
    vec![
        TestCase {
            name: "simple_addition",
            expr: "2+2",
            expected: Value(4.0),
        },
        TestCase {
            name: "precedence",
            expr: "2 + 3 * 4",
            expected: Value(14.0),
        },
        TestCase {
            name: "parentheses",
            expr: "(2 + 3) * 4",
            expected: Value(20.0),
        },
        TestCase {
            name: "left_associative_subtraction",
            expr: "10 - 4 - 3",
            expected: Value(3.0),
        },
        TestCase {
            name: "left_associative_division",
            expr: "100 / 10 / 5",
            expected: Value(2.0),
        },
        TestCase {
            name: "leading_unary_minus",
            expr: "-10+20",
            expected: Value(10.0),
        },
        TestCase {
            name: "unary_minus_after_operator",
            expr: "2*-3",
            expected: Value(-6.0),
        },
        TestCase {
            name: "decimals",
            expr: "1.5 * 4",
            expected: Value(6.0),
        },
        TestCase {
            name: "single_number",
            expr: "42",
            expected: Value(42.0),
        },
        TestCase {
            name: "nested_parentheses",
            expr: "((1 + 2) * (3 + 4)) / 7",
            expected: Value(3.0),
        },
        TestCase {
            name: "division_by_zero",
            expr: "6/0",
            expected: DivisionByZero,
        },
        TestCase {
            name: "division_by_computed_zero",
            expr: "1 / (3 - 3)",
            expected: DivisionByZero,
        },
        TestCase {
            name: "invalid_character",
            expr: "2 ^ 3",
            expected: Rejected("C001"),
        },
        TestCase {
            name: "unclosed_parenthesis",
            expr: "(1 + 2",
            expected: Rejected("C002"),
        },
        TestCase {
            name: "unopened_parenthesis",
            expr: "1 + 2)",
            expected: Rejected("C002"),
        },
        TestCase {
            name: "malformed_number",
            expr: "1.2.3 + 1",
            expected: Rejected("C003"),
        },
        TestCase {
            name: "dangling_operator",
            expr: "1 +",
            expected: Rejected("C004"),
        },
        TestCase {
            name: "empty",
            expr: "",
            expected: Rejected("C004"),
        },
    ]
});
