use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::{
    environment::prelude::{Environment, Value, FALSE, NULL, TRUE},
    parser::prelude::parse
};

use super::eval;

fn run(input: &str) -> Value {
    let (program, errors) = parse(input);

    assert!(errors.is_empty(), "parser errors for {input:?}: {errors:?}");

    eval(&program, &Environment::new_root())
}

fn assert_evaluates(cases: &[(&str, Value)]) {
    for (input, expected) in cases {
        assert_eq!(&run(input), expected, "input: {input}");
    }
}

fn assert_error(input: &str, message: &str) {
    assert_eq!(run(input), Value::error(message), "input: {input}");
}

#[test]
fn test_integer_expressions() {
    assert_evaluates(&[
        ("5", Value::from(5)),
        ("-10", Value::from(-10)),
        ("5 + 5 + 5 + 5 - 10", Value::from(10)),
        ("2 * 2 * 2 * 2 * 2", Value::from(32)),
        ("-50 + 100 + -50", Value::from(0)),
        ("20 + 2 * -10", Value::from(0)),
        ("50 / 2 * 2 + 10", Value::from(60)),
        ("3 * (3 * 3) + 10", Value::from(37)),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", Value::from(50)),
        ("7 / 2", Value::from(3)),
    ]);
}

#[test]
fn test_integer_arithmetic_wraps() {
    assert_evaluates(&[
        ("9223372036854775807 + 1", Value::from(i64::MIN)),
        ("-9223372036854775807 - 2", Value::from(i64::MAX)),
        ("4611686018427387904 * 2", Value::from(i64::MIN)),
    ]);
}

#[test]
fn test_boolean_expressions() {
    assert_evaluates(&[
        ("true", TRUE),
        ("false", FALSE),
        ("1 < 2", TRUE),
        ("1 > 2", FALSE),
        ("1 == 1", TRUE),
        ("1 != 1", FALSE),
        ("true == true", TRUE),
        ("true != false", TRUE),
        ("(1 < 2) == true", TRUE),
        ("(1 > 2) == true", FALSE),
    ]);
}

#[test]
fn test_bang_operator() {
    assert_evaluates(&[
        ("!true", FALSE),
        ("!false", TRUE),
        ("!5", FALSE),
        ("!!true", TRUE),
        ("!!5", TRUE),
        ("!if (false) { 1 }", TRUE),
    ]);
}

#[test]
fn test_if_else_expressions() {
    assert_evaluates(&[
        ("if (true) { 10 }", Value::from(10)),
        ("if (false) { 10 }", NULL),
        ("if (1) { 10 }", Value::from(10)),
        ("if (1 < 2) { 10 } else { 20 }", Value::from(10)),
        ("if (1 > 2) { 10 } else { 20 }", Value::from(20)),
        ("if (if (false) { 1 }) { 10 } else { 20 }", Value::from(20)),
        ("if (true) { }", NULL),
    ]);
}

#[test]
fn test_return_statements() {
    assert_evaluates(&[
        ("return 10;", Value::from(10)),
        ("return 10; 9;", Value::from(10)),
        ("9; return 2 * 5; 9;", Value::from(10)),
        ("if (true) { return 10; } return 1;", Value::from(10)),
        (
            "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
            Value::from(10)
        ),
        (
            "let f = fn(x) { if (x > 1) { return x; } 0 }; f(5) + f(0)",
            Value::from(5)
        ),
    ]);
}

#[test]
fn test_nested_return_unwinds_enclosing_expression() {
    assert_evaluates(&[
        ("let f = fn() { let x = if (true) { return 5; }; 10 }; f()", Value::from(5)),
        ("let x = if (true) { return 5; }; 7", Value::from(5)),
        ("1 + if (true) { return 2; }", Value::from(2)),
        ("if (true) { return 3; } + 1", Value::from(3)),
        ("-if (true) { return 4; }", Value::from(4)),
        ("if (if (true) { return 6; }) { 1 } else { 2 }", Value::from(6)),
        (
            "let id = fn(x) { x }; let f = fn() { id(if (true) { return 8; }); 9 }; f()",
            Value::from(8)
        ),
        ("let f = fn() { return if (true) { return 1; }; }; f() + 1", Value::from(2)),
    ]);
}

#[test]
fn test_nested_return_is_never_bound() {
    let env = Environment::new_root();
    let (program, errors) = parse("let x = if (true) { return 5; }; 7");

    assert!(errors.is_empty());
    assert_eq!(eval(&program, &env), Value::from(5));
    assert_eq!(env.borrow().get("x"), None);
}

#[test]
fn test_error_handling() {
    assert_error("5 + true;", "type mismatch: INTEGER + BOOLEAN");
    assert_error("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN");
    assert_error("-true", "unknown operator: -BOOLEAN");
    assert_error("true + false;", "unknown operator: BOOLEAN + BOOLEAN");
    assert_error("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN");
    assert_error("if (10 > 1) { true + false; }", "unknown operator: BOOLEAN + BOOLEAN");
    assert_error(
        "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
        "unknown operator: BOOLEAN + BOOLEAN"
    );
    assert_error("foobar", "identifier not found: foobar");
    assert_error("1 == true", "type mismatch: INTEGER == BOOLEAN");
    assert_error("10 / 0", "division by zero: 10 / 0");
    assert_error("5(1)", "not a function: INTEGER");
    assert_error("true < false", "unknown operator: BOOLEAN < BOOLEAN");
}

#[test]
fn test_errors_are_not_mixed_into_arithmetic() {
    assert_error("-(1 + true) * 2", "type mismatch: INTEGER + BOOLEAN");
    assert_error("!missing", "identifier not found: missing");
    assert_error("if (missing) { 1 } else { 2 }", "identifier not found: missing");
    assert_error("let x = missing; x", "identifier not found: missing");
    assert_error("fn(a, b) { a }(1, missing)", "identifier not found: missing");
}

#[test]
fn test_let_statements() {
    assert_evaluates(&[
        ("let a = 5; a;", Value::from(5)),
        ("let a = 5 * 5; a;", Value::from(25)),
        ("let a = 5; let b = a; b;", Value::from(5)),
        ("let a = 5; let b = a; let c = a + b + 5; c;", Value::from(15)),
        ("let a = 5;", NULL),
        ("let a = 1; let a = a + 1; a", Value::from(2)),
    ]);
}

#[test]
fn test_function_object() {
    let value = run("fn(x) { x + 2; };");

    let Value::Function(function) = &value else {
        panic!("expected a function, got {value:?}");
    };

    let parameters = function.parameters.iter()
        .map(|parameter| parameter.value.as_str())
        .collect::<Vec<&str>>();

    assert_eq!(parameters, vec!["x"]);
    assert_eq!(function.body.to_string(), "{ (x + 2); }");
    assert_eq!(value.inspect(), "fn(x) { (x + 2); }");
}

#[test]
fn test_function_application() {
    assert_evaluates(&[
        ("let identity = fn(x) { x; }; identity(5);", Value::from(5)),
        ("let identity = fn(x) { return x; }; identity(5);", Value::from(5)),
        ("let double = fn(x) { x * 2; }; double(5);", Value::from(10)),
        ("let add = fn(x, y) { x + y; }; add(5, 5);", Value::from(10)),
        ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", Value::from(20)),
        ("fn(x) { x; }(5)", Value::from(5)),
        ("fn() { }()", NULL),
    ]);
}

#[test]
fn test_closures() {
    assert_evaluates(&[
        (
            "let newAdder = fn(x) { fn(y) { x + y }; }; let addTwo = newAdder(2); addTwo(2);",
            Value::from(4)
        ),
        (
            "let newAdder = fn(x) { fn(y) { x + y } };
             let addOne = newAdder(1);
             let addTen = newAdder(10);
             addOne(1) + addTen(1) * 100",
            Value::from(1102)
        ),
        (
            "let x = 1; let f = fn() { x }; let x = 2; f()",
            Value::from(2)
        ),
    ]);
}

#[test]
fn test_recursion() {
    assert_evaluates(&[(
        "let fib = fn(n) { if (n < 2) { return n; } fib(n - 1) + fib(n - 2) }; fib(15)",
        Value::from(610)
    )]);
}

#[test]
fn test_parameters_shadow_outer_bindings() {
    let env = Environment::new_root();
    let (program, errors) = parse("let x = 10; let f = fn(x) { x * 2 }; f(3) + x");

    assert!(errors.is_empty());
    assert_eq!(eval(&program, &env), Value::from(16));
    assert_eq!(env.borrow().get("x"), Some(Value::from(10)));
}

#[test]
fn test_wrong_number_of_arguments() {
    let env = Environment::new_root();
    let (program, errors) = parse("let y = 0; let f = fn(a, b) { a + b }; f(1)");

    assert!(errors.is_empty());
    assert_eq!(
        eval(&program, &env),
        Value::error("wrong number of arguments: want=2, got=1")
    );
    assert_eq!(env.borrow().get("a"), None);

    assert_error("fn() { 1 }(1, 2)", "wrong number of arguments: want=0, got=2");
}

#[test]
fn test_environment_persists_between_programs() {
    let env = Environment::new_root();

    let (first, _) = parse("let counter = 41;");
    let (second, _) = parse("counter + 1");

    assert_eq!(eval(&first, &env), NULL);
    assert_eq!(eval(&second, &env), Value::from(42));
}

proptest! {
    #[test]
    fn test_integer_literal_evaluates_to_itself(n in 0..=i64::MAX) {
        prop_assert_eq!(run(&n.to_string()), Value::from(n));
    }

    #[test]
    fn test_negated_literal_evaluates_to_negative(n in 0..=i64::MAX) {
        prop_assert_eq!(run(&format!("-{n}")), Value::from(-n));
    }
}
