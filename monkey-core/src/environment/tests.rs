use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{eval::eval, parser::prelude::parse};

use super::prelude::{Environment, Value, FALSE, TRUE};

#[test]
fn test_lookup_walks_outward() {
    let root = Environment::new_root();
    root.borrow_mut().set("a", Value::from(1));

    let middle = Environment::new_enclosed(root.clone());
    middle.borrow_mut().set("b", Value::from(2));

    let inner = Environment::new_enclosed(middle.clone());

    assert_eq!(inner.borrow().get("a"), Some(Value::from(1)));
    assert_eq!(inner.borrow().get("b"), Some(Value::from(2)));
    assert_eq!(inner.borrow().get("c"), None);
    assert_eq!(root.borrow().get("b"), None);
}

#[test]
fn test_set_shadows_without_touching_outer() {
    let root = Environment::new_root();
    root.borrow_mut().set("x", Value::from(1));

    let inner = Environment::new_enclosed(root.clone());
    inner.borrow_mut().set("x", TRUE);

    assert_eq!(inner.borrow().get("x"), Some(TRUE));
    assert_eq!(root.borrow().get("x"), Some(Value::from(1)));
    assert!(inner.borrow().store.contains_key("x"));
    assert!(!root.borrow().store.contains_key("y"));
}

#[test]
fn test_rebinding_replaces_local_value() {
    let mut env = Environment::new();

    assert_eq!(env.set("flag", TRUE), TRUE);
    env.set("flag", FALSE);

    assert_eq!(env.get("flag"), Some(FALSE));
}

#[test]
fn test_truthiness() {
    assert!(TRUE.is_truthy());
    assert!(Value::from(0).is_truthy());
    assert!(!FALSE.is_truthy());
    assert!(!Value::Null.is_truthy());
}

#[test]
fn test_unwinding_values() {
    assert!(Value::error("boom").is_unwinding());
    assert!(Value::ReturnValue(Box::new(Value::from(1))).is_unwinding());
    assert!(!Value::from(1).is_unwinding());
    assert!(!Value::Null.is_unwinding());
}

#[test]
fn test_inspect() {
    assert_eq!(Value::from(-42).inspect(), "-42");
    assert_eq!(Value::from(true).inspect(), "true");
    assert_eq!(Value::Null.inspect(), "null");
    assert_eq!(Value::error("identifier not found: x").inspect(), "ERROR: identifier not found: x");
    assert_eq!(Value::ReturnValue(Box::new(Value::from(7))).inspect(), "7");
}

#[test]
fn test_named_function_keeps_its_environment_alive() {
    let env = Environment::new_root();
    let (program, _) = parse("let f = fn() { 1 };");

    eval(&program, &env);

    // one handle here, one captured by `f` stored inside the same scope
    assert_eq!(Rc::strong_count(&env), 2);

    let Some(Value::Function(function)) = env.borrow().get("f") else {
        panic!("expected `f` to be a function");
    };

    assert!(Rc::ptr_eq(&function.env, &env));
}
