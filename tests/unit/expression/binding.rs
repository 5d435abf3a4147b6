use super::*;
use serde_json::json;

use crate::compile::compile_expression;
use crate::value::Properties;

fn eval(json: Json) -> EvalResult<Value> {
    compile_expression(&json, None)
        .unwrap()
        .evaluate(0.0, &Properties::new())
}

#[test]
fn bound_values_are_visible_in_the_body() {
    let v = eval(json!(["let", "a", 2, "b", 3, ["*", ["var", "a"], ["var", "b"]]])).unwrap();
    assert_eq!(v, Value::Number(6.0));
}

#[test]
fn inner_bindings_shadow_outer_ones() {
    let v = eval(json!(["let", "a", 1, ["let", "a", 2, ["var", "a"]]])).unwrap();
    assert_eq!(v, Value::Number(2.0));

    let v = eval(json!(["+", ["let", "a", 1, ["var", "a"]], ["let", "a", 10, ["var", "a"]]])).unwrap();
    assert_eq!(v, Value::Number(11.0));
}

#[test]
fn variable_takes_the_bound_type() {
    let c = compile_expression(&json!(["let", "s", "x", ["var", "s"]]), None).unwrap();
    assert_eq!(*c.ty(), Type::String);
    let Expression::Let(binding) = c.expression() else {
        panic!("expected let");
    };
    let names: Vec<&str> = binding.bindings().map(|(n, _)| n).collect();
    assert_eq!(names, ["s"]);
    assert!(matches!(binding.result(), Expression::Var(v) if v.name() == "s"));
}

#[test]
fn bindings_do_not_see_each_other() {
    let err = compile_expression(&json!(["let", "a", 1, "b", ["var", "a"], ["var", "b"]]), None)
        .unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].key, "4.1");
    assert_eq!(
        err.errors[0].message,
        r#"Unknown variable "a". Make sure "a" has been bound in an enclosing "let" expression before using it."#
    );
}

#[test]
fn malformed_let_is_rejected() {
    let err = compile_expression(&json!(["let", "a", 1]), None).unwrap_err();
    assert_eq!(
        err.errors[0].message,
        "Expected at least 3 arguments, but found 2 instead."
    );

    let err = compile_expression(&json!(["let", "1a", 1, 2]), None).unwrap_err();
    assert_eq!(err.errors[0].key, "1");

    let err = compile_expression(&json!(["var", "x"]), None).unwrap_err();
    assert_eq!(err.errors[0].key, "1");
}

#[test]
fn round_trips_through_wire_form() {
    let wire = json!(["let", "w", ["get", "w"], ["*", 2, ["number", ["var", "w"]]]]);
    let c = compile_expression(&wire, None).unwrap();
    assert_eq!(c.serialize(), wire);
    assert!(!c.is_feature_constant());
}
