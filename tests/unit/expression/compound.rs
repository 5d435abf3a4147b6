use super::*;
use serde_json::json;

use crate::compile::compile_expression;
use crate::foundation::color::Color;
use crate::value::properties_from_json;

fn eval_with(json: Json, props: Json) -> EvalResult<Value> {
    compile_expression(&json, None)
        .unwrap()
        .evaluate(0.0, &properties_from_json(&props))
}

fn eval(json: Json) -> Value {
    eval_with(json, json!({})).unwrap()
}

fn parse_error(json: Json) -> String {
    let err = compile_expression(&json, None).unwrap_err();
    assert_eq!(err.errors.len(), 1, "{err}");
    err.errors[0].message.clone()
}

#[test]
fn arithmetic() {
    assert_eq!(eval(json!(["+"])), Value::Number(0.0));
    assert_eq!(eval(json!(["+", 1, 2, 3])), Value::Number(6.0));
    assert_eq!(eval(json!(["*", 2, 3, 4])), Value::Number(24.0));
    assert_eq!(eval(json!(["-", 5])), Value::Number(-5.0));
    assert_eq!(eval(json!(["-", 5, 2])), Value::Number(3.0));
    assert_eq!(eval(json!(["/", 1, 4])), Value::Number(0.25));
    assert_eq!(eval(json!(["%", 7, 3])), Value::Number(1.0));
    assert_eq!(eval(json!(["^", 2, 10])), Value::Number(1024.0));
}

#[test]
fn arity_and_overload_diagnostics() {
    assert_eq!(
        parse_error(json!(["/", 1])),
        "Expected 2 arguments, but found 1 instead."
    );
    assert_eq!(
        parse_error(json!(["to-number"])),
        "Expected at least 1 arguments, but found 0 instead."
    );
    assert_eq!(
        parse_error(json!(["-", "a", 1])),
        "Expected arguments of type (Number, Number) | (Number), but found (String, Number) instead."
    );
}

#[test]
fn overloads_pick_the_first_signature_that_fits() {
    assert_eq!(eval(json!(["length", ["literal", [1, 2, 3]]])), Value::Number(3.0));
    assert_eq!(eval(json!(["length", "héllo"])), Value::Number(5.0));
    assert_eq!(eval(json!(["length", "😀"])), Value::Number(2.0));
    assert_eq!(eval(json!(["<", "a", "b"])), Value::Bool(true));
    assert_eq!(eval(json!([">=", 2, 2])), Value::Bool(true));
}

#[test]
fn lookups() {
    let props = json!({"a": 1, "o": {"k": "v"}});
    assert_eq!(eval_with(json!(["get", "a"]), props.clone()).unwrap(), Value::Number(1.0));
    assert_eq!(
        eval_with(json!(["get", "zz"]), props.clone()).unwrap_err().message,
        "Property 'zz' not found in feature.properties"
    );
    assert_eq!(eval_with(json!(["has", "a"]), props.clone()).unwrap(), Value::Bool(true));
    assert_eq!(eval_with(json!(["has", "zz"]), props.clone()).unwrap(), Value::Bool(false));
    assert_eq!(
        eval_with(json!(["get", "k", ["object", ["get", "o"]]]), props.clone()).unwrap(),
        Value::from("v")
    );
    let err = eval_with(json!(["get", "b", ["literal", {"a": 1}]]), props).unwrap_err();
    assert_eq!(err.message, "Property 'b' not found in object");

    assert_eq!(eval(json!(["at", 1, ["literal", ["x", "y"]]])), Value::from("y"));
    let err = eval_with(json!(["at", 0.5, ["literal", ["x", "y"]]]), json!({})).unwrap_err();
    assert_eq!(err.message, "Array index must be an integer, but found 0.5 instead.");
}

#[test]
fn absent_feature_properties_fail_like_absent_object_keys() {
    let empty = json!({});
    let err = eval_with(json!(["get", "x"]), empty.clone()).unwrap_err();
    assert_eq!(err.message, "Property 'x' not found in feature.properties");
    assert!(eval_with(json!(["get", "x", ["properties"]]), empty.clone()).is_err());
    assert!(eval_with(json!(["typeof", ["get", "x"]]), empty.clone()).is_err());

    assert_eq!(
        eval_with(json!(["coalesce", ["get", "x"], "d"]), empty).unwrap(),
        Value::from("d")
    );
    assert_eq!(
        eval_with(json!(["typeof", ["get", "x"]]), json!({"x": null})).unwrap(),
        Value::from("Null")
    );
}

#[test]
fn equality_and_logic() {
    let props = json!({"x": "a"});
    assert_eq!(eval_with(json!(["==", ["get", "x"], "a"]), props.clone()).unwrap(), Value::Bool(true));
    assert_eq!(eval_with(json!(["!=", ["get", "x"], "a"]), props).unwrap(), Value::Bool(false));
    assert_eq!(eval(json!(["!", false])), Value::Bool(true));
    assert_eq!(eval(json!(["all"])), Value::Bool(true));
    assert_eq!(eval(json!(["any"])), Value::Bool(false));

    let throws = json!(["at", 5, ["literal", [true]]]);
    assert_eq!(eval(json!(["any", true, throws.clone()])), Value::Bool(true));
    assert_eq!(eval(json!(["all", false, throws])), Value::Bool(false));
}

#[test]
fn mismatched_comparison_operands_fail_at_runtime() {
    let c = compile_expression(&json!(["<", ["get", "x"], ["get", "y"]]), None).unwrap();
    let props = properties_from_json(&json!({"x": 1, "y": 2}));
    assert_eq!(c.evaluate(0.0, &props).unwrap(), Value::Bool(true));

    let props = properties_from_json(&json!({"x": 1, "y": "b"}));
    assert!(c.evaluate(0.0, &props).is_err());
}

#[test]
fn coercions() {
    assert_eq!(eval(json!(["to-number", "nope", " 12 "])), Value::Number(12.0));
    let err = eval_with(json!(["to-number", "nope"]), json!({})).unwrap_err();
    assert_eq!(err.message, r#"Could not convert "nope" to number."#);

    assert_eq!(eval(json!(["to-string", 3])), Value::from("3"));
    assert_eq!(
        eval(json!(["to-string", ["rgb", 255, 0, 0]])),
        Value::from("rgba(255, 0, 0, 1)")
    );
    assert_eq!(eval(json!(["to-string", ["literal", [1, 2]]])), Value::from("[1,2]"));
    assert_eq!(eval(json!(["to-boolean", ""])), Value::Bool(false));
    assert_eq!(eval(json!(["typeof", ["literal", [1, 2]]])), Value::from("Array<Number, 2>"));
}

#[test]
fn colors() {
    let red = Value::Color(Color::rgba(1.0, 0.0, 0.0, 1.0));
    assert_eq!(eval_with(json!(["to-color", ["get", "c"]]), json!({"c": "red"})).unwrap(), red);
    assert_eq!(
        eval_with(json!(["to-color", ["get", "c"]]), json!({"c": [255, 0, 0]})).unwrap(),
        red
    );
    let err = eval_with(json!(["to-color", ["get", "c"]]), json!({"c": "nope"})).unwrap_err();
    assert_eq!(err.message, "Could not parse color from value 'nope'");

    assert_eq!(
        eval(json!(["to-rgba", "red"])),
        Value::Array(vec![
            Value::Number(255.0),
            Value::Number(0.0),
            Value::Number(0.0),
            Value::Number(1.0)
        ])
    );
    let err = eval_with(json!(["rgba", 300, 0, 0, 1]), json!({})).unwrap_err();
    assert_eq!(
        err.message,
        "Invalid rgba value [300, 0, 0, 1]: 'r', 'g', and 'b' must be between 0 and 255."
    );
}

#[test]
fn strings() {
    assert_eq!(eval(json!(["concat", "a", 1, true])), Value::from("a1true"));
    assert_eq!(eval(json!(["upcase", "abc"])), Value::from("ABC"));
    assert_eq!(eval(json!(["downcase", "ABC"])), Value::from("abc"));
}

#[test]
fn serializes_arguments_with_inserted_assertions() {
    let c = compile_expression(&json!(["+", 1, ["get", "x"]]), None).unwrap();
    assert_eq!(c.serialize(), json!(["+", 1, ["number", ["get", "x"]]]));
    assert_eq!(
        c.evaluate(0.0, &properties_from_json(&json!({"x": null})))
            .unwrap_err()
            .message,
        "Expected value to be of type Number, but found Null instead."
    );
}
