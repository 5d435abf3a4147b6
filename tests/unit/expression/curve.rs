use super::*;
use serde_json::json;

use crate::compile::compile_expression;
use crate::foundation::color::Color;
use crate::value::Properties;

fn at_zoom(json: Json, expected: Option<Type>, zoom: f64) -> Value {
    compile_expression(&json, expected)
        .unwrap()
        .evaluate(zoom, &Properties::new())
        .unwrap()
}

fn number_at_zoom(json: Json, zoom: f64) -> f64 {
    at_zoom(json, None, zoom).as_f64().unwrap()
}

fn single_error(json: Json) -> (String, String) {
    let err = compile_expression(&json, None).unwrap_err();
    assert_eq!(err.errors.len(), 1, "{err}");
    (err.errors[0].key.clone(), err.errors[0].message.clone())
}

#[test]
fn linear_curve_interpolates_and_clamps() {
    let curve = json!(["curve", ["linear"], ["zoom"], 0, 0, 10, 100]);
    assert_eq!(number_at_zoom(curve.clone(), 5.0), 50.0);
    assert_eq!(number_at_zoom(curve.clone(), -1.0), 0.0);
    assert_eq!(number_at_zoom(curve, 30.0), 100.0);
}

#[test]
fn exponential_curve_bends_below_linear() {
    let n = number_at_zoom(json!(["curve", ["exponential", 2], ["zoom"], 0, 0, 10, 100]), 5.0);
    assert!(n < 50.0);
    assert!((n - 100.0 * 31.0 / 1023.0).abs() < 1e-9);

    let linear = number_at_zoom(json!(["curve", ["exponential", 1], ["zoom"], 0, 0, 10, 100]), 2.5);
    assert_eq!(linear, 25.0);
}

#[test]
fn step_curve_accepts_any_output_type() {
    let curve = json!(["curve", ["step"], ["zoom"], 0, "a", 10, "b"]);
    assert_eq!(at_zoom(curve.clone(), None, 9.0), Value::from("a"));
    assert_eq!(at_zoom(curve, None, 10.0), Value::from("b"));
}

#[test]
fn color_outputs_blend() {
    let v = at_zoom(
        json!(["curve", ["linear"], ["zoom"], 0, "black", 10, "white"]),
        Some(Type::Color),
        5.0,
    );
    assert_eq!(v, Value::Color(Color::rgba(0.5, 0.5, 0.5, 1.0)));
}

#[test]
fn labels_must_be_literal_and_strictly_ascending() {
    let (key, message) = single_error(json!(["curve", ["linear"], ["zoom"], 10, 0, 5, 1]));
    assert_eq!(key, "5");
    assert!(message.contains("strictly ascending order"));

    let (key, _) = single_error(json!(["curve", ["linear"], ["zoom"], 5, 0, 5, 1]));
    assert_eq!(key, "5");

    let (key, message) = single_error(json!(["curve", ["step"], ["zoom"], ["+", 1, 1], 0, 5, 1]));
    assert_eq!(key, "3");
    assert!(message.ends_with("but found array instead."));
}

#[test]
fn arguments_come_in_pairs() {
    let (_, message) = single_error(json!(["curve", ["linear"], ["zoom"], 0]));
    assert_eq!(message, "Expected at least 4 arguments, but found only 3.");
    let (_, message) = single_error(json!(["curve", ["linear"], ["zoom"], 0, 1, 2]));
    assert_eq!(message, "Expected an even number of arguments.");
}

#[test]
fn non_step_output_must_be_interpolatable() {
    let (key, message) = single_error(json!(["curve", ["linear"], ["zoom"], 0, "a", 10, "b"]));
    assert_eq!(key, "");
    assert_eq!(
        message,
        "Type String is not interpolatable, and thus cannot be used as a linear curve's output type."
    );
}

#[test]
fn interpolation_descriptor_is_validated() {
    let (key, message) = single_error(json!(["curve", ["bounce"], ["zoom"], 0, 0, 1, 1]));
    assert_eq!(key, "1.0");
    assert_eq!(message, r#"Unknown interpolation type "bounce""#);

    let (key, _) = single_error(json!(["curve", ["exponential"], ["zoom"], 0, 0, 1, 1]));
    assert_eq!(key, "1.1");

    let (key, _) = single_error(json!(["curve", ["cubic-bezier", 0, 0, 1.5, 1], ["zoom"], 0, 0, 1, 1]));
    assert_eq!(key, "1");
}

#[test]
fn exposes_stops_and_round_trips() {
    let wire = json!(["curve", ["cubic-bezier", 0.25, 0, 0.75, 1], ["zoom"], 0, 1, 22, 10]);
    let c = compile_expression(&wire, None).unwrap();
    let Expression::Curve(curve) = c.expression() else {
        panic!("expected curve");
    };
    assert_eq!(curve.labels(), &[0.0, 22.0]);
    assert!(curve.input().is_compound("zoom"));
    assert_eq!(curve.interpolation().name(), "cubic-bezier");
    assert_eq!(c.serialize(), wire);
}
