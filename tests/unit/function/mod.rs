use super::*;

use crate::compile::compile_expression;
use crate::foundation::color::Color;
use crate::value::properties_from_json;

fn number_spec(default: Option<Json>) -> PropertySpec {
    PropertySpec::Number { default }
}

fn config_message(definition: Json) -> String {
    match create_function(&definition, &number_spec(None)) {
        Err(StyleError::Config(msg)) => msg,
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[test]
fn recognizes_function_definitions() {
    assert!(is_function_definition(&json!({"expression": ["zoom"]})));
    assert!(is_function_definition(&json!({"stops": []})));
    assert!(is_function_definition(&json!({"type": "identity", "property": "x"})));
    assert!(!is_function_definition(&json!(5)));
    assert!(!is_function_definition(&json!("red")));
    assert!(!is_function_definition(&json!({"expression": null})));
}

#[test]
fn constants_compile_to_constant_functions() {
    let spec = PropertySpec::Color { default: None };
    let f = create_function(&json!("red"), &spec).unwrap();
    assert!(f.is_feature_constant());
    assert!(f.is_zoom_constant());
    assert_eq!(f.zoom_stops(), None);
    assert_eq!(f.interpolation_t(3.0).unwrap(), None);
    assert_eq!(
        f.evaluate(0.0, &Properties::new()).unwrap(),
        Some(Value::Color(Color::rgba(1.0, 0.0, 0.0, 1.0)))
    );
}

#[test]
fn expressions_fall_back_to_the_declared_default() {
    let def = json!({"expression": ["get", "w"]});
    let f = create_function(&def, &number_spec(Some(json!(1)))).unwrap();
    assert!(!f.is_feature_constant());
    assert_eq!(
        f.evaluate(0.0, &Properties::new()).unwrap(),
        Some(Value::Number(1.0))
    );
    let props = properties_from_json(&json!({"w": 3}));
    assert_eq!(f.evaluate(0.0, &props).unwrap(), Some(Value::Number(3.0)));

    let f = create_function(&def, &number_spec(None)).unwrap();
    assert_eq!(f.evaluate(0.0, &Properties::new()).unwrap(), None);
}

#[test]
fn zoom_curve_exposes_stops_and_interpolation_t() {
    let def = json!({"expression": ["coalesce", ["curve", ["linear"], ["zoom"], 0, 1, 22, 10], null]});
    let f = create_function(&def, &number_spec(None)).unwrap();
    assert!(!f.is_zoom_constant());
    assert!(f.is_feature_constant());
    assert_eq!(f.zoom_stops(), Some(&[0.0, 22.0][..]));
    assert_eq!(f.interpolation_t(11.0).unwrap(), Some(0.5));
    assert_eq!(f.interpolation_t(-4.0).unwrap(), Some(0.0));
    assert_eq!(f.interpolation_t(40.0).unwrap(), Some(1.0));
}

#[test]
fn step_zoom_curve_interpolation_t_is_the_stop_index() {
    let def = json!({"expression": ["curve", ["step"], ["zoom"], 0, "a", 10, "b", 20, "c"]});
    let f = create_function(&def, &PropertySpec::String { default: None }).unwrap();
    assert_eq!(f.zoom_stops(), Some(&[0.0, 10.0, 20.0][..]));
    assert_eq!(f.interpolation_t(15.0).unwrap(), Some(1.0));
    assert_eq!(f.evaluate(15.0, &Properties::new()).unwrap(), Some(Value::from("b")));
}

#[test]
fn legacy_functions_compile() {
    let f = create_function(&json!({"stops": [[0, 1], [10, 5]]}), &number_spec(None)).unwrap();
    assert_eq!(f.evaluate(5.0, &Properties::new()).unwrap(), Some(Value::Number(3.0)));
    assert_eq!(f.zoom_stops(), Some(&[0.0, 10.0][..]));

    let def = json!({
        "property": "w",
        "stops": [
            [{"zoom": 0, "value": 0}, 0],
            [{"zoom": 0, "value": 10}, 10],
            [{"zoom": 10, "value": 0}, 100],
            [{"zoom": 10, "value": 10}, 200]
        ]
    });
    let f = create_function(&def, &number_spec(None)).unwrap();
    assert!(!f.is_feature_constant());
    assert!(!f.is_zoom_constant());
    let props = properties_from_json(&json!({"w": 5}));
    assert_eq!(f.evaluate(5.0, &props).unwrap(), Some(Value::Number(77.5)));
}

#[test]
fn at_most_one_zoom_curve() {
    let msg = config_message(json!({"expression": [
        "coalesce",
        ["curve", ["linear"], ["zoom"], 0, 1, 10, 2],
        ["curve", ["linear"], ["zoom"], 0, 3, 10, 4]
    ]}));
    assert!(msg.contains("Only one zoom-based curve may be used in a style function."));
}

#[test]
fn zoom_must_feed_a_top_level_curve() {
    let msg = config_message(json!({"expression": [
        "curve", ["linear"], ["+", ["zoom"], 1], 0, 0, 10, 10
    ]}));
    assert_eq!(msg, "Invalid zoom expression");

    let msg = config_message(json!({"expression": ["*", ["zoom"], 2]}));
    assert_eq!(msg, "Invalid zoom expression");
}

#[test]
fn parse_failures_surface_as_parse_errors() {
    let err = create_function(&json!({"expression": ["nope"]}), &number_spec(None)).unwrap_err();
    let StyleError::Parse(errors) = err else {
        panic!("expected parse errors");
    };
    assert!(errors.mentions(r#"Unknown expression "nope""#));
}

#[test]
fn finds_zoom_curve_through_let_and_coalesce() {
    let c = compile_expression(
        &json!(["let", "a", 1, ["coalesce", null, ["curve", ["linear"], ["zoom"], 0, 0, 1, 1]]]),
        None,
    )
    .unwrap();
    let curve = find_zoom_curve(c.expression()).unwrap().unwrap();
    assert_eq!(curve.labels(), &[0.0, 1.0]);

    let c = compile_expression(&json!(["+", 1, 2]), None).unwrap();
    assert!(find_zoom_curve(c.expression()).unwrap().is_none());
}
