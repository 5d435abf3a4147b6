use super::*;
use crate::foundation::error::EvalError;

fn eval(labels: &[f64], outputs: &[f64], interpolation: Interpolation, input: f64) -> Value {
    let runtime = Runtime::default();
    evaluate_curve(
        &runtime,
        input,
        labels,
        &interpolation,
        &Type::Number,
        |i| Ok(Value::Number(outputs[i])),
    )
    .unwrap()
}

#[test]
fn interpolation_factor_linear_and_exponential() {
    assert_eq!(interpolation_factor(5.0, 1.0, 0.0, 10.0), 0.5);
    assert_eq!(interpolation_factor(1.0, 2.0, 0.0, 2.0), 1.0 / 3.0);
    assert_eq!(interpolation_factor(3.0, 2.0, 3.0, 3.0), 0.0);
}

#[test]
fn finds_last_stop_at_or_below_input() {
    let labels = [0.0, 10.0, 20.0];
    assert_eq!(find_stop_less_than_or_equal(&labels, 10.0), 1);
    assert_eq!(find_stop_less_than_or_equal(&labels, 15.0), 1);
    assert_eq!(find_stop_less_than_or_equal(&labels, -5.0), 0);
    assert_eq!(find_stop_less_than_or_equal(&labels, 25.0), 2);
}

#[test]
fn clamps_outside_label_range() {
    let labels = [0.0, 10.0];
    let outputs = [1.0, 2.0];
    assert_eq!(eval(&labels, &outputs, Interpolation::Linear, -3.0), Value::Number(1.0));
    assert_eq!(eval(&labels, &outputs, Interpolation::Linear, 30.0), Value::Number(2.0));
}

#[test]
fn step_holds_lower_output() {
    let labels = [0.0, 10.0, 20.0];
    let outputs = [1.0, 2.0, 3.0];
    assert_eq!(eval(&labels, &outputs, Interpolation::Step, 9.9), Value::Number(1.0));
    assert_eq!(eval(&labels, &outputs, Interpolation::Step, 10.0), Value::Number(2.0));
}

#[test]
fn linear_and_exponential_blend() {
    let labels = [0.0, 10.0];
    let outputs = [0.0, 100.0];
    assert_eq!(eval(&labels, &outputs, Interpolation::Linear, 2.5), Value::Number(25.0));
    let Value::Number(n) = eval(&labels, &outputs, Interpolation::Exponential { base: 2.0 }, 5.0)
    else {
        panic!("expected a number");
    };
    assert!((n - 100.0 * 31.0 / 1023.0).abs() < 1e-9);
}

#[test]
fn cubic_bezier_uses_cached_easing() {
    let runtime = Runtime::default();
    let interpolation = Interpolation::CubicBezier {
        control_points: [0.0, 0.0, 1.0, 1.0],
    };
    let out = evaluate_curve(
        &runtime,
        5.0,
        &[0.0, 10.0],
        &interpolation,
        &Type::Number,
        |i| Ok(Value::Number([0.0, 10.0][i])),
    )
    .unwrap();
    let Value::Number(n) = out else {
        panic!("expected a number");
    };
    assert!((n - 5.0).abs() < 1e-4);
    assert_eq!(runtime.bezier.len(), 1);
}

#[test]
fn empty_curve_is_null_and_outputs_are_lazy() {
    let runtime = Runtime::default();
    let out = evaluate_curve(
        &runtime,
        1.0,
        &[],
        &Interpolation::Linear,
        &Type::Number,
        |_| Err(EvalError::new("unreachable")),
    );
    assert_eq!(out.unwrap(), Value::Null);

    let mut evaluated = Vec::new();
    evaluate_curve(
        &runtime,
        15.0,
        &[0.0, 10.0, 20.0, 30.0],
        &Interpolation::Linear,
        &Type::Number,
        |i| {
            evaluated.push(i);
            Ok(Value::Number(i as f64))
        },
    )
    .unwrap();
    assert_eq!(evaluated, vec![1, 2]);
}

#[test]
fn wire_form_of_interpolations() {
    assert_eq!(Interpolation::Step.to_json(), serde_json::json!(["step"]));
    assert_eq!(
        Interpolation::Exponential { base: 1.5 }.to_json(),
        serde_json::json!(["exponential", 1.5])
    );
    assert_eq!(
        Interpolation::CubicBezier {
            control_points: [0.0, 0.5, 1.0, 1.0]
        }
        .to_json(),
        serde_json::json!(["cubic-bezier", 0, 0.5, 1, 1])
    );
}
