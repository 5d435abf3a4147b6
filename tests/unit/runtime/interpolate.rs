use super::*;

#[test]
fn default_registry_supports_numbers_colors_numeric_arrays() {
    let r = Interpolators::default();
    assert!(r.supports(&Type::Number));
    assert!(r.supports(&Type::Color));
    assert!(r.supports(&Type::array(Type::Number, Some(2))));
    assert!(!r.supports(&Type::array(Type::String, None)));
    assert!(!r.supports(&Type::String));
    assert!(!Interpolators::empty().supports(&Type::Number));
}

#[test]
fn numbers_and_colors_blend_linearly() {
    let r = Interpolators::default();
    assert_eq!(
        r.interpolate(&Type::Number, &Value::Number(0.0), &Value::Number(10.0), 0.25)
            .unwrap(),
        Value::Number(2.5)
    );
    assert_eq!(
        r.interpolate(
            &Type::Color,
            &Value::Color(Color::BLACK),
            &Value::Color(Color::WHITE),
            0.5
        )
        .unwrap(),
        Value::Color(Color::rgba(0.5, 0.5, 0.5, 1.0))
    );
}

#[test]
fn arrays_blend_per_item_and_require_equal_lengths() {
    let r = Interpolators::default();
    let ty = Type::array(Type::Number, None);
    let a = Value::Array(vec![Value::Number(0.0), Value::Number(2.0)]);
    let b = Value::Array(vec![Value::Number(10.0), Value::Number(4.0)]);
    assert_eq!(
        r.interpolate(&ty, &a, &b, 0.5).unwrap(),
        Value::Array(vec![Value::Number(5.0), Value::Number(3.0)])
    );
    let short = Value::Array(vec![Value::Number(1.0)]);
    assert!(r.interpolate(&ty, &a, &short, 0.5).is_err());
}

#[test]
fn registered_interpolators_are_used() {
    fn pick_upper(_: &Value, b: &Value, _: f64) -> EvalResult<Value> {
        Ok(b.clone())
    }
    let mut r = Interpolators::empty();
    r.register("String", pick_upper);
    assert!(r.supports(&Type::String));
    assert_eq!(
        r.interpolate(&Type::String, &Value::from("a"), &Value::from("b"), 0.1)
            .unwrap(),
        Value::from("b")
    );
    assert!(
        r.interpolate(&Type::Number, &Value::Number(0.0), &Value::Number(1.0), 0.5)
            .is_err()
    );
}
