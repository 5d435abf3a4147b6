use super::*;

#[test]
fn display_names() {
    assert_eq!(Type::Number.to_string(), "Number");
    assert_eq!(Type::any_array().to_string(), "Array");
    assert_eq!(Type::array(Type::String, None).to_string(), "Array<String>");
    assert_eq!(
        Type::array(Type::Number, Some(3)).to_string(),
        "Array<Number, 3>"
    );
    assert_eq!(
        Type::array(Type::Value, Some(2)).to_string(),
        "Array<Value, 2>"
    );
}

#[test]
fn parse_type_accepts_display_names() {
    for ty in [
        Type::Null,
        Type::Boolean,
        Type::Color,
        Type::Object,
        Type::Value,
        Type::any_array(),
        Type::array(Type::Number, Some(4)),
        Type::array(Type::array(Type::String, Some(2)), None),
    ] {
        assert_eq!(parse_type(&ty.name()), Some(ty.clone()), "{ty}");
    }
    assert_eq!(parse_type("Array<Number,2>"), Some(Type::array(Type::Number, Some(2))));
    assert_eq!(parse_type("Array<Number, -1>"), None);
    assert_eq!(parse_type("Integer"), None);
    assert_eq!(parse_type("Array<Number"), None);
}

#[test]
fn value_matches_everything() {
    assert!(matches(&Type::Value, &Type::Null));
    assert!(matches(&Type::Value, &Type::array(Type::Color, None)));
    assert!(!matches(&Type::Number, &Type::Value));
}

#[test]
fn primitives_match_by_name() {
    assert!(matches(&Type::String, &Type::String));
    assert!(!matches(&Type::String, &Type::Number));
    assert!(!matches(&Type::Object, &Type::any_array()));
}

#[test]
fn arrays_match_items_and_lengths() {
    let n3 = Type::array(Type::Number, Some(3));
    let n = Type::array(Type::Number, None);
    assert!(matches(&n, &n3));
    assert!(matches(&n3, &n));
    assert!(!matches(&n3, &Type::array(Type::Number, Some(2))));
    assert!(!matches(&n, &Type::array(Type::String, None)));
    assert!(matches(&Type::any_array(), &n3));
}

#[test]
fn check_subtype_reports_both_types() {
    assert_eq!(check_subtype(&Type::Number, &Type::Number), None);
    assert_eq!(
        check_subtype(&Type::Number, &Type::String).as_deref(),
        Some("Expected Number but found String instead.")
    );
}
