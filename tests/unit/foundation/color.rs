use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn hex_forms_parse() {
    assert_eq!(parse_css_color("#ff0000"), Some(Color::rgba(1.0, 0.0, 0.0, 1.0)));
    assert_eq!(parse_css_color("#F00"), Some(Color::rgba(1.0, 0.0, 0.0, 1.0)));
    let c = parse_css_color("#00000080").unwrap();
    assert!(approx(c.a, 128.0 / 255.0));
    let c = parse_css_color("#0f08").unwrap();
    assert!(approx(c.g, 1.0) && approx(c.a, 136.0 / 255.0));
    assert_eq!(parse_css_color("#12345"), None);
    assert_eq!(parse_css_color("#gggggg"), None);
}

#[test]
fn functional_forms_parse() {
    let c = parse_css_color("rgba(255, 128, 0, 0.5)").unwrap();
    assert!(approx(c.r, 1.0) && approx(c.g, 128.0 / 255.0) && approx(c.a, 0.5));
    let c = parse_css_color("rgb(100%, 0%, 50%)").unwrap();
    assert!(approx(c.r, 1.0) && approx(c.b, 0.5));
    let c = parse_css_color("hsl(120, 100%, 50%)").unwrap();
    assert!(approx(c.r, 0.0) && approx(c.g, 1.0) && approx(c.b, 0.0));
    let c = parse_css_color("hsla(0, 0%, 50%, 0.25)").unwrap();
    assert!(approx(c.r, 0.5) && approx(c.a, 0.25));
    assert_eq!(parse_css_color("rgb(1, 2)"), None);
}

#[test]
fn named_colors_parse_case_insensitively() {
    assert_eq!(parse_css_color("White"), Some(Color::WHITE));
    assert_eq!(parse_css_color("transparent"), Some(Color::TRANSPARENT));
    assert_eq!(parse_css_color("not-a-color"), None);
}

#[test]
fn validity_requires_unit_channels() {
    assert!(Color::BLACK.is_valid());
    assert!(!Color::rgba(1.5, 0.0, 0.0, 1.0).is_valid());
    assert!(!Color::rgba(f64::NAN, 0.0, 0.0, 1.0).is_valid());
}

#[test]
fn wire_and_display_use_byte_scale() {
    let c = Color::rgba(1.0, 0.5, 0.0, 0.5);
    assert_eq!(c.to_wire(), [255.0, 127.5, 0.0, 0.5]);
    assert_eq!(c.to_string(), "rgba(255, 128, 0, 0.5)");
}

#[test]
fn lerp_blends_each_channel() {
    let mid = Color::lerp(&Color::BLACK, &Color::WHITE, 0.5);
    assert_eq!(mid, Color::rgba(0.5, 0.5, 0.5, 1.0));
}
