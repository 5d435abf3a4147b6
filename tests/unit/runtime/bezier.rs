use super::*;

#[test]
fn linear_control_points_are_identity() {
    let e = UnitBezier::new([0.0, 0.0, 1.0, 1.0]);
    for t in [0.0, 0.1, 0.5, 0.9, 1.0] {
        assert!((e.apply(t) - t).abs() < 1e-5, "t={t}");
    }
}

#[test]
fn ease_is_monotonic_and_clamped() {
    let e = UnitBezier::new([0.42, 0.0, 0.58, 1.0]);
    assert_eq!(e.apply(-1.0), 0.0);
    assert!((e.apply(2.0) - 1.0).abs() < 1e-9);
    assert!((e.apply(0.5) - 0.5).abs() < 1e-5);
    let mut prev = 0.0;
    for i in 1..=20 {
        let y = e.apply(f64::from(i) / 20.0);
        assert!(y >= prev);
        prev = y;
    }
    assert!(e.apply(0.25) < 0.25);
}

#[test]
fn cache_builds_each_easing_once() {
    let cache = BezierCache::default();
    assert!(cache.is_empty());
    let a = cache.easing([0.42, 0.0, 0.58, 1.0]);
    let b = cache.easing([0.42, 0.0, 0.58, 1.0]);
    assert_eq!(a, b);
    assert_eq!(cache.len(), 1);
    cache.easing([0.0, 0.0, 1.0, 1.0]);
    assert_eq!(cache.len(), 2);
}
