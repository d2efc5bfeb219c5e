use super::*;

fn rest() -> Dimensions {
    Dimensions::new(384, 512)
}

#[test]
fn curve_endpoints_match_start_and_zoom_factor() {
    let c = ZoomCurve::new(1.3, 10.0).unwrap();
    assert_eq!(c.scale_at(0.0), 1.0);
    assert!((c.scale_at(10.0) - 1.3).abs() < 1e-12);
    assert!((c.scale_at(5.0) - 1.15).abs() < 1e-12);
}

#[test]
fn curve_clamps_outside_duration() {
    let c = ZoomCurve::new(2.0, 4.0).unwrap();
    assert_eq!(c.scale_at(-1.0), 1.0);
    assert_eq!(c.scale_at(100.0), 2.0);
}

#[test]
fn curve_is_monotonic_in_zoom_direction() {
    for zoom in [1.0, 1.2, 2.5] {
        let c = ZoomCurve::new(zoom, 3.0).unwrap();
        let mut prev = c.scale_at(0.0);
        for i in 1..=30 {
            let v = c.scale_at(f64::from(i) * 0.1);
            assert!(v >= prev, "zoom {zoom} not non-decreasing at step {i}");
            prev = v;
        }
    }
    let c = ZoomCurve::new(0.6, 3.0).unwrap();
    let mut prev = c.scale_at(0.0);
    for i in 1..=30 {
        let v = c.scale_at(f64::from(i) * 0.1);
        assert!(v < prev);
        prev = v;
    }
}

#[test]
fn curve_rejects_degenerate_inputs() {
    assert!(ZoomCurve::new(1.2, 0.0).is_err());
    assert!(ZoomCurve::new(1.2, -1.0).is_err());
    assert!(ZoomCurve::new(1.2, f64::NAN).is_err());
    assert!(ZoomCurve::new(0.0, 1.0).is_err());
    assert!(ZoomCurve::new(f64::INFINITY, 1.0).is_err());
}

#[test]
fn prescale_normalization_gives_resting_size_at_start() {
    let a = AnimatedScale::new(rest(), ZoomCurve::new(1.4, 2.0).unwrap()).unwrap();
    assert_eq!(a.prescaled_size(), Dimensions::new(576, 768));
    assert!((a.prescaled_factor_at(0.0) - 1.0 / BASE_PRESCALE).abs() < 1e-12);
    assert!((a.effective_scale_at(0.0) - 1.0).abs() < 1e-12);
    assert!((a.effective_scale_at(2.0) - 1.4).abs() < 1e-12);

    let (w, h) = a.size_at(2.0);
    assert!((w - 384.0 * 1.4).abs() < 1e-9);
    assert!((h - 512.0 * 1.4).abs() < 1e-9);
}

#[test]
fn unit_zoom_is_constant() {
    let a = AnimatedScale::new(rest(), ZoomCurve::new(1.0, 2.0).unwrap()).unwrap();
    for t in [0.0, 0.5, 1.0, 1.99, 2.0] {
        let (w, h) = a.size_at(t);
        assert!((w - 384.0).abs() < 1e-9);
        assert!((h - 512.0).abs() < 1e-9);
    }
}

#[test]
fn transform_centres_the_foreground() {
    let canvas = Dimensions::new(512, 512);
    let a = AnimatedScale::new(rest(), ZoomCurve::new(2.0, 1.0).unwrap()).unwrap();
    let bitmap = a.prescaled_size();

    for t in [0.0, 0.25, 1.0] {
        let tr = a.transform_at(t, canvas);
        let tl = tr * kurbo::Point::new(0.0, 0.0);
        let br = tr * kurbo::Point::new(f64::from(bitmap.width), f64::from(bitmap.height));
        let (w, h) = a.size_at(t);
        assert!(((tl.x + br.x) / 2.0 - 256.0).abs() < 1e-9);
        assert!(((tl.y + br.y) / 2.0 - 256.0).abs() < 1e-9);
        assert!((br.x - tl.x - w).abs() < 1e-9);
        assert!((br.y - tl.y - h).abs() < 1e-9);
    }
}

#[test]
fn animated_scale_rejects_empty_rest_size() {
    let c = ZoomCurve::new(1.0, 1.0).unwrap();
    assert!(AnimatedScale::new(Dimensions::new(0, 10), c).is_err());
}
