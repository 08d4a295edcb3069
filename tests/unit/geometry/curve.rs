use super::*;

fn area() -> CurveArea {
    CurveArea {
        width: 50.0,
        height: 20.0,
        pad_x: 0.0,
    }
}

fn pts(raw: &[(f64, f64)]) -> Vec<CurvePoint> {
    raw.iter().map(|&(x, y)| CurvePoint::new(x, y)).collect()
}

#[test]
fn four_points_make_a_cubic_through_its_endpoints() {
    let path = TimelinePath::from_control_points(
        &pts(&[(0.0, 0.5), (0.33, 0.3), (0.67, 0.7), (1.0, 0.5)]),
        area(),
    )
    .unwrap();
    assert!(matches!(path, TimelinePath::Cubic(_)));
    let start = path.eval(0.0);
    let end = path.eval(1.0);
    assert!((start.point - Point::new(0.0, 10.0)).hypot() < 1e-9);
    assert!((end.point - Point::new(50.0, 10.0)).hypot() < 1e-9);
}

#[test]
fn cubic_point_matches_closed_form() {
    let path = TimelinePath::from_control_points(
        &pts(&[(0.0, 0.5), (0.33, 0.3), (0.67, 0.7), (1.0, 0.5)]),
        area(),
    )
    .unwrap();
    let t: f64 = 0.3;
    let mt = 1.0 - t;
    let p = [(0.0, 10.0), (16.5, 6.0), (33.5, 14.0), (50.0, 10.0)];
    let x = mt.powi(3) * p[0].0 + 3.0 * mt * mt * t * p[1].0 + 3.0 * mt * t * t * p[2].0
        + t.powi(3) * p[3].0;
    let y = mt.powi(3) * p[0].1 + 3.0 * mt * mt * t * p[1].1 + 3.0 * mt * t * t * p[2].1
        + t.powi(3) * p[3].1;
    let dx = -3.0 * mt * mt * p[0].0 + 3.0 * mt * mt * p[1].0 - 6.0 * mt * t * p[1].0
        + 6.0 * mt * t * p[2].0
        - 3.0 * t * t * p[2].0
        + 3.0 * t * t * p[3].0;
    let dy = -3.0 * mt * mt * p[0].1 + 3.0 * mt * mt * p[1].1 - 6.0 * mt * t * p[1].1
        + 6.0 * mt * t * p[2].1
        - 3.0 * t * t * p[2].1
        + 3.0 * t * t * p[3].1;
    let s = path.eval(t);
    assert!((s.point.x - x).abs() < 1e-9);
    assert!((s.point.y - y).abs() < 1e-9);
    assert!((s.angle - dy.atan2(dx)).abs() < 1e-9);
}

#[test]
fn polyline_maps_t_onto_segments() {
    let path =
        TimelinePath::from_control_points(&pts(&[(0.0, 0.5), (0.5, 0.0), (1.0, 0.5)]), area())
            .unwrap();
    assert!(matches!(path, TimelinePath::Polyline(_)));
    let mid_first = path.eval(0.25);
    assert!((mid_first.point - Point::new(12.5, 5.0)).hypot() < 1e-9);
    assert!((mid_first.angle - (-10.0f64).atan2(25.0)).abs() < 1e-9);

    let end = path.eval(1.0);
    assert!((end.point - Point::new(50.0, 10.0)).hypot() < 1e-9);
    assert!((end.angle - 10.0f64.atan2(25.0)).abs() < 1e-9);
}

#[test]
fn fewer_than_two_points_is_no_path() {
    assert!(TimelinePath::from_control_points(&pts(&[(0.0, 0.5)]), area()).is_none());
}

#[test]
fn padding_shrinks_the_horizontal_extent() {
    let a = CurveArea {
        width: 50.0,
        height: 20.0,
        pad_x: 5.0,
    };
    assert_eq!(a.scale(CurvePoint::new(0.0, 0.5)), Point::new(5.0, 10.0));
    assert_eq!(a.scale(CurvePoint::new(1.0, 0.0)), Point::new(45.0, 0.0));
}

#[test]
fn out_of_range_t_is_clamped() {
    let path =
        TimelinePath::from_control_points(&pts(&[(0.0, 0.5), (1.0, 0.5)]), area()).unwrap();
    assert_eq!(path.eval(-3.0).point, Point::new(0.0, 10.0));
    assert_eq!(path.eval(7.0).point, Point::new(50.0, 10.0));
    assert_eq!(path.eval(f64::NAN).point, Point::new(0.0, 10.0));
}

#[test]
fn normal_points_below_a_rightward_tangent() {
    let s = CurveSample {
        point: Point::ZERO,
        angle: 0.0,
    };
    assert!((s.normal().y - 1.0).abs() < 1e-12);
    assert!(s.tangent().x > 0.99);
}

#[test]
fn bez_path_has_one_segment_per_span() {
    let path = TimelinePath::from_control_points(
        &pts(&[(0.0, 0.5), (0.3, 0.2), (0.6, 0.8), (0.8, 0.1), (1.0, 0.5)]),
        area(),
    )
    .unwrap();
    assert_eq!(path.to_bez_path().segments().count(), 4);
}

#[test]
fn degenerate_polylines_evaluate_without_panicking() {
    let empty = TimelinePath::Polyline(Vec::new()).eval(0.5);
    assert_eq!(empty.point, Point::ORIGIN);
    assert_eq!(empty.angle, 0.0);

    let single = TimelinePath::Polyline(vec![Point::new(1.0, 2.0)]);
    for t in [0.0, 0.5, 1.0] {
        let s = single.eval(t);
        assert_eq!(s.point, Point::new(1.0, 2.0));
        assert_eq!(s.angle, 0.0);
    }
}
