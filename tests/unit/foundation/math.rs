use super::*;

#[test]
fn line_lerp_moves_both_endpoints() {
    let a = Line::new((0.0, 0.0), (1.0, 1.0));
    let b = Line::new((2.0, 0.0), (1.0, 3.0));
    let mid = <Line as Lerp>::lerp(&a, &b, 0.5);
    assert_eq!(mid.p0, Point::new(1.0, 0.0));
    assert_eq!(mid.p1, Point::new(1.0, 2.0));
}

#[test]
fn round_to_tenths_and_hundredths() {
    assert!((round_to(3.14159, 0.1) - 3.1).abs() < 1e-12);
    assert!((round_to(0.456, 0.01) - 0.46).abs() < 1e-12);
    assert!((round_to(-1.04, 0.1) - -1.0).abs() < 1e-12);
    assert_eq!(round_to(12.34, 0.1), 12.3);
}

#[test]
fn points_close_uses_per_axis_tolerance() {
    assert!(points_close(Point::new(1.0, 1.0), Point::new(1.005, 0.995), 0.01));
    assert!(!points_close(Point::new(1.0, 1.0), Point::new(1.02, 1.0), 0.01));
}
