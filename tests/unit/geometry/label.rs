use super::*;

#[test]
fn estimate_uses_longest_line_and_line_count() {
    let b = LabelBox::estimate("Needs Assessment\nFeedback", 0.3);
    assert_eq!(b.line_count, 2);
    assert!((b.half_width - 16.0 * 0.3 * 0.6 / 2.0).abs() < 1e-12);
    assert!((b.half_height - 2.0 * 0.3 * 1.2 / 2.0).abs() < 1e-12);
}

#[test]
fn empty_label_still_has_one_line() {
    let b = LabelBox::estimate("", 0.4);
    assert_eq!(b.line_count, 1);
    assert_eq!(b.half_width, 0.0);
    assert!(b.half_height > 0.0);
}

#[test]
fn exit_distance_picks_the_edge_hit_first() {
    let b = LabelBox {
        half_width: 2.0,
        half_height: 0.5,
        line_count: 1,
    };
    assert!((b.exit_distance(Vec2::new(0.0, 1.0)) - 0.5).abs() < 1e-12);
    assert!((b.exit_distance(Vec2::new(-3.0, 0.0)) - 2.0).abs() < 1e-12);
    let diag = b.exit_distance(Vec2::new(1.0, 1.0));
    assert!((diag - 0.5 * 2f64.sqrt()).abs() < 1e-12);
    assert_eq!(b.exit_distance(Vec2::ZERO), 0.0);
}

#[test]
fn vertical_connector_stops_at_box_top_plus_padding() {
    let b = LabelBox::estimate("Intro Meeting", 0.3);
    let start = Point::new(2.0, 7.0);
    let label = Point::new(2.0, 0.0);
    let end = shrink_connector(start, label, &b, 0.1);
    assert!((end.x - 2.0).abs() < 1e-12);
    assert!((end.y - (b.half_height + 0.1)).abs() < 1e-9);
}

#[test]
fn shrink_never_crosses_back_past_start() {
    let b = LabelBox::estimate("A very very long label", 0.8);
    let start = Point::new(0.0, 0.0);
    let label = Point::new(0.5, 0.0);
    assert_eq!(shrink_connector(start, label, &b, 0.0), start);
}

#[test]
fn zero_length_connector_is_not_nan() {
    let b = LabelBox::estimate("x", 0.3);
    let p = Point::new(3.0, 4.0);
    let end = shrink_connector(p, p, &b, 0.2);
    assert_eq!(end, p);
}

#[test]
fn baseline_shift_centers_multiline_blocks() {
    assert_eq!(baseline_shift(1, 0.3), 0.0);
    assert!((baseline_shift(3, 0.5) + 0.6).abs() < 1e-12);
}
