use super::*;

#[test]
fn span_counts_gaps_between_items() {
    let s = Stagger::new(600.0, 80.0);
    assert_eq!(s.span(1), 600.0);
    assert_eq!(s.span(5), 600.0 + 4.0 * 80.0);
    assert_eq!(s.span(0), 600.0);
}

#[test]
fn progress_is_delayed_per_index() {
    let s = Stagger::new(100.0, 50.0);
    assert_eq!(s.progress(0, 50.0), 0.5);
    assert_eq!(s.progress(1, 50.0), 0.0);
    assert_eq!(s.progress(1, 100.0), 0.5);
    assert_eq!(s.progress(2, 10_000.0), 1.0);
}

#[test]
fn zero_duration_jumps_at_delay() {
    assert_eq!(local_progress(9.0, 10.0, 0.0), 0.0);
    assert_eq!(local_progress(10.0, 10.0, 0.0), 1.0);
}
