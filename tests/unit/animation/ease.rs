use super::*;

const ALL: [Ease; 5] = [
    Ease::Linear,
    Ease::InOutQuad,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::OutBack,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        if ease == Ease::OutBack {
            continue;
        }
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn out_back_overshoots() {
    assert!(Ease::OutBack.apply(0.8) > 1.0);
}

#[test]
fn in_out_quad_matches_piecewise_form() {
    for t in [0.1, 0.3, 0.6, 0.9] {
        let expected = if t < 0.5 { 2.0 * t * t } else { -1.0 + (4.0 - 2.0 * t) * t };
        assert!((Ease::InOutQuad.apply(t) - expected).abs() < 1e-12);
    }
}

#[test]
fn tokens_map_with_ease_out_fallback() {
    assert_eq!(Ease::from_token("linear"), Ease::Linear);
    assert_eq!(Ease::from_token("ease-in-out"), Ease::InOutCubic);
    assert_eq!(Ease::from_token("Ease-Out-Back"), Ease::OutBack);
    assert_eq!(Ease::from_token("ease-out"), Ease::OutCubic);
    assert_eq!(Ease::from_token("bouncy"), Ease::OutCubic);
}
