use crate::foundation::core::{Line, Point, Vec2};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Line {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Line::new(
            <Point as Lerp>::lerp(&a.p0, &b.p0, t),
            <Point as Lerp>::lerp(&a.p1, &b.p1, t),
        )
    }
}

/// Rounds `v` to the nearest multiple of `step` (e.g. `0.1`).
///
/// Scales by the reciprocal so decimal steps give the closest `f64` (`12.3`, not `12.300000000000001`).
pub fn round_to(v: f64, step: f64) -> f64 {
    let inv = 1.0 / step;
    (v * inv).round() / inv
}

/// True when every coordinate of `a` and `b` differs by at most `tol`.
pub fn points_close(a: Point, b: Point, tol: f64) -> bool {
    (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
