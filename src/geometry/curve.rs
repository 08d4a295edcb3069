use kurbo::{ParamCurve, ParamCurveDeriv};

use crate::{
    composition::settings::CurvePoint,
    foundation::core::{BezPath, CubicBez, Point, Vec2},
};

/// Position and tangent direction at one parameter value along a [`TimelinePath`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSample {
    pub point: Point,
    /// Tangent angle in radians (`atan2(dy, dx)`).
    pub angle: f64,
}

impl CurveSample {
    pub fn tangent(self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Unit vector rotated +90° from the tangent (below a left-to-right curve).
    pub fn normal(self) -> Vec2 {
        Vec2::from_angle(self.angle + std::f64::consts::FRAC_PI_2)
    }
}

/// Drawing area that curve control fractions are scaled into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveArea {
    pub width: f64,
    pub height: f64,
    /// Horizontal axis padding in canvas units, applied on both ends.
    pub pad_x: f64,
}

impl CurveArea {
    pub fn scale(self, p: CurvePoint) -> Point {
        Point::new(
            self.pad_x + p.x * (self.width - 2.0 * self.pad_x),
            p.y * self.height,
        )
    }
}

/// Timeline path for curved projections.
///
/// Parameterised by raw `t`, not arc length: bubbles spaced evenly in `x` can bunch up along an
/// asymmetric cubic.
#[derive(Clone, Debug, PartialEq)]
pub enum TimelinePath {
    Cubic(CubicBez),
    Polyline(Vec<Point>),
}

impl TimelinePath {
    /// Exactly four control points give a cubic; two or more otherwise give a polyline.
    /// Returns `None` for fewer than two points.
    pub fn from_control_points(points: &[CurvePoint], area: CurveArea) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let scaled: Vec<Point> = points.iter().map(|p| area.scale(*p)).collect();
        if let [p0, p1, p2, p3] = scaled[..] {
            return Some(Self::Cubic(CubicBez::new(p0, p1, p2, p3)));
        }
        Some(Self::Polyline(scaled))
    }

    pub fn eval(&self, t: f64) -> CurveSample {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Self::Cubic(c) => {
                let d = c.deriv().eval(t);
                CurveSample {
                    point: c.eval(t),
                    angle: d.y.atan2(d.x),
                }
            }
            Self::Polyline(points) => eval_polyline(points, t),
        }
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        match self {
            Self::Cubic(c) => {
                path.move_to(c.p0);
                path.curve_to(c.p1, c.p2, c.p3);
            }
            Self::Polyline(points) => {
                let mut iter = points.iter();
                if let Some(first) = iter.next() {
                    path.move_to(*first);
                }
                for p in iter {
                    path.line_to(*p);
                }
            }
        }
        path
    }
}

fn eval_polyline(points: &[Point], t: f64) -> CurveSample {
    let segments = match points {
        [] => {
            return CurveSample {
                point: Point::ORIGIN,
                angle: 0.0,
            };
        }
        [only] => {
            return CurveSample {
                point: *only,
                angle: 0.0,
            };
        }
        _ => points.len() - 1,
    };
    let total = t * segments as f64;
    let idx = total.floor() as usize;
    if idx >= segments {
        let last = points[segments];
        let prev = points[segments - 1];
        return CurveSample {
            point: last,
            angle: (last.y - prev.y).atan2(last.x - prev.x),
        };
    }
    let local = total - idx as f64;
    let a = points[idx];
    let b = points[idx + 1];
    CurveSample {
        point: a.lerp(b, local),
        angle: (b.y - a.y).atan2(b.x - a.x),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/curve.rs"]
mod tests;
