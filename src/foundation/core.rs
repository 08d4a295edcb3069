use crate::foundation::error::{BubblelineError, BubblelineResult};

pub use kurbo::{BezPath, CubicBez, Line, Point, Rect, Vec2};

/// Distances below this are treated as zero by the geometry code.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Visible region of the canvas in canvas units (`min_x min_y width height`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(width: f64, height: f64) -> BubblelineResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(BubblelineError::validation(
                "viewbox width and height must be finite and > 0",
            ));
        }
        Ok(Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        })
    }

    /// Trims `top`/`bottom` fractions off the height. A crop that would leave no height is ignored.
    pub fn crop_vertical(self, top: f64, bottom: f64) -> Self {
        let height = self.height * (1.0 - top - bottom);
        if height <= 0.0 {
            return self;
        }
        Self {
            y: self.y + self.height * top,
            height,
            ..self
        }
    }

    /// Trims `left`/`right` fractions off the width. A crop that would leave no width is ignored.
    pub fn crop_horizontal(self, left: f64, right: f64) -> Self {
        let width = self.width * (1.0 - left - right);
        if width <= 0.0 {
            return self;
        }
        Self {
            x: self.x + self.width * left,
            width,
            ..self
        }
    }

    pub fn to_attr(self) -> String {
        format!("{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
