//! Label box estimation and connector shrinking.
//!
//! There is no text shaping here: a label's box is estimated from its longest line and line count
//! using fixed ratios of the font size.

use crate::foundation::core::{GEOMETRY_EPSILON, Point, Vec2};

/// Average glyph advance as a fraction of font size.
pub const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Line pitch as a fraction of font size.
pub const LINE_HEIGHT_RATIO: f64 = 1.2;

/// Axis-aligned label box, centered on the label anchor point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LabelBox {
    pub half_width: f64,
    pub half_height: f64,
    pub line_count: usize,
}

impl LabelBox {
    pub fn estimate(label: &str, font_size: f64) -> Self {
        let mut line_count = 0usize;
        let mut longest = 0usize;
        for line in label.split('\n') {
            line_count += 1;
            longest = longest.max(line.chars().count());
        }
        Self {
            half_width: longest as f64 * font_size * CHAR_WIDTH_RATIO / 2.0,
            half_height: line_count as f64 * font_size * LINE_HEIGHT_RATIO / 2.0,
            line_count,
        }
    }

    /// Distance from the box center to its edge along `dir` (need not be normalized).
    pub fn exit_distance(&self, dir: Vec2) -> f64 {
        let len = dir.hypot();
        if len < GEOMETRY_EPSILON {
            return 0.0;
        }
        let cos = (dir.x / len).abs();
        let sin = (dir.y / len).abs();
        // Leaves through a vertical edge when the ray is flatter than the box diagonal.
        if cos * self.half_height > sin * self.half_width {
            self.half_width / cos
        } else if sin > GEOMETRY_EPSILON {
            self.half_height / sin
        } else {
            0.0
        }
    }
}

/// Vertical shift that centers a multi-line label block on its anchor point.
pub fn baseline_shift(line_count: usize, font_size: f64) -> f64 {
    -(line_count.saturating_sub(1) as f64) * font_size * LINE_HEIGHT_RATIO / 2.0
}

/// Pulls the far end of the connector `start -> label` back so it stops `padding` short of the
/// label box. Never moves the end behind `start`; a zero-length connector is left as is.
pub fn shrink_connector(start: Point, label: Point, bbox: &LabelBox, padding: f64) -> Point {
    let d = label - start;
    let dist = d.hypot();
    if dist < GEOMETRY_EPSILON {
        return start;
    }
    let stop = bbox.exit_distance(-d) + padding;
    let factor = ((dist - stop) / dist).max(0.0);
    start + d * factor
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/label.rs"]
mod tests;
