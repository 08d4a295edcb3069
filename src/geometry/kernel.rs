use std::f64::consts::FRAC_PI_2;

use crate::{
    composition::model::{MAX_STEP_SIZE, MIN_STEP_SIZE, Step, Task, TaskRole},
    composition::settings::RenderSettings,
    foundation::core::{BezPath, GEOMETRY_EPSILON, Line, Point, Vec2, ViewBox},
    geometry::curve::{CurveArea, CurveSample, TimelinePath},
    geometry::label::{LabelBox, shrink_connector},
};

pub const MIN_RADIUS: f64 = 0.5;
pub const MAX_RADIUS: f64 = 4.0;

/// Axis length of every projection, in canvas units.
pub const AXIS_LENGTH: f64 = 50.0;
/// Cross-axis extent before label headroom is added.
pub const MIN_CROSS_EXTENT: f64 = 10.0;
/// Label headroom per unit of label distance modifier.
pub const LABEL_SPACE: f64 = 10.0;

/// Bubble radius for a size level: `0.5` at size 1, `4.0` at size 100, linear in between.
pub fn bubble_radius(size: f64) -> f64 {
    let size = if size.is_nan() {
        MIN_STEP_SIZE
    } else {
        size.clamp(MIN_STEP_SIZE, MAX_STEP_SIZE)
    };
    MIN_RADIUS + (size - MIN_STEP_SIZE) / (MAX_STEP_SIZE - MIN_STEP_SIZE) * (MAX_RADIUS - MIN_RADIUS)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Mapping from step/task coordinates to canvas space.
pub enum Projection {
    LinearHorizontal,
    LinearVertical,
    CurvedHorizontal,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Orientation the host shows (its view toggle).
pub enum ViewMode {
    #[default]
    Horizontal,
    Vertical,
}

impl Projection {
    /// Horizontal views become curved when the settings enable a usable curve.
    pub fn resolve(view: ViewMode, settings: &RenderSettings) -> Self {
        match view {
            ViewMode::Vertical => Self::LinearVertical,
            ViewMode::Horizontal
                if settings.curve.curve_enabled && settings.curve.curve_points.len() >= 2 =>
            {
                Self::CurvedHorizontal
            }
            ViewMode::Horizontal => Self::LinearHorizontal,
        }
    }

    pub fn is_vertical(self) -> bool {
        self == Self::LinearVertical
    }

    pub fn view_mode(self) -> ViewMode {
        if self.is_vertical() {
            ViewMode::Vertical
        } else {
            ViewMode::Horizontal
        }
    }
}

/// The timeline axis as drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisShape {
    Line(Line),
    Path(BezPath),
}

/// Where a bubble sits, plus the local axis direction for curved projections.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubblePlacement {
    pub center: Point,
    pub radius: f64,
    /// Tangent angle of the curve at the bubble; `None` on straight axes.
    pub tangent_angle: Option<f64>,
}

/// Resolved coordinates for one task of one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaskGeometry {
    /// Connector start on the bubble boundary; also the indicator centroid.
    pub start: Point,
    /// Connector end after shrinking away from the label box.
    pub end: Point,
    /// Label anchor (center of the label block).
    pub label: Point,
    pub label_box: LabelBox,
}

/// Per-render layout of the axis: viewbox, centerline, padding and the curve, if any.
///
/// Everything here is derived from `(projection, settings)` and is immutable.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLayout {
    /// Effective projection; curved requests without a usable curve fall back to linear.
    pub projection: Projection,
    /// Uncropped viewbox.
    pub view_box: ViewBox,
    /// Cross-axis coordinate of a straight axis.
    pub centerline: f64,
    /// Axis padding at each end, in canvas units.
    pub padding: f64,
    /// Label distance multiplier for this orientation.
    pub label_distance: f64,
    pub path: Option<TimelinePath>,
}

impl AxisLayout {
    pub fn new(projection: Projection, settings: &RenderSettings) -> Self {
        let vertical = projection.is_vertical();
        let label_distance = settings.label_distance(vertical);
        let cross = MIN_CROSS_EXTENT + LABEL_SPACE * label_distance;
        let (width, height) = if vertical {
            (cross, AXIS_LENGTH)
        } else {
            (AXIS_LENGTH, cross)
        };
        let padding = AXIS_LENGTH * settings.timeline_padding / 100.0;
        let centerline = cross / 2.0;

        let path = match projection {
            Projection::CurvedHorizontal => TimelinePath::from_control_points(
                &settings.curve.curve_points,
                CurveArea {
                    width,
                    height,
                    pad_x: padding,
                },
            ),
            _ => None,
        };
        let projection = match (projection, &path) {
            (Projection::CurvedHorizontal, None) => {
                tracing::debug!("curved projection without a usable curve, using linear");
                Projection::LinearHorizontal
            }
            (p, _) => p,
        };

        Self {
            projection,
            view_box: ViewBox {
                x: 0.0,
                y: 0.0,
                width,
                height,
            },
            centerline,
            padding,
            label_distance,
            path,
        }
    }

    pub fn axis_shape(&self) -> AxisShape {
        if let Some(path) = &self.path {
            return AxisShape::Path(path.to_bez_path());
        }
        let (a, b) = (self.padding, AXIS_LENGTH - self.padding);
        if self.projection.is_vertical() {
            AxisShape::Line(Line::new((self.centerline, a), (self.centerline, b)))
        } else {
            AxisShape::Line(Line::new((a, self.centerline), (b, self.centerline)))
        }
    }

    /// Normalized curve parameter for an axis position, clamped to `[0, 1]`.
    pub fn curve_t(&self, x: f64) -> f64 {
        let span = AXIS_LENGTH - 2.0 * self.padding;
        if span <= GEOMETRY_EPSILON {
            return 0.0;
        }
        ((x - self.padding) / span).clamp(0.0, 1.0)
    }

    pub fn place_bubble(&self, step: &Step) -> BubblePlacement {
        let radius = bubble_radius(step.size);
        match (&self.path, self.projection) {
            (Some(path), _) => {
                let CurveSample { point, angle } = path.eval(self.curve_t(step.x));
                BubblePlacement {
                    center: point,
                    radius,
                    tangent_angle: Some(angle),
                }
            }
            (None, Projection::LinearVertical) => BubblePlacement {
                center: Point::new(self.centerline, step.x),
                radius,
                tangent_angle: None,
            },
            (None, _) => BubblePlacement {
                center: Point::new(step.x, self.centerline),
                radius,
                tangent_angle: None,
            },
        }
    }

    /// Label anchor for a task. Out-of-range values are used as given.
    pub fn label_position(
        &self,
        step: &Step,
        bubble: &BubblePlacement,
        role: TaskRole,
        task: &Task,
    ) -> Point {
        let offset = task.line_y * self.label_distance;
        match bubble.tangent_angle {
            Some(angle) => {
                let sample = CurveSample {
                    point: bubble.center,
                    angle,
                };
                let along = task.line_x - step.x;
                bubble.center + sample.tangent() * along + sample.normal() * offset
            }
            None if self.projection.is_vertical() => Point::new(
                self.centerline + role.side_sign() * task.line_y.abs() * self.label_distance,
                task.line_x,
            ),
            None => Point::new(task.line_x, self.centerline + offset),
        }
    }

    pub fn place_task(
        &self,
        step: &Step,
        bubble: &BubblePlacement,
        role: TaskRole,
        task: &Task,
        settings: &RenderSettings,
    ) -> TaskGeometry {
        let label = self.label_position(step, bubble, role, task);
        let anchor = task.clamped_anchor();
        let start = match bubble.tangent_angle {
            Some(angle) => {
                curved_anchor_point(bubble.center, bubble.radius, angle, role, label, anchor)
            }
            None => linear_anchor_point(
                bubble.center,
                bubble.radius,
                label,
                anchor,
                self.projection.is_vertical(),
            ),
        };
        let label_box = LabelBox::estimate(&task.label, task.font_size.size());
        let end = shrink_connector(start, label, &label_box, settings.connection_padding);
        TaskGeometry {
            start,
            end,
            label,
            label_box,
        }
    }
}

/// Connector start on a straight axis.
///
/// Without an anchor this is where the ray from the center to the label crosses the circle. A
/// non-zero anchor moves the point along the axis (x when horizontal, y when vertical) by
/// `anchor * radius`, then puts it back on the circle on the label's side.
pub fn linear_anchor_point(
    center: Point,
    radius: f64,
    label: Point,
    anchor: f64,
    vertical: bool,
) -> Point {
    let angle = (label.y - center.y).atan2(label.x - center.x);
    if anchor == 0.0 {
        return center + Vec2::from_angle(angle) * radius;
    }
    let shift = (anchor * radius).clamp(-radius, radius);
    let across = (radius * radius - shift * shift).max(0.0).sqrt();
    if vertical {
        let sign = if angle.cos() >= 0.0 { 1.0 } else { -1.0 };
        Point::new(center.x + sign * across, center.y + shift)
    } else {
        let sign = if angle.sin() >= 0.0 { 1.0 } else { -1.0 };
        Point::new(center.x + shift, center.y + sign * across)
    }
}

/// Connector start on a curved axis.
///
/// The base direction is the curve normal on the task's side. An anchor rotates away from it by
/// up to 90°. Without an anchor the point faces the label, unless the label sits on the wrong
/// half of the bubble, in which case it snaps to the base direction.
pub fn curved_anchor_point(
    center: Point,
    radius: f64,
    tangent_angle: f64,
    role: TaskRole,
    label: Point,
    anchor: f64,
) -> Point {
    let side = tangent_angle + FRAC_PI_2 * role.side_sign();
    let angle = if anchor != 0.0 {
        side + anchor * FRAC_PI_2
    } else {
        let to_label = label - center;
        if to_label.dot(Vec2::from_angle(side)) > 0.0 {
            to_label.y.atan2(to_label.x)
        } else {
            side
        }
    };
    center + Vec2::from_angle(angle) * radius
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/kernel.rs"]
mod tests;
