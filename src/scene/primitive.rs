use std::fmt;

use crate::{
    composition::model::TaskRole,
    composition::settings::{BlendMode, IndicatorStyle},
    foundation::core::{Line, Point},
};

/// Resting opacity of a bubble.
pub const BUBBLE_OPACITY: f64 = 0.7;
/// Radius of the inner dot of a `circle-dot` indicator.
pub const INDICATOR_DOT_RADIUS: f64 = 0.1;
/// Half-diagonal of a diamond indicator, relative to the indicator size.
pub const DIAMOND_SCALE: f64 = 1.2;

/// Which task of which step a secondary primitive belongs to.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskRef {
    pub step_id: String,
    pub role: TaskRole,
    pub index: usize,
}

impl TaskRef {
    pub fn new(step_id: impl Into<String>, role: TaskRole, index: usize) -> Self {
        Self {
            step_id: step_id.into(),
            role,
            index,
        }
    }
}

impl fmt::Display for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.step_id, self.role, self.index)
    }
}

impl serde::Serialize for TaskRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Bubble,
    Line,
    Indicator,
    Label,
}

/// Stable identity of a primitive across renders.
///
/// Displays as `bubble_<step>` or `<kind>_<step>_<role>_<index>`, e.g. `line_s1_client_0`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveKey {
    Bubble(String),
    Line(TaskRef),
    Indicator(TaskRef),
    Label(TaskRef),
}

impl PrimitiveKey {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Bubble(_) => PrimitiveKind::Bubble,
            Self::Line(_) => PrimitiveKind::Line,
            Self::Indicator(_) => PrimitiveKind::Indicator,
            Self::Label(_) => PrimitiveKind::Label,
        }
    }

    pub fn step_id(&self) -> &str {
        match self {
            Self::Bubble(id) => id,
            Self::Line(t) | Self::Indicator(t) | Self::Label(t) => &t.step_id,
        }
    }

    pub fn task(&self) -> Option<&TaskRef> {
        match self {
            Self::Bubble(_) => None,
            Self::Line(t) | Self::Indicator(t) | Self::Label(t) => Some(t),
        }
    }
}

impl fmt::Display for PrimitiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, task) = match self {
            Self::Bubble(id) => return write!(f, "bubble_{id}"),
            Self::Line(t) => ("line", t),
            Self::Indicator(t) => ("ind", t),
            Self::Label(t) => ("label", t),
        };
        write!(f, "{prefix}_{task}")
    }
}

impl serde::Serialize for PrimitiveKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Bubble {
    pub center: Point,
    pub radius: f64,
    pub fill: String,
    pub opacity: f64,
    pub blend: BlendMode,
    /// Phase key, kept for host styling hooks.
    pub phase: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ConnectorLine {
    pub line: Line,
    pub stroke: String,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Marker at the connector start. Never carries [`IndicatorStyle::None`].
pub struct Indicator {
    pub center: Point,
    pub style: IndicatorStyle,
    pub size: f64,
    pub color: String,
    pub stroke_width: f64,
}

impl Indicator {
    /// Diamond corners, clockwise from the top.
    pub fn diamond_points(&self) -> [Point; 4] {
        let s = self.size * DIAMOND_SCALE;
        let Point { x, y } = self.center;
        [
            Point::new(x, y - s),
            Point::new(x + s, y),
            Point::new(x, y + s),
            Point::new(x - s, y),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Center-anchored text block.
pub struct Label {
    pub anchor: Point,
    pub lines: Vec<String>,
    pub font_size: f64,
    pub font_weight: u16,
    pub fill: String,
    pub font_family: String,
    /// Vertical shift that centers multi-line blocks on `anchor`; `0` for one line.
    pub baseline_shift: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Bubble(Bubble),
    Line(ConnectorLine),
    Indicator(Indicator),
    Label(Label),
}

/// One drawable entity of a scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Primitive {
    pub key: PrimitiveKey,
    #[serde(flatten)]
    pub shape: Shape,
}

/// Numeric attributes that transitions interpolate.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Attributes {
    Circle { center: Point, radius: f64 },
    Segment { line: Line },
    /// Indicator centroid or label anchor.
    Anchor { point: Point },
}

impl Primitive {
    pub fn attributes(&self) -> Attributes {
        match &self.shape {
            Shape::Bubble(b) => Attributes::Circle {
                center: b.center,
                radius: b.radius,
            },
            Shape::Line(l) => Attributes::Segment { line: l.line },
            Shape::Indicator(i) => Attributes::Anchor { point: i.center },
            Shape::Label(l) => Attributes::Anchor { point: l.anchor },
        }
    }

    pub fn as_bubble(&self) -> Option<&Bubble> {
        match &self.shape {
            Shape::Bubble(b) => Some(b),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/primitive.rs"]
mod tests;
