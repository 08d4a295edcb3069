//! Pointer-driven editing of steps: pure conversions plus a small press/move/release machine.
//!
//! Nothing here touches input events. The host feeds pointer positions in screen pixels and
//! applies the returned [`StepEdit`]s to its step list.

use crate::{
    composition::model::{MAX_STEP_SIZE, MIN_STEP_SIZE, Step, Task},
    foundation::core::{Point, Vec2, ViewBox},
    foundation::error::{BubblelineError, BubblelineResult},
    foundation::math::round_to,
    geometry::kernel::Projection,
    scene::primitive::{PrimitiveKey, TaskRef},
};

/// Screen pixels of vertical drag per size level on a bubble.
pub const SIZE_DRAG_PIXELS: f64 = 2.0;
/// Screen pixels of horizontal drag per unit of anchor on an indicator.
pub const ANCHOR_DRAG_PIXELS: f64 = 50.0;

/// Canvas units per screen pixel on each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewScale {
    pub x: f64,
    pub y: f64,
}

impl ViewScale {
    /// Scale for a viewbox drawn into a `client_width × client_height` pixel box.
    pub fn new(view_box: ViewBox, client_width: f64, client_height: f64) -> BubblelineResult<Self> {
        if !(client_width > 0.0 && client_height > 0.0) {
            return Err(BubblelineError::geometry(format!(
                "client rect must be non-empty (got {client_width}x{client_height})"
            )));
        }
        Ok(Self {
            x: view_box.width / client_width,
            y: view_box.height / client_height,
        })
    }

    /// Converts a screen-space pointer delta to canvas units.
    pub fn to_model(self, delta: Vec2) -> Vec2 {
        Vec2::new(delta.x * self.x, delta.y * self.y)
    }
}

/// What is being dragged, with the model values captured at press time.
///
/// Moves are computed from these originals, never accumulated.
#[derive(Clone, Debug, PartialEq)]
pub enum DragKind {
    Bubble { step_id: String, x: f64, size: f64 },
    Label { task: TaskRef, line_x: f64, line_y: f64 },
    Indicator { task: TaskRef, anchor: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub kind: DragKind,
    /// Pointer position at press, in screen pixels.
    pub press: Point,
}

impl DragSession {
    /// Edit for a pointer now at `at` (screen pixels).
    pub fn edit_at(&self, at: Point, scale: ViewScale) -> StepEdit {
        let screen = at - self.press;
        let model = scale.to_model(screen);
        match &self.kind {
            DragKind::Bubble { step_id, x, size } => {
                let size =
                    (size - screen.y / SIZE_DRAG_PIXELS).clamp(MIN_STEP_SIZE, MAX_STEP_SIZE);
                StepEdit::MoveBubble {
                    step_id: step_id.clone(),
                    x: round_to(x + model.x, 0.1),
                    size: round_to(size, 0.1),
                }
            }
            DragKind::Label {
                task,
                line_x,
                line_y,
            } => StepEdit::MoveLabel {
                task: task.clone(),
                line_x: round_to(line_x + model.x, 0.1),
                line_y: round_to(line_y + model.y, 0.1),
            },
            DragKind::Indicator { task, anchor } => {
                let anchor = (anchor + screen.x / ANCHOR_DRAG_PIXELS).clamp(-1.0, 1.0);
                StepEdit::SetAnchor {
                    task: task.clone(),
                    anchor: round_to(anchor, 0.01),
                }
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// Start dragging the primitive under the pointer.
    ///
    /// Ignored (returns `false`) in vertical projections, for connector lines, and for keys that
    /// no longer resolve to a step or task.
    pub fn press(
        &mut self,
        key: &PrimitiveKey,
        at: Point,
        steps: &[Step],
        projection: Projection,
    ) -> bool {
        if projection.is_vertical() {
            return false;
        }
        let kind = match key {
            PrimitiveKey::Bubble(id) => find_step(steps, id).map(|s| DragKind::Bubble {
                step_id: id.clone(),
                x: s.x,
                size: s.size,
            }),
            PrimitiveKey::Label(t) => find_task(steps, t).map(|task| DragKind::Label {
                task: t.clone(),
                line_x: task.line_x,
                line_y: task.line_y,
            }),
            PrimitiveKey::Indicator(t) => find_task(steps, t).map(|task| DragKind::Indicator {
                task: t.clone(),
                anchor: task.clamped_anchor(),
            }),
            PrimitiveKey::Line(_) => return false,
        };
        let Some(kind) = kind else {
            tracing::debug!(key = %key, "press on a key with no backing step");
            return false;
        };
        *self = Self::Dragging(DragSession { kind, press: at });
        true
    }

    pub fn move_to(&self, at: Point, scale: ViewScale) -> Option<StepEdit> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(session.edit_at(at, scale)),
        }
    }

    /// End the drag, returning the finished session.
    pub fn release(&mut self) -> Option<DragSession> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Dragging(session) => Some(session),
        }
    }
}

/// A single field update produced by a drag.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepEdit {
    MoveBubble { step_id: String, x: f64, size: f64 },
    MoveLabel { task: TaskRef, line_x: f64, line_y: f64 },
    SetAnchor { task: TaskRef, anchor: f64 },
}

impl StepEdit {
    /// Apply to `steps`. Returns `false` when the target step or task no longer exists.
    pub fn apply(&self, steps: &mut [Step]) -> bool {
        match self {
            Self::MoveBubble { step_id, x, size } => {
                let Some(step) = steps.iter_mut().find(|s| &s.id == step_id) else {
                    return false;
                };
                step.x = *x;
                step.size = *size;
                true
            }
            Self::MoveLabel {
                task,
                line_x,
                line_y,
            } => match find_task_mut(steps, task) {
                Some(t) => {
                    t.line_x = *line_x;
                    t.line_y = *line_y;
                    true
                }
                None => false,
            },
            Self::SetAnchor { task, anchor } => match find_task_mut(steps, task) {
                Some(t) => {
                    t.anchor = *anchor;
                    true
                }
                None => false,
            },
        }
    }
}

fn find_step<'a>(steps: &'a [Step], id: &str) -> Option<&'a Step> {
    steps.iter().find(|s| s.id == id)
}

fn find_task<'a>(steps: &'a [Step], t: &TaskRef) -> Option<&'a Task> {
    find_step(steps, &t.step_id)?.tasks(t.role).get(t.index)
}

fn find_task_mut<'a>(steps: &'a mut [Step], t: &TaskRef) -> Option<&'a mut Task> {
    steps
        .iter_mut()
        .find(|s| s.id == t.step_id)?
        .tasks_mut(t.role)
        .get_mut(t.index)
}

#[cfg(test)]
#[path = "../../tests/unit/edit/drag.rs"]
mod tests;
