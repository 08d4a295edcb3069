use std::collections::BTreeMap;

use crate::{
    composition::model::{Phase, Step, validate_step_ids},
    composition::settings::{IndicatorStyle, RenderSettings},
    foundation::core::{Line, ViewBox},
    foundation::error::BubblelineResult,
    geometry::kernel::{AxisLayout, AxisShape, Projection, TaskGeometry, bubble_radius},
    geometry::label::baseline_shift,
    scene::primitive::{
        BUBBLE_OPACITY, Bubble, ConnectorLine, Indicator, Label, Primitive, PrimitiveKey, Shape,
        TaskRef,
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A step that was left out of the scene because its phase is not in the phase table.
pub struct SkippedStep {
    pub step_id: String,
    pub phase: String,
}

/// The timeline axis as drawn under the primitives.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub shape: AxisShape,
    pub stroke: String,
    pub width: f64,
}

impl Axis {
    /// SVG path data for the axis.
    pub fn path_data(&self) -> String {
        match &self.shape {
            AxisShape::Line(Line { p0, p1 }) => {
                format!("M{},{} L{},{}", p0.x, p0.y, p1.x, p1.y)
            }
            AxisShape::Path(path) => path.to_svg(),
        }
    }
}

impl serde::Serialize for Axis {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut st = serializer.serialize_struct("Axis", 3)?;
        st.serialize_field("d", &self.path_data())?;
        st.serialize_field("stroke", &self.stroke)?;
        st.serialize_field("width", &self.width)?;
        st.end()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything needed to paint one timeline: viewbox, axis and the ordered primitive list.
pub struct Scene {
    /// Effective projection (curved requests may fall back to linear).
    pub projection: Projection,
    /// Viewbox after cropping.
    pub view_box: ViewBox,
    pub axis: Axis,
    /// Primitives in paint order.
    pub primitives: Vec<Primitive>,
    /// CSS custom properties for host hover styling.
    pub css_vars: Vec<(&'static str, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedStep>,
}

impl Scene {
    /// True when there is nothing to draw; hosts show their placeholder instead.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn get(&self, key: &PrimitiveKey) -> Option<&Primitive> {
        self.primitives.iter().find(|p| &p.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &PrimitiveKey> {
        self.primitives.iter().map(|p| &p.key)
    }

    pub fn bubbles(&self) -> impl Iterator<Item = (&PrimitiveKey, &Bubble)> {
        self.primitives
            .iter()
            .filter_map(|p| p.as_bubble().map(|b| (&p.key, b)))
    }
}

/// Lays out a whole dataset into a [`Scene`].
///
/// Stateless: the same inputs always give the same scene.
pub struct SceneBuilder;

impl SceneBuilder {
    #[tracing::instrument(skip(steps, phases, settings), fields(steps = steps.len()))]
    /// Build the scene for `steps` under `projection`.
    ///
    /// Bubbles are emitted largest first so smaller bubbles paint on top. Each bubble is followed
    /// by its tasks (preface, then client), each as connector line, indicator and label.
    pub fn build(
        steps: &[Step],
        phases: &BTreeMap<String, Phase>,
        settings: &RenderSettings,
        projection: Projection,
    ) -> BubblelineResult<Scene> {
        settings.validate()?;
        validate_step_ids(steps)?;

        let layout = AxisLayout::new(projection, settings);
        let mut ordered: Vec<&Step> = steps.iter().collect();
        ordered.sort_by(|a, b| bubble_radius(b.size).total_cmp(&bubble_radius(a.size)));

        let mut primitives = Vec::new();
        let mut skipped = Vec::new();
        for step in ordered {
            let Some(phase) = phases.get(&step.phase) else {
                tracing::debug!(step = %step.id, phase = %step.phase, "unknown phase, step skipped");
                skipped.push(SkippedStep {
                    step_id: step.id.clone(),
                    phase: step.phase.clone(),
                });
                continue;
            };
            emit_step(&layout, step, phase, settings, &mut primitives);
        }

        let view_box = if layout.projection.is_vertical() {
            layout
                .view_box
                .crop_horizontal(settings.crop.crop_left / 100.0, settings.crop.crop_right / 100.0)
        } else {
            layout
                .view_box
                .crop_vertical(settings.crop.crop_top / 100.0, settings.crop.crop_bottom / 100.0)
        };

        tracing::debug!(
            primitives = primitives.len(),
            skipped = skipped.len(),
            "scene built"
        );
        Ok(Scene {
            projection: layout.projection,
            view_box,
            axis: Axis {
                shape: layout.axis_shape(),
                stroke: settings.timeline_color.clone(),
                width: settings.timeline_width,
            },
            primitives,
            css_vars: css_vars(settings),
            skipped,
        })
    }
}

fn emit_step(
    layout: &AxisLayout,
    step: &Step,
    phase: &Phase,
    settings: &RenderSettings,
    out: &mut Vec<Primitive>,
) {
    let placement = layout.place_bubble(step);
    out.push(Primitive {
        key: PrimitiveKey::Bubble(step.id.clone()),
        shape: Shape::Bubble(Bubble {
            center: placement.center,
            radius: placement.radius,
            fill: settings.phase_color(&step.phase, &phase.color).to_string(),
            opacity: BUBBLE_OPACITY,
            blend: settings.bubble_blend_mode,
            phase: step.phase.clone(),
        }),
    });

    for (role, index, task) in step.iter_tasks() {
        let TaskGeometry {
            start,
            end,
            label,
            label_box,
        } = layout.place_task(step, &placement, role, task, settings);
        let task_ref = TaskRef::new(step.id.as_str(), role, index);

        out.push(Primitive {
            key: PrimitiveKey::Line(task_ref.clone()),
            shape: Shape::Line(ConnectorLine {
                line: Line::new(start, end),
                stroke: settings.connection_color.clone(),
                width: settings.connection_width,
                dash_array: settings.connection_type.dash_array(),
            }),
        });
        if settings.indicator_style != IndicatorStyle::None {
            out.push(Primitive {
                key: PrimitiveKey::Indicator(task_ref.clone()),
                shape: Shape::Indicator(Indicator {
                    center: start,
                    style: settings.indicator_style,
                    size: settings.indicator_size,
                    color: settings.indicator_color.clone(),
                    stroke_width: settings.indicator_stroke_width,
                }),
            });
        }
        let font_size = task.font_size.size();
        out.push(Primitive {
            key: PrimitiveKey::Label(task_ref),
            shape: Shape::Label(Label {
                anchor: label,
                lines: task.label.split('\n').map(str::to_string).collect(),
                font_size,
                font_weight: task.font_weight.weight(),
                fill: settings.text_color.clone(),
                font_family: settings.font_family.clone(),
                baseline_shift: baseline_shift(label_box.line_count, font_size),
            }),
        });
    }
}

fn css_vars(settings: &RenderSettings) -> Vec<(&'static str, String)> {
    let hover = &settings.hover;
    vec![
        ("--bubble-hover-scale", hover.bubble_hover_scale.to_string()),
        ("--connection-hover-color", hover.connection_hover_color.clone()),
        ("--connection-hover-width", hover.connection_hover_width.to_string()),
        ("--indicator-hover-stroke", hover.indicator_hover_stroke.to_string()),
        (
            "--connection-hover-text-scale",
            hover.connection_hover_text_scale.to_string(),
        ),
        (
            "--bubble-blend-mode",
            settings.bubble_blend_mode.as_css().to_string(),
        ),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
