//! Bubbleline is the geometry and animation engine behind bubble process timelines.
//!
//! A timeline is a list of steps drawn as bubbles along an axis (horizontal, vertical, or a
//! curved spline), each with up to three preface and three client tasks whose labels are joined
//! to the bubble by connector lines.
//!
//! - Describe the data with [`TimelineData`] (JSON or the builder DSL)
//! - Lay it out into a keyed [`Scene`] with [`SceneBuilder`]
//! - Drive a [`Stage`] over a [`PaintTarget`] to animate version switches and the entry reveal
#![forbid(unsafe_code)]

pub mod animation;
pub mod composition;
pub mod edit;
pub mod foundation;
pub mod geometry;
pub mod render;
pub mod scene;
pub mod stage;
pub mod transition;

pub use crate::animation::ease::Ease;
pub use crate::composition::dsl::{StepBuilder, TimelineBuilder, anchored_task, task};
pub use crate::composition::model::{Phase, Step, Task, TaskRole, TimelineData, Version};
pub use crate::composition::settings::RenderSettings;
pub use crate::edit::drag::{DragState, StepEdit, ViewScale};
pub use crate::foundation::core::{BezPath, Line, Point, Rect, Vec2, ViewBox};
pub use crate::foundation::error::{BubblelineError, BubblelineResult};
pub use crate::geometry::kernel::{AxisLayout, Projection, ViewMode, bubble_radius};
pub use crate::render::svg::{SvgTarget, render_svg};
pub use crate::render::target::PaintTarget;
pub use crate::scene::builder::{Scene, SceneBuilder};
pub use crate::scene::primitive::{Primitive, PrimitiveKey, TaskRef};
pub use crate::scene::snapshot::Snapshot;
pub use crate::stage::Stage;
pub use crate::transition::engine::TransitionEngine;
pub use crate::transition::entry::EntryReveal;
pub use crate::transition::frame::Frame;
