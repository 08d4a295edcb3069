use std::collections::BTreeMap;

use crate::{
    foundation::core::{Line, Point, Vec2},
    scene::primitive::{Primitive, PrimitiveKey},
};

/// Transient attribute values layered over a primitive while an animation runs.
///
/// `None` fields leave the laid-out value untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Override {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    /// Extra translation applied on top of the primitive's own placement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate: Option<Vec2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Uniform scale about the primitive's own center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl Override {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// What the painter applies for one animation frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Frame {
    pub overrides: BTreeMap<PrimitiveKey, Override>,
    /// Removed primitives still fading out; painted beneath the live scene.
    pub ghosts: Vec<Primitive>,
}

impl Frame {
    /// The resting frame: no overrides and no ghosts.
    pub fn settled() -> Self {
        Self::default()
    }

    pub fn is_settled(&self) -> bool {
        self.overrides.is_empty() && self.ghosts.is_empty()
    }

    pub fn get(&self, key: &PrimitiveKey) -> Option<&Override> {
        self.overrides.get(key)
    }

    pub(crate) fn set(&mut self, key: PrimitiveKey, ov: Override) {
        if !ov.is_empty() {
            self.overrides.insert(key, ov);
        }
    }
}
