//! Keyed diff between a captured snapshot and a freshly built scene.
//!
//! The diff is pure data: [`TransitionPlan::diff`] classifies keys and picks a [`Motion`] per key,
//! [`TransitionPlan::sample`] turns an eased progress value into a [`Frame`]. Timing lives in the
//! engine.

use std::collections::BTreeSet;

use crate::{
    foundation::core::{Line, Point, Vec2},
    foundation::math::{Lerp, points_close},
    scene::{
        builder::Scene,
        primitive::{Attributes, Primitive, PrimitiveKey, Shape},
        snapshot::Snapshot,
    },
    transition::frame::{Frame, Override},
};

/// Moves smaller than this (per coordinate) are not animated.
pub const MOTION_TOLERANCE: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Persisted,
    Added,
    Removed,
}

/// Disjoint key sets of a diff. Their union is exactly `old ∪ new`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyClasses {
    pub persisted: BTreeSet<PrimitiveKey>,
    pub added: BTreeSet<PrimitiveKey>,
    pub removed: BTreeSet<PrimitiveKey>,
}

impl KeyClasses {
    pub fn classify<'a>(
        old: impl IntoIterator<Item = &'a PrimitiveKey>,
        new: impl IntoIterator<Item = &'a PrimitiveKey>,
    ) -> Self {
        let old: BTreeSet<&PrimitiveKey> = old.into_iter().collect();
        let new: BTreeSet<&PrimitiveKey> = new.into_iter().collect();
        Self {
            persisted: old.intersection(&new).map(|k| (*k).clone()).collect(),
            added: new.difference(&old).map(|k| (*k).clone()).collect(),
            removed: old.difference(&new).map(|k| (*k).clone()).collect(),
        }
    }

    pub fn of(&self, key: &PrimitiveKey) -> Option<Classification> {
        if self.persisted.contains(key) {
            Some(Classification::Persisted)
        } else if self.added.contains(key) {
            Some(Classification::Added)
        } else if self.removed.contains(key) {
            Some(Classification::Removed)
        } else {
            None
        }
    }
}

/// Interpolation rule for one key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Persisted and unchanged.
    Hold,
    /// Persisted bubble: center and radius tween.
    Circle {
        from_center: Point,
        to_center: Point,
        from_radius: f64,
        to_radius: f64,
    },
    /// Persisted connector: both endpoints tween independently.
    Segment { from: Line, to: Line },
    /// Persisted indicator or label: translation `-offset -> 0` over the new placement.
    Translate { offset: Vec2 },
    /// Added bubble: radius `0 -> radius`, opacity `0 -> opacity`.
    Grow { radius: f64, opacity: f64 },
    /// Added line, indicator or label.
    FadeIn,
    /// Removed bubble ghost: radius `radius -> 0`, opacity `opacity -> 0`.
    Shrink { radius: f64, opacity: f64 },
    /// Removed line, indicator or label ghost.
    FadeOut,
}

impl Motion {
    pub fn sample(self, e: f64) -> Override {
        match self {
            Self::Hold => Override::default(),
            Self::Circle {
                from_center,
                to_center,
                from_radius,
                to_radius,
            } => Override {
                center: Some(<Point as Lerp>::lerp(&from_center, &to_center, e)),
                radius: Some(<f64 as Lerp>::lerp(&from_radius, &to_radius, e)),
                ..Override::default()
            },
            Self::Segment { from, to } => Override {
                line: Some(<Line as Lerp>::lerp(&from, &to, e)),
                ..Override::default()
            },
            Self::Translate { offset } => Override {
                translate: Some(-offset * (1.0 - e)),
                ..Override::default()
            },
            Self::Grow { radius, opacity } => Override {
                radius: Some(radius * e),
                opacity: Some(opacity * e),
                ..Override::default()
            },
            Self::FadeIn => Override {
                opacity: Some(e),
                ..Override::default()
            },
            Self::Shrink { radius, opacity } => Override {
                radius: Some((radius * (1.0 - e)).max(0.0)),
                opacity: Some(opacity * (1.0 - e)),
                ..Override::default()
            },
            Self::FadeOut => Override {
                opacity: Some(1.0 - e),
                ..Override::default()
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub key: PrimitiveKey,
    pub class: Classification,
    pub motion: Motion,
}

/// Per-key tweens plus the ghosts synthesized for removed keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionPlan {
    pub tweens: Vec<Tween>,
    pub ghosts: Vec<Primitive>,
}

impl TransitionPlan {
    pub fn diff(old: &Snapshot, new: &Scene) -> Self {
        let mut tweens = Vec::with_capacity(new.primitives.len());
        for p in &new.primitives {
            let (class, motion) = match old.get(&p.key) {
                Some(prev) => (Classification::Persisted, persisted_motion(prev, p)),
                None => (Classification::Added, added_motion(p)),
            };
            tweens.push(Tween {
                key: p.key.clone(),
                class,
                motion,
            });
        }

        let new_keys: BTreeSet<&PrimitiveKey> = new.keys().collect();
        let mut ghosts = Vec::new();
        for key in old.keys() {
            if new_keys.contains(key) {
                continue;
            }
            let Some(prev) = old.get(key) else {
                continue;
            };
            tweens.push(Tween {
                key: key.clone(),
                class: Classification::Removed,
                motion: removed_motion(prev),
            });
            ghosts.push(prev.clone());
        }
        Self { tweens, ghosts }
    }

    pub fn classes(&self) -> KeyClasses {
        let mut out = KeyClasses::default();
        for t in &self.tweens {
            let set = match t.class {
                Classification::Persisted => &mut out.persisted,
                Classification::Added => &mut out.added,
                Classification::Removed => &mut out.removed,
            };
            set.insert(t.key.clone());
        }
        out
    }

    pub fn tween(&self, key: &PrimitiveKey) -> Option<&Tween> {
        self.tweens.iter().find(|t| &t.key == key)
    }

    /// Frame at eased progress `e` in `[0, 1]`. Ghosts stay in the frame until the engine settles.
    pub fn sample(&self, e: f64) -> Frame {
        let mut frame = Frame {
            ghosts: self.ghosts.clone(),
            ..Frame::default()
        };
        for t in &self.tweens {
            frame.set(t.key.clone(), t.motion.sample(e));
        }
        frame
    }
}

fn persisted_motion(prev: &Primitive, next: &Primitive) -> Motion {
    match (prev.attributes(), next.attributes()) {
        (
            Attributes::Circle {
                center: from_center,
                radius: from_radius,
            },
            Attributes::Circle {
                center: to_center,
                radius: to_radius,
            },
        ) => {
            if points_close(from_center, to_center, MOTION_TOLERANCE)
                && (from_radius - to_radius).abs() <= MOTION_TOLERANCE
            {
                Motion::Hold
            } else {
                Motion::Circle {
                    from_center,
                    to_center,
                    from_radius,
                    to_radius,
                }
            }
        }
        (Attributes::Segment { line: from }, Attributes::Segment { line: to }) => {
            if points_close(from.p0, to.p0, MOTION_TOLERANCE)
                && points_close(from.p1, to.p1, MOTION_TOLERANCE)
            {
                Motion::Hold
            } else {
                Motion::Segment { from, to }
            }
        }
        (Attributes::Anchor { point: from }, Attributes::Anchor { point: to }) => {
            if points_close(from, to, MOTION_TOLERANCE) {
                Motion::Hold
            } else {
                Motion::Translate { offset: to - from }
            }
        }
        // Keys encode the primitive kind, so a persisted key never changes attribute shape.
        _ => Motion::Hold,
    }
}

fn added_motion(p: &Primitive) -> Motion {
    match &p.shape {
        Shape::Bubble(b) => Motion::Grow {
            radius: b.radius,
            opacity: b.opacity,
        },
        _ => Motion::FadeIn,
    }
}

fn removed_motion(p: &Primitive) -> Motion {
    match &p.shape {
        Shape::Bubble(b) => Motion::Shrink {
            radius: b.radius,
            opacity: b.opacity,
        },
        _ => Motion::FadeOut,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/plan.rs"]
mod tests;
