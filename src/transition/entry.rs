//! One-shot staggered reveal played the first time a timeline becomes visible.
//!
//! Phase one pops bubbles in along the axis (left to right, or top to bottom). Phase two starts
//! after the last bubble plus a configured delay and fades in connectors, indicators and labels,
//! staggered in the order of their owning bubbles.

use std::collections::BTreeMap;

use crate::{
    animation::{ease::Ease, stagger::Stagger},
    composition::model::TaskRole,
    composition::settings::RenderSettings,
    scene::{
        builder::Scene,
        primitive::{PrimitiveKey, PrimitiveKind},
    },
    transition::frame::{Frame, Override},
};

/// Entry bubbles fade in faster than they grow: opacity is `min(OPACITY_RATE * e, target)`.
pub const OPACITY_RATE: f64 = 1.4;

#[derive(Clone, Debug, PartialEq)]
struct BubbleSlot {
    key: PrimitiveKey,
    radius: f64,
    opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
struct SecondarySlot {
    key: PrimitiveKey,
    /// Shared by the line, indicator and label of one task.
    slot: usize,
}

/// Precomputed entry schedule for one scene.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryReveal {
    bubbles: Vec<BubbleSlot>,
    secondary: Vec<SecondarySlot>,
    secondary_count: usize,
    bubble_timing: Stagger,
    secondary_timing: Stagger,
    delay: f64,
    ease: Ease,
}

impl EntryReveal {
    pub fn plan(scene: &Scene, settings: &RenderSettings) -> Self {
        let vertical = scene.projection.is_vertical();
        let mut bubbles: Vec<(f64, BubbleSlot)> = scene
            .bubbles()
            .map(|(key, b)| {
                let along = if vertical { b.center.y } else { b.center.x };
                (
                    along,
                    BubbleSlot {
                        key: key.clone(),
                        radius: b.radius,
                        opacity: b.opacity,
                    },
                )
            })
            .collect();
        bubbles.sort_by(|a, b| a.0.total_cmp(&b.0));
        let bubbles: Vec<BubbleSlot> = bubbles.into_iter().map(|(_, s)| s).collect();

        let order: BTreeMap<&str, usize> = bubbles
            .iter()
            .enumerate()
            .map(|(i, b)| (b.key.step_id(), i))
            .collect();

        // Tasks in bubble order; preface before client and by index within a step.
        let mut tasks: Vec<(usize, TaskRole, usize, &str)> = scene
            .keys()
            .filter_map(|k| k.task())
            .map(|t| {
                let rank = order.get(t.step_id.as_str()).copied().unwrap_or(usize::MAX);
                (rank, t.role, t.index, t.step_id.as_str())
            })
            .collect();
        tasks.sort();
        tasks.dedup();
        let slots: BTreeMap<(&str, TaskRole, usize), usize> = tasks
            .iter()
            .enumerate()
            .map(|(slot, &(_, role, index, step))| ((step, role, index), slot))
            .collect();

        let secondary = scene
            .keys()
            .filter_map(|key| {
                let t = key.task()?;
                let slot = *slots.get(&(t.step_id.as_str(), t.role, t.index))?;
                Some(SecondarySlot {
                    key: key.clone(),
                    slot,
                })
            })
            .collect();

        let entry = &settings.entry;
        Self {
            bubbles,
            secondary,
            secondary_count: tasks.len(),
            bubble_timing: Stagger::new(entry.entry_bubble_duration, entry.entry_bubble_stagger),
            secondary_timing: Stagger::new(
                entry.entry_indicator_duration,
                entry.entry_indicator_stagger,
            ),
            delay: entry.entry_indicator_delay,
            ease: settings.entry_ease(),
        }
    }

    pub fn bubble_count(&self) -> usize {
        self.bubbles.len()
    }

    /// Number of stagger slots in phase two (one per task).
    pub fn secondary_count(&self) -> usize {
        self.secondary_count
    }

    /// Elapsed time at which phase two begins.
    pub fn phase_two_start(&self) -> f64 {
        self.bubble_timing.span(self.bubbles.len()) + self.delay
    }

    pub fn total_duration(&self) -> f64 {
        self.phase_two_start() + self.secondary_timing.span(self.secondary_count)
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.total_duration()
    }

    /// Bubble keys in reveal order.
    pub fn bubble_order(&self) -> impl Iterator<Item = &PrimitiveKey> {
        self.bubbles.iter().map(|b| &b.key)
    }

    /// Stagger slot of a line, indicator or label.
    pub fn slot_of(&self, key: &PrimitiveKey) -> Option<usize> {
        self.secondary
            .iter()
            .find(|s| &s.key == key)
            .map(|s| s.slot)
    }

    /// Frame at `elapsed` milliseconds since the reveal started. Settled once finished.
    pub fn sample(&self, elapsed: f64) -> Frame {
        if self.is_finished(elapsed) {
            return Frame::settled();
        }
        let mut frame = Frame::default();
        for (i, b) in self.bubbles.iter().enumerate() {
            let e = self.ease.apply(self.bubble_timing.progress(i, elapsed));
            frame.overrides.insert(
                b.key.clone(),
                Override {
                    radius: Some(b.radius * e),
                    opacity: Some((OPACITY_RATE * e).min(b.opacity)),
                    ..Override::default()
                },
            );
        }

        let local = elapsed - self.phase_two_start();
        for s in &self.secondary {
            let e = self.ease.apply(self.secondary_timing.progress(s.slot, local));
            let ov = match s.key.kind() {
                PrimitiveKind::Indicator => Override {
                    opacity: Some(e),
                    scale: Some(e),
                    ..Override::default()
                },
                _ => Override {
                    opacity: Some(e),
                    ..Override::default()
                },
            };
            frame.overrides.insert(s.key.clone(), ov);
        }
        frame
    }
}

/// Closed-form reveal length for `bubble_count` bubbles and `secondary_count` task slots.
pub fn entry_total_duration(
    settings: &RenderSettings,
    bubble_count: usize,
    secondary_count: usize,
) -> f64 {
    let entry = &settings.entry;
    Stagger::new(entry.entry_bubble_duration, entry.entry_bubble_stagger).span(bubble_count)
        + entry.entry_indicator_delay
        + Stagger::new(entry.entry_indicator_duration, entry.entry_indicator_stagger)
            .span(secondary_count)
}

#[cfg(test)]
#[path = "../../tests/unit/transition/entry.rs"]
mod tests;
