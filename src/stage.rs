use std::collections::BTreeMap;

use crate::{
    composition::model::{Phase, Step, TimelineData, Version},
    composition::settings::RenderSettings,
    edit::drag::StepEdit,
    foundation::error::{BubblelineError, BubblelineResult},
    geometry::kernel::{Projection, ViewMode},
    render::target::PaintTarget,
    scene::{
        builder::{Scene, SceneBuilder},
        snapshot::Snapshot,
    },
    transition::{
        engine::{FrameStep, FrameTicket, TransitionEngine},
        entry::EntryReveal,
        frame::Frame,
    },
};

#[derive(Clone, Debug, PartialEq)]
enum EntryState {
    Pending,
    Playing { reveal: EntryReveal, started_at: f64 },
    Done,
}

/// One live timeline instance: the data being shown, where it is painted, and the animations
/// running on it.
///
/// Time is passed in explicitly (milliseconds, monotonic) so the host's frame loop drives
/// everything through [`Stage::tick`].
pub struct Stage<T: PaintTarget> {
    target: T,
    phases: BTreeMap<String, Phase>,
    versions: BTreeMap<String, Version>,
    steps: Vec<Step>,
    settings: RenderSettings,
    view: ViewMode,
    active_version: Option<String>,
    scene: Option<Scene>,
    engine: TransitionEngine,
    ticket: Option<FrameTicket>,
    entry: EntryState,
}

impl<T: PaintTarget> Stage<T> {
    pub fn new(target: T, data: TimelineData, view: ViewMode) -> Self {
        let entry = if data.settings.entry.entry_animation {
            EntryState::Pending
        } else {
            EntryState::Done
        };
        Self {
            target,
            phases: data.phases,
            versions: data.versions,
            steps: data.steps,
            settings: data.settings,
            view,
            active_version: None,
            scene: None,
            engine: TransitionEngine::new(),
            ticket: None,
            entry,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn projection(&self) -> Projection {
        Projection::resolve(self.view, &self.settings)
    }

    pub fn active_version(&self) -> Option<&str> {
        self.active_version.as_deref()
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_animating() || matches!(self.entry, EntryState::Playing { .. })
    }

    /// Names of the stored versions the host can switch to.
    pub fn version_names(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(String::as_str)
    }

    #[tracing::instrument(skip(self), fields(view = ?self.view))]
    /// Lay out and paint the current data without animation.
    ///
    /// Abandons any running transition or reveal. Returns `false` when the target is detached.
    pub fn render(&mut self) -> BubblelineResult<bool> {
        if !self.target.is_attached() {
            tracing::debug!("paint target detached, render skipped");
            return Ok(false);
        }
        self.engine.reset();
        self.ticket = None;
        if matches!(self.entry, EntryState::Playing { .. }) {
            self.entry = EntryState::Done;
        }
        let scene = self.build()?;
        self.target.paint(&scene, &Frame::settled())?;
        self.scene = Some(scene);
        Ok(true)
    }

    /// Switch orientation and re-render.
    pub fn set_view(&mut self, view: ViewMode) -> BubblelineResult<bool> {
        self.view = view;
        self.render()
    }

    /// Switch to an explicit projection and re-render.
    ///
    /// Curved horizontal is a settings toggle, so choosing a horizontal projection also flips
    /// `curve_enabled` to match.
    pub fn set_projection(&mut self, projection: Projection) -> BubblelineResult<bool> {
        self.view = projection.view_mode();
        match projection {
            Projection::CurvedHorizontal => self.settings.curve.curve_enabled = true,
            Projection::LinearHorizontal => self.settings.curve.curve_enabled = false,
            Projection::LinearVertical => {}
        }
        self.render()
    }

    /// Replace the settings and re-render. `RenderSettings::default()` resets them.
    pub fn set_settings(&mut self, settings: RenderSettings) -> BubblelineResult<bool> {
        settings.validate()?;
        self.settings = settings;
        self.render()
    }

    /// Animate to a stored version starting at `now`.
    ///
    /// Returns `false` (leaving the shown data unchanged) when the target is detached, the name
    /// is unknown, or a transition is already running.
    pub fn switch_version(&mut self, name: &str, now: f64) -> BubblelineResult<bool> {
        if !self.target.is_attached() {
            return Ok(false);
        }
        if self.engine.is_animating() {
            tracing::debug!(version = name, "transition in flight, version switch dropped");
            return Ok(false);
        }
        let Some(version) = self.versions.get(name) else {
            tracing::debug!(version = name, "unknown version");
            return Ok(false);
        };
        let steps = version.steps.clone();
        let settings = version
            .settings
            .clone()
            .unwrap_or_else(|| self.settings.clone());
        self.animate_to(steps, settings, now)?;
        self.active_version = Some(name.to_string());
        Ok(true)
    }

    /// Animate to arbitrary host data (e.g. an imported dataset).
    pub fn transition_to(
        &mut self,
        steps: Vec<Step>,
        settings: RenderSettings,
        now: f64,
    ) -> BubblelineResult<bool> {
        if !self.target.is_attached() || self.engine.is_animating() {
            return Ok(false);
        }
        self.animate_to(steps, settings, now)?;
        Ok(true)
    }

    fn animate_to(
        &mut self,
        steps: Vec<Step>,
        settings: RenderSettings,
        now: f64,
    ) -> BubblelineResult<()> {
        let projection = Projection::resolve(self.view, &settings);
        let scene = SceneBuilder::build(&steps, &self.phases, &settings, projection)?;
        let old = self
            .scene
            .as_ref()
            .map(Snapshot::capture)
            .unwrap_or_default();
        let ticket = self.engine.request(&old, &scene, now).ok_or_else(|| {
            BubblelineError::animation("transition engine refused an idle request")
        })?;
        if matches!(self.entry, EntryState::Playing { .. }) {
            self.entry = EntryState::Done;
        }
        self.steps = steps;
        self.settings = settings;
        self.scene = Some(scene);
        self.ticket = Some(ticket);
        self.tick(now)?;
        Ok(())
    }

    /// Play the one-shot entry reveal, e.g. when the timeline first scrolls into view.
    ///
    /// Returns `false` if it already played, entry animation is disabled, or the target is
    /// detached.
    pub fn reveal(&mut self, now: f64) -> BubblelineResult<bool> {
        if self.entry != EntryState::Pending || !self.target.is_attached() {
            return Ok(false);
        }
        self.render()?;
        let Some(scene) = &self.scene else {
            return Ok(false);
        };
        let reveal = EntryReveal::plan(scene, &self.settings);
        tracing::debug!(
            bubbles = reveal.bubble_count(),
            total_ms = reveal.total_duration(),
            "entry reveal started"
        );
        self.entry = EntryState::Playing {
            reveal,
            started_at: now,
        };
        self.tick(now)?;
        Ok(true)
    }

    /// Advance running animations to `now` and paint. Returns `true` while more frames are needed.
    pub fn tick(&mut self, now: f64) -> BubblelineResult<bool> {
        if !self.target.is_attached() {
            return Ok(false);
        }
        let Some(scene) = &self.scene else {
            return Ok(false);
        };

        if let Some(ticket) = self.ticket {
            return match self.engine.frame(ticket, now) {
                FrameStep::Stale => {
                    self.ticket = None;
                    Ok(false)
                }
                FrameStep::Animating(frame) => {
                    self.target.paint(scene, &frame)?;
                    Ok(true)
                }
                FrameStep::Settled => {
                    self.target.paint(scene, &Frame::settled())?;
                    self.ticket = None;
                    Ok(false)
                }
            };
        }

        if let EntryState::Playing { reveal, started_at } = &self.entry {
            let elapsed = now - started_at;
            let frame = reveal.sample(elapsed);
            self.target.paint(scene, &frame)?;
            if reveal.is_finished(elapsed) {
                self.entry = EntryState::Done;
                return Ok(false);
            }
            return Ok(true);
        }
        Ok(false)
    }

    /// Apply an editor change to the current steps and re-render without animation.
    pub fn apply_edit(&mut self, edit: &StepEdit) -> BubblelineResult<bool> {
        if !edit.apply(&mut self.steps) {
            return Ok(false);
        }
        self.render()
    }

    fn build(&self) -> BubblelineResult<Scene> {
        SceneBuilder::build(&self.steps, &self.phases, &self.settings, self.projection())
    }
}

#[cfg(test)]
#[path = "../tests/unit/stage.rs"]
mod tests;
