use crate::{
    animation::{ease::Ease, stagger::local_progress},
    scene::{builder::Scene, snapshot::Snapshot},
    transition::{frame::Frame, plan::TransitionPlan},
};

/// Length of a version-switch transition in milliseconds.
pub const TRANSITION_DURATION_MS: f64 = 600.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    #[default]
    Idle,
    Running,
    /// Last eased frame delivered; the next frame clears overrides and ghosts.
    Settling,
}

/// Proof that a frame callback belongs to the current transition.
///
/// Every accepted request and every [`TransitionEngine::reset`] bumps the engine generation, so a
/// callback scheduled before either is recognised as stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTicket {
    generation: u64,
}

#[derive(Clone, Debug, PartialEq)]
/// Outcome of advancing the engine by one frame.
pub enum FrameStep {
    /// The ticket is outdated or nothing is running; paint nothing.
    Stale,
    /// Paint this frame and schedule another.
    Animating(Frame),
    /// The transition concluded; paint the plain scene. No further frames are needed.
    Settled,
}

#[derive(Clone, Debug)]
struct ActiveTransition {
    plan: TransitionPlan,
    started_at: f64,
}

/// Drives one version-switch transition at a time.
///
/// Requests made while a transition is in flight are dropped, not queued.
#[derive(Clone, Debug)]
pub struct TransitionEngine {
    state: EngineState,
    generation: u64,
    duration: f64,
    ease: Ease,
    active: Option<ActiveTransition>,
}

impl Default for TransitionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::with_timing(TRANSITION_DURATION_MS, Ease::InOutQuad)
    }

    pub fn with_timing(duration: f64, ease: Ease) -> Self {
        Self {
            state: EngineState::Idle,
            generation: 0,
            duration,
            ease,
            active: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The `isAnimating` latch.
    pub fn is_animating(&self) -> bool {
        self.state != EngineState::Idle
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn plan(&self) -> Option<&TransitionPlan> {
        self.active.as_ref().map(|a| &a.plan)
    }

    #[tracing::instrument(skip(self, old, new), fields(state = ?self.state))]
    /// Start a transition from `old` to `new` at time `now` (milliseconds).
    ///
    /// Returns `None` when a transition is already in flight; the request is dropped.
    pub fn request(&mut self, old: &Snapshot, new: &Scene, now: f64) -> Option<FrameTicket> {
        if self.is_animating() {
            tracing::debug!("transition in flight, request dropped");
            return None;
        }
        let plan = TransitionPlan::diff(old, new);
        tracing::debug!(
            tweens = plan.tweens.len(),
            ghosts = plan.ghosts.len(),
            "transition started"
        );
        self.generation += 1;
        self.state = EngineState::Running;
        self.active = Some(ActiveTransition {
            plan,
            started_at: now,
        });
        Some(self.ticket())
    }

    /// Advance the transition the ticket belongs to.
    pub fn frame(&mut self, ticket: FrameTicket, now: f64) -> FrameStep {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "stale frame callback ignored"
            );
            return FrameStep::Stale;
        }
        match self.state {
            EngineState::Idle => FrameStep::Stale,
            EngineState::Running => {
                let Some(active) = &self.active else {
                    self.state = EngineState::Idle;
                    return FrameStep::Stale;
                };
                let raw = local_progress(now - active.started_at, 0.0, self.duration);
                let frame = active.plan.sample(self.ease.apply(raw));
                if raw >= 1.0 {
                    self.state = EngineState::Settling;
                }
                FrameStep::Animating(frame)
            }
            EngineState::Settling => {
                self.state = EngineState::Idle;
                self.active = None;
                FrameStep::Settled
            }
        }
    }

    /// Abandon whatever is running, for a forced non-animated render.
    ///
    /// Pending frame callbacks become stale.
    pub fn reset(&mut self) {
        if self.is_animating() {
            tracing::debug!(generation = self.generation, "transition abandoned");
        }
        self.generation += 1;
        self.state = EngineState::Idle;
        self.active = None;
    }

    fn ticket(&self) -> FrameTicket {
        FrameTicket {
            generation: self.generation,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/engine.rs"]
mod tests;
