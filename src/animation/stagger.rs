/// Fixed-duration animation repeated over an ordered list with a constant per-item delay.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stagger {
    /// Duration of one item's animation in milliseconds.
    pub duration: f64,
    /// Delay between consecutive items in milliseconds.
    pub step: f64,
}

impl Stagger {
    pub fn new(duration: f64, step: f64) -> Self {
        Self { duration, step }
    }

    pub fn delay(self, index: usize) -> f64 {
        index as f64 * self.step
    }

    /// Time from the first item's start to the last item's end. Counts below one add no stagger.
    pub fn span(self, count: usize) -> f64 {
        self.duration + self.step * count.saturating_sub(1) as f64
    }

    /// Raw (un-eased) progress of item `index` at `elapsed` milliseconds, clamped to `[0, 1]`.
    pub fn progress(self, index: usize, elapsed: f64) -> f64 {
        local_progress(elapsed, self.delay(index), self.duration)
    }
}

/// Progress in `[0, 1]` of an animation that starts after `delay` and lasts `duration`.
pub fn local_progress(elapsed: f64, delay: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return if elapsed >= delay { 1.0 } else { 0.0 };
    }
    ((elapsed - delay) / duration).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/stagger.rs"]
mod tests;
