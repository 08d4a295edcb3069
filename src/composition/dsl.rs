use std::collections::BTreeMap;

use crate::{
    composition::model::{
        FontSize, FontWeight, Phase, Step, Task, TaskRole, Tasks, TimelineData, Version,
    },
    composition::settings::RenderSettings,
    foundation::error::{BubblelineError, BubblelineResult},
};

pub struct TimelineBuilder {
    steps: Vec<Step>,
    phases: BTreeMap<String, Phase>,
    settings: RenderSettings,
    versions: BTreeMap<String, Version>,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            phases: BTreeMap::new(),
            settings: RenderSettings::default(),
            versions: BTreeMap::new(),
        }
    }

    pub fn phase(
        mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        self.phases.insert(
            key.into(),
            Phase {
                name: name.into(),
                color: color.into(),
            },
        );
        self
    }

    pub fn settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn version(
        mut self,
        name: impl Into<String>,
        steps: Vec<Step>,
        settings: Option<RenderSettings>,
    ) -> BubblelineResult<Self> {
        let name = name.into();
        if self.versions.contains_key(&name) {
            return Err(BubblelineError::validation(format!(
                "duplicate version name '{name}'"
            )));
        }
        self.versions.insert(name, Version { steps, settings });
        Ok(self)
    }

    pub fn build(self) -> BubblelineResult<TimelineData> {
        let data = TimelineData {
            steps: self.steps,
            phases: self.phases,
            settings: self.settings,
            versions: self.versions,
        };
        data.validate()?;
        Ok(data)
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct StepBuilder {
    step: Step,
}

impl StepBuilder {
    pub fn new(id: impl Into<String>, phase: impl Into<String>, x: f64, size: f64) -> Self {
        Self {
            step: Step {
                id: id.into(),
                phase: phase.into(),
                x,
                size,
                preface: Tasks::new(),
                client: Tasks::new(),
            },
        }
    }

    pub fn preface(self, task: Task) -> BubblelineResult<Self> {
        self.task(TaskRole::Preface, task)
    }

    pub fn client(self, task: Task) -> BubblelineResult<Self> {
        self.task(TaskRole::Client, task)
    }

    pub fn task(mut self, role: TaskRole, task: Task) -> BubblelineResult<Self> {
        if !self.step.tasks_mut(role).push(task) {
            return Err(BubblelineError::validation(format!(
                "step '{}' already has the maximum number of {role} tasks",
                self.step.id
            )));
        }
        Ok(self)
    }

    pub fn build(self) -> Step {
        self.step
    }
}

/// A regular-weight `M` task with no anchor shift.
pub fn task(label: impl Into<String>, line_x: f64, line_y: f64) -> Task {
    Task {
        label: label.into(),
        font_size: FontSize::M,
        font_weight: FontWeight::Regular,
        line_x,
        line_y,
        anchor: 0.0,
    }
}

/// Same as [`task`] with an anchor shift.
pub fn anchored_task(label: impl Into<String>, line_x: f64, line_y: f64, anchor: f64) -> Task {
    Task {
        anchor,
        ..task(label, line_x, line_y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
