use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::{
    composition::settings::RenderSettings,
    foundation::error::{BubblelineError, BubblelineResult},
};

/// Upper bound on tasks per role; extra tasks are dropped when a step is loaded.
pub const MAX_TASKS_PER_ROLE: usize = 3;

pub const MIN_STEP_SIZE: f64 = 1.0;
pub const MAX_STEP_SIZE: f64 = 100.0;

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Complete host dataset: steps, the phase table and the visual settings.
pub struct TimelineData {
    /// Ordered timeline steps.
    pub steps: Vec<Step>,
    /// Phase table keyed by phase key.
    pub phases: BTreeMap<String, Phase>,
    /// Visual settings; absent means defaults.
    #[serde(default)]
    pub settings: RenderSettings,
    /// Named alternative datasets the host can switch between.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub versions: BTreeMap<String, Version>,
}

impl TimelineData {
    pub fn from_json_str(s: &str) -> BubblelineResult<Self> {
        let data: Self = serde_json::from_str(s)?;
        data.validate()?;
        Ok(data)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> BubblelineResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            BubblelineError::Other(anyhow::Error::new(e).context(format!(
                "read timeline data '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> BubblelineResult<()> {
        validate_step_ids(&self.steps)?;
        self.settings.validate()?;
        for (name, version) in &self.versions {
            validate_step_ids(&version.steps)
                .map_err(|e| BubblelineError::validation(format!("version '{name}': {e}")))?;
            if let Some(settings) = &version.settings {
                settings.validate()?;
            }
        }
        Ok(())
    }

    /// Steps and settings of a named version; settings fall back to the current ones.
    pub fn version(&self, name: &str) -> Option<(&[Step], &RenderSettings)> {
        let v = self.versions.get(name)?;
        Some((&v.steps, v.settings.as_ref().unwrap_or(&self.settings)))
    }
}

/// Rejects duplicate step ids, which would make primitive keys ambiguous.
pub fn validate_step_ids(steps: &[Step]) -> BubblelineResult<()> {
    let mut seen = std::collections::BTreeSet::new();
    for step in steps {
        if !seen.insert(step.id.as_str()) {
            return Err(BubblelineError::validation(format!(
                "duplicate step id '{}'",
                step.id
            )));
        }
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A stored alternative dataset.
pub struct Version {
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<RenderSettings>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Phase definition: display name and default bubble color.
pub struct Phase {
    pub name: String,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One process step, drawn as a bubble on the timeline axis.
pub struct Step {
    /// Unique id; used for primitive keys.
    pub id: String,
    /// Key into the phase table.
    pub phase: String,
    /// Position along the timeline axis in canvas units.
    pub x: f64,
    /// Size level in `[1, 100]`; clamped when laid out.
    pub size: f64,
    /// Tasks drawn above (horizontal) or left (vertical) of the axis.
    #[serde(default, skip_serializing_if = "Tasks::is_empty")]
    pub preface: Tasks,
    /// Tasks drawn below (horizontal) or right (vertical) of the axis.
    #[serde(default, skip_serializing_if = "Tasks::is_empty")]
    pub client: Tasks,
}

impl Step {
    pub fn tasks(&self, role: TaskRole) -> &Tasks {
        match role {
            TaskRole::Preface => &self.preface,
            TaskRole::Client => &self.client,
        }
    }

    pub fn tasks_mut(&mut self, role: TaskRole) -> &mut Tasks {
        match role {
            TaskRole::Preface => &mut self.preface,
            TaskRole::Client => &mut self.client,
        }
    }

    /// All tasks in emission order: preface first, then client.
    pub fn iter_tasks(&self) -> impl Iterator<Item = (TaskRole, usize, &Task)> {
        TaskRole::ALL.into_iter().flat_map(move |role| {
            self.tasks(role)
                .iter()
                .enumerate()
                .map(move |(idx, task)| (role, idx, task))
        })
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Which side of the axis a task annotates.
pub enum TaskRole {
    Preface,
    Client,
}

impl TaskRole {
    pub const ALL: [TaskRole; 2] = [TaskRole::Preface, TaskRole::Client];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preface => "preface",
            Self::Client => "client",
        }
    }

    /// `-1` for preface (above/left), `+1` for client (below/right).
    pub fn side_sign(self) -> f64 {
        match self {
            Self::Preface => -1.0,
            Self::Client => 1.0,
        }
    }
}

impl std::fmt::Display for TaskRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A label attached to a step, with its connector target position.
pub struct Task {
    /// Label text; `\n` separates lines.
    pub label: String,
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default)]
    pub font_weight: FontWeight,
    /// Label position along the axis.
    pub line_x: f64,
    /// Label offset across the axis (negative = above).
    pub line_y: f64,
    /// Shift of the connector start along the bubble, in `[-1, 1]`.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub anchor: f64,
}

/// Hosts write `null` for an unset anchor.
fn null_as_zero<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let v: Option<f64> = serde::Deserialize::deserialize(deserializer)?;
    Ok(v.unwrap_or_default())
}

impl Task {
    pub fn clamped_anchor(&self) -> f64 {
        if self.anchor.is_nan() {
            return 0.0;
        }
        self.anchor.clamp(-1.0, 1.0)
    }
}

/// Tasks of one role, bounded to [`MAX_TASKS_PER_ROLE`].
///
/// Hosts store either a single task object or an array; both load into the same list.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Option<TaskSlot>", into = "Option<TaskSlot>")]
pub struct Tasks(SmallVec<[Task; MAX_TASKS_PER_ROLE]>);

impl Tasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list, dropping anything past [`MAX_TASKS_PER_ROLE`].
    pub fn from_vec(tasks: Vec<Task>) -> Self {
        if tasks.len() > MAX_TASKS_PER_ROLE {
            tracing::warn!(
                count = tasks.len(),
                max = MAX_TASKS_PER_ROLE,
                "dropping tasks beyond the per-role limit"
            );
        }
        Self(tasks.into_iter().take(MAX_TASKS_PER_ROLE).collect())
    }

    /// Appends a task; returns `false` when the list is already full.
    pub fn push(&mut self, task: Task) -> bool {
        if self.0.len() >= MAX_TASKS_PER_ROLE {
            return false;
        }
        self.0.push(task);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }

    pub fn get(&self, idx: usize) -> Option<&Task> {
        self.0.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Task> {
        self.0.get_mut(idx)
    }
}

impl<'a> IntoIterator for &'a Tasks {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Wire shape of a task field: one object or an array.
pub enum TaskSlot {
    One(Box<Task>),
    Many(Vec<Task>),
}

impl From<Option<TaskSlot>> for Tasks {
    fn from(value: Option<TaskSlot>) -> Self {
        match value {
            None => Self::new(),
            Some(TaskSlot::One(task)) => Self::from_vec(vec![*task]),
            Some(TaskSlot::Many(tasks)) => Self::from_vec(tasks),
        }
    }
}

impl From<Tasks> for Option<TaskSlot> {
    fn from(value: Tasks) -> Self {
        let mut tasks = value.0.into_vec();
        match tasks.len() {
            0 => None,
            1 => tasks.pop().map(|t| TaskSlot::One(Box::new(t))),
            _ => Some(TaskSlot::Many(tasks)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Option<String>", into = "&'static str")]
/// Label font size token.
pub enum FontSize {
    #[default]
    M,
    L,
    Xl,
    Xxl,
    Xl3,
    Xl4,
}

impl FontSize {
    /// Font size in canvas units.
    pub fn size(self) -> f64 {
        match self {
            Self::M => 0.3,
            Self::L => 0.4,
            Self::Xl => 0.5,
            Self::Xxl => 0.6,
            Self::Xl3 => 0.7,
            Self::Xl4 => 0.8,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
            Self::Xxl => "XXL",
            Self::Xl3 => "3XL",
            Self::Xl4 => "4XL",
        }
    }
}

impl From<Option<String>> for FontSize {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().unwrap_or_default() {
            "L" => Self::L,
            "XL" => Self::Xl,
            "XXL" => Self::Xxl,
            "3XL" => Self::Xl3,
            "4XL" => Self::Xl4,
            _ => Self::M,
        }
    }
}

impl From<FontSize> for &'static str {
    fn from(value: FontSize) -> Self {
        value.token()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Option<String>", into = "&'static str")]
/// Label font weight token.
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Black,
}

impl FontWeight {
    /// Numeric CSS weight.
    pub fn weight(self) -> u16 {
        match self {
            Self::Light => 300,
            Self::Regular => 400,
            Self::Black => 900,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Regular => "regular",
            Self::Black => "black",
        }
    }
}

impl From<Option<String>> for FontWeight {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().unwrap_or_default() {
            "light" => Self::Light,
            "black" => Self::Black,
            _ => Self::Regular,
        }
    }
}

impl From<FontWeight> for &'static str {
    fn from(value: FontWeight) -> Self {
        value.token()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
