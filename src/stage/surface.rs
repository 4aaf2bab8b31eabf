//! Outbound collaborator seam, plus in-memory recorders used by tests and the CLI.

use std::collections::BTreeMap;

use crate::animation::step::{Property, PropertySet, TransformUpdate, TransitionStep};
use crate::foundation::core::{ElementId, Resolution, Viewport};
use crate::stage::sequencer::StepScheduler;

/// Where elements live: resolution switches and immediate transforms.
pub trait StageSurface {
    /// Current viewport, read live every time a transform or step is computed.
    fn viewport(&self) -> Viewport;
    fn set_resolution(&mut self, element: ElementId, res: Resolution);
    fn apply_transform(&mut self, updates: &[TransformUpdate]);
}

/// Last applied state of one element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ElementState {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub scale: f64,
    pub z_index: f64,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            opacity: 1.0,
            scale: 1.0,
            z_index: 0.0,
        }
    }
}

impl ElementState {
    pub fn apply(&mut self, props: &PropertySet) {
        for (prop, value) in props.iter() {
            let slot = match prop {
                Property::X => &mut self.x,
                Property::Y => &mut self.y,
                Property::Opacity => &mut self.opacity,
                Property::Scale => &mut self.scale,
                Property::ZIndex => &mut self.z_index,
            };
            *slot = value.resolve(*slot);
        }
    }
}

/// Command as seen by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SurfaceCommand {
    SetResolution { element: ElementId, res: Resolution },
    ApplyTransform { updates: Vec<TransformUpdate> },
}

/// Surface that records commands and tracks per-element state.
///
/// Elements start unloaded, so the first switch to either resolution is
/// recorded. Switching to the resolution an element already shows is a no-op
/// and is not recorded.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    viewport: Viewport,
    commands: Vec<SurfaceCommand>,
    resolutions: BTreeMap<ElementId, Resolution>,
    elements: BTreeMap<ElementId, ElementState>,
}

impl RecordingSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
            resolutions: BTreeMap::new(),
            elements: BTreeMap::new(),
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Resolution the element shows, or `None` before its first switch.
    pub fn resolution(&self, element: ElementId) -> Option<Resolution> {
        self.resolutions.get(&element).copied()
    }

    pub fn element(&self, element: ElementId) -> ElementState {
        self.elements.get(&element).copied().unwrap_or_default()
    }

    /// Apply a step's end state, as a scheduler would on completion.
    pub fn finish_step(&mut self, step: &TransitionStep) {
        for target in &step.targets {
            self.elements.entry(*target).or_default().apply(&step.props);
        }
    }
}

impl StageSurface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_resolution(&mut self, element: ElementId, res: Resolution) {
        if self.resolution(element) == Some(res) {
            return;
        }
        self.resolutions.insert(element, res);
        self.commands
            .push(SurfaceCommand::SetResolution { element, res });
    }

    fn apply_transform(&mut self, updates: &[TransformUpdate]) {
        for u in updates {
            self.elements.entry(u.element).or_default().apply(&u.props);
        }
        self.commands.push(SurfaceCommand::ApplyTransform {
            updates: updates.to_vec(),
        });
    }
}

/// Scheduler that records every step it is handed and never completes on its own.
#[derive(Clone, Debug, Default)]
pub struct RecordingScheduler {
    steps: Vec<TransitionStep>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[TransitionStep] {
        &self.steps
    }

    pub fn last_step(&self) -> Option<&TransitionStep> {
        self.steps.last()
    }
}

impl StepScheduler for RecordingScheduler {
    fn run_step(&mut self, step: &TransitionStep) {
        self.steps.push(step.clone());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/surface.rs"]
mod tests;
