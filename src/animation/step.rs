//! Declarative property sets and the timed steps handed to an external scheduler.

use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::foundation::core::ElementId;

/// Duration used when a step does not state one.
pub const DEFAULT_DURATION_SECS: f64 = 0.5;

/// Animatable element property.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    X,
    Y,
    Opacity,
    Scale,
    ZIndex,
}

/// Target for a property: absolute, or relative to the current value (`"+=v"`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    To(f64),
    By(f64),
}

impl PropertyValue {
    /// Value reached when starting from `current`.
    pub fn resolve(self, current: f64) -> f64 {
        match self {
            Self::To(v) => v,
            Self::By(d) => current + d,
        }
    }
}

/// Ordered property map. Later `set` calls for the same property win.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PropertySet(BTreeMap<Property, PropertyValue>);

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to(mut self, prop: Property, v: f64) -> Self {
        self.0.insert(prop, PropertyValue::To(v));
        self
    }

    pub fn by(mut self, prop: Property, d: f64) -> Self {
        self.0.insert(prop, PropertyValue::By(d));
        self
    }

    pub fn get(&self, prop: Property) -> Option<PropertyValue> {
        self.0.get(&prop).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, PropertyValue)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

/// Immediate (non-animated) property assignment for one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransformUpdate {
    pub element: ElementId,
    pub props: PropertySet,
}

/// Timing of one step, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepTiming {
    pub duration: f64,
    /// Wait after the previous step completes.
    pub delay: f64,
    pub ease: Ease,
    /// Offset between consecutive targets; negative runs targets last-to-first.
    pub stagger: f64,
}

impl Default for StepTiming {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION_SECS,
            delay: 0.0,
            ease: Ease::default(),
            stagger: 0.0,
        }
    }
}

impl StepTiming {
    /// Start of target `i` (of `n`) relative to the step start, delay included.
    pub fn start_offset(&self, i: usize, n: usize) -> f64 {
        let slot = if self.stagger < 0.0 {
            n.saturating_sub(1).saturating_sub(i)
        } else {
            i
        };
        self.delay + (slot as f64) * self.stagger.abs()
    }

    /// Time from step start until the last target finishes.
    pub fn total_secs(&self, n: usize) -> f64 {
        self.delay + (n.saturating_sub(1) as f64) * self.stagger.abs() + self.duration
    }
}

/// One animated step: the same property targets applied to every element in `targets`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransitionStep {
    pub targets: Vec<ElementId>,
    pub props: PropertySet,
    pub timing: StepTiming,
}

impl TransitionStep {
    pub fn total_secs(&self) -> f64 {
        self.timing.total_secs(self.targets.len())
    }
}

/// Which of the two transitions a plan describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    Expand,
    Minimize,
}

/// Strictly sequential list of steps.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransitionPlan {
    pub kind: TransitionKind,
    pub steps: Vec<TransitionStep>,
}

impl TransitionPlan {
    pub fn total_secs(&self) -> f64 {
        self.steps.iter().map(TransitionStep::total_secs).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/step.rs"]
mod tests;
