//! Expand/minimize transitions and the runner that steps through them.
//!
//! A transition is an ordered list of [`TransitionStep`]s. The runner hands
//! one step at a time to a [`StepScheduler`] and waits for the scheduler to
//! report completion before handing over the next. The runner alone sets the
//! flags at the start of a transition and clears `is_animating` after the
//! last step completes.

use std::collections::VecDeque;

use crate::animation::ease::Ease;
use crate::animation::step::{
    Property, PropertySet, StepTiming, TransitionKind, TransitionPlan, TransitionStep,
};
use crate::foundation::core::Viewport;
use crate::stage::flags::StageFlags;
use crate::stage::resolver::{TRAIL_SCALE, TrailView};

/// Vertical travel of inactive trail elements while the focused view is open.
pub const DROP_OFFSET: f64 = 20.0;

/// Runs one step and later reports completion through the owning stage.
pub trait StepScheduler {
    fn run_step(&mut self, step: &TransitionStep);
}

/// Observable lifecycle of the sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SequencerState {
    Idle,
    ExpandRunning,
    OpenIdle,
    MinimizeRunning,
}

/// Result of a step completion report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepProgress {
    /// Step `index` of the running plan was handed to the scheduler.
    Started { kind: TransitionKind, index: usize },
    /// The last step completed and the guard was released.
    Finished(TransitionKind),
    /// No transition was running.
    Ignored,
}

/// Steps that open the newest trail element into the focused view.
pub fn expand_plan(view: &TrailView<'_>) -> Option<TransitionPlan> {
    let current = view.current_element()?;
    Some(TransitionPlan {
        kind: TransitionKind::Expand,
        steps: vec![
            TransitionStep {
                targets: view.inactive_trail_window(),
                props: PropertySet::new()
                    .by(Property::Y, DROP_OFFSET)
                    .to(Property::Opacity, 0.0),
                timing: StepTiming {
                    duration: 0.3,
                    delay: 0.1,
                    ease: Ease::InQuart,
                    stagger: 0.075,
                },
            },
            TransitionStep {
                targets: vec![current],
                props: PropertySet::new()
                    .to(Property::X, 0.0)
                    .to(Property::Y, 0.0),
                timing: StepTiming {
                    duration: 0.7,
                    delay: 0.3,
                    ease: Ease::InOutQuart,
                    stagger: 0.0,
                },
            },
            TransitionStep {
                targets: vec![current],
                props: PropertySet::new().to(Property::Scale, 1.0),
                timing: StepTiming {
                    delay: 0.1,
                    ease: Ease::InOutQuart,
                    ..StepTiming::default()
                },
            },
        ],
    })
}

/// Steps that return the focused element to its trail slot.
///
/// The return position is taken from the newest history sample and the
/// viewport at call time.
pub fn minimize_plan(view: &TrailView<'_>, viewport: Viewport) -> Option<TransitionPlan> {
    let current = view.current_element()?;
    let last = view.last_sample()?;
    let home = viewport.offset_from_center(last.point());
    Some(TransitionPlan {
        kind: TransitionKind::Minimize,
        steps: vec![
            TransitionStep {
                targets: vec![current],
                props: PropertySet::new().to(Property::Scale, TRAIL_SCALE),
                timing: StepTiming {
                    duration: 0.6,
                    delay: 0.0,
                    ease: Ease::InOutQuart,
                    stagger: 0.0,
                },
            },
            TransitionStep {
                targets: vec![current],
                props: PropertySet::new()
                    .to(Property::X, home.x)
                    .to(Property::Y, home.y),
                timing: StepTiming {
                    duration: 0.7,
                    delay: 0.3,
                    ease: Ease::InOutQuart,
                    stagger: 0.0,
                },
            },
            TransitionStep {
                targets: view.inactive_trail_window(),
                props: PropertySet::new()
                    .by(Property::Y, -DROP_OFFSET)
                    .to(Property::Opacity, 1.0),
                timing: StepTiming {
                    duration: 0.3,
                    delay: 0.0,
                    ease: Ease::OutQuart,
                    stagger: -0.1,
                },
            },
        ],
    })
}

#[derive(Debug)]
struct Running {
    kind: TransitionKind,
    next_index: usize,
    pending: VecDeque<TransitionStep>,
}

/// Step runner guarding the single in-flight transition.
#[derive(Debug, Default)]
pub struct TransitionSequencer {
    running: Option<Running>,
}

impl TransitionSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, flags: &StageFlags) -> SequencerState {
        match (&self.running, flags.is_open().get()) {
            (Some(r), _) if r.kind == TransitionKind::Expand => SequencerState::ExpandRunning,
            (Some(_), _) => SequencerState::MinimizeRunning,
            (None, true) => SequencerState::OpenIdle,
            (None, false) => SequencerState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start `plan`. Returns `false` without side effects if a transition is in flight.
    ///
    /// Expand raises `is_animating` before `is_open`, so `active` watchers see
    /// `false` twice and never a transient `true`. Minimize clears `is_open`
    /// first. Either way both flags have their new values before the first
    /// step is handed to the scheduler.
    pub fn begin(
        &mut self,
        plan: TransitionPlan,
        flags: &StageFlags,
        scheduler: &mut impl StepScheduler,
    ) -> bool {
        if self.running.is_some() || flags.is_animating().get() {
            tracing::debug!(kind = ?plan.kind, "transition ignored: already animating");
            return false;
        }

        match plan.kind {
            TransitionKind::Expand => {
                flags.is_animating().set(true);
                flags.is_open().set(true);
            }
            TransitionKind::Minimize => {
                flags.is_open().set(false);
                flags.is_animating().set(true);
            }
        }

        tracing::debug!(kind = ?plan.kind, steps = plan.steps.len(), secs = plan.total_secs(), "transition started");
        self.running = Some(Running {
            kind: plan.kind,
            next_index: 0,
            pending: plan.steps.into(),
        });
        self.advance(flags, scheduler);
        true
    }

    /// Report that the step handed out last has completed.
    pub fn complete_step(
        &mut self,
        flags: &StageFlags,
        scheduler: &mut impl StepScheduler,
    ) -> StepProgress {
        if self.running.is_none() {
            tracing::debug!("step completion ignored: no transition running");
            return StepProgress::Ignored;
        }
        self.advance(flags, scheduler)
    }

    fn advance(&mut self, flags: &StageFlags, scheduler: &mut impl StepScheduler) -> StepProgress {
        let Some(running) = self.running.as_mut() else {
            return StepProgress::Ignored;
        };
        match running.pending.pop_front() {
            Some(step) => {
                let index = running.next_index;
                running.next_index += 1;
                let kind = running.kind;
                tracing::trace!(?kind, index, targets = step.targets.len(), "running step");
                scheduler.run_step(&step);
                StepProgress::Started { kind, index }
            }
            None => {
                let kind = running.kind;
                self.running = None;
                flags.is_animating().set(false);
                tracing::debug!(?kind, "transition finished");
                StepProgress::Finished(kind)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/sequencer.rs"]
mod tests;
