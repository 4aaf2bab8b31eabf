//! trailstage keeps a trail of images following the pointer and opens the
//! newest one into a focused view.
//!
//! # Pieces
//!
//! 1. **Sample**: raw pointer moves become history samples once they travel
//!    strictly further than the configured threshold.
//! 2. **Resolve**: every history change is mapped to element resolutions and
//!    transforms ([`TrailView`]) and pushed to a [`StageSurface`].
//! 3. **Sequence**: [`Stage::expand`] and [`Stage::minimize`] hand ordered
//!    [`TransitionStep`]s to a [`StepScheduler`], one at a time, guarded by
//!    the `is_animating` flag.
//!
//! Everything is single threaded. Observables notify synchronously, and
//! transition progress only moves when the scheduler's owner reports a step
//! completion through [`Stage::complete_step`].
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod config;
mod foundation;
mod reactive;
mod stage;

pub use animation::ease::Ease;
pub use animation::step::{
    DEFAULT_DURATION_SECS, Property, PropertySet, PropertyValue, StepTiming, TransformUpdate,
    TransitionKind, TransitionPlan, TransitionStep,
};
pub use assets::manifest::{ImageDescriptor, ImageSource, load_manifest, parse_manifest};
pub use config::ladder::ThresholdLadder;
pub use config::stage::StageConfig;
pub use foundation::core::{ElementId, Point, Resolution, Vec2, Viewport};
pub use foundation::error::{TrailError, TrailResult};
pub use foundation::math::{decrement, increment, pad_index, upcoming_indices};
pub use reactive::observable::Observable;
pub use stage::flags::StageFlags;
pub use stage::history::{HistorySample, TrailHistory};
pub use stage::resolver::{TRAIL_SCALE, TrailView, ViewUpdate, focused_props};
pub use stage::sampler::{PRELOAD_COUNT, PointerSampler, SampleOutcome};
pub use stage::sequencer::{
    DROP_OFFSET, SequencerState, StepProgress, StepScheduler, TransitionSequencer, expand_plan,
    minimize_plan,
};
pub use stage::session::Stage;
pub use stage::surface::{
    ElementState, RecordingScheduler, RecordingSurface, SurfaceCommand, StageSurface,
};
