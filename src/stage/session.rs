use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::assets::manifest::ImageDescriptor;
use crate::config::stage::StageConfig;
use crate::foundation::core::{ElementId, Point, Resolution};
use crate::foundation::error::{TrailError, TrailResult};
use crate::foundation::math::pad_index;
use crate::reactive::observable::Observable;
use crate::stage::flags::StageFlags;
use crate::stage::history::{HistorySample, TrailHistory};
use crate::stage::resolver::{TrailView, ViewUpdate};
use crate::stage::sampler::{PointerSampler, SampleOutcome};
use crate::stage::sequencer::{
    SequencerState, StepProgress, StepScheduler, TransitionSequencer, expand_plan, minimize_plan,
};
use crate::stage::surface::StageSurface;

/// One trail session: history, flags, config and the element set it manages.
///
/// Notification fan-out is fixed at construction: `is_open`/`is_animating`
/// recompute `active`, and every history change re-resolves the view onto
/// the surface.
pub struct Stage<S: StageSurface + 'static, A: StepScheduler> {
    images: Vec<ImageDescriptor>,
    config: Observable<StageConfig>,
    history: TrailHistory,
    flags: StageFlags,
    sampler: PointerSampler,
    sequencer: TransitionSequencer,
    surface: Rc<RefCell<S>>,
    scheduler: A,
}

impl<S: StageSurface + 'static, A: StepScheduler> std::fmt::Debug for Stage<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("images", &self.images.len())
            .field("history", &self.history.len())
            .field("is_open", &self.flags.is_open().get())
            .field("is_animating", &self.flags.is_animating().get())
            .finish()
    }
}

impl<S: StageSurface + 'static, A: StepScheduler> Stage<S, A> {
    /// Build a session over `images` and preload the upcoming elements.
    pub fn new(
        images: Vec<ImageDescriptor>,
        config: StageConfig,
        surface: S,
        scheduler: A,
    ) -> TrailResult<Self> {
        if images.is_empty() {
            return Err(TrailError::validation("stage needs at least one image"));
        }
        config.validate(images.len())?;

        let stage = Self {
            config: Observable::new(config),
            history: TrailHistory::new(),
            flags: StageFlags::new(),
            sampler: PointerSampler::new(),
            sequencer: TransitionSequencer::new(),
            surface: Rc::new(RefCell::new(surface)),
            scheduler,
            images,
        };

        let config = stage.config.clone();
        let is_open = stage.flags.is_open().clone();
        let surface = Rc::clone(&stage.surface);
        let image_count = stage.images.len();
        stage.history.observable().add_watcher(move |history| {
            resolve_onto(
                history,
                &config.get(),
                is_open.get(),
                image_count,
                &mut *surface.borrow_mut(),
            );
        });

        stage.preload_upcoming();
        tracing::debug!(images = image_count, "stage initialized");
        Ok(stage)
    }

    fn preload_upcoming(&self) {
        let config = self.config.get();
        let mut surface = self.surface.borrow_mut();
        for i in &config.next_indices {
            surface.set_resolution(ElementId(*i), Resolution::Lo);
        }
    }

    /// Feed one raw pointer position.
    ///
    /// An accepted sample refreshes `next_indices` before it lands in history.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> SampleOutcome {
        self.sampler.on_pointer_move(
            Point::new(x, y),
            &self.flags,
            &self.config,
            self.images.len(),
            &self.history,
        )
    }

    /// Re-resolve the view for the current state, e.g. after a resize.
    pub fn refresh(&self) -> Option<ViewUpdate> {
        let history = self.history.snapshot();
        resolve_onto(
            &history,
            &self.config.get(),
            self.flags.is_open().get(),
            self.images.len(),
            &mut *self.surface.borrow_mut(),
        )
    }

    /// Open the newest trail element. No-op while animating or with empty history.
    #[tracing::instrument(skip(self))]
    pub fn expand(&mut self) -> bool {
        if self.flags.is_animating().get() {
            tracing::debug!("expand ignored: already animating");
            return false;
        }
        let config = self.config.get();
        let history = self.history.snapshot();
        let view = TrailView::new(&history, &config);
        let Some(plan) = expand_plan(&view) else {
            tracing::debug!("expand ignored: empty history");
            return false;
        };
        if let Some(current) = view.current_element() {
            self.surface
                .borrow_mut()
                .set_resolution(current, Resolution::Hi);
        }
        self.sequencer
            .begin(plan, &self.flags, &mut self.scheduler)
    }

    /// Return the focused element to the trail. No-op while animating or with empty history.
    #[tracing::instrument(skip(self))]
    pub fn minimize(&mut self) -> bool {
        if self.flags.is_animating().get() {
            tracing::debug!("minimize ignored: already animating");
            return false;
        }
        let config = self.config.get();
        let history = self.history.snapshot();
        let viewport = self.surface.borrow().viewport();
        let Some(plan) = minimize_plan(&TrailView::new(&history, &config), viewport) else {
            tracing::debug!("minimize ignored: empty history");
            return false;
        };
        self.sequencer
            .begin(plan, &self.flags, &mut self.scheduler)
    }

    /// Called by the scheduler's owner when the running step has completed.
    pub fn complete_step(&mut self) -> StepProgress {
        self.sequencer
            .complete_step(&self.flags, &mut self.scheduler)
    }

    pub fn state(&self) -> SequencerState {
        self.sequencer.state(&self.flags)
    }

    /// `"0003/0012"`: 1-based position of the current image and the image count.
    pub fn counter_label(&self) -> Option<String> {
        let last = self.history.last()?;
        Some(format!(
            "{}/{}",
            pad_index(last.index + 1),
            pad_index(self.images.len())
        ))
    }

    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn config(&self) -> &Observable<StageConfig> {
        &self.config
    }

    pub fn history(&self) -> &Observable<Vec<HistorySample>> {
        self.history.observable()
    }

    pub fn flags(&self) -> &StageFlags {
        &self.flags
    }

    pub fn surface(&self) -> Ref<'_, S> {
        self.surface.borrow()
    }

    pub fn surface_mut(&self) -> RefMut<'_, S> {
        self.surface.borrow_mut()
    }

    pub fn scheduler(&self) -> &A {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut A {
        &mut self.scheduler
    }
}

fn resolve_onto<S: StageSurface>(
    history: &[HistorySample],
    config: &StageConfig,
    is_open: bool,
    image_count: usize,
    surface: &mut S,
) -> Option<ViewUpdate> {
    let viewport = surface.viewport();
    let update = TrailView::new(history, config).resolve(is_open, viewport, image_count)?;
    for (element, res) in &update.resolutions {
        surface.set_resolution(*element, *res);
    }
    surface.apply_transform(&update.transforms);
    Some(update)
}

#[cfg(test)]
#[path = "../../tests/unit/stage/session.rs"]
mod tests;
