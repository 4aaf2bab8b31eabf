use crate::config::stage::StageConfig;
use crate::foundation::core::Point;
use crate::foundation::math::{increment, travel_distance, upcoming_indices};
use crate::reactive::observable::Observable;
use crate::stage::flags::StageFlags;
use crate::stage::history::{HistorySample, TrailHistory};

/// What happened to one raw pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SampleOutcome {
    Accepted(HistorySample),
    /// Travel from the last accepted position was not strictly above the threshold.
    BelowThreshold { distance: f64 },
    /// The stage is focused or transitioning.
    Suppressed,
}

/// Indices written to `next_indices` after each accepted sample.
pub const PRELOAD_COUNT: usize = 5;

/// Turns raw pointer moves into history samples.
///
/// Distance is measured from the last *accepted* position. The first event is
/// always accepted and gets index 0; later ones cycle through the image set.
///
/// On acceptance `next_indices` is refreshed to the indices following the new
/// one before the sample is appended, so history watchers resolve against the
/// fresh preload set.
#[derive(Clone, Debug)]
pub struct PointerSampler {
    last: Option<Point>,
    index: Option<usize>,
    preload: usize,
}

impl Default for PointerSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerSampler {
    pub fn new() -> Self {
        Self::with_preload(PRELOAD_COUNT)
    }

    /// Sampler refreshing `preload` upcoming indices. Zero leaves `next_indices` alone.
    pub fn with_preload(preload: usize) -> Self {
        Self {
            last: None,
            index: None,
            preload,
        }
    }

    pub fn on_pointer_move(
        &mut self,
        p: Point,
        flags: &StageFlags,
        config: &Observable<StageConfig>,
        image_count: usize,
        history: &TrailHistory,
    ) -> SampleOutcome {
        if flags.interaction_suppressed() {
            tracing::trace!(x = p.x, y = p.y, "pointer move suppressed");
            return SampleOutcome::Suppressed;
        }

        let mut cfg = config.get();
        if let Some(last) = self.last {
            let distance = travel_distance(last, p);
            if distance <= cfg.threshold {
                return SampleOutcome::BelowThreshold { distance };
            }
        }

        let index = self.index.map_or(0, |i| increment(i, image_count));
        self.index = Some(index);
        self.last = Some(p);

        let sample = HistorySample {
            index,
            x: p.x,
            y: p.y,
        };
        tracing::trace!(index, x = p.x, y = p.y, "pointer sample accepted");
        let history_length = cfg.history_length;
        if self.preload > 0 {
            cfg.next_indices = upcoming_indices(index, self.preload, image_count);
            config.set(cfg);
        }
        history.append(sample, history_length);
        SampleOutcome::Accepted(sample)
    }

    /// Index of the last accepted sample.
    pub fn last_index(&self) -> Option<usize> {
        self.index
    }

    pub fn last_accepted(&self) -> Option<Point> {
        self.last
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/sampler.rs"]
mod tests;
