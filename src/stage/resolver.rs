//! Pure mapping from history + flags + config to element resolutions and transforms.

use crate::animation::step::{Property, PropertySet, TransformUpdate};
use crate::config::stage::StageConfig;
use crate::foundation::core::{ElementId, Resolution, Viewport};
use crate::stage::history::HistorySample;

/// Scale of every element while it sits in the trail.
pub const TRAIL_SCALE: f64 = 0.6;

/// Read-only view over one history snapshot.
#[derive(Clone, Copy, Debug)]
pub struct TrailView<'a> {
    history: &'a [HistorySample],
    config: &'a StageConfig,
}

/// Everything a surface must do to show one history state.
///
/// Resolution switches come first so source dimension changes land before
/// positions do. Transforms are applied in order; later entries for the same
/// element win.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ViewUpdate {
    pub resolutions: Vec<(ElementId, Resolution)>,
    pub transforms: Vec<TransformUpdate>,
}

impl<'a> TrailView<'a> {
    pub fn new(history: &'a [HistorySample], config: &'a StageConfig) -> Self {
        Self { history, config }
    }

    /// Element of every history sample, oldest first.
    pub fn trail_elements(&self) -> Vec<ElementId> {
        self.history.iter().map(HistorySample::element).collect()
    }

    /// The newest `trail_length` samples.
    pub fn current_window(&self) -> &'a [HistorySample] {
        let start = self.history.len().saturating_sub(self.config.trail_length);
        &self.history[start..]
    }

    pub fn current_trail_window(&self) -> Vec<ElementId> {
        self.current_window()
            .iter()
            .map(HistorySample::element)
            .collect()
    }

    /// The current window without its newest entry.
    pub fn inactive_trail_window(&self) -> Vec<ElementId> {
        let mut window = self.current_trail_window();
        window.pop();
        window
    }

    /// Most recently touched element, if any.
    pub fn current_element(&self) -> Option<ElementId> {
        self.history.last().map(HistorySample::element)
    }

    pub fn last_sample(&self) -> Option<&'a HistorySample> {
        self.history.last()
    }

    /// Preload hints, independent of history.
    pub fn upcoming_elements(&self) -> Vec<ElementId> {
        self.config
            .next_indices
            .iter()
            .copied()
            .map(ElementId)
            .collect()
    }

    /// Whether the sample at global history position `i` is inside the visible trail.
    fn visible_at(&self, i: usize) -> bool {
        i + 1 + self.config.trail_length > self.history.len()
    }

    /// Resolve the view. Returns `None` when history is empty.
    pub fn resolve(
        &self,
        is_open: bool,
        viewport: Viewport,
        image_count: usize,
    ) -> Option<ViewUpdate> {
        let current = self.current_element()?;

        let mut resolutions: Vec<(ElementId, Resolution)> = self
            .upcoming_elements()
            .into_iter()
            .map(|e| (e, Resolution::Lo))
            .collect();
        if is_open {
            resolutions.extend(
                self.current_trail_window()
                    .into_iter()
                    .map(|e| (e, Resolution::Lo)),
            );
            resolutions.push((current, Resolution::Hi));
        }

        // Every history entry gets a transform; entries older than the
        // window resolve to opacity 0.
        let mut transforms: Vec<TransformUpdate> = self
            .history
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let offset = viewport.offset_from_center(s.point());
                TransformUpdate {
                    element: s.element(),
                    props: PropertySet::new()
                        .to(Property::X, offset.x)
                        .to(Property::Y, offset.y)
                        .to(
                            Property::Opacity,
                            if self.visible_at(i) { 1.0 } else { 0.0 },
                        )
                        .to(Property::ZIndex, i as f64)
                        .to(Property::Scale, TRAIL_SCALE),
                }
            })
            .collect();

        if is_open {
            transforms.extend((0..image_count).map(|i| TransformUpdate {
                element: ElementId(i),
                props: PropertySet::new().to(Property::Opacity, 0.0),
            }));
            transforms.push(TransformUpdate {
                element: current,
                props: focused_props(),
            });
        }

        Some(ViewUpdate {
            resolutions,
            transforms,
        })
    }
}

/// Centered, full scale, fully opaque.
pub fn focused_props() -> PropertySet {
    PropertySet::new()
        .to(Property::Opacity, 1.0)
        .to(Property::X, 0.0)
        .to(Property::Y, 0.0)
        .to(Property::Scale, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/stage/resolver.rs"]
mod tests;
