use crate::reactive::observable::Observable;

/// The three stage flags.
///
/// `active` is derived: watchers on `is_open` and `is_animating` recompute it
/// as `is_open && !is_animating` after every change. Nothing else writes it.
#[derive(Clone, Debug)]
pub struct StageFlags {
    is_open: Observable<bool>,
    is_animating: Observable<bool>,
    active: Observable<bool>,
}

impl Default for StageFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl StageFlags {
    pub fn new() -> Self {
        let flags = Self {
            is_open: Observable::new(false),
            is_animating: Observable::new(false),
            active: Observable::new(false),
        };
        for source in [&flags.is_open, &flags.is_animating] {
            let is_open = flags.is_open.clone();
            let is_animating = flags.is_animating.clone();
            let active = flags.active.clone();
            source.add_watcher(move |_| active.set(is_open.get() && !is_animating.get()));
        }
        flags
    }

    /// Focused view is showing (set at expand start, cleared at minimize start).
    pub fn is_open(&self) -> &Observable<bool> {
        &self.is_open
    }

    /// A transition is in flight.
    pub fn is_animating(&self) -> &Observable<bool> {
        &self.is_animating
    }

    /// Focused and not transitioning.
    pub fn active(&self) -> &Observable<bool> {
        &self.active
    }

    /// Pointer input is ignored while focused or transitioning.
    pub fn interaction_suppressed(&self) -> bool {
        self.is_open.get() || self.is_animating.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/flags.rs"]
mod tests;
