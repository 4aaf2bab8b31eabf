use crate::foundation::core::{ElementId, Point};
use crate::reactive::observable::Observable;

/// One accepted pointer position and the image it was mapped to.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HistorySample {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

impl HistorySample {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn element(&self) -> ElementId {
        ElementId(self.index)
    }
}

/// Bounded, oldest-first sequence of accepted samples.
///
/// The sequence is published through an [`Observable`], so watchers always
/// see a complete sequence: every append is a single `set`.
#[derive(Clone, Debug)]
pub struct TrailHistory {
    samples: Observable<Vec<HistorySample>>,
}

impl Default for TrailHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailHistory {
    pub fn new() -> Self {
        Self {
            samples: Observable::new(Vec::new()),
        }
    }

    /// Append `sample`, keep only the newest `cap` entries, then publish.
    pub fn append(&self, sample: HistorySample, cap: usize) {
        let mut next = self.samples.get();
        next.push(sample);
        let excess = next.len().saturating_sub(cap);
        next.drain(..excess);
        self.samples.set(next);
    }

    pub fn observable(&self) -> &Observable<Vec<HistorySample>> {
        &self.samples
    }

    pub fn snapshot(&self) -> Vec<HistorySample> {
        self.samples.get()
    }

    pub fn last(&self) -> Option<HistorySample> {
        self.samples.with(|s| s.last().copied())
    }

    pub fn len(&self) -> usize {
        self.samples.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/history.rs"]
mod tests;
