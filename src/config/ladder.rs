use crate::foundation::error::{TrailError, TrailResult};

/// Ordered threshold presets with a cursor, for "more/less sensitive" controls.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ThresholdLadder {
    steps: Vec<f64>,
    pos: usize,
}

impl Default for ThresholdLadder {
    fn default() -> Self {
        Self {
            steps: vec![20.0, 40.0, 80.0, 140.0, 200.0],
            pos: 1,
        }
    }
}

impl ThresholdLadder {
    /// Steps must be non-empty and strictly increasing; `pos` must point inside them.
    pub fn new(steps: Vec<f64>, pos: usize) -> TrailResult<Self> {
        if steps.is_empty() {
            return Err(TrailError::config("threshold ladder must be non-empty"));
        }
        if steps.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TrailError::config(
                "threshold ladder must be strictly increasing",
            ));
        }
        if pos >= steps.len() {
            return Err(TrailError::config("threshold ladder position out of range"));
        }
        Ok(Self { steps, pos })
    }

    pub fn current(&self) -> f64 {
        self.steps[self.pos]
    }

    /// Move the cursor to the preset nearest `threshold` (ties go to the lower one).
    /// Returns the selected preset.
    pub fn seek(&mut self, threshold: f64) -> f64 {
        self.pos = self
            .steps
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - threshold).abs().total_cmp(&(*b - threshold).abs()))
            .map_or(self.pos, |(i, _)| i);
        self.current()
    }

    /// Move one step up, clamped at the top. Returns the new threshold.
    pub fn raise(&mut self) -> f64 {
        self.pos = (self.pos + 1).min(self.steps.len() - 1);
        self.current()
    }

    /// Move one step down, clamped at the bottom. Returns the new threshold.
    pub fn lower(&mut self) -> f64 {
        self.pos = self.pos.saturating_sub(1);
        self.current()
    }

    pub fn is_max(&self) -> bool {
        self.pos + 1 == self.steps.len()
    }

    pub fn is_min(&self) -> bool {
        self.pos == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/ladder.rs"]
mod tests;
