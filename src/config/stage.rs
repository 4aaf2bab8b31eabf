use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{TrailError, TrailResult};

fn default_threshold() -> f64 {
    40.0
}

fn default_trail_length() -> usize {
    5
}

fn default_history_length() -> usize {
    10
}

/// Tunables read by a stage session.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageConfig {
    /// Minimum pointer travel (exclusive) before a new sample is accepted.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Number of trail entries that stay visible.
    #[serde(default = "default_trail_length")]
    pub trail_length: usize,
    /// Number of samples kept in the history.
    #[serde(default = "default_history_length")]
    pub history_length: usize,
    /// Indices to preload at low resolution.
    #[serde(default)]
    pub next_indices: Vec<usize>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            trail_length: default_trail_length(),
            history_length: default_history_length(),
            next_indices: Vec::new(),
        }
    }
}

impl StageConfig {
    pub fn from_json_str(s: &str) -> TrailResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> TrailResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read stage config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check the config against an image index space of `image_count` entries.
    pub fn validate(&self, image_count: usize) -> TrailResult<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(TrailError::config(
                "threshold must be finite and non-negative",
            ));
        }
        if self.trail_length == 0 {
            return Err(TrailError::config("trail_length must be >= 1"));
        }
        if self.history_length < self.trail_length {
            return Err(TrailError::config(format!(
                "history_length ({}) must be >= trail_length ({})",
                self.history_length, self.trail_length
            )));
        }
        if let Some(bad) = self.next_indices.iter().find(|&&i| i >= image_count) {
            return Err(TrailError::config(format!(
                "next_indices entry {bad} is outside 0..{image_count}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/stage.rs"]
mod tests;
