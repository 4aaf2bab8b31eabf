use crate::foundation::error::{TrailError, TrailResult};

pub use kurbo::{Point, Vec2};

/// Handle of one managed image element, addressed by its index in the manifest.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub usize);

/// Which source an element should currently display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Lo,
    Hi,
}

/// Size of the visible area in CSS-like pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> TrailResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(TrailError::validation(
                "viewport dimensions must be finite and non-negative",
            ));
        }
        Ok(Self { width, height })
    }

    /// Offset of `p` from the viewport center. Elements are positioned
    /// relative to the center, so the focused element sits at `(0, 0)`.
    pub fn offset_from_center(self, p: Point) -> Vec2 {
        Vec2::new(p.x - self.width / 2.0, p.y - self.height / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
