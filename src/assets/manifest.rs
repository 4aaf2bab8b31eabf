use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Resolution;
use crate::foundation::error::{TrailError, TrailResult};

/// One image in the manifest, with a low and a high resolution source.
///
/// Both snake_case and the camelCase manifest keys (`loUrl`, `loImgW`, ...) are accepted.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageDescriptor {
    #[serde(alias = "loUrl")]
    pub lo_url: String,
    #[serde(alias = "loImgW")]
    pub lo_width: u32,
    #[serde(alias = "loImgH")]
    pub lo_height: u32,
    #[serde(alias = "hiUrl")]
    pub hi_url: String,
    #[serde(alias = "hiImgW")]
    pub hi_width: u32,
    #[serde(alias = "hiImgH")]
    pub hi_height: u32,
}

/// Concrete source an element is switched to.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ImageSource<'a> {
    pub url: &'a str,
    pub width: u32,
    pub height: u32,
}

impl ImageDescriptor {
    pub fn source(&self, res: Resolution) -> ImageSource<'_> {
        match res {
            Resolution::Lo => ImageSource {
                url: &self.lo_url,
                width: self.lo_width,
                height: self.lo_height,
            },
            Resolution::Hi => ImageSource {
                url: &self.hi_url,
                width: self.hi_width,
                height: self.hi_height,
            },
        }
    }
}

/// Parse a JSON array of descriptors. The index space must be non-empty.
pub fn parse_manifest(json: &str) -> TrailResult<Vec<ImageDescriptor>> {
    let images: Vec<ImageDescriptor> = serde_json::from_str(json)?;
    if images.is_empty() {
        return Err(TrailError::validation("image manifest must not be empty"));
    }
    for (i, img) in images.iter().enumerate() {
        if img.lo_url.trim().is_empty() || img.hi_url.trim().is_empty() {
            return Err(TrailError::validation(format!(
                "image {i}: urls must be non-empty"
            )));
        }
    }
    Ok(images)
}

pub fn load_manifest(path: &Path) -> TrailResult<Vec<ImageDescriptor>> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read image manifest '{}'", path.display()))?;
    parse_manifest(&s)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/manifest.rs"]
mod tests;
