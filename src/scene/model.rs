use crate::animation::zoom::AnimatedScale;
use crate::foundation::core::{Dimensions, Fps, FrameIndex};
use crate::foundation::error::{LookbookError, LookbookResult};
use crate::layout::geometry::Geometry;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One input file and its intrinsic pixel size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    pub path: PathBuf,
    pub dimensions: Dimensions,
}

impl SourceImage {
    pub fn new(path: impl Into<PathBuf>, dimensions: Dimensions) -> Self {
        Self {
            path: path.into(),
            dimensions,
        }
    }

    /// Read the image header to learn its dimensions without decoding pixels.
    pub fn probe(path: impl AsRef<Path>) -> LookbookResult<Self> {
        let path = path.as_ref();
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            LookbookError::compose(format!("read image header '{}': {e}", path.display()))
        })?;
        let dimensions = Dimensions::new(width, height);
        if dimensions.is_empty() {
            return Err(LookbookError::compose(format!(
                "image '{}' has empty dimensions",
                path.display()
            )));
        }
        Ok(Self::new(path, dimensions))
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Decoded raster in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub dimensions: Dimensions,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Opaque axis-aligned fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolidLayer {
    pub origin: (u32, u32),
    pub size: Dimensions,
    /// Straight-alpha RGBA8.
    pub rgba: [u8; 4],
}

/// The image itself: a pre-scaled bitmap driven by the zoom animation.
#[derive(Clone, Debug)]
pub struct ForegroundLayer {
    pub bitmap: PreparedImage,
    pub motion: AnimatedScale,
}

/// Layered, timed representation of one source image.
///
/// Paint order is background, foreground, then the padding blocks. Every layer lasts
/// `duration_frames` at `fps`.
#[derive(Clone, Debug)]
pub struct Scene {
    pub source: SourceImage,
    pub geometry: Geometry,
    pub background: SolidLayer,
    pub foreground: ForegroundLayer,
    /// Zero or two blocks, never one.
    pub padding: Option<[SolidLayer; 2]>,
    pub fps: Fps,
    pub duration_frames: u64,
}

impl Scene {
    /// Elapsed scene-local time of `frame`, in seconds.
    pub fn time_at(&self, frame: FrameIndex) -> f64 {
        self.fps.frames_to_secs(frame.0)
    }

    pub fn canvas(&self) -> Dimensions {
        self.background.size
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
