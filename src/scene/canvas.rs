use crate::animation::zoom::ZoomCurve;
use crate::foundation::core::{Dimensions, Fps};
use crate::foundation::error::{LookbookError, LookbookResult};
use crate::layout::geometry::FitMode;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Largest canvas edge the raster backend can allocate.
pub const MAX_CANVAS_EDGE: u32 = u16::MAX as u32;

fn default_zoom_factor() -> f64 {
    1.0
}

fn default_background_rgba() -> [u8; 4] {
    [0, 0, 0, 255]
}

/// JSON-facing canvas settings.
///
/// This is the editable form; it is validated into a [`Canvas`] before any work starts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanvasDef {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub fps: Fps,
    /// Time each image stays on screen, in seconds.
    pub duration_secs: f64,
    #[serde(default)]
    pub fit: FitMode,
    /// Final/initial scale ratio. `1.0` disables the zoom, `> 1.0` zooms in.
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f64,
    /// Straight-alpha fill used for the background and padding blocks. Must be opaque.
    #[serde(default = "default_background_rgba")]
    pub background_rgba: [u8; 4],
}

impl CanvasDef {
    /// Settings with the default frame rate, fit, zoom and fill.
    pub fn new(width: u32, height: u32, duration_secs: f64) -> Self {
        Self {
            width,
            height,
            fps: Fps::default(),
            duration_secs,
            fit: FitMode::default(),
            zoom_factor: default_zoom_factor(),
            background_rgba: default_background_rgba(),
        }
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> LookbookResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| LookbookError::validation(format!("parse canvas JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> LookbookResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LookbookError::validation(format!("open canvas JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

/// Validated, immutable canvas configuration shared by every scene of a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    dimensions: Dimensions,
    fps: Fps,
    duration_secs: f64,
    frames_per_image: u64,
    fit: FitMode,
    zoom: ZoomCurve,
    background_rgba: [u8; 4],
}

impl Canvas {
    pub fn new(def: CanvasDef) -> LookbookResult<Self> {
        if def.width == 0 || def.height == 0 {
            return Err(LookbookError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if def.width > MAX_CANVAS_EDGE || def.height > MAX_CANVAS_EDGE {
            return Err(LookbookError::validation(format!(
                "canvas width/height must be <= {MAX_CANVAS_EDGE}"
            )));
        }
        let fps = Fps::new(def.fps.num, def.fps.den)?;
        if !def.duration_secs.is_finite() || def.duration_secs <= 0.0 {
            return Err(LookbookError::validation(format!(
                "per-image duration must be finite and > 0, got {}",
                def.duration_secs
            )));
        }
        let frames_per_image = fps.secs_to_frames_round(def.duration_secs);
        if frames_per_image == 0 {
            return Err(LookbookError::validation(format!(
                "per-image duration {}s is shorter than one frame at {}/{} fps",
                def.duration_secs, fps.num, fps.den
            )));
        }
        let zoom = ZoomCurve::new(def.zoom_factor, def.duration_secs)?;
        if def.background_rgba[3] != 255 {
            return Err(LookbookError::validation("background fill must be opaque"));
        }

        Ok(Self {
            dimensions: Dimensions::new(def.width, def.height),
            fps,
            duration_secs: def.duration_secs,
            frames_per_image,
            fit: def.fit,
            zoom,
            background_rgba: def.background_rgba,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Per-image duration quantized to whole frames.
    pub fn frames_per_image(&self) -> u64 {
        self.frames_per_image
    }

    pub fn fit(&self) -> FitMode {
        self.fit
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom.end()
    }

    pub fn background_rgba(&self) -> [u8; 4] {
        self.background_rgba
    }

    /// Zoom curve spanning one image's on-screen time.
    pub fn zoom_curve(&self) -> ZoomCurve {
        self.zoom
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/canvas.rs"]
mod tests;
