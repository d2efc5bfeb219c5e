//! Fit-axis geometry for one source image on a fixed canvas.
//!
//! The foreground is resized (aspect preserved) so that the fit axis matches the canvas exactly.
//! On the cross axis the remaining gap is split into two identical padding blocks that span the
//! full canvas along the fit axis. Odd gaps lose their last pixel to integer division; the blocks
//! are never made asymmetric to compensate.

use crate::foundation::core::Dimensions;
use crate::foundation::error::{LookbookError, LookbookResult};

/// Canvas axis the scaled image is forced to match exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Match canvas height; pillarbox left/right.
    #[default]
    Height,
    /// Match canvas width; letterbox top/bottom.
    Width,
}

/// Opaque fill block covering half of the cross-axis gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaddingBlock {
    /// Block size in pixels.
    pub size: Dimensions,
    /// Top-left corner of the first block (always the canvas origin).
    pub first_origin: (u32, u32),
    /// Top-left corner of the second block, just past the resting foreground.
    pub second_origin: (u32, u32),
}

/// Resolved geometry for one image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub fit: FitMode,
    /// Canvas the geometry was resolved against.
    pub canvas: Dimensions,
    /// Resting (unzoomed) foreground size.
    pub foreground: Dimensions,
    /// `None` when the foreground already covers the canvas on the cross axis.
    pub padding: Option<PaddingBlock>,
}

/// Aspect-preserving resize of `image` so its `fit` axis equals the canvas axis.
///
/// The cross axis is truncated toward zero and clamped to at least one pixel.
pub fn fit_size(image: Dimensions, canvas: Dimensions, fit: FitMode) -> LookbookResult<Dimensions> {
    if image.is_empty() {
        return Err(LookbookError::layout(format!(
            "source image has empty dimensions {}x{}",
            image.width, image.height
        )));
    }
    if canvas.is_empty() {
        return Err(LookbookError::layout("canvas has empty dimensions"));
    }

    let scale_cross = |src_cross: u32, src_fit: u32, dst_fit: u32| -> u32 {
        let v = u64::from(src_cross) * u64::from(dst_fit) / u64::from(src_fit);
        v.clamp(1, u64::from(u32::MAX)) as u32
    };

    Ok(match fit {
        FitMode::Height => Dimensions::new(
            scale_cross(image.width, image.height, canvas.height),
            canvas.height,
        ),
        FitMode::Width => Dimensions::new(
            canvas.width,
            scale_cross(image.height, image.width, canvas.width),
        ),
    })
}

/// Build the padding block for a resting foreground.
///
/// Fails with a layout error when the gap on the cross axis is not positive.
pub fn padding_block(
    foreground: Dimensions,
    canvas: Dimensions,
    fit: FitMode,
) -> LookbookResult<PaddingBlock> {
    let (canvas_cross, fg_cross) = match fit {
        FitMode::Height => (canvas.width, foreground.width),
        FitMode::Width => (canvas.height, foreground.height),
    };
    let gap = (i64::from(canvas_cross) - i64::from(fg_cross)) / 2;
    if gap <= 0 {
        return Err(LookbookError::layout(format!(
            "padding size must be positive (canvas {canvas_cross}px, foreground {fg_cross}px)"
        )));
    }
    let gap = gap as u32;
    let second = gap + fg_cross;

    Ok(match fit {
        FitMode::Height => PaddingBlock {
            size: Dimensions::new(gap, canvas.height),
            first_origin: (0, 0),
            second_origin: (second, 0),
        },
        FitMode::Width => PaddingBlock {
            size: Dimensions::new(canvas.width, gap),
            first_origin: (0, 0),
            second_origin: (0, second),
        },
    })
}

/// Resolve foreground size and padding for one image.
///
/// A padding failure is not an error here: it means no padding is needed.
pub fn resolve_geometry(
    image: Dimensions,
    canvas: Dimensions,
    fit: FitMode,
) -> LookbookResult<Geometry> {
    let foreground = fit_size(image, canvas, fit)?;
    let padding = match padding_block(foreground, canvas, fit) {
        Ok(p) => Some(p),
        Err(e) => {
            tracing::debug!(error = %e, "padding omitted");
            None
        }
    };
    Ok(Geometry {
        fit,
        canvas,
        foreground,
        padding,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
