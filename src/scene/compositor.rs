use crate::animation::zoom::AnimatedScale;
use crate::foundation::core::Dimensions;
use crate::foundation::error::{LookbookError, LookbookResult};
use crate::foundation::math::premultiply_rgba8_in_place;
use crate::layout::geometry::{Geometry, resolve_geometry};
use crate::scene::canvas::Canvas;
use crate::scene::model::{ForegroundLayer, PreparedImage, Scene, SolidLayer, SourceImage};
use image::imageops::FilterType;
use std::path::Path;
use std::sync::Arc;

/// Largest foreground bitmap edge the raster backend accepts.
pub const MAX_BITMAP_EDGE: u32 = u16::MAX as u32;

/// Build the layered scene for one source image.
///
/// The foreground stays centred for the whole clip and only its scale animates. Padding blocks
/// sit on either side of the resting foreground on the cross axis and use the background fill.
#[tracing::instrument(skip(canvas, source), fields(image = %source.path.display()))]
pub fn compose_scene(canvas: &Canvas, source: &SourceImage) -> LookbookResult<Scene> {
    let (geometry, motion) = plan_foreground(canvas, source)?;
    let bitmap = decode_prescaled(&source.path, motion.prescaled_size())?;

    let fill = canvas.background_rgba();
    let background = SolidLayer {
        origin: (0, 0),
        size: canvas.dimensions(),
        rgba: fill,
    };
    let padding = geometry.padding.map(|p| {
        [
            SolidLayer {
                origin: p.first_origin,
                size: p.size,
                rgba: fill,
            },
            SolidLayer {
                origin: p.second_origin,
                size: p.size,
                rgba: fill,
            },
        ]
    });

    tracing::debug!(
        rest_w = geometry.foreground.width,
        rest_h = geometry.foreground.height,
        padded = padding.is_some(),
        "composed scene"
    );

    Ok(Scene {
        source: source.clone(),
        geometry,
        background,
        foreground: ForegroundLayer { bitmap, motion },
        padding,
        fps: canvas.fps(),
        duration_frames: canvas.frames_per_image(),
    })
}

/// Check that `source` will compose on `canvas`, without keeping any pixels.
///
/// Applies the same geometry and bitmap size checks as [`compose_scene`] and fully decodes the file.
pub fn verify_composable(canvas: &Canvas, source: &SourceImage) -> LookbookResult<()> {
    plan_foreground(canvas, source)?;
    image::open(&source.path).map_err(|e| decode_error(&source.path, e))?;
    Ok(())
}

fn plan_foreground(
    canvas: &Canvas,
    source: &SourceImage,
) -> LookbookResult<(Geometry, AnimatedScale)> {
    let geometry = resolve_geometry(source.dimensions, canvas.dimensions(), canvas.fit())?;
    let motion = AnimatedScale::new(geometry.foreground, canvas.zoom_curve())?;
    let size = motion.prescaled_size();
    if size.width > MAX_BITMAP_EDGE || size.height > MAX_BITMAP_EDGE {
        return Err(LookbookError::compose(format!(
            "'{}' needs a {}x{} foreground bitmap; edges are limited to {MAX_BITMAP_EDGE}",
            source.path.display(),
            size.width,
            size.height
        )));
    }
    Ok((geometry, motion))
}

fn decode_error(path: &Path, e: image::ImageError) -> LookbookError {
    LookbookError::compose(format!("decode image '{}': {e}", path.display()))
}

/// Decode `path` and resample it straight to `size`, premultiplied.
pub(crate) fn decode_prescaled(path: &Path, size: Dimensions) -> LookbookResult<PreparedImage> {
    let decoded = image::open(path).map_err(|e| decode_error(path, e))?;
    let rgba = decoded.to_rgba8();
    let resized = if rgba.dimensions() == (size.width, size.height) {
        rgba
    } else {
        image::imageops::resize(&rgba, size.width, size.height, FilterType::Triangle)
    };

    let mut rgba8_premul = resized.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    Ok(PreparedImage {
        dimensions: size,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compositor.rs"]
mod tests;
