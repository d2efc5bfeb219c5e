use crate::foundation::core::{Dimensions, FrameIndex};
use crate::foundation::error::{LookbookError, LookbookResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::scene::model::{PreparedImage, Scene, SolidLayer};
use std::sync::Arc;

#[derive(Clone)]
struct ImagePaint {
    source: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

/// CPU backend that rasterizes scenes with `vello_cpu`.
///
/// The render context and the foreground paint are reused across frames; the paint is rebuilt
/// only when a different scene bitmap arrives.
#[derive(Default)]
pub struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
    image_paint: Option<ImagePaint>,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> LookbookResult<R>,
    ) -> LookbookResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn image_paint_for(&mut self, bitmap: &PreparedImage) -> LookbookResult<ImagePaint> {
        if let Some(p) = self.image_paint.as_ref()
            && Arc::ptr_eq(&p.source, &bitmap.rgba8_premul)
        {
            return Ok(p.clone());
        }
        let pixmap = pixmap_from_premul_bytes(&bitmap.rgba8_premul, bitmap.dimensions)?;
        let out = ImagePaint {
            source: Arc::clone(&bitmap.rgba8_premul),
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            w: bitmap.dimensions.width,
            h: bitmap.dimensions.height,
        };
        self.image_paint = Some(out.clone());
        Ok(out)
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(level = "trace", skip(self, scene), fields(frame = frame.0))]
    fn render_scene_frame(&mut self, scene: &Scene, frame: FrameIndex) -> LookbookResult<FrameRGBA> {
        let canvas = scene.canvas();
        let (w, h) = canvas_u16(canvas)?;
        let t = scene.time_at(frame);
        let fg_transform = scene.foreground.motion.transform_at(t, canvas);

        self.with_ctx_mut(w, h, |this, ctx| {
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

            fill_solid(ctx, &scene.background);

            let img = this.image_paint_for(&scene.foreground.bitmap)?;
            ctx.set_transform(affine_to_cpu(fg_transform));
            ctx.set_paint(img.paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(img.w),
                f64::from(img.h),
            ));

            if let Some(blocks) = scene.padding.as_ref() {
                for block in blocks {
                    fill_solid(ctx, block);
                }
            }

            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(FrameRGBA {
                width: canvas.width,
                height: canvas.height,
                data: pixmap.data_as_u8_slice().to_vec(),
            })
        })
    }
}

fn fill_solid(ctx: &mut vello_cpu::RenderContext, layer: &SolidLayer) {
    let [r, g, b, a] = layer.rgba;
    let x = f64::from(layer.origin.0);
    let y = f64::from(layer.origin.1);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        x,
        y,
        x + f64::from(layer.size.width),
        y + f64::from(layer.size.height),
    ));
}

fn canvas_u16(canvas: Dimensions) -> LookbookResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| LookbookError::compose("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| LookbookError::compose("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(bytes: &[u8], size: Dimensions) -> LookbookResult<vello_cpu::Pixmap> {
    let (w, h) = canvas_u16(size)
        .map_err(|_| LookbookError::compose("foreground bitmap exceeds u16 per edge"))?;
    if bytes.len() != size.rgba8_len() {
        return Err(LookbookError::compose("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
