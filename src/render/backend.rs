use crate::foundation::core::FrameIndex;
use crate::foundation::error::LookbookResult;
use crate::scene::model::Scene;

/// A rendered frame as RGBA8 pixels.
///
/// Every pixel is opaque: the background fill covers the whole canvas and must itself be opaque.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// RGBA8 bytes of the pixel at `(x, y)`; `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// A renderer that rasterizes one frame of a [`Scene`].
pub trait RenderBackend {
    /// Rasterize `scene` at scene-local `frame`.
    ///
    /// Frames outside `[0, scene.duration_frames)` are clamped by the zoom curve.
    fn render_scene_frame(&mut self, scene: &Scene, frame: FrameIndex) -> LookbookResult<FrameRGBA>;
}
