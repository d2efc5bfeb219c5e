use crate::foundation::core::Dimensions;
use crate::foundation::error::{LookbookError, LookbookResult};

/// Fixed pre-scale applied to the foreground bitmap before the zoom curve drives it.
///
/// The curve output is divided by this factor, so the effective scale at `t = 0` is the resting
/// fitted size.
pub const BASE_PRESCALE: f64 = 1.5;

/// Linear time-to-scale mapping `scale(t) = start + (end - start) * t / duration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomCurve {
    start: f64,
    end: f64,
    duration_secs: f64,
}

impl ZoomCurve {
    /// Curve from `1.0` to `zoom_factor` over `duration_secs`.
    ///
    /// A zero or non-finite duration is rejected rather than producing a division by zero.
    pub fn new(zoom_factor: f64, duration_secs: f64) -> LookbookResult<Self> {
        if !zoom_factor.is_finite() || zoom_factor <= 0.0 {
            return Err(LookbookError::validation(format!(
                "zoom factor must be finite and > 0, got {zoom_factor}"
            )));
        }
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(LookbookError::validation(format!(
                "zoom duration must be finite and > 0, got {duration_secs}"
            )));
        }
        Ok(Self {
            start: 1.0,
            end: zoom_factor,
            duration_secs,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Scale multiplier at elapsed time `t`, clamped to `[0, duration]`.
    pub fn scale_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, self.duration_secs);
        self.start + (self.end - self.start) * (t / self.duration_secs)
    }
}

/// Zoom curve bound to a resting foreground size and the fixed pre-scale.
///
/// The pre-scale and the curve normalization live together here so they cannot drift apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatedScale {
    curve: ZoomCurve,
    rest: Dimensions,
}

impl AnimatedScale {
    pub fn new(rest: Dimensions, curve: ZoomCurve) -> LookbookResult<Self> {
        if rest.is_empty() {
            return Err(LookbookError::layout(
                "animated foreground needs a non-empty resting size",
            ));
        }
        Ok(Self { curve, rest })
    }

    pub fn curve(&self) -> &ZoomCurve {
        &self.curve
    }

    /// Resting (fitted) foreground size.
    pub fn rest(&self) -> Dimensions {
        self.rest
    }

    /// Size of the bitmap the foreground is rasterized from.
    pub fn prescaled_size(&self) -> Dimensions {
        let s = |v: u32| ((f64::from(v) * BASE_PRESCALE).round() as u32).max(1);
        Dimensions::new(s(self.rest.width), s(self.rest.height))
    }

    /// Resize factor applied to the pre-scaled bitmap at time `t`.
    pub fn prescaled_factor_at(&self, t: f64) -> f64 {
        self.curve.scale_at(t) / BASE_PRESCALE
    }

    /// Effective scale relative to the resting size at time `t`.
    pub fn effective_scale_at(&self, t: f64) -> f64 {
        self.prescaled_factor_at(t) * BASE_PRESCALE
    }

    /// On-canvas foreground size at time `t`, in pixels.
    pub fn size_at(&self, t: f64) -> (f64, f64) {
        let s = self.effective_scale_at(t);
        (f64::from(self.rest.width) * s, f64::from(self.rest.height) * s)
    }

    /// Affine mapping the pre-scaled bitmap onto the canvas, centred, at time `t`.
    pub fn transform_at(&self, t: f64, canvas: Dimensions) -> kurbo::Affine {
        let bitmap = self.prescaled_size();
        let (w, h) = self.size_at(t);
        let sx = w / f64::from(bitmap.width);
        let sy = h / f64::from(bitmap.height);
        let cx = f64::from(canvas.width) / 2.0;
        let cy = f64::from(canvas.height) / 2.0;
        kurbo::Affine::translate((cx - w / 2.0, cy - h / 2.0)) * kurbo::Affine::scale_non_uniform(sx, sy)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/zoom.rs"]
mod tests;
