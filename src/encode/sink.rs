use crate::foundation::core::{Dimensions, Fps};
use crate::foundation::error::{LookbookError, LookbookResult};
use crate::render::backend::FrameRGBA;
use std::path::PathBuf;

/// Stream parameters a [`FrameSink`] is opened with.
#[derive(Clone, Debug, PartialEq)]
pub struct SinkConfig {
    /// Canvas size; every pushed frame has exactly this size.
    pub size: Dimensions,
    pub fps: Fps,
    /// Looped background music to mux next to the frames.
    pub audio: Option<AudioInputConfig>,
}

/// Interleaved `f32le` PCM file on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioInputConfig {
    pub path: PathBuf,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Destination for the slideshow's opaque frames.
///
/// `begin` is called once, then every frame in playback order, then `end`.
pub trait FrameSink: Send {
    fn begin(&mut self, cfg: SinkConfig) -> LookbookResult<()>;
    fn push_frame(&mut self, frame: &FrameRGBA) -> LookbookResult<()>;
    fn end(&mut self) -> LookbookResult<()>;
}

/// Sink that keeps every frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<FrameRGBA>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters received in the last `begin`.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    pub fn frames(&self) -> &[FrameRGBA] {
        &self.frames
    }

    /// Whether `end` has been called since the last `begin`.
    pub fn is_finished(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> LookbookResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGBA) -> LookbookResult<()> {
        if self.cfg.is_none() || self.ended {
            return Err(LookbookError::encode("in-memory sink is not open"));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> LookbookResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
