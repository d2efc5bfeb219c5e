//! Lookbook turns a directory of still images into one slideshow video.
//!
//! Each image becomes a fixed-length scene: fitted to the canvas along one axis, padded on the
//! other, and slowly zoomed about the centre. Scenes are rendered one at a time on the CPU and
//! streamed into a [`FrameSink`]; the default sink pipes frames to the system `ffmpeg`. One
//! background track can be looped under the whole video.
//!
//! - Validate a [`CanvasDef`] into a [`Canvas`]
//! - Create a [`LookbookSession`] (or call [`make_lookbook`] for the whole batch)
//! - Render into a [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

/// Zoom curve and the pre-scaled foreground motion.
pub mod animation;
/// Background music decoding and looping.
pub mod audio;
/// Frame sinks, including the `ffmpeg` MP4 encoder.
pub mod encode;
/// Fit-axis geometry and padding blocks.
pub mod layout;
/// CPU rasterization of scenes.
pub mod render;
/// Canvas configuration and per-image scenes.
pub mod scene;
/// Batch orchestration.
pub mod session;
/// Source scanning, planning and scene streaming.
pub mod timeline;

pub use crate::foundation::core::{Dimensions, Fps, FrameIndex};
pub use crate::foundation::error::{LookbookError, LookbookResult};

pub use crate::animation::zoom::{AnimatedScale, BASE_PRESCALE, ZoomCurve};
pub use crate::audio::media::{AudioDecoder, AudioPcm, FfmpegAudioDecoder};
pub use crate::encode::ffmpeg::FfmpegSink;
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use crate::layout::geometry::{FitMode, Geometry, PaddingBlock};
pub use crate::render::backend::{FrameRGBA, RenderBackend};
pub use crate::render::cpu::CpuBackend;
pub use crate::scene::canvas::{Canvas, CanvasDef};
pub use crate::scene::model::{Scene, SourceImage};
pub use crate::session::lookbook::{
    LookbookJob, LookbookOutput, LookbookSession, make_lookbook, output_path_for,
};
pub use crate::timeline::plan::Timeline;
pub use crate::timeline::sequencer::RenderStats;
