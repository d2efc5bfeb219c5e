use crate::audio::looper::prepare_background_music;
use crate::audio::media::{
    AudioDecoder, FfmpegAudioDecoder, MIX_CHANNELS, MIX_SAMPLE_RATE, write_pcm_to_f32le_file,
};
use crate::encode::ffmpeg::FfmpegSink;
use crate::encode::sink::{AudioInputConfig, FrameSink};
use crate::foundation::error::{LookbookError, LookbookResult};
use crate::render::backend::RenderBackend;
use crate::render::cpu::CpuBackend;
use crate::scene::canvas::Canvas;
use crate::timeline::plan::Timeline;
use crate::timeline::sequencer::{RenderStats, render_timeline};
use anyhow::Context as _;
use rand::Rng;
use std::path::{Path, PathBuf};

/// One slideshow batch bound to a validated canvas.
///
/// The random source picks the background track; pass a seeded RNG for reproducible output.
pub struct LookbookSession<R: Rng> {
    canvas: Canvas,
    rng: R,
    decoder: Box<dyn AudioDecoder>,
    backend: Box<dyn RenderBackend>,
}

impl<R: Rng> LookbookSession<R> {
    pub fn new(canvas: Canvas, rng: R) -> Self {
        Self {
            canvas,
            rng,
            decoder: Box::new(FfmpegAudioDecoder::default()),
            backend: Box::new(CpuBackend::new()),
        }
    }

    /// Replace the audio decoder.
    pub fn with_audio_decoder(mut self, decoder: Box<dyn AudioDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Scan `image_dir` and keep every image that will compose.
    pub fn plan(&self, image_dir: &Path) -> LookbookResult<Timeline> {
        Timeline::from_dir(&self.canvas, image_dir)
    }

    /// Pick a track from `music_dir`, loop it to the timeline length and attach it.
    ///
    /// No qualifying track leaves the timeline silent.
    pub fn attach_music(&mut self, timeline: &mut Timeline, music_dir: &Path) -> LookbookResult<()> {
        let target = timeline.total_audio_samples();
        if let Some(looped) =
            prepare_background_music(music_dir, target, self.decoder.as_ref(), &mut self.rng)?
        {
            tracing::info!(
                track = %looped.source.display(),
                repeats = looped.repeats,
                secs = timeline.duration_secs(),
                "background music looped"
            );
            timeline.attach_audio(looped)?;
        }
        Ok(())
    }

    /// Render a planned timeline into `sink`.
    ///
    /// Attached audio is handed to the sink through a temporary `f32le` file that is removed on
    /// return.
    pub fn render_planned(
        &mut self,
        timeline: &Timeline,
        sink: &mut dyn FrameSink,
    ) -> LookbookResult<RenderStats> {
        let mut audio_tmp = TempFileGuard(None);
        let audio_cfg = match timeline.audio() {
            Some(looped) => {
                let path = std::env::temp_dir().join(format!(
                    "lookbook_audio_{}_{}.f32le",
                    std::process::id(),
                    std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .map(|d| d.as_nanos())
                        .unwrap_or(0)
                ));
                write_pcm_to_f32le_file(&looped.pcm.interleaved_f32, &path)?;
                audio_tmp.0 = Some(path.clone());
                Some(AudioInputConfig {
                    path,
                    sample_rate: MIX_SAMPLE_RATE,
                    channels: MIX_CHANNELS,
                })
            }
            None => None,
        };

        render_timeline(
            &self.canvas,
            timeline,
            audio_cfg,
            self.backend.as_mut(),
            sink,
        )
    }

    /// Plan `image_dir`, attach music from `music_dir` when given, and render into `sink`.
    #[tracing::instrument(skip(self, sink))]
    pub fn render(
        &mut self,
        image_dir: &Path,
        music_dir: Option<&Path>,
        sink: &mut dyn FrameSink,
    ) -> LookbookResult<RenderStats> {
        let mut timeline = self.plan(image_dir)?;
        if let Some(dir) = music_dir {
            self.attach_music(&mut timeline, dir)?;
        }
        self.render_planned(&timeline, sink)
    }
}

/// Inputs for a complete slideshow batch.
#[derive(Clone, Debug)]
pub struct LookbookJob {
    pub image_dir: PathBuf,
    pub output_dir: PathBuf,
    pub music_dir: Option<PathBuf>,
}

/// Result of [`make_lookbook`].
#[derive(Clone, Debug)]
pub struct LookbookOutput {
    pub path: PathBuf,
    pub stats: RenderStats,
}

/// `video-<unix_ts>.mp4` inside `output_dir`.
pub fn output_path_for(output_dir: &Path, unix_ts: u64) -> PathBuf {
    output_dir.join(format!("video-{unix_ts}.mp4"))
}

/// Run a whole batch and write the MP4 into `job.output_dir`.
///
/// Every failure is reported as [`LookbookError::Processing`].
pub fn make_lookbook<R: Rng>(
    canvas: Canvas,
    job: &LookbookJob,
    rng: R,
) -> LookbookResult<LookbookOutput> {
    make_lookbook_inner(canvas, job, rng).map_err(LookbookError::processing)
}

fn make_lookbook_inner<R: Rng>(
    canvas: Canvas,
    job: &LookbookJob,
    rng: R,
) -> LookbookResult<LookbookOutput> {
    let mut session = LookbookSession::new(canvas, rng);
    let mut timeline = session.plan(&job.image_dir)?;

    std::fs::create_dir_all(&job.output_dir).with_context(|| {
        format!(
            "failed to create output directory '{}'",
            job.output_dir.display()
        )
    })?;
    if let Some(dir) = job.music_dir.as_deref() {
        session.attach_music(&mut timeline, dir)?;
    }

    let unix_ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = output_path_for(&job.output_dir, unix_ts);
    let mut sink = FfmpegSink::new(&path);
    let stats = session.render_planned(&timeline, &mut sink)?;

    tracing::info!(
        out = %path.display(),
        scenes = stats.scenes_rendered,
        skipped = stats.scenes_skipped,
        frames = stats.frames_written,
        "lookbook written"
    );
    Ok(LookbookOutput { path, stats })
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/lookbook.rs"]
mod tests;
