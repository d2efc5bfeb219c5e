use crate::audio::looper::LoopedAudio;
use crate::audio::media::{MIX_SAMPLE_RATE, frame_to_sample};
use crate::foundation::core::Fps;
use crate::foundation::error::{LookbookError, LookbookResult};
use crate::scene::canvas::Canvas;
use crate::scene::compositor::verify_composable;
use crate::scene::model::SourceImage;
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Recognized still-image extensions (lowercase, without the dot).
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "png", "jpeg", "webp"];

/// Whether `path` has a recognized image extension (case-insensitive).
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// List qualifying images in `dir`, sorted by file name.
///
/// Sub-directories and other file types are ignored. Fails with
/// [`LookbookError::NoSourceImages`] when nothing qualifies.
pub fn scan_source_images(dir: &Path) -> LookbookResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read source images directory '{}'", dir.display()))?;

    let mut out = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("list source images directory '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_file() && is_image_file(&path) {
            out.push(path);
        }
    }
    if out.is_empty() {
        return Err(LookbookError::NoSourceImages {
            dir: dir.to_path_buf(),
        });
    }
    out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::info!(dir = %dir.display(), count = out.len(), "source images found");
    Ok(out)
}

/// Probe every image and keep those that will compose on `canvas`.
///
/// Each file's header is read, its foreground size is checked and its pixels are fully decoded
/// once, so the kept list is exactly what gets rendered. Returns the kept images and the number
/// skipped. Fails with [`LookbookError::NoScenes`] when nothing is kept.
pub fn probe_sources(
    canvas: &Canvas,
    paths: &[PathBuf],
) -> LookbookResult<(Vec<SourceImage>, usize)> {
    let mut ok = Vec::with_capacity(paths.len());
    let mut skipped = 0usize;
    for path in paths {
        let checked = SourceImage::probe(path)
            .and_then(|src| verify_composable(canvas, &src).map(|()| src));
        match checked {
            Ok(src) => ok.push(src),
            Err(e) => {
                tracing::warn!(image = %path.display(), error = %e, "skipping image");
                skipped += 1;
            }
        }
    }
    if ok.is_empty() {
        return Err(LookbookError::NoScenes);
    }
    Ok((ok, skipped))
}

/// Planned slideshow: one equal-length scene per source image, optionally with looped music.
#[derive(Clone, Debug)]
pub struct Timeline {
    fps: Fps,
    frames_per_scene: u64,
    entries: Vec<SourceImage>,
    audio: Option<LoopedAudio>,
    /// Images dropped while planning.
    pub probe_skipped: usize,
}

impl Timeline {
    pub fn new(canvas: &Canvas, entries: Vec<SourceImage>) -> LookbookResult<Self> {
        if entries.is_empty() {
            return Err(LookbookError::NoScenes);
        }
        Ok(Self {
            fps: canvas.fps(),
            frames_per_scene: canvas.frames_per_image(),
            entries,
            audio: None,
            probe_skipped: 0,
        })
    }

    /// Scan `dir` and keep every image that will compose.
    pub fn from_dir(canvas: &Canvas, dir: &Path) -> LookbookResult<Self> {
        let paths = scan_source_images(dir)?;
        let (entries, skipped) = probe_sources(canvas, &paths)?;
        let mut timeline = Self::new(canvas, entries)?;
        timeline.probe_skipped = skipped;
        Ok(timeline)
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn frames_per_scene(&self) -> u64 {
        self.frames_per_scene
    }

    pub fn entries(&self) -> &[SourceImage] {
        &self.entries
    }

    pub fn scene_count(&self) -> usize {
        self.entries.len()
    }

    pub fn total_frames(&self) -> u64 {
        self.frames_per_scene
            .saturating_mul(self.entries.len() as u64)
    }

    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.total_frames())
    }

    /// Sample frames the attached audio must have to match the video exactly.
    pub fn total_audio_samples(&self) -> u64 {
        frame_to_sample(self.total_frames(), self.fps, MIX_SAMPLE_RATE)
    }

    pub fn audio(&self) -> Option<&LoopedAudio> {
        self.audio.as_ref()
    }

    /// Attach looped music, replacing any prior audio.
    ///
    /// The PCM must be exactly as long as the timeline.
    pub fn attach_audio(&mut self, audio: LoopedAudio) -> LookbookResult<()> {
        let want = self.total_audio_samples();
        if audio.pcm.sample_rate != MIX_SAMPLE_RATE || audio.pcm.frames() != want {
            return Err(LookbookError::audio(format!(
                "looped audio must be {want} frames at {MIX_SAMPLE_RATE} Hz, got {} at {} Hz",
                audio.pcm.frames(),
                audio.pcm.sample_rate
            )));
        }
        self.audio = Some(audio);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/plan.rs"]
mod tests;
