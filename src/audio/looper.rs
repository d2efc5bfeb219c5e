//! Background music: pick one track, repeat it whole, cut it to the exact timeline length.
//!
//! There is no cross-fade and no fractional-loop blending; the last repetition is simply truncated.

use crate::audio::media::{AudioDecoder, AudioPcm};
use crate::foundation::error::{LookbookError, LookbookResult};
use rand::Rng;
use std::path::{Path, PathBuf};

/// Recognized music file extensions (lowercase, without the dot).
pub const AUDIO_EXTENSIONS: [&str; 2] = ["wav", "mp3"];

/// Whether `path` has a recognized music extension (case-insensitive).
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| AUDIO_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// List candidate tracks in `dir`, sorted by file name.
///
/// An empty or whitespace-only path means "no music" and yields no candidates.
pub fn list_audio_candidates(dir: &Path) -> LookbookResult<Vec<PathBuf>> {
    if dir.as_os_str().to_string_lossy().trim().is_empty() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(dir).map_err(|e| {
        LookbookError::audio(format!(
            "read background music directory '{}': {e}",
            dir.display()
        ))
    })?;

    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            LookbookError::audio(format!("list background music directory '{}': {e}", dir.display()))
        })?;
        let path = entry.path();
        if path.is_file() && is_audio_file(&path) {
            out.push(path);
        }
    }
    out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(out)
}

/// Pick one candidate uniformly at random.
pub fn select_track<'a, R: Rng>(candidates: &'a [PathBuf], rng: &mut R) -> Option<&'a Path> {
    if candidates.is_empty() {
        return None;
    }
    let i = rng.random_range(0..candidates.len());
    Some(candidates[i].as_path())
}

/// Number of whole repetitions needed to cover `target_frames` sample frames.
pub fn repeat_count(track_frames: u64, target_frames: u64) -> u64 {
    if track_frames == 0 {
        return 0;
    }
    target_frames.div_ceil(track_frames)
}

/// Repeat `pcm` and truncate it to exactly `target_frames` sample frames.
pub fn loop_to_length(pcm: &AudioPcm, target_frames: u64) -> LookbookResult<AudioPcm> {
    if pcm.is_empty() {
        return Err(LookbookError::audio("background track has no samples"));
    }
    let channels = usize::from(pcm.channels);
    let track = &pcm.interleaved_f32[..(pcm.frames() as usize) * channels];
    let target = usize::try_from(target_frames)
        .ok()
        .and_then(|f| f.checked_mul(channels))
        .ok_or_else(|| LookbookError::audio("looped audio length overflows"))?;

    let mut out = Vec::with_capacity(target);
    for _ in 0..repeat_count(pcm.frames(), target_frames) {
        let take = (target - out.len()).min(track.len());
        out.extend_from_slice(&track[..take]);
    }

    Ok(AudioPcm {
        sample_rate: pcm.sample_rate,
        channels: pcm.channels,
        interleaved_f32: out,
    })
}

/// Looped music ready to be attached to a timeline.
#[derive(Clone, Debug)]
pub struct LoopedAudio {
    /// Track the PCM was decoded from.
    pub source: PathBuf,
    pub pcm: AudioPcm,
    /// Whole repetitions used before truncation.
    pub repeats: u64,
}

/// Pick, decode and loop a track from `music_dir` to `target_frames` sample frames.
///
/// Returns `Ok(None)` when no track qualifies; rendering then proceeds without audio.
pub fn prepare_background_music<R: Rng>(
    music_dir: &Path,
    target_frames: u64,
    decoder: &dyn AudioDecoder,
    rng: &mut R,
) -> LookbookResult<Option<LoopedAudio>> {
    let candidates = list_audio_candidates(music_dir)?;
    let Some(track) = select_track(&candidates, rng) else {
        tracing::info!(dir = %music_dir.display(), "no background music found");
        return Ok(None);
    };
    tracing::info!(track = %track.display(), candidates = candidates.len(), "background music");

    let pcm = decoder.decode(track)?;
    let repeats = repeat_count(pcm.frames(), target_frames);
    let looped = loop_to_length(&pcm, target_frames)?;
    Ok(Some(LoopedAudio {
        source: track.to_path_buf(),
        pcm: looped,
        repeats,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/audio/looper.rs"]
mod tests;
