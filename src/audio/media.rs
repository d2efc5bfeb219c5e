use crate::foundation::core::Fps;
use crate::foundation::error::{LookbookError, LookbookResult};
use std::path::Path;

/// Sample rate used across the decode/loop/encode pipeline.
pub const MIX_SAMPLE_RATE: u32 = 48_000;
/// Channel count used across the decode/loop/encode pipeline.
pub const MIX_CHANNELS: u16 = 2;

#[derive(Clone, Debug, PartialEq)]
/// Decoded interleaved floating-point PCM.
pub struct AudioPcm {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved `f32` PCM samples.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> u64 {
        if self.channels == 0 {
            return 0;
        }
        (self.interleaved_f32.len() / usize::from(self.channels)) as u64
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }
}

/// Decodes an audio file into interleaved PCM at the mix format.
pub trait AudioDecoder {
    fn decode(&self, path: &Path) -> LookbookResult<AudioPcm>;
}

/// [`AudioDecoder`] backed by the system `ffmpeg`.
#[derive(Clone, Copy, Debug)]
pub struct FfmpegAudioDecoder {
    pub sample_rate: u32,
}

impl Default for FfmpegAudioDecoder {
    fn default() -> Self {
        Self {
            sample_rate: MIX_SAMPLE_RATE,
        }
    }
}

impl AudioDecoder for FfmpegAudioDecoder {
    fn decode(&self, path: &Path) -> LookbookResult<AudioPcm> {
        decode_audio_f32_stereo(path, self.sample_rate)
    }
}

/// Decode audio from a media file to stereo interleaved `f32` PCM.
pub fn decode_audio_f32_stereo(path: &Path, sample_rate: u32) -> LookbookResult<AudioPcm> {
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            &MIX_CHANNELS.to_string(),
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| LookbookError::audio(format!("failed to run ffmpeg for audio decode: {e}")))?;

    if !out.status.success() {
        let msg = String::from_utf8_lossy(&out.stderr);
        // No audio stream is reported as an error; surface it as empty PCM.
        if msg.contains("Stream specifier")
            || msg.contains("matches no streams")
            || msg.contains("Output file #0 does not contain any stream")
        {
            return Ok(AudioPcm {
                sample_rate,
                channels: MIX_CHANNELS,
                interleaved_f32: Vec::new(),
            });
        }
        return Err(LookbookError::audio(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            msg.trim()
        )));
    }

    Ok(AudioPcm {
        sample_rate,
        channels: MIX_CHANNELS,
        interleaved_f32: f32le_bytes_to_samples(&out.stdout)?,
    })
}

fn f32le_bytes_to_samples(bytes: &[u8]) -> LookbookResult<Vec<f32>> {
    if !bytes.len().is_multiple_of(4) {
        return Err(LookbookError::audio(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Write interleaved `f32` PCM samples to a raw little-endian `.f32le` file.
pub fn write_pcm_to_f32le_file(samples_interleaved: &[f32], out_path: &Path) -> LookbookResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            LookbookError::audio(format!(
                "failed to create audio output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        LookbookError::audio(format!(
            "failed to write audio file '{}': {e}",
            out_path.display()
        ))
    })
}

/// Convert a frame count to the nearest sample frame count at `sample_rate`.
pub fn frame_to_sample(frame_delta: u64, fps: Fps, sample_rate: u32) -> u64 {
    let num = u128::from(frame_delta) * u128::from(sample_rate) * u128::from(fps.den);
    let den = u128::from(fps.num);
    ((num + (den / 2)) / den) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/audio/media.rs"]
mod tests;
