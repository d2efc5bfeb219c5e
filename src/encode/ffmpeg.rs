//! MP4 output through the system `ffmpeg`.
//!
//! Frames are piped as raw RGBA and encoded with libx264. Looped music, when present, is read from
//! an `f32le` file and encoded as AAC.

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::Dimensions;
use crate::foundation::error::{LookbookError, LookbookResult};
use crate::render::backend::FrameRGBA;
use anyhow::Context as _;
use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

/// H.264 pixel format for a canvas: 4:2:0 when both edges are even, 4:4:4 otherwise.
pub fn output_pix_fmt(size: Dimensions) -> &'static str {
    if size.width.is_multiple_of(2) && size.height.is_multiple_of(2) {
        "yuv420p"
    } else {
        "yuv444p"
    }
}

struct Encoder {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
    size: Dimensions,
}

/// Sink that encodes the slideshow into one MP4 file, replacing any existing file.
pub struct FfmpegSink {
    out_path: PathBuf,
    encoder: Option<Encoder>,
}

impl FfmpegSink {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            encoder: None,
        }
    }
}

impl FrameSink for FfmpegSink {
    #[tracing::instrument(skip(self, cfg), fields(out = %self.out_path.display()))]
    fn begin(&mut self, cfg: SinkConfig) -> LookbookResult<()> {
        if self.encoder.is_some() {
            return Err(LookbookError::encode("ffmpeg sink is already running"));
        }
        if cfg.size.is_empty() {
            return Err(LookbookError::validation("video size must be non-zero"));
        }
        if let Some(audio) = cfg.audio.as_ref()
            && (audio.sample_rate == 0 || audio.channels == 0)
        {
            return Err(LookbookError::validation(format!(
                "audio input needs a sample rate and channel count, got {} Hz x {}",
                audio.sample_rate, audio.channels
            )));
        }
        if let Some(parent) = self.out_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory '{}'", parent.display()))?;
        }
        if !is_ffmpeg_on_path() {
            return Err(LookbookError::encode("ffmpeg was not found on PATH"));
        }

        let args = ffmpeg_args(&cfg, &self.out_path);
        tracing::debug!(?args, "spawning ffmpeg");
        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| LookbookError::encode(format!("spawn ffmpeg: {e}")))?;

        let stdin = child.stdin.take();
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| LookbookError::encode("ffmpeg stderr is not piped"))?;
        let stderr = std::thread::spawn(move || -> std::io::Result<Vec<u8>> {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf)?;
            Ok(buf)
        });

        self.encoder = Some(Encoder {
            child,
            stdin,
            stderr,
            size: cfg.size,
        });
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGBA) -> LookbookResult<()> {
        let enc = self
            .encoder
            .as_mut()
            .ok_or_else(|| LookbookError::encode("ffmpeg sink not started"))?;
        if (frame.width, frame.height) != (enc.size.width, enc.size.height)
            || frame.data.len() != enc.size.rgba8_len()
        {
            return Err(LookbookError::validation(format!(
                "frame is {}x{} ({} bytes), sink expects {}x{}",
                frame.width,
                frame.height,
                frame.data.len(),
                enc.size.width,
                enc.size.height
            )));
        }
        let stdin = enc
            .stdin
            .as_mut()
            .ok_or_else(|| LookbookError::encode("ffmpeg stdin is closed"))?;
        stdin
            .write_all(&frame.data)
            .map_err(|e| LookbookError::encode(format!("write frame to ffmpeg: {e}")))
    }

    fn end(&mut self) -> LookbookResult<()> {
        let Encoder {
            mut child,
            stdin,
            stderr,
            ..
        } = self
            .encoder
            .take()
            .ok_or_else(|| LookbookError::encode("ffmpeg sink not started"))?;
        drop(stdin);

        let status = child
            .wait()
            .map_err(|e| LookbookError::encode(format!("wait for ffmpeg: {e}")))?;
        let log = stderr
            .join()
            .map_err(|_| LookbookError::encode("ffmpeg stderr reader panicked"))?
            .map_err(|e| LookbookError::encode(format!("read ffmpeg stderr: {e}")))?;
        if !status.success() {
            return Err(LookbookError::encode(format!(
                "ffmpeg exited with {status}: {}",
                String::from_utf8_lossy(&log).trim()
            )));
        }
        tracing::info!(out = %self.out_path.display(), "mp4 written");
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if let Some(mut enc) = self.encoder.take() {
            drop(enc.stdin.take());
            let _ = enc.child.kill();
            let _ = enc.child.wait();
        }
    }
}

fn ffmpeg_args(cfg: &SinkConfig, out_path: &Path) -> Vec<OsString> {
    let mut args = Vec::new();
    push_args(&mut args, &["-y", "-loglevel", "error"]);
    // Raw frames on stdin; the rate goes before the input it applies to.
    push_args(
        &mut args,
        &[
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.size.width, cfg.size.height),
            "-r",
            &format!("{}/{}", cfg.fps.num, cfg.fps.den),
            "-i",
            "pipe:0",
        ],
    );
    if let Some(audio) = cfg.audio.as_ref() {
        push_args(
            &mut args,
            &[
                "-f",
                "f32le",
                "-ar",
                &audio.sample_rate.to_string(),
                "-ac",
                &audio.channels.to_string(),
                "-i",
            ],
        );
        args.push(audio.path.clone().into_os_string());
    }

    push_args(
        &mut args,
        &["-c:v", "libx264", "-pix_fmt", output_pix_fmt(cfg.size)],
    );
    if cfg.audio.is_some() {
        push_args(&mut args, &["-c:a", "aac", "-shortest"]);
    } else {
        push_args(&mut args, &["-an"]);
    }
    push_args(&mut args, &["-movflags", "+faststart"]);
    args.push(out_path.as_os_str().to_owned());
    args
}

fn push_args(args: &mut Vec<OsString>, items: &[&str]) {
    args.extend(items.iter().map(OsString::from));
}

/// Whether `ffmpeg -version` runs.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
