use super::*;
use crate::encode::sink::AudioInputConfig;
use crate::foundation::core::Fps;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        size: Dimensions::new(width, height),
        fps: Fps::new(30, 1).unwrap(),
        audio: None,
    }
}

fn args_for(cfg: &SinkConfig, out: &str) -> Vec<String> {
    ffmpeg_args(cfg, Path::new(out))
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

fn has_pair(args: &[String], a: &str, b: &str) -> bool {
    args.windows(2).any(|w| w[0] == a && w[1] == b)
}

fn frame(w: u32, h: u32, v: u8) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: vec![v; Dimensions::new(w, h).rgba8_len()],
    }
}

#[test]
fn odd_edges_switch_to_full_chroma() {
    assert_eq!(output_pix_fmt(Dimensions::new(512, 512)), "yuv420p");
    assert_eq!(output_pix_fmt(Dimensions::new(511, 511)), "yuv444p");
    assert_eq!(output_pix_fmt(Dimensions::new(64, 47)), "yuv444p");

    let args = args_for(&cfg(511, 511), "odd.mp4");
    assert!(has_pair(&args, "-s", "511x511"));
    assert!(has_pair(&args, "-pix_fmt", "yuv444p"));
}

#[test]
fn video_only_command_disables_audio() {
    let args = args_for(&cfg(64, 48), "/tmp/out/video-1.mp4");
    assert_eq!(args[0], "-y");
    assert!(has_pair(&args, "-s", "64x48"));
    assert!(has_pair(&args, "-r", "30/1"));
    assert!(has_pair(&args, "-pix_fmt", "yuv420p"));
    assert!(args.contains(&"-an".to_owned()));
    assert!(!args.contains(&"-shortest".to_owned()));
    assert_eq!(args.last().unwrap(), "/tmp/out/video-1.mp4");
}

#[test]
fn audio_command_muxes_pcm_as_aac() {
    let mut c = cfg(64, 48);
    c.audio = Some(AudioInputConfig {
        path: PathBuf::from("/tmp/track.f32le"),
        sample_rate: 48_000,
        channels: 2,
    });
    let args = args_for(&c, "/tmp/out.mp4");
    assert!(has_pair(&args, "-f", "f32le"));
    assert!(has_pair(&args, "-ar", "48000"));
    assert!(has_pair(&args, "-ac", "2"));
    assert!(has_pair(&args, "-i", "/tmp/track.f32le"));
    assert!(has_pair(&args, "-c:a", "aac"));
    assert!(!args.contains(&"-an".to_owned()));
}

#[test]
fn begin_validates_before_spawning() {
    let mut sink = FfmpegSink::new(std::env::temp_dir().join("lookbook_never_written.mp4"));
    let err = sink.begin(cfg(0, 48)).unwrap_err();
    assert!(matches!(err, LookbookError::Validation(_)));

    let mut c = cfg(64, 48);
    c.audio = Some(AudioInputConfig {
        path: PathBuf::from("x.f32le"),
        sample_rate: 0,
        channels: 2,
    });
    assert!(matches!(
        sink.begin(c).unwrap_err(),
        LookbookError::Validation(_)
    ));
}

#[test]
fn push_and_end_require_begin() {
    let mut sink = FfmpegSink::new("unused.mp4");
    assert!(sink.push_frame(&frame(2, 2, 0)).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn ffmpeg_sink_writes_odd_sized_mp4_when_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("lookbook_ffmpeg_{}_{}", std::process::id(), nanos));
    let out = dir.join("nested").join("clip.mp4");

    let mut sink = FfmpegSink::new(&out);
    sink.begin(cfg(17, 15)).unwrap();
    for i in 0..5u8 {
        sink.push_frame(&frame(17, 15, i * 40)).unwrap();
    }
    assert!(sink.push_frame(&frame(16, 16, 0)).is_err());
    sink.end().unwrap();

    assert!(std::fs::metadata(&out).unwrap().len() > 0);
    let _ = std::fs::remove_dir_all(dir);
}
