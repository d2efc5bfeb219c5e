use super::*;

#[test]
fn frame_to_sample_uses_rational_fps() {
    // 30000/1001 ~ 29.97
    let fps = Fps {
        num: 30_000,
        den: 1001,
    };
    assert_eq!(frame_to_sample(0, fps, 48_000), 0);
    assert_eq!(frame_to_sample(1, fps, 48_000), 1602);
    assert_eq!(frame_to_sample(30_000, fps, 48_000), 48_048_000);
}

#[test]
fn frame_to_sample_is_exact_for_integer_fps() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(frame_to_sample(60, fps, MIX_SAMPLE_RATE), 96_000);
    assert_eq!(frame_to_sample(1, fps, MIX_SAMPLE_RATE), 1_600);
}

#[test]
fn pcm_frames_and_duration() {
    let pcm = AudioPcm {
        sample_rate: 4,
        channels: 2,
        interleaved_f32: vec![0.0; 16],
    };
    assert_eq!(pcm.frames(), 8);
    assert!((pcm.duration_secs() - 2.0).abs() < 1e-12);
    assert!(!pcm.is_empty());

    let silent = AudioPcm {
        sample_rate: 48_000,
        channels: 2,
        interleaved_f32: Vec::new(),
    };
    assert!(silent.is_empty());
    assert_eq!(silent.duration_secs(), 0.0);
}

#[test]
fn f32le_file_round_trips_through_bytes() {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir()
        .join(format!("lookbook_media_{}_{}", std::process::id(), nanos))
        .join("mix.f32le");

    let samples = [0.0f32, 0.5, -0.25, 1.0];
    write_pcm_to_f32le_file(&samples, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 16);
    assert_eq!(f32le_bytes_to_samples(&bytes).unwrap(), samples);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn misaligned_pcm_bytes_are_rejected() {
    let err = f32le_bytes_to_samples(&[0u8; 6]).unwrap_err();
    assert!(matches!(err, LookbookError::Audio(_)));
}

#[test]
fn ffmpeg_decoder_reads_generated_tone() {
    if !crate::encode::ffmpeg::is_ffmpeg_on_path() {
        return;
    }
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("lookbook_tone_{}_{}", std::process::id(), nanos));
    std::fs::create_dir_all(&dir).unwrap();
    let wav = dir.join("tone.wav");
    let status = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-y", "-f", "lavfi", "-i", "sine=frequency=440:duration=0.5"])
        .arg(&wav)
        .status()
        .unwrap();
    assert!(status.success());

    let pcm = FfmpegAudioDecoder::default().decode(&wav).unwrap();
    assert_eq!(pcm.sample_rate, MIX_SAMPLE_RATE);
    assert_eq!(pcm.channels, 2);
    assert!((pcm.duration_secs() - 0.5).abs() < 0.05);

    let _ = std::fs::remove_dir_all(dir);
}
