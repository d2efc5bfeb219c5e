/// Single-track background music looping.
pub mod looper;
/// PCM decoding and raw `f32le` output.
pub mod media;
