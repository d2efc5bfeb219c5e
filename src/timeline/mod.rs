/// Source discovery and the planned timeline.
pub mod plan;
/// Streaming scene-by-scene render loop.
pub mod sequencer;
