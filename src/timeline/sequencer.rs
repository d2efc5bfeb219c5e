use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{LookbookError, LookbookResult};
use crate::render::backend::RenderBackend;
use crate::scene::canvas::Canvas;
use crate::scene::compositor::compose_scene;
use crate::timeline::plan::Timeline;

/// Summary of one slideshow render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub scenes_rendered: usize,
    /// Images dropped while planning or compositing.
    pub scenes_skipped: usize,
    pub frames_written: u64,
}

/// Compose, render and stream every scene of `timeline` into `sink`, in order.
///
/// Only one scene is alive at a time. A scene that fails to compose is skipped with a warning;
/// planning already dropped images that cannot compose, so this only happens when a file changes
/// on disk mid-batch.
///
/// The sink is started on the first composed scene, so nothing is written when none compose.
#[tracing::instrument(skip_all, fields(scenes = timeline.scene_count()))]
pub fn render_timeline(
    canvas: &Canvas,
    timeline: &Timeline,
    mut audio: Option<AudioInputConfig>,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
) -> LookbookResult<RenderStats> {
    let mut stats = RenderStats {
        scenes_skipped: timeline.probe_skipped,
        ..RenderStats::default()
    };
    let mut begun = false;

    for (i, source) in timeline.entries().iter().enumerate() {
        let scene = match compose_scene(canvas, source) {
            Ok(scene) => scene,
            Err(e) => {
                tracing::warn!(image = %source.path.display(), error = %e, "skipping image");
                stats.scenes_skipped += 1;
                continue;
            }
        };

        if !begun {
            sink.begin(SinkConfig {
                size: canvas.dimensions(),
                fps: canvas.fps(),
                audio: audio.take(),
            })?;
            begun = true;
        }

        tracing::info!(
            scene = i + 1,
            of = timeline.scene_count(),
            image = %source.file_name(),
            "rendering scene"
        );
        for f in 0..scene.duration_frames {
            let frame = backend.render_scene_frame(&scene, FrameIndex(f))?;
            sink.push_frame(&frame)?;
        }
        stats.scenes_rendered += 1;
        stats.frames_written += scene.duration_frames;
    }

    if !begun {
        return Err(LookbookError::NoScenes);
    }
    sink.end()?;

    if stats.frames_written < timeline.total_frames() {
        tracing::warn!(
            planned = timeline.total_frames(),
            written = stats.frames_written,
            "images failed after planning; video is shorter than its music"
        );
    }
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequencer.rs"]
mod tests;
