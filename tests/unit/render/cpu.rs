use super::*;
use crate::animation::zoom::{AnimatedScale, ZoomCurve};
use crate::foundation::core::Fps;
use crate::layout::geometry::{FitMode, resolve_geometry};
use crate::scene::model::{ForegroundLayer, SourceImage};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn solid_bitmap(size: Dimensions, rgba: [u8; 4]) -> PreparedImage {
    let mut data = vec![0u8; size.rgba8_len()];
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
    PreparedImage {
        dimensions: size,
        rgba8_premul: Arc::new(data),
    }
}

/// 32x64 red image on a 64x64 black canvas, fit height: 16px padding on each side.
fn pillarboxed_scene(zoom_factor: f64) -> Scene {
    let canvas = Dimensions::new(64, 64);
    let source = SourceImage::new("red.png", Dimensions::new(32, 64));
    let geometry = resolve_geometry(source.dimensions, canvas, FitMode::Height).unwrap();
    let motion = AnimatedScale::new(
        geometry.foreground,
        ZoomCurve::new(zoom_factor, 1.0).unwrap(),
    )
    .unwrap();
    let bitmap = solid_bitmap(motion.prescaled_size(), RED);
    let pad = geometry.padding.unwrap();
    let solid = |origin, size| SolidLayer {
        origin,
        size,
        rgba: BLACK,
    };

    Scene {
        source,
        geometry,
        background: solid((0, 0), canvas),
        foreground: ForegroundLayer { bitmap, motion },
        padding: Some([
            solid(pad.first_origin, pad.size),
            solid(pad.second_origin, pad.size),
        ]),
        fps: Fps::new(30, 1).unwrap(),
        duration_frames: 30,
    }
}

fn is_red(px: [u8; 4]) -> bool {
    px[0] > 240 && px[1] < 16 && px[2] < 16 && px[3] == 255
}

#[test]
fn first_frame_shows_fitted_foreground_between_padding() {
    let scene = pillarboxed_scene(1.0);
    let mut backend = CpuBackend::new();
    let frame = backend.render_scene_frame(&scene, FrameIndex(0)).unwrap();

    assert_eq!((frame.width, frame.height), (64, 64));
    assert_eq!(frame.data.len(), 64 * 64 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
    assert!(is_red(frame.pixel(32, 32).unwrap()));
    assert!(is_red(frame.pixel(20, 10).unwrap()));
    assert_eq!(frame.pixel(4, 32).unwrap(), BLACK);
    assert_eq!(frame.pixel(60, 32).unwrap(), BLACK);
}

#[test]
fn padding_covers_zoomed_overflow() {
    let scene = pillarboxed_scene(2.0);
    let mut backend = CpuBackend::new();
    let last = backend.render_scene_frame(&scene, FrameIndex(29)).unwrap();

    // Near 2x the foreground spans almost the full width, but the padding is painted on top.
    assert!(is_red(last.pixel(32, 32).unwrap()));
    assert!(is_red(last.pixel(17, 1).unwrap()));
    assert_eq!(last.pixel(8, 32).unwrap(), BLACK);
    assert_eq!(last.pixel(56, 32).unwrap(), BLACK);
}

#[test]
fn zoom_in_grows_foreground_over_background() {
    let canvas = Dimensions::new(64, 64);
    let source = SourceImage::new("wide.png", Dimensions::new(128, 64));
    let geometry = resolve_geometry(source.dimensions, canvas, FitMode::Width).unwrap();
    let motion = AnimatedScale::new(geometry.foreground, ZoomCurve::new(2.0, 1.0).unwrap()).unwrap();
    let bitmap = solid_bitmap(motion.prescaled_size(), RED);
    let scene = Scene {
        source,
        geometry,
        background: SolidLayer {
            origin: (0, 0),
            size: canvas,
            rgba: BLACK,
        },
        foreground: ForegroundLayer { bitmap, motion },
        padding: None,
        fps: Fps::new(30, 1).unwrap(),
        duration_frames: 30,
    };

    let mut backend = CpuBackend::new();
    let first = backend.render_scene_frame(&scene, FrameIndex(0)).unwrap();
    let last = backend.render_scene_frame(&scene, FrameIndex(29)).unwrap();

    // Resting foreground is 64x32 centred; row 8 is background at rest and covered once zoomed.
    assert_eq!(first.pixel(32, 8).unwrap(), BLACK);
    assert!(is_red(first.pixel(32, 32).unwrap()));
    assert!(is_red(last.pixel(32, 8).unwrap()));
}

#[test]
fn rendering_is_deterministic_and_reuses_paint() {
    let scene = pillarboxed_scene(1.3);
    let mut backend = CpuBackend::new();
    let a = backend.render_scene_frame(&scene, FrameIndex(12)).unwrap();
    let b = backend.render_scene_frame(&scene, FrameIndex(12)).unwrap();
    assert_eq!(a, b);

    let cached = backend.image_paint.as_ref().unwrap();
    assert!(Arc::ptr_eq(&cached.source, &scene.foreground.bitmap.rgba8_premul));
}

#[test]
fn oversized_bitmap_is_rejected() {
    let bytes = vec![0u8; 4];
    assert!(pixmap_from_premul_bytes(&bytes, Dimensions::new(70_000, 1)).is_err());
    assert!(pixmap_from_premul_bytes(&bytes, Dimensions::new(2, 1)).is_err());
}
