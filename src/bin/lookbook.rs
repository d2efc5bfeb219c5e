use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

/// Turn a directory of still images into a zooming slideshow MP4 (requires `ffmpeg` on PATH).
#[derive(Parser, Debug)]
#[command(name = "lookbook", version)]
struct Cli {
    /// Canvas JSON used as the base; explicit flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Video width in pixels.
    #[arg(long)]
    video_width: Option<u32>,

    /// Video height in pixels.
    #[arg(long)]
    video_height: Option<u32>,

    /// Source images directory.
    #[arg(long)]
    input_image_dir: PathBuf,

    /// Destination directory (created if absent).
    #[arg(long)]
    output_dir: PathBuf,

    /// Background music directory; one `.wav`/`.mp3` is picked at random.
    #[arg(long)]
    bg_music_dir: Option<PathBuf>,

    /// Seconds each image stays on screen.
    #[arg(long)]
    duration: Option<f64>,

    /// Final/initial scale ratio for each image (1.0 = no zoom).
    #[arg(long)]
    zoom_factor: Option<f64>,

    /// Canvas axis each image is fitted to.
    #[arg(long, value_enum)]
    fit: Option<FitChoice>,

    /// Output frame rate as `num` or `num/den`.
    #[arg(long, value_parser = parse_fps)]
    fps: Option<lookbook::Fps>,

    /// Background and padding colour as `#RRGGBB`.
    #[arg(long, value_parser = parse_hex_rgb)]
    background: Option<[u8; 4]>,

    /// Seed for the background music pick.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FitChoice {
    Height,
    Width,
}

impl From<FitChoice> for lookbook::FitMode {
    fn from(v: FitChoice) -> Self {
        match v {
            FitChoice::Height => lookbook::FitMode::Height,
            FitChoice::Width => lookbook::FitMode::Width,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let def = canvas_def(&cli)?;
    let canvas = lookbook::Canvas::new(def).context("invalid canvas settings")?;

    let job = lookbook::LookbookJob {
        image_dir: cli.input_image_dir.clone(),
        output_dir: cli.output_dir.clone(),
        music_dir: cli.bg_music_dir.clone(),
    };
    let out = match cli.seed {
        Some(seed) => lookbook::make_lookbook(canvas, &job, StdRng::seed_from_u64(seed))?,
        None => lookbook::make_lookbook(canvas, &job, rand::rng())?,
    };

    eprintln!(
        "wrote {} ({} images, {} skipped)",
        out.path.display(),
        out.stats.scenes_rendered,
        out.stats.scenes_skipped
    );
    Ok(())
}

fn canvas_def(cli: &Cli) -> anyhow::Result<lookbook::CanvasDef> {
    let mut def = match cli.config.as_ref() {
        Some(path) => lookbook::CanvasDef::from_path(path)
            .with_context(|| format!("load canvas config '{}'", path.display()))?,
        None => {
            let (Some(w), Some(h), Some(d)) = (cli.video_width, cli.video_height, cli.duration)
            else {
                anyhow::bail!(
                    "--video-width, --video-height and --duration are required without --config"
                );
            };
            lookbook::CanvasDef::new(w, h, d)
        }
    };

    if let Some(w) = cli.video_width {
        def.width = w;
    }
    if let Some(h) = cli.video_height {
        def.height = h;
    }
    if let Some(d) = cli.duration {
        def.duration_secs = d;
    }
    if let Some(z) = cli.zoom_factor {
        def.zoom_factor = z;
    }
    if let Some(fit) = cli.fit {
        def.fit = fit.into();
    }
    if let Some(fps) = cli.fps {
        def.fps = fps;
    }
    if let Some(bg) = cli.background {
        def.background_rgba = bg;
    }
    Ok(def)
}

fn parse_fps(s: &str) -> Result<lookbook::Fps, String> {
    let (num, den) = match s.split_once('/') {
        Some((n, d)) => (n.trim(), d.trim()),
        None => (s.trim(), "1"),
    };
    let num = num.parse::<u32>().map_err(|e| format!("bad fps numerator: {e}"))?;
    let den = den
        .parse::<u32>()
        .map_err(|e| format!("bad fps denominator: {e}"))?;
    lookbook::Fps::new(num, den).map_err(|e| e.to_string())
}

fn parse_hex_rgb(s: &str) -> Result<[u8; 4], String> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected #RRGGBB, got '{s}'"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("bad colour '{s}': {e}"))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?, 255])
}
