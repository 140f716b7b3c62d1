//! Command-line front end: load a scene, path trace it, write an image.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use prism_core::{builtin_scene, load_scene, Jitter, RenderSettings, SceneDesc, BUILTIN_SCENES};
use prism_renderer::{render, Camera, RenderConfig, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum JitterArg {
    Random,
    Circular,
}

impl From<JitterArg> for Jitter {
    fn from(arg: JitterArg) -> Self {
        match arg {
            JitterArg::Random => Jitter::Random,
            JitterArg::Circular => Jitter::Circular,
        }
    }
}

/// Render a sphere scene with the Prism path tracer.
#[derive(Parser, Debug)]
#[command(name = "prism", version)]
struct Args {
    /// Scene description (JSON)
    #[arg(long, conflicts_with = "builtin")]
    scene: Option<PathBuf>,

    /// Built-in scene to render when no file is given (showcase, single)
    #[arg(long)]
    builtin: Option<String>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    max_depth: Option<u32>,

    /// Multiply bounces by each primitive's own color
    #[arg(long)]
    tint: Option<bool>,

    /// Sub-pixel sample placement
    #[arg(long, value_enum)]
    jitter: Option<JitterArg>,

    /// Random seed; the same seed renders the same image
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output image (.png, .ppm, or any format the image crate supports)
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,
}

impl Args {
    fn load_scene(&self) -> Result<SceneDesc> {
        match (&self.scene, &self.builtin) {
            (Some(path), _) => {
                load_scene(path).with_context(|| format!("Failed to load {}", path.display()))
            }
            (None, Some(name)) => builtin_scene(name).with_context(|| {
                format!("Available built-in scenes: {}", BUILTIN_SCENES.join(", "))
            }),
            (None, None) => Ok(builtin_scene("showcase")?),
        }
    }

    /// Command-line values win over the scene's stored settings.
    fn apply_overrides(&self, settings: &mut RenderSettings) {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(samples) = self.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = max_depth;
        }
        if let Some(tint) = self.tint {
            settings.tint_by_primitive = tint;
        }
        if let Some(jitter) = self.jitter {
            settings.jitter = jitter.into();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let start = Instant::now();
    let mut desc = args.load_scene()?;
    args.apply_overrides(&mut desc.render);

    let world = Scene::from_desc(&desc)?;
    let camera = Camera::from_desc(&desc.camera, desc.render.aspect_ratio());
    let config = RenderConfig::from_settings(&desc.render, &desc.background);
    log::info!("Scene '{}' ready in {:?}", desc.name, start.elapsed());

    let mut rng = StdRng::seed_from_u64(args.seed);
    let frame = render(
        &camera,
        &world,
        desc.render.width,
        desc.render.height,
        &config,
        &mut rng,
    );

    output::save_image(&frame.to_image(), &args.output)?;
    log::info!("Saved to {}", args.output.display());

    Ok(())
}
