//! # Warpfield CLI
//!
//! Command-line interface for rendering effects to PNG.
//!
//! ## Usage
//!
//! ```bash
//! # List available effects
//! warpfield list
//!
//! # Render a black hole
//! warpfield render black_hole --png hole.png
//!
//! # Render a rip at t=3s with randomized parameters
//! warpfield render space_time_rip --time 3 --random --png rip.png
//!
//! # Distort a screenshot
//! warpfield render screen_distortion --source shot.png --png out.png
//!
//! # Render 48 frames (out-0000.png ... out-0047.png)
//! warpfield render lensing --frames 48 --fps 24 --png out.png
//!
//! # Dump default parameters to start a config file
//! warpfield params black_hole > job.json
//! warpfield render --config job.json --png job.png
//! ```

use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::{Path, PathBuf};

use warpfield::{
    RenderConfig, WarpError,
    effects::{EFFECTS, EffectParams},
    render,
    source::{Checkerboard, ImageSource, SourceImage},
};

/// Warpfield - Procedural screen-space effects
#[derive(Parser, Debug)]
#[command(name = "warpfield")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available effects
    List,

    /// Render an effect to PNG
    Render {
        /// Effect to render (may be omitted when --config names one)
        effect: Option<String>,

        /// Output PNG path
        #[arg(long, value_name = "FILE")]
        png: PathBuf,

        /// JSON render config
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Frame width in pixels
        #[arg(long)]
        width: Option<usize>,

        /// Frame height in pixels
        #[arg(long)]
        height: Option<usize>,

        /// Time of the first frame in seconds
        #[arg(long)]
        time: Option<f32>,

        /// Source image for screen_distortion and lensing
        #[arg(long, value_name = "IMG")]
        source: Option<PathBuf>,

        /// Randomize effect parameters
        #[arg(long)]
        random: bool,

        /// Number of frames to render
        #[arg(long)]
        frames: Option<usize>,

        /// Frame rate for sequences
        #[arg(long)]
        fps: Option<f32>,
    },

    /// Print default parameters for an effect as JSON
    Params {
        effect: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), WarpError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            println!("Available effects:");
            for name in EFFECTS {
                println!("  {}", name);
            }
        }

        Commands::Params { effect } => {
            let job = RenderConfig {
                params: EffectParams::by_name(&effect)?,
                ..Default::default()
            };
            println!("{}", job.to_json()?);
        }

        Commands::Render {
            effect,
            png,
            config,
            width,
            height,
            time,
            source,
            random,
            frames,
            fps,
        } => {
            let mut job = match config {
                Some(path) => RenderConfig::load(path)?,
                None => RenderConfig::default(),
            };

            // An explicit effect replaces the config's unless they agree
            if let Some(name) = effect.as_deref() {
                let wanted = EffectParams::by_name(name)?;
                if random {
                    job.params = EffectParams::random(name)?;
                } else if wanted.name() != job.params.name() {
                    job.params = wanted;
                }
            } else if random {
                job.params = EffectParams::random(job.params.name())?;
            }

            if let Some(w) = width {
                job.width = w;
            }
            if let Some(h) = height {
                job.height = h;
            }
            if let Some(n) = frames {
                job.frames = n;
            }
            if let Some(f) = fps {
                job.fps = f;
            }
            if let Some(t) = time {
                job.params = job.params.at_time(t);
            }

            let source = load_source(&job.params, source.as_deref())?;
            render_job(&job, source.as_deref(), &png)?;
        }
    }

    Ok(())
}

/// Open the source image, or fall back to a checkerboard for effects that
/// need one.
fn load_source(
    params: &EffectParams,
    path: Option<&Path>,
) -> Result<Option<Box<dyn SourceImage>>, WarpError> {
    match path {
        Some(path) => Ok(Some(Box::new(ImageSource::open(path)?))),
        None if params.needs_source() => {
            warn!(
                "{} needs a source image; using a checkerboard (pass --source)",
                params.name()
            );
            Ok(Some(Box::new(Checkerboard::default())))
        }
        None => Ok(None),
    }
}

fn render_job(
    job: &RenderConfig,
    source: Option<&dyn SourceImage>,
    png: &Path,
) -> Result<(), WarpError> {
    info!("{}: {}", job.params.name(), describe(&job.params));

    if job.frames <= 1 {
        let frame = render::render(&job.params, job.width, job.height, source)?;
        frame.save_png(png)?;
        println!("Saved to {}", png.display());
        return Ok(());
    }

    render::for_each_frame(
        &job.params,
        job.width,
        job.height,
        source,
        job.params.time(),
        job.fps,
        job.frames,
        |i, frame| frame.save_png(numbered(png, i)),
    )?;
    println!(
        "Saved {} frames to {}",
        job.frames,
        numbered(png, 0).display()
    );
    Ok(())
}

fn describe(params: &EffectParams) -> String {
    match params {
        EffectParams::BlackHole(p) => p.to_string(),
        EffectParams::SpaceTimeRip(p) => p.to_string(),
        EffectParams::ScreenDistortion(p) => p.to_string(),
        EffectParams::Lensing(p) => p.to_string(),
    }
}

/// `out.png` -> `out-0007.png`
fn numbered(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    path.with_file_name(format!("{}-{:04}.{}", stem, index, ext))
}
