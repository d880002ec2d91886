//! Kiln CLI
//!
//! Render scene files to PNG textures and inspect path bounds.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod scene;

use kiln::{
    GradientProducer, Kiln, ParagraphBuilder, PathProducer, ProduceOptions, TextureProducer,
};
use kiln_core::TextSegment;
use kiln_skia::{HostCanvas, SkiaEngine};
use scene::Scene;

#[derive(Parser)]
#[command(name = "kiln")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render vector paths, gradients and text to textures", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every entry of a scene to PNG
    Render {
        /// Scene file
        scene: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "out")]
        out: PathBuf,

        /// Supersampling factor
        #[arg(short, long, default_value_t = 1.0)]
        multisample: f64,

        /// Disable the render caches
        #[arg(long)]
        no_cache: bool,
    },

    /// Print the computed bounds of every path in a scene
    Bounds {
        /// Scene file
        scene: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Render {
            scene,
            out,
            multisample,
            no_cache,
        } => cmd_render(&scene, &out, multisample, no_cache),

        Commands::Bounds { scene } => cmd_bounds(&scene),
    }
}

fn cmd_render(scene_path: &Path, out: &Path, multisample: f64, no_cache: bool) -> Result<()> {
    let scene = Scene::load(scene_path)?;
    if scene.is_empty() {
        warn!("{} has nothing to render", scene_path.display());
        return Ok(());
    }

    let mut config = scene.config.clone();
    if no_cache {
        config.cache_enabled = false;
    }
    let mut kiln = Kiln::init(SkiaEngine::new(), config);

    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory {}", out.display()))?;

    for entry in &scene.paths {
        let mut producer = PathProducer::new(&mut kiln, entry.options.clone())
            .with_context(|| format!("Invalid styling for path '{}'", entry.name))?;
        producer.extend(&entry.commands);
        write_texture(&mut kiln, &mut producer, multisample, out, &entry.name)?;
    }

    for entry in &scene.gradients {
        let mut producer = GradientProducer::new(&mut kiln, entry.options.clone())
            .with_context(|| format!("Cannot build gradient '{}'", entry.name))?;
        write_texture(&mut kiln, &mut producer, multisample, out, &entry.name)?;
    }

    for entry in &scene.paragraphs {
        let font = match &entry.font {
            Some(path) => fs::read(path)
                .with_context(|| format!("Failed to read font {}", path.display()))?,
            None => kiln
                .engine()
                .system_fonts()
                .default_face_data()
                .context("No system font found; set `font` in the scene")?,
        };
        let builder = ParagraphBuilder::new(&kiln, &[font], entry.style.clone())
            .with_context(|| format!("Cannot load fonts for paragraph '{}'", entry.name))?;
        let mut producer = builder
            .build(&mut kiln, &[TextSegment::new(entry.text.clone())], entry.max_width)
            .with_context(|| format!("Cannot lay out paragraph '{}'", entry.name))?;
        write_texture(&mut kiln, &mut producer, multisample, out, &entry.name)?;
    }

    let total = scene.paths.len() + scene.gradients.len() + scene.paragraphs.len();
    info!(
        "Rendered {} textures ({} cache hits)",
        total,
        kiln.texture_cache().stats().hits
    );
    Ok(())
}

fn write_texture<P>(
    kiln: &mut Kiln<SkiaEngine>,
    producer: &mut P,
    multisample: f64,
    out: &Path,
    name: &str,
) -> Result<()>
where
    P: TextureProducer<SkiaEngine>,
{
    let canvas = HostCanvas::new(1, 1)?;
    let options = ProduceOptions::new()
        .with_multisample(multisample)
        .with_host_canvas(canvas.clone());
    let texture = kiln
        .produce_texture(producer, &options)
        .with_context(|| format!("Cannot render '{}'", name))?;

    let target = out.join(format!("{}.png", name));
    let png = texture
        .host_canvas()
        .unwrap_or(&canvas)
        .encode_png()?;
    fs::write(&target, png).with_context(|| format!("Failed to write {}", target.display()))?;

    info!(
        "{} -> {} ({}x{})",
        name,
        target.display(),
        texture.width,
        texture.height
    );
    Ok(())
}

fn cmd_bounds(scene_path: &Path) -> Result<()> {
    let scene = Scene::load(scene_path)?;
    let mut kiln = Kiln::init(SkiaEngine::new(), scene.config.clone());

    for entry in &scene.paths {
        let mut producer = PathProducer::new(&mut kiln, entry.options.clone())?;
        producer.extend(&entry.commands);
        producer.prepare(kiln.engine())?;

        match producer.bounds() {
            Some(bounds) => {
                let offset = bounds.offset();
                println!(
                    "{}: {}x{} rect=({:.2}, {:.2}, {:.2}, {:.2}) offset=({:.2}, {:.2})",
                    entry.name,
                    bounds.width(),
                    bounds.height(),
                    bounds.rect.left,
                    bounds.rect.top,
                    bounds.rect.right,
                    bounds.rect.bottom,
                    offset.x,
                    offset.y
                );
            }
            None => println!("{}: empty", entry.name),
        }
    }

    Ok(())
}
