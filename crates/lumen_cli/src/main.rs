//! Lumen command-line host.
//!
//! Loads or builds a scene, renders one or more frames and writes the last
//! one as an 8-bit PNG.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use lumen_core::{import_blender_json, Scene};
use lumen_renderer::{ImageBuffer, Raytracer, RenderConfig};

mod cli;

use cli::Args;

/// Initialize the logger with the specified level
fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Scene selected by the command line: file, Blender import, random seed or demo.
fn build_scene(args: &Args) -> Result<Scene> {
    if let Some(path) = &args.scene {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        let mut scene = Scene::new();
        scene
            .load_json(&json)
            .with_context(|| format!("loading scene {}", path.display()))?;
        return Ok(scene);
    }

    if let Some(path) = &args.blender {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading Blender export {}", path.display()))?;
        return import_blender_json(&json)
            .with_context(|| format!("importing Blender export {}", path.display()));
    }

    let mut scene = Scene::demo();
    if let Some(seed) = args.seed {
        scene.random_scene(seed);
    }
    Ok(scene)
}

/// Render settings from the optional config file plus flag overrides.
fn render_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => RenderConfig::default(),
    };

    if let Some(samples) = args.samples {
        config.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    Ok(config)
}

fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    image::save_buffer(path, &image.to_rgba(), image.width, image.height, image::ColorType::Rgba8)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("Image saved as {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    info!("Lumen {}", env!("CARGO_PKG_VERSION"));

    let scene = build_scene(&args)?;
    let config = render_config(&args)?;

    if let Some(path) = &args.export {
        let json = scene.export_json().context("serializing scene")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("Scene exported to {}", path.display());
    }

    info!(
        "Image resolution: {}x{}, samples per pixel: {}, max depth: {}",
        args.width, args.height, config.samples_per_pixel, config.max_depth
    );

    let mut raytracer = Raytracer::with_scene(scene, args.width, args.height);
    raytracer.set_config(config);
    raytracer.set_frame(args.frame);

    let mut image = ImageBuffer::new(args.width, args.height);
    for _ in 0..args.frames.max(1) {
        image = raytracer.render();
        info!(
            "Frame {} rendered in {:.2?}",
            raytracer.frame().wrapping_sub(1),
            raytracer.stats().last_frame()
        );
    }
    if args.frames > 1 {
        info!("Average: {:.2} fps", raytracer.stats().fps());
    }

    save_png(&image, &args.output)
}
