//! Simple path tracer example.
//!
//! Renders the demo scene plus one of every extra primitive kind and saves
//! the frame in PPM format.

use lumen_core::{Material, Scene};
use lumen_renderer::{Color, Raytracer, RenderConfig, Vec3};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> std::io::Result<()> {
    println!("Lumen Path Tracer - Simple Example");
    println!("==================================");

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let mut raytracer = Raytracer::with_scene(scene, 800, 450);
    raytracer.set_config(RenderConfig {
        samples_per_pixel: 8,
        ..RenderConfig::default()
    });

    let (width, height) = raytracer.size();
    println!(
        "Rendering {}x{} @ {} spp...",
        width,
        height,
        raytracer.config().samples_per_pixel
    );

    let image = raytracer.render();
    println!("Rendered in {:?}", raytracer.stats().last_frame());

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::demo();

    let additions = [
        scene.add_cuboid(
            Vec3::new(-1.2, -0.6, 1.0),
            Vec3::splat(0.4),
            Material::metal(Color::new(0.95, 0.75, 0.4), 0.25),
        ),
        scene.add_cylinder(
            Vec3::new(1.4, -1.0, 0.8),
            Vec3::new(0.0, 1.2, 0.0),
            0.3,
            Material::lambertian(Color::new(0.2, 0.5, 0.8)),
        ),
        scene.add_triangle(
            Vec3::new(-3.0, -1.0, -3.0),
            Vec3::new(3.0, -1.0, -3.0),
            Vec3::new(0.0, 2.5, -3.5),
            Material::lambertian(Color::new(0.8, 0.8, 0.3)),
        ),
    ];
    for result in additions {
        if let Err(e) = result {
            eprintln!("Skipping primitive: {}", e);
        }
    }

    scene
}

fn save_ppm(image: &lumen_renderer::ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for rgba in image.to_rgba().chunks_exact(4) {
        writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
    }

    Ok(())
}
