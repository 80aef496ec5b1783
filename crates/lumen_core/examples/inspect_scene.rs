//! Example: Load and inspect a scene document.
//!
//! Run with: cargo run --example inspect_scene -- scene.json
//! Add `--blender` to read a simplified Blender export instead.
//! Without a path the demo scene is printed.

use std::env;
use std::fs;

use lumen_core::{import_blender_json, PrimitiveKind, Scene};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let blender = args.iter().any(|a| a == "--blender");
    let path = args.iter().find(|a| !a.starts_with("--"));

    let scene = match path {
        None => Scene::demo(),
        Some(path) => {
            println!("Loading scene file: {}", path);
            let loaded = fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|json| {
                    if blender {
                        import_blender_json(&json).map_err(|e| e.to_string())
                    } else {
                        Scene::from_json(&json).map_err(|e| e.to_string())
                    }
                });
            match loaded {
                Ok(scene) => scene,
                Err(e) => {
                    eprintln!("Error loading scene: {}", e);
                    return;
                }
            }
        }
    };

    println!("\n=== Scene ===");
    println!("Primitives: {}", scene.total_primitive_count());
    for kind in PrimitiveKind::ALL {
        println!(
            "  {:<9} {:>2} / {}",
            kind.to_string(),
            scene.primitive_count(kind),
            kind.capacity()
        );
    }

    println!("\n--- Primitives ---");
    for kind in PrimitiveKind::ALL {
        for index in 0..scene.primitive_count(kind) {
            if let Ok(primitive) = scene.primitive(kind, index) {
                let p = primitive.position();
                let m = primitive.material();
                println!(
                    "  {} [{}] at ({:.2}, {:.2}, {:.2}) - {} albedo ({:.2}, {:.2}, {:.2})",
                    kind, index, p.x, p.y, p.z, m.kind, m.albedo.x, m.albedo.y, m.albedo.z
                );
            }
        }
    }

    println!("\n--- Lights ---");
    for (i, light) in scene.lights().iter().enumerate() {
        println!(
            "  [{}] at ({:.2}, {:.2}, {:.2}) intensity {:.1}",
            i, light.position.x, light.position.y, light.position.z, light.intensity
        );
    }

    let camera = scene.camera();
    println!("\n--- Camera ---");
    println!(
        "  Position: ({:.2}, {:.2}, {:.2})",
        camera.position().x,
        camera.position().y,
        camera.position().z
    );
    println!("  Fov: {:.1} deg", camera.fov_y().to_degrees());
}
