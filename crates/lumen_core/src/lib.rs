//! Lumen Core - scene store for the Lumen path tracer.
//!
//! This crate provides:
//!
//! - **Scene data**: `Material`, primitives (`Sphere`, `Plane`, `Cuboid`,
//!   `Cylinder`, `Triangle`), `Light` and `Camera`
//! - **Scene store**: `Scene`, fixed-capacity collections with an
//!   all-or-nothing mutation API
//! - **Documents**: JSON export/load and simplified Blender import
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{Material, Scene};
//! use lumen_math::{Color, Vec3};
//!
//! let mut scene = Scene::demo();
//! scene.add_sphere(Vec3::new(0.0, 2.0, 0.0), 0.5, Material::metal(Color::ONE, 0.0))?;
//! let json = scene.export_json()?;
//! ```

pub mod camera;
pub mod document;
pub mod error;
pub mod light;
pub mod material;
pub mod primitive;
pub mod scene;

// Re-export commonly used types
pub use camera::{Camera, CameraState};
pub use document::{import_blender_json, SceneDocument};
pub use error::{SceneError, SceneResult};
pub use light::{Light, MAX_LIGHTS};
pub use material::{Material, MaterialKind};
pub use primitive::{Cuboid, Cylinder, Plane, Primitive, PrimitiveKind, Sphere, Triangle};
pub use scene::{Scene, DEFAULT_BACKGROUND};
