//! Lumen Renderer - CPU path tracing
//!
//! A stochastic path tracer over a `lumen_core::Scene`: analytic
//! primitive intersection, three BSDFs with local direct lighting,
//! Russian roulette termination and ACES tone mapping.
//!
//! # Example
//!
//! ```ignore
//! use lumen_renderer::Raytracer;
//!
//! let mut raytracer = Raytracer::new(640, 360);
//! let image = raytracer.render();
//! let rgba = image.to_rgba();
//! ```

mod bucket;
mod cuboid;
mod cylinder;
mod hittable;
mod integrator;
mod material;
mod plane;
mod raytracer;
mod renderer;
mod rng;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use hittable::{occluded, HitRecord, Hittable, PrimitiveRef};
pub use integrator::{russian_roulette, sky_radiance, trace_path, PathSample, Termination, T_MIN};
pub use material::{direct_light, scatter, Scatter, SURFACE_EPSILON};
pub use raytracer::{FrameStats, Pick, Raytracer, FPS_WINDOW};
pub use renderer::{
    color_to_rgba, gamma_correct, pixel_radiance, primary_ray, render_frame, render_pixel,
    sample_offset, tone_map_aces, to_display, ImageBuffer, RenderConfig,
};
pub use rng::{hash_u32, random_in_unit_sphere, random_unit_vector, PathRng, PathSeed};

/// Re-export common math types from lumen_math
pub use lumen_math::{Color, Interval, Ray, Vec3};
