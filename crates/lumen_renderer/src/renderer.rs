//! Frame assembly.
//!
//! Implements:
//! - Two fixed film offsets per pixel (no random jitter)
//! - ACES filmic tone mapping followed by gamma 2.2
//! - Parallel bucket rendering with rayon

use std::time::Instant;

use lumen_core::{Camera, Scene};
use lumen_math::{Color, Interval, Ray};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::integrator::trace_path;
use crate::rng::PathSeed;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of surface hits per path
    pub max_depth: u32,
    /// First bounce index at which Russian roulette runs
    pub roulette_start: u32,
    /// Ambient term added to every diffuse hit
    pub ambient: f32,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 2,
            max_depth: 10,
            roulette_start: 3,
            ambient: 0.05,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Film offset of sample `i` relative to the pixel corner.
///
/// Sample 0 sits at the pixel centre; later samples step half a pixel right
/// and walk down by the fractional golden ratio.
pub fn sample_offset(i: u32) -> (f32, f32) {
    let i = i as f32;
    (0.5 + 0.5 * i, 0.5 + (0.618 * i).fract())
}

/// Primary ray through film position (`fx`, `fy`) in pixels.
///
/// `fy` grows downward; the image top maps to NDC `+1`.
pub fn primary_ray(camera: &Camera, fx: f32, fy: f32, width: u32, height: u32) -> Ray {
    let ndc_x = 2.0 * fx / width as f32 - 1.0;
    let ndc_y = 1.0 - 2.0 * fy / height as f32;
    let aspect = width as f32 / height as f32;
    Ray::new(camera.position(), camera.ray_direction(ndc_x, ndc_y, aspect))
}

/// ACES filmic curve (Narkowicz fit), clamped to [0, 1].
#[inline]
pub fn tone_map_aces(color: Color) -> Color {
    let c = color.max(Color::ZERO);
    let mapped = (c * (2.51 * c + 0.03)) / (c * (2.43 * c + 0.59) + 0.14);
    mapped.clamp(Color::ZERO, Color::ONE)
}

/// Apply gamma 2.2.
#[inline]
pub fn gamma_correct(color: Color) -> Color {
    color.max(Color::ZERO).powf(1.0 / 2.2)
}

/// Linear radiance to display colour.
#[inline]
pub fn to_display(radiance: Color) -> Color {
    gamma_correct(tone_map_aces(radiance))
}

/// Convert a display colour to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b, 255]
}

/// Average linear radiance of pixel (`x`, `y`).
pub fn pixel_radiance(
    scene: &Scene,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    frame: u32,
    config: &RenderConfig,
) -> Color {
    let samples = config.samples_per_pixel.max(1);
    let mut radiance = Color::ZERO;

    for i in 0..samples {
        let (dx, dy) = sample_offset(i);
        let ray = primary_ray(scene.camera(), x as f32 + dx, y as f32 + dy, width, height);
        let seed = PathSeed::new(x, y, frame, i);
        radiance += trace_path(ray, scene, seed, config).radiance;
    }

    radiance / samples as f32
}

/// Display colour of pixel (`x`, `y`).
pub fn render_pixel(
    scene: &Scene,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    frame: u32,
    config: &RenderConfig,
) -> Color {
    to_display(pixel_radiance(scene, x, y, width, height, frame, config))
}

/// Display-ready image buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.offset(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, y);
        self.pixels[offset] = color;
    }

    /// Copy a finished bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render one frame of `scene` at `width` x `height`.
///
/// `frame` keys the per-path random streams; the same frame number renders
/// the same image. Buckets are traced in parallel and stitched in place.
pub fn render_frame(
    scene: &Scene,
    width: u32,
    height: u32,
    frame: u32,
    config: &RenderConfig,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(width, height);
    if width == 0 || height == 0 {
        return image;
    }

    let start = Instant::now();
    let buckets = generate_buckets(width, height, config.bucket_size.max(1));

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let pixels = render_bucket(bucket, scene, width, height, frame, config);
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    for result in &results {
        image.write_bucket(result);
    }

    log::debug!(
        "Rendered frame {} at {}x{} ({} buckets) in {:.2?}",
        frame,
        width,
        height,
        results.len(),
        start.elapsed()
    );

    image
}
