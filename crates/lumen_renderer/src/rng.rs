//! Deterministic per-path random numbers.
//!
//! Every random draw in a frame comes from a [`PathRng`] keyed on the pixel,
//! the frame number, the sample index and the bounce index. The same key
//! always yields the same stream, which keeps renders reproducible and lets
//! tests pin down exact sampling decisions.

use std::f32::consts::PI;

use lumen_math::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Bit-mixing integer hash (lowbias32). A bijection on `u32`.
#[inline]
pub fn hash_u32(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

/// Identifies one camera path: pixel, frame and sample index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathSeed {
    pub x: u32,
    pub y: u32,
    pub frame: u32,
    pub sample: u32,
}

impl PathSeed {
    pub fn new(x: u32, y: u32, frame: u32, sample: u32) -> Self {
        Self { x, y, frame, sample }
    }

    /// Generator for one bounce of this path.
    pub fn rng(&self, bounce: u32) -> PathRng {
        let mut h = hash_u32(self.x);
        h = hash_u32(h ^ self.y);
        h = hash_u32(h ^ self.frame);
        h = hash_u32(h ^ self.sample);
        h = hash_u32(h ^ bounce);
        PathRng::seed_from_u64(h as u64)
    }
}

/// Generator driving one bounce of one path.
pub type PathRng = SmallRng;

/// Uniform point inside the unit sphere.
///
/// Closed-form (direction from two draws, radius from a cube root) rather than
/// rejection sampling, so it always costs exactly three draws.
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let direction = random_unit_vector(rng);
    direction * rng.gen::<f32>().cbrt()
}

/// Uniform direction on the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z = 1.0 - 2.0 * rng.gen::<f32>();
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * rng.gen::<f32>();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}
