//! Iterative path integrator.
//!
//! A camera path bounces through the scene carrying a throughput. Each
//! diffuse hit adds its locally lit colour, escaping rays add the sky, and
//! paths end on absorption, at the bounce cap, or through Russian roulette.

use lumen_core::Scene;
use lumen_math::{Color, Interval, Ray, Vec3};
use rand::Rng;

use crate::hittable::Hittable;
use crate::material::{scatter, Scatter};
use crate::renderer::RenderConfig;
use crate::rng::PathSeed;

/// Minimum ray parameter for scene queries, avoids self-intersection.
pub const T_MIN: f32 = 1e-4;

/// Why a path stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Left the scene and picked up the sky.
    Escaped,
    /// A material absorbed the path.
    Absorbed,
    /// Hit the bounce cap.
    MaxDepth,
    /// Killed by Russian roulette.
    RouletteKilled,
}

/// Result of tracing one camera path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Linear radiance gathered along the path
    pub radiance: Color,
    pub termination: Termination,
    /// Number of surface hits
    pub bounces: u32,
}

/// Sky gradient: white looking straight down, `background` straight up.
pub fn sky_radiance(direction: Vec3, background: Color) -> Color {
    let unit_direction = direction.normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::ONE + a * background
}

/// Russian roulette on `throughput` with uniform draw `u` in [0, 1).
///
/// Survival probability is `min(1, max component)`. Returns the reweighted
/// throughput on survival so the estimator stays unbiased.
pub fn russian_roulette(throughput: Color, u: f32) -> Option<Color> {
    let p = throughput.max_element().min(1.0);
    if p <= 0.0 || u > p {
        None
    } else {
        Some(throughput / p)
    }
}

/// Trace one path from `primary` through `scene`.
pub fn trace_path(
    primary: Ray,
    scene: &Scene,
    seed: PathSeed,
    config: &RenderConfig,
) -> PathSample {
    let mut ray = Ray::normalized(primary.origin(), primary.direction());
    let mut throughput = Color::ONE;
    let mut radiance = Color::ZERO;

    for bounce in 0..config.max_depth {
        let mut rng = seed.rng(bounce);

        let Some(rec) = scene.hit(&ray, Interval::from_min(T_MIN)) else {
            radiance += throughput * sky_radiance(ray.direction(), scene.background());
            return PathSample {
                radiance,
                termination: Termination::Escaped,
                bounces: bounce,
            };
        };

        match scatter(&ray, &rec, scene, config.ambient, &mut rng) {
            Scatter::Absorbed => {
                return PathSample {
                    radiance,
                    termination: Termination::Absorbed,
                    bounces: bounce + 1,
                };
            }
            Scatter::Continue {
                ray: next,
                attenuation,
                emitted,
            } => {
                radiance += throughput * emitted;
                throughput *= attenuation;
                ray = next;
            }
        }

        if bounce >= config.roulette_start {
            match russian_roulette(throughput, rng.gen()) {
                Some(reweighted) => throughput = reweighted,
                None => {
                    return PathSample {
                        radiance,
                        termination: Termination::RouletteKilled,
                        bounces: bounce + 1,
                    };
                }
            }
        }
    }

    PathSample {
        radiance,
        termination: Termination::MaxDepth,
        bounces: config.max_depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PathRng;
    use rand::SeedableRng;
    use lumen_core::{Light, Material, DEFAULT_BACKGROUND};

    fn seed(sample: u32) -> PathSeed {
        PathSeed::new(10, 20, 0, sample)
    }

    #[test]
    fn test_sky_gradient() {
        let bg = DEFAULT_BACKGROUND;
        assert!((sky_radiance(Vec3::Y, bg) - bg).length() < 1e-6);
        assert!((sky_radiance(Vec3::NEG_Y, bg) - Color::ONE).length() < 1e-6);
        let horizon = sky_radiance(Vec3::X, bg);
        assert!((horizon - (Color::ONE + bg) * 0.5).length() < 1e-6);
    }

    #[test]
    fn test_escape_returns_sky() {
        let scene = Scene::new();
        let config = RenderConfig::default();
        let dir = Vec3::new(0.3, 0.4, -1.0);

        let sample = trace_path(Ray::new(Vec3::ZERO, dir), &scene, seed(0), &config);
        assert_eq!(sample.termination, Termination::Escaped);
        assert_eq!(sample.bounces, 0);
        assert!((sample.radiance - sky_radiance(dir, scene.background())).length() < 1e-6);
    }

    #[test]
    fn test_roulette_is_unbiased() {
        let throughput = Color::new(0.3, 0.2, 0.1);
        let mut rng = PathRng::seed_from_u64(0xdead_beef);
        let n = 200_000;

        let mut sum = Color::ZERO;
        for _ in 0..n {
            if let Some(t) = russian_roulette(throughput, rng.gen()) {
                sum += t;
            }
        }
        let mean = sum / n as f32;
        assert!((mean - throughput).abs().max_element() < 0.01, "mean {mean}");
    }

    #[test]
    fn test_roulette_edges() {
        assert_eq!(russian_roulette(Color::ZERO, 0.0), None);
        // Bright paths always survive unchanged
        assert_eq!(russian_roulette(Color::splat(2.0), 0.999), Some(Color::splat(2.0)));
        let survived = russian_roulette(Color::splat(0.5), 0.25).unwrap();
        assert!((survived - Color::ONE).length() < 1e-6);
        assert_eq!(russian_roulette(Color::splat(0.5), 0.75), None);
    }

    #[test]
    fn test_mirror_box_hits_max_depth() {
        // Two facing perfect mirrors with no roulette: the path bounces forever
        let mut scene = Scene::new();
        let mirror = Material::metal(Color::ONE, 0.0);
        scene.add_plane(Vec3::new(0.0, 0.0, -1.0), Vec3::Z, mirror).unwrap();
        scene.add_plane(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z, mirror).unwrap();

        let config = RenderConfig {
            roulette_start: u32::MAX,
            ..RenderConfig::default()
        };
        let sample = trace_path(Ray::new(Vec3::ZERO, Vec3::NEG_Z), &scene, seed(0), &config);
        assert_eq!(sample.termination, Termination::MaxDepth);
        assert_eq!(sample.bounces, config.max_depth);
        assert_eq!(sample.radiance, Color::ZERO);
    }

    #[test]
    fn test_dark_paths_are_roulette_killed() {
        // Near-black diffuse walls drive throughput toward zero
        let mut scene = Scene::new();
        let soot = Material::lambertian(Color::splat(0.01));
        scene.add_plane(Vec3::new(0.0, 0.0, -1.0), Vec3::Z, soot).unwrap();
        scene.add_plane(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z, soot).unwrap();

        let config = RenderConfig::default();
        let killed = (0..64)
            .map(|i| trace_path(Ray::new(Vec3::ZERO, Vec3::NEG_Z), &scene, seed(i), &config))
            .filter(|s| s.termination == Termination::RouletteKilled)
            .count();
        assert!(killed > 48, "killed {killed}");
    }

    #[test]
    fn test_grazing_rough_metal_can_absorb() {
        let mut scene = Scene::new();
        scene
            .add_plane(Vec3::ZERO, Vec3::Y, Material::metal(Color::splat(0.9), 1.0))
            .unwrap();
        let config = RenderConfig::default();
        let dir = Vec3::new(1.0, -0.01, 0.0);

        let absorbed = (0..256)
            .map(|i| trace_path(Ray::new(Vec3::new(0.0, 0.01, 0.0), dir), &scene, seed(i), &config))
            .filter(|s| s.termination == Termination::Absorbed)
            .count();
        assert!(absorbed > 0);
    }

    #[test]
    fn test_lit_diffuse_adds_emitted() {
        let mut scene = Scene::new();
        scene
            .add_plane(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, Material::lambertian(Color::splat(0.5)))
            .unwrap();
        scene
            .add_light(Light::new(Vec3::new(0.0, 3.0, 0.0), Color::ONE, 50.0).unwrap())
            .unwrap();
        let config = RenderConfig::default();

        let sample = trace_path(Ray::new(Vec3::ZERO, Vec3::NEG_Y), &scene, seed(0), &config);
        assert!(sample.bounces >= 1);
        // At least the first hit's lit colour
        let d = 4.0 - 1e-4;
        let first = 0.5 * (0.05 + 50.0 / (1.0 + 0.09 * d + 0.032 * d * d));
        assert!(sample.radiance.x >= first - 1e-3, "radiance {}", sample.radiance);
    }

    #[test]
    fn test_same_seed_same_path() {
        let scene = Scene::demo();
        let config = RenderConfig::default();
        let ray = Ray::new(Vec3::new(0.0, 2.0, 5.0), Vec3::new(0.0, -2.0, -5.0));

        let a = trace_path(ray, &scene, seed(1), &config);
        let b = trace_path(ray, &scene, seed(1), &config);
        assert_eq!(a, b);
    }
}
