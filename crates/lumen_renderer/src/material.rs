//! Surface scattering for the three material kinds.
//!
//! Materials are plain data in `lumen_core`; this module turns a hit on a
//! material into either a continuation ray or an absorbed path.

use lumen_core::{MaterialKind, Scene};
use lumen_math::{reflect, refract, schlick, Color, Interval, Ray, Vec3};
use rand::{Rng, RngCore};

use crate::hittable::{occluded, HitRecord};
use crate::rng::random_in_unit_sphere;

/// Offset applied along the normal to scattered and shadow ray origins.
pub const SURFACE_EPSILON: f32 = 1e-4;

/// Beer-Lambert density for light travelling inside a dielectric.
const DIELECTRIC_DENSITY: f32 = 0.5;

/// Fixed transmission loss when a ray enters a dielectric.
const DIELECTRIC_ENTRY_TRANSMISSION: f32 = 0.98;

/// Outcome of scattering a ray at a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scatter {
    /// The path continues along `ray`. `emitted` is added to the path
    /// radiance before the throughput is multiplied by `attenuation`.
    Continue {
        ray: Ray,
        attenuation: Color,
        emitted: Color,
    },
    /// The path ends here.
    Absorbed,
}

/// Scatter `ray_in` at `rec` according to the hit material.
pub fn scatter(
    ray_in: &Ray,
    rec: &HitRecord,
    scene: &Scene,
    ambient: f32,
    rng: &mut dyn RngCore,
) -> Scatter {
    match rec.material.kind {
        MaterialKind::Lambertian => scatter_lambertian(rec, scene, ambient, rng),
        MaterialKind::Metal => scatter_metal(ray_in, rec, rng),
        MaterialKind::Dielectric => scatter_dielectric(ray_in, rec, rng),
    }
}

fn scatter_lambertian(
    rec: &HitRecord,
    scene: &Scene,
    ambient: f32,
    rng: &mut dyn RngCore,
) -> Scatter {
    let albedo = rec.material.albedo;

    let mut direction = rec.normal + random_in_unit_sphere(rng);
    // Catch degenerate scatter direction
    if direction.length_squared() < 1e-8 {
        direction = rec.normal;
    }
    let direction = direction.normalize();

    let direct = direct_light(scene, rec.p, rec.normal);

    Scatter::Continue {
        ray: Ray::new(offset_origin(rec.p, rec.normal, direction), direction),
        attenuation: albedo,
        emitted: albedo * (Color::splat(ambient) + direct),
    }
}

fn scatter_metal(ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Scatter {
    let material = rec.material;
    let unit_direction = ray_in.direction().normalize();

    let fuzz = random_in_unit_sphere(rng) * material.roughness;
    let direction = (reflect(unit_direction, rec.normal) + fuzz).normalize_or_zero();

    // Fuzzed below the surface
    if direction.dot(rec.normal) <= 0.0 {
        return Scatter::Absorbed;
    }

    // Schlick with F0 = albedo
    let cos_theta = (-unit_direction).dot(rec.normal).clamp(0.0, 1.0);
    let albedo = material.albedo;
    let attenuation = albedo + (Color::ONE - albedo) * (1.0 - cos_theta).powi(5);

    Scatter::Continue {
        ray: Ray::new(offset_origin(rec.p, rec.normal, direction), direction),
        attenuation,
        emitted: Color::ZERO,
    }
}

fn scatter_dielectric(ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Scatter {
    let material = rec.material;
    let refraction_ratio = if rec.front_face {
        1.0 / material.ior
    } else {
        material.ior
    };

    let unit_direction = ray_in.direction().normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

    // Check for total internal reflection
    let cannot_refract = refraction_ratio * sin_theta > 1.0;

    let reflects = cannot_refract || schlick(cos_theta, refraction_ratio) > rng.gen::<f32>();

    // Reflected rays never cross the interface and keep their energy
    let (direction, attenuation) = if reflects {
        (reflect(unit_direction, rec.normal), Color::ONE)
    } else if rec.front_face {
        (
            refract(unit_direction, rec.normal, refraction_ratio),
            Color::splat(DIELECTRIC_ENTRY_TRANSMISSION),
        )
    } else {
        // Distance travelled inside the medium, tinted toward the albedo
        let absorbance = (Color::ONE - material.albedo) * DIELECTRIC_DENSITY * rec.t;
        (
            refract(unit_direction, rec.normal, refraction_ratio),
            Color::new((-absorbance.x).exp(), (-absorbance.y).exp(), (-absorbance.z).exp()),
        )
    };
    let direction = direction.normalize_or_zero();

    Scatter::Continue {
        ray: Ray::new(offset_origin(rec.p, rec.normal, direction), direction),
        attenuation,
        emitted: Color::ZERO,
    }
}

/// Unshadowed contribution of every scene light at `p` with normal `n`.
///
/// Falloff is `1 / (1 + 0.09 d + 0.032 d^2)`.
pub fn direct_light(scene: &Scene, p: Vec3, n: Vec3) -> Color {
    let origin = p + n * SURFACE_EPSILON;

    scene
        .lights()
        .iter()
        .filter_map(|light| {
            let to_light = light.position - origin;
            let distance = to_light.length();
            if distance <= 0.0 {
                return None;
            }
            let l = to_light / distance;
            let cos_theta = n.dot(l);
            if cos_theta <= 0.0 {
                return None;
            }

            let shadow_ray = Ray::new(origin, l);
            if occluded(scene, &shadow_ray, Interval::new(SURFACE_EPSILON, distance)) {
                return None;
            }

            let falloff = 1.0 / (1.0 + 0.09 * distance + 0.032 * distance * distance);
            Some(light.radiance() * cos_theta * falloff)
        })
        .fold(Color::ZERO, |acc, c| acc + c)
}

/// Nudge `p` off the surface toward the side `direction` leaves on.
#[inline]
fn offset_origin(p: Vec3, n: Vec3, direction: Vec3) -> Vec3 {
    if direction.dot(n) >= 0.0 {
        p + n * SURFACE_EPSILON
    } else {
        p - n * SURFACE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PathRng, PathSeed};
    use lumen_core::{Light, Material};

    fn rng(sample: u32) -> PathRng {
        PathSeed::new(3, 4, 0, sample).rng(0)
    }

    fn scatter_with(ray_in: &Ray, rec: &HitRecord, scene: &Scene, sample: u32) -> Scatter {
        scatter(ray_in, rec, scene, 0.05, &mut rng(sample))
    }

    fn continued(s: Scatter) -> (Ray, Color, Color) {
        match s {
            Scatter::Continue {
                ray,
                attenuation,
                emitted,
            } => (ray, attenuation, emitted),
            Scatter::Absorbed => panic!("expected the path to continue"),
        }
    }

    #[test]
    fn test_direct_light_falloff_and_shadow() {
        let mut scene = Scene::new();
        scene
            .add_light(Light::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE, 10.0).unwrap())
            .unwrap();

        let direct = direct_light(&scene, Vec3::ZERO, Vec3::Y);
        let d = 5.0 - SURFACE_EPSILON;
        let expected = 10.0 / (1.0 + 0.09 * d + 0.032 * d * d);
        assert!((direct - Color::splat(expected)).length() < 1e-3);

        // Facing away
        assert_eq!(direct_light(&scene, Vec3::ZERO, Vec3::NEG_Y), Color::ZERO);

        // Blocked
        scene
            .add_sphere(Vec3::new(0.0, 2.5, 0.0), 0.5, Material::default())
            .unwrap();
        assert_eq!(direct_light(&scene, Vec3::ZERO, Vec3::Y), Color::ZERO);
    }

    #[test]
    fn test_light_behind_occluder_range() {
        let mut scene = Scene::new();
        scene
            .add_light(Light::new(Vec3::new(0.0, 2.0, 0.0), Color::ONE, 10.0).unwrap())
            .unwrap();
        // Sphere beyond the light does not shadow it
        scene
            .add_sphere(Vec3::new(0.0, 4.0, 0.0), 0.5, Material::default())
            .unwrap();
        assert!(direct_light(&scene, Vec3::ZERO, Vec3::Y).x > 0.0);
    }

    #[test]
    fn test_lambertian_scatter() {
        let material = Material::lambertian(Color::new(0.8, 0.4, 0.2));
        let scene = Scene::new();
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let rec = HitRecord::new(&ray_in, 1.0, Vec3::Y, &material);

        for sample in 0..64 {
            let (ray, attenuation, emitted) =
                continued(scatter_with(&ray_in, &rec, &scene, sample));
            assert_eq!(attenuation, material.albedo);
            // No lights: ambient only
            assert!((emitted - material.albedo * 0.05).length() < 1e-6);
            assert!(ray.origin().y > 0.0);
            assert!(ray.direction().dot(Vec3::Y) > 0.0);
            assert!((ray.direction().length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_metal_mirror_reflects_exactly() {
        let material = Material::metal(Color::new(0.9, 0.9, 0.9), 0.0);
        let scene = Scene::new();
        let d = Vec3::new(1.0, -1.0, 0.5).normalize();
        let ray_in = Ray::new(Vec3::new(-1.0, 1.0, -0.5), d);
        let rec = HitRecord::new(&ray_in, 1.5, Vec3::Y, &material);

        let (ray, attenuation, emitted) = continued(scatter_with(&ray_in, &rec, &scene, 0));
        assert!((ray.direction() - reflect(d, Vec3::Y)).length() < 1e-6);
        assert_eq!(emitted, Color::ZERO);
        // Fresnel only ever brightens toward white
        assert!(attenuation.cmpge(material.albedo).all());
        assert!(attenuation.cmple(Color::ONE).all());
    }

    #[test]
    fn test_metal_grazing_fuzz_can_absorb() {
        let material = Material::metal(Color::splat(0.9), 1.0);
        let scene = Scene::new();
        // Nearly parallel to the surface: heavy fuzz pushes many samples below it
        let d = Vec3::new(1.0, -0.01, 0.0).normalize();
        let ray_in = Ray::new(Vec3::new(-1.0, 0.01, 0.0), d);
        let rec = HitRecord::new(&ray_in, 1.0, Vec3::Y, &material);

        let absorbed = (0..256)
            .filter(|&i| scatter_with(&ray_in, &rec, &scene, i) == Scatter::Absorbed)
            .count();
        assert!(absorbed > 0);
        assert!(absorbed < 256);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Material::dielectric(1.5);
        let scene = Scene::new();
        // Inside the medium, steep angle to the surface normal (outward +Y)
        let d = Vec3::new(1.0, 0.3, 0.0).normalize();
        let ray_in = Ray::new(Vec3::ZERO, d);
        let rec = HitRecord::new(&ray_in, 1.0, Vec3::Y, &material);
        assert!(!rec.front_face);

        for sample in 0..32 {
            let (ray, attenuation, _) = continued(scatter_with(&ray_in, &rec, &scene, sample));
            assert!(ray.direction().dot(rec.normal) > 0.0);
            assert!((ray.direction() - reflect(d, rec.normal)).length() < 1e-5);
            // Clear glass does not absorb
            assert!((attenuation - Color::ONE).length() < 1e-6);
        }
    }

    #[test]
    fn test_dielectric_normal_incidence_mostly_refracts() {
        let material = Material::dielectric(1.5);
        let scene = Scene::new();
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let rec = HitRecord::new(&ray_in, 1.0, Vec3::Y, &material);

        let n = 4_000;
        let mut reflected = 0;
        for sample in 0..n {
            let (ray, attenuation, _) = continued(scatter_with(&ray_in, &rec, &scene, sample));
            if ray.direction().y > 0.0 {
                reflected += 1;
                assert_eq!(attenuation, Color::ONE);
            } else {
                assert!((attenuation - Color::splat(0.98)).length() < 1e-6);
                assert!((ray.direction() - Vec3::NEG_Y).length() < 1e-5);
                assert!(ray.origin().y < 0.0);
            }
        }
        // Schlick at normal incidence for 1.5 is 0.04
        let fraction = reflected as f32 / n as f32;
        assert!((fraction - 0.04).abs() < 0.015, "fraction {fraction}");
    }

    #[test]
    fn test_tinted_dielectric_absorbs_on_exit() {
        let material = Material::tinted_dielectric(Color::new(1.0, 0.5, 0.0), 1.5);
        let scene = Scene::new();
        let ray_in = Ray::new(Vec3::ZERO, Vec3::Y);
        let rec = HitRecord::new(&ray_in, 2.0, Vec3::Y, &material);
        assert!(!rec.front_face);

        let mut exits = 0;
        for sample in 0..64 {
            let (ray, attenuation, _) = continued(scatter_with(&ray_in, &rec, &scene, sample));
            if ray.direction().y < 0.0 {
                // Reflected back inside: not absorbed at the interface
                assert_eq!(attenuation, Color::ONE);
                continue;
            }
            exits += 1;
            assert!((attenuation.x - 1.0).abs() < 1e-6);
            assert!((attenuation.y - (-0.5f32).exp()).abs() < 1e-5);
            assert!((attenuation.z - (-1.0f32).exp()).abs() < 1e-5);
        }
        assert!(exits > 0);
    }
}
