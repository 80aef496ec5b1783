//! Ray-triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm. Triangles are double-sided.

use crate::hittable::{HitRecord, Hittable};
use lumen_core::Triangle;
use lumen_math::{Interval, Ray};

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        const EPSILON: f32 = 1e-8;

        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let h = ray.direction().cross(edge2);
        let det = edge1.dot(h);

        // Ray is parallel to triangle
        if det.abs() < EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin() - self.v0;
        let u = inv_det * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = inv_det * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(q);
        if !ray_t.surrounds(t) {
            return None;
        }

        let outward_normal = edge1.cross(edge2).normalize();
        Some(HitRecord::new(ray, t, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::Material;
    use lumen_math::{Color, Vec3};

    fn facing_z() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(0.0, 1.0, -2.0),
            Material::lambertian(Color::splat(0.5)),
        )
        .unwrap()
    }

    #[test]
    fn test_front_hit() {
        let tri = facing_z();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let rec = tri.hit(&ray, Interval::from_min(1e-4)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_double_sided() {
        let tri = facing_z();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -4.0), Vec3::Z);

        let rec = tri.hit(&ray, Interval::from_min(1e-4)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_outside_barycentrics_miss() {
        let tri = facing_z();
        for origin in [
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, -1.5, 0.0),
            Vec3::new(0.8, 0.8, 0.0),
        ] {
            let ray = Ray::new(origin, Vec3::NEG_Z);
            assert!(tri.hit(&ray, Interval::from_min(1e-4)).is_none());
        }
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tri = facing_z();
        let ray = Ray::new(Vec3::new(-5.0, 0.0, -2.0), Vec3::X);
        assert!(tri.hit(&ray, Interval::from_min(1e-4)).is_none());
    }
}
