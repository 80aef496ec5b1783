//! Ray-box intersection (slab method).

use crate::hittable::{HitRecord, Hittable};
use lumen_core::Cuboid;
use lumen_math::{Interval, Ray, Vec3};

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let inv_dir = ray.direction().recip();
        let t0 = (self.min() - ray.origin()) * inv_dir;
        let t1 = (self.max() - ray.origin()) * inv_dir;

        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();

        // NaN shows up when the origin sits on a slab face with a zero direction component
        if t_near.is_nan() || t_far.is_nan() || t_near > t_far || t_far <= ray_t.min {
            return None;
        }

        // Origin inside the box: the exit point is the hit
        let t = if ray_t.surrounds(t_near) {
            t_near
        } else if ray_t.surrounds(t_far) {
            t_far
        } else {
            return None;
        };

        let outward_normal = face_normal(self, ray.at(t));
        Some(HitRecord::new(ray, t, outward_normal, &self.material))
    }
}

/// Outward normal of the face containing `p`: the axis with the largest
/// displacement relative to the half extent on that axis.
fn face_normal(cuboid: &Cuboid, p: Vec3) -> Vec3 {
    let local = (p - cuboid.center) / cuboid.half_extents;
    let abs = local.abs();

    if abs.x >= abs.y && abs.x >= abs.z {
        Vec3::new(local.x.signum(), 0.0, 0.0)
    } else if abs.y >= abs.z {
        Vec3::new(0.0, local.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, local.z.signum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::Material;
    use lumen_math::Color;

    fn unit_box(center: Vec3) -> Cuboid {
        Cuboid::new(center, Vec3::splat(1.0), Material::lambertian(Color::splat(0.5))).unwrap()
    }

    #[test]
    fn test_hit_front_face() {
        let b = unit_box(Vec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let rec = b.hit(&ray, Interval::from_min(1e-4)).unwrap();
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_hit_each_axis() {
        let b = unit_box(Vec3::ZERO);
        let cases = [
            (Vec3::new(5.0, 0.2, 0.1), Vec3::NEG_X, Vec3::X),
            (Vec3::new(0.3, -5.0, 0.1), Vec3::Y, Vec3::NEG_Y),
            (Vec3::new(-0.2, 0.4, -5.0), Vec3::Z, Vec3::NEG_Z),
        ];
        for (origin, dir, normal) in cases {
            let rec = b.hit(&Ray::new(origin, dir), Interval::from_min(1e-4)).unwrap();
            assert!((rec.t - 4.0).abs() < 1e-5);
            assert_eq!(rec.normal, normal);
        }
    }

    #[test]
    fn test_origin_inside_uses_exit() {
        let b = unit_box(Vec3::ZERO);
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);

        let rec = b.hit(&ray, Interval::from_min(1e-4)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_non_cubic_box_normal() {
        let b = Cuboid::new(
            Vec3::ZERO,
            Vec3::new(4.0, 0.5, 1.0),
            Material::lambertian(Color::splat(0.5)),
        )
        .unwrap();
        // Top face near a long edge is still the top face
        let ray = Ray::new(Vec3::new(3.0, 5.0, 0.0), Vec3::NEG_Y);
        let rec = b.hit(&ray, Interval::from_min(1e-4)).unwrap();
        assert_eq!(rec.normal, Vec3::Y);
        assert!((rec.t - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_misses() {
        let b = unit_box(Vec3::new(0.0, 0.0, -5.0));
        let beside = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::NEG_Z);
        let behind = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(b.hit(&beside, Interval::from_min(1e-4)).is_none());
        assert!(b.hit(&behind, Interval::from_min(1e-4)).is_none());
        assert!(b
            .hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), Interval::new(1e-4, 3.0))
            .is_none());
    }
}
