//! Ray-cylinder intersection.
//!
//! The cylinder is open: only the curved side between the base and
//! `base + axis` is tested, there are no end caps.

use crate::hittable::{HitRecord, Hittable};
use lumen_core::Cylinder;
use lumen_math::{Interval, Ray};

impl Hittable for Cylinder {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let length = self.length();
        let axis = self.axis / length;

        // Project onto the plane perpendicular to the axis
        let oc = ray.origin() - self.base;
        let d_perp = ray.direction() - axis * ray.direction().dot(axis);
        let oc_perp = oc - axis * oc.dot(axis);

        let a = d_perp.length_squared();
        if a < 1e-12 {
            // Parallel to the axis
            return None;
        }
        let h = d_perp.dot(oc_perp);
        let c = oc_perp.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant <= 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        for root in [(-h - sqrtd) / a, (-h + sqrtd) / a] {
            if !ray_t.surrounds(root) {
                continue;
            }
            let p = ray.at(root);
            let height = (p - self.base).dot(axis);
            if !(0.0..=length).contains(&height) {
                continue;
            }
            let outward_normal = (p - self.base - axis * height) / self.radius;
            return Some(HitRecord::new(ray, root, outward_normal, &self.material));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::Material;
    use lumen_math::{Color, Vec3};

    fn pillar() -> Cylinder {
        Cylinder::new(
            Vec3::new(0.0, -1.0, -5.0),
            Vec3::new(0.0, 2.0, 0.0),
            1.0,
            Material::lambertian(Color::splat(0.5)),
        )
        .unwrap()
    }

    #[test]
    fn test_side_hit() {
        let c = pillar();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let rec = c.hit(&ray, Interval::from_min(1e-4)).unwrap();
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_clipped_to_axial_span() {
        let c = pillar();
        let above = Ray::new(Vec3::new(0.0, 1.5, 0.0), Vec3::NEG_Z);
        assert!(c.hit(&above, Interval::from_min(1e-4)).is_none());
    }

    #[test]
    fn test_no_end_caps() {
        let c = pillar();
        // Straight down the axis: parallel, no side hit and no caps
        let down = Ray::new(Vec3::new(0.0, 5.0, -5.0), Vec3::NEG_Y);
        assert!(c.hit(&down, Interval::from_min(1e-4)).is_none());

        // Slanted through the top opening hits the inside wall
        let slanted = Ray::new(Vec3::new(0.0, 2.5, -5.0), Vec3::new(0.5, -1.0, 0.0).normalize());
        let rec = c.hit(&slanted, Interval::from_min(1e-4)).unwrap();
        assert!(!rec.front_face);
        assert!((rec.p.x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_tilted_axis() {
        let c = Cylinder::new(
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 0.0) * 4.0,
            0.5,
            Material::lambertian(Color::splat(0.5)),
        )
        .unwrap();
        let ray = Ray::new(Vec3::new(2.0, 2.0, 5.0), Vec3::NEG_Z);
        let rec = c.hit(&ray, Interval::from_min(1e-4)).unwrap();
        assert!((rec.t - 4.5).abs() < 1e-4);
        assert!((rec.normal - Vec3::Z).length() < 1e-4);
    }
}
