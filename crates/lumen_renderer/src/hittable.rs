//! Hittable trait and HitRecord for ray-object intersection.

use lumen_core::{Material, Primitive, PrimitiveKind, Scene};
use lumen_math::{Interval, Ray, Vec3};

/// Identifies a primitive inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveRef {
    pub kind: PrimitiveKind,
    pub index: usize,
}

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Which scene primitive was hit; only set by scene-level queries
    pub primitive: Option<PrimitiveRef>,
}

impl<'a> HitRecord<'a> {
    /// Build a record at `t` with the normal flipped to face the ray.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            t,
            front_face: true,
            primitive: None,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest hit with `t` strictly inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

impl Hittable for Primitive {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Primitive::Sphere(s) => s.hit(ray, ray_t),
            Primitive::Plane(p) => p.hit(ray, ray_t),
            Primitive::Cuboid(b) => b.hit(ray, ray_t),
            Primitive::Cylinder(c) => c.hit(ray, ray_t),
            Primitive::Triangle(t) => t.hit(ray, ray_t),
        }
    }
}

/// Shrink `ray_t` over one primitive collection, keeping the closest hit.
fn closest_in<'a, T: Hittable>(
    items: &'a [T],
    kind: PrimitiveKind,
    ray: &Ray,
    ray_t: &mut Interval,
    closest: &mut Option<HitRecord<'a>>,
) {
    for (index, object) in items.iter().enumerate() {
        if let Some(mut rec) = object.hit(ray, *ray_t) {
            *ray_t = ray_t.with_max(rec.t);
            rec.primitive = Some(PrimitiveRef { kind, index });
            *closest = Some(rec);
        }
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut interval = ray_t;
        let mut closest = None;

        closest_in(self.spheres(), PrimitiveKind::Sphere, ray, &mut interval, &mut closest);
        closest_in(self.planes(), PrimitiveKind::Plane, ray, &mut interval, &mut closest);
        closest_in(self.cuboids(), PrimitiveKind::Cuboid, ray, &mut interval, &mut closest);
        closest_in(self.cylinders(), PrimitiveKind::Cylinder, ray, &mut interval, &mut closest);
        closest_in(self.triangles(), PrimitiveKind::Triangle, ray, &mut interval, &mut closest);

        closest
    }
}

/// True if any primitive blocks `ray` inside `ray_t`. Stops at the first hit.
pub fn occluded(scene: &Scene, ray: &Ray, ray_t: Interval) -> bool {
    fn any<T: Hittable>(items: &[T], ray: &Ray, ray_t: Interval) -> bool {
        items.iter().any(|object| object.hit(ray, ray_t).is_some())
    }

    any(scene.spheres(), ray, ray_t)
        || any(scene.planes(), ray, ray_t)
        || any(scene.cuboids(), ray, ray_t)
        || any(scene.cylinders(), ray, ray_t)
        || any(scene.triangles(), ray, ray_t)
}
