//! The scene store.
//!
//! A [`Scene`] owns fixed-capacity, insertion-ordered collections for each
//! primitive kind, the light list, the camera and the background colour. All
//! mutations validate first and then apply, so a failed call never leaves the
//! scene half-updated.

use lumen_math::{Color, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::camera::Camera;
use crate::error::{SceneError, SceneResult};
use crate::light::{Light, MAX_LIGHTS};
use crate::material::{Material, MaterialKind};
use crate::primitive::{Cuboid, Cylinder, Plane, Primitive, PrimitiveKind, Sphere, Triangle};

/// Sky blue used as the top of the sky gradient.
pub const DEFAULT_BACKGROUND: Color = Color::new(0.5, 0.7, 1.0);

/// A complete scene: primitives, lights, camera and background.
#[derive(Clone, Debug)]
pub struct Scene {
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
    cuboids: Vec<Cuboid>,
    cylinders: Vec<Cylinder>,
    triangles: Vec<Triangle>,
    lights: Vec<Light>,
    camera: Camera,
    background: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with the default camera and sky.
    pub fn new() -> Self {
        Self {
            spheres: Vec::with_capacity(PrimitiveKind::Sphere.capacity()),
            planes: Vec::with_capacity(PrimitiveKind::Plane.capacity()),
            cuboids: Vec::with_capacity(PrimitiveKind::Cuboid.capacity()),
            cylinders: Vec::with_capacity(PrimitiveKind::Cylinder.capacity()),
            triangles: Vec::with_capacity(PrimitiveKind::Triangle.capacity()),
            lights: Vec::with_capacity(MAX_LIGHTS),
            camera: Camera::default(),
            background: DEFAULT_BACKGROUND,
        }
    }

    /// The start-up scene: three spheres of each material kind plus a smaller
    /// glass sphere, a ground plane and the default light rig.
    pub fn demo() -> Self {
        let mut scene = Self::new();
        scene.spheres.extend([
            Sphere {
                center: Vec3::ZERO,
                radius: 1.0,
                material: Material::lambertian(Color::new(0.7, 0.3, 0.3)),
            },
            Sphere {
                center: Vec3::new(-2.0, 0.0, -1.0),
                radius: 0.5,
                material: Material::metal(Color::new(0.8, 0.8, 0.9), 0.1),
            },
            Sphere {
                center: Vec3::new(2.0, 0.0, -1.0),
                radius: 0.5,
                material: Material::tinted_dielectric(Color::new(0.9, 1.0, 0.9), 1.5),
            },
            Sphere {
                center: Vec3::new(0.0, 1.0, -2.0),
                radius: 0.3,
                material: Material::tinted_dielectric(Color::new(1.0, 0.9, 0.9), 1.3),
            },
        ]);
        scene.planes.push(ground_plane());
        scene.lights.extend(Light::default_rig());
        scene
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn cuboids(&self) -> &[Cuboid] {
        &self.cuboids
    }

    pub fn cylinders(&self) -> &[Cylinder] {
        &self.cylinders
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Number of primitives of `kind`.
    pub fn primitive_count(&self, kind: PrimitiveKind) -> usize {
        match kind {
            PrimitiveKind::Sphere => self.spheres.len(),
            PrimitiveKind::Plane => self.planes.len(),
            PrimitiveKind::Cuboid => self.cuboids.len(),
            PrimitiveKind::Cylinder => self.cylinders.len(),
            PrimitiveKind::Triangle => self.triangles.len(),
        }
    }

    /// Number of primitives across all kinds.
    pub fn total_primitive_count(&self) -> usize {
        PrimitiveKind::ALL
            .iter()
            .map(|&kind| self.primitive_count(kind))
            .sum()
    }

    /// Copy of the primitive at `index` in the `kind` collection.
    pub fn primitive(&self, kind: PrimitiveKind, index: usize) -> SceneResult<Primitive> {
        self.check_index(kind, index)?;
        Ok(match kind {
            PrimitiveKind::Sphere => Primitive::Sphere(self.spheres[index]),
            PrimitiveKind::Plane => Primitive::Plane(self.planes[index]),
            PrimitiveKind::Cuboid => Primitive::Cuboid(self.cuboids[index]),
            PrimitiveKind::Cylinder => Primitive::Cylinder(self.cylinders[index]),
            PrimitiveKind::Triangle => Primitive::Triangle(self.triangles[index]),
        })
    }

    /// Reference position of a primitive (see [`Primitive::position`]).
    pub fn primitive_position(&self, kind: PrimitiveKind, index: usize) -> SceneResult<Vec3> {
        Ok(self.primitive(kind, index)?.position())
    }

    // ------------------------------------------------------------------
    // Primitive mutation
    // ------------------------------------------------------------------

    /// Add a primitive and return its index within its kind's collection.
    pub fn add_primitive(&mut self, primitive: Primitive) -> SceneResult<usize> {
        let kind = primitive.kind();
        let index = self.primitive_count(kind);
        if index >= kind.capacity() {
            return Err(SceneError::CapacityExceeded {
                kind,
                capacity: kind.capacity(),
            });
        }
        primitive.validate()?;

        match primitive {
            Primitive::Sphere(s) => self.spheres.push(s),
            Primitive::Plane(p) => self.planes.push(p),
            Primitive::Cuboid(b) => self.cuboids.push(b),
            Primitive::Cylinder(c) => self.cylinders.push(c),
            Primitive::Triangle(t) => self.triangles.push(t),
        }
        log::debug!("Added {} #{}", kind, index);
        Ok(index)
    }

    /// Add a primitive from flat host parameters (see [`Primitive::from_params`]).
    pub fn add_primitive_from_params(
        &mut self,
        kind: PrimitiveKind,
        geometry: &[f32],
        albedo: Color,
        material_code: u32,
        roughness: f32,
        ior: f32,
    ) -> SceneResult<usize> {
        let material = Material::from_code(material_code, albedo, roughness, ior)?;
        self.add_primitive(Primitive::from_params(kind, geometry, material)?)
    }

    pub fn add_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        material: Material,
    ) -> SceneResult<usize> {
        self.add_primitive(Primitive::Sphere(Sphere::new(center, radius, material)?))
    }

    pub fn add_plane(
        &mut self,
        point: Vec3,
        normal: Vec3,
        material: Material,
    ) -> SceneResult<usize> {
        self.add_primitive(Primitive::Plane(Plane::new(point, normal, material)?))
    }

    pub fn add_cuboid(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        material: Material,
    ) -> SceneResult<usize> {
        self.add_primitive(Primitive::Cuboid(Cuboid::new(center, half_extents, material)?))
    }

    pub fn add_cylinder(
        &mut self,
        base: Vec3,
        axis: Vec3,
        radius: f32,
        material: Material,
    ) -> SceneResult<usize> {
        self.add_primitive(Primitive::Cylinder(Cylinder::new(base, axis, radius, material)?))
    }

    pub fn add_triangle(
        &mut self,
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        material: Material,
    ) -> SceneResult<usize> {
        self.add_primitive(Primitive::Triangle(Triangle::new(v0, v1, v2, material)?))
    }

    /// Remove and return a primitive. Later primitives shift down by one.
    pub fn remove_primitive(
        &mut self,
        kind: PrimitiveKind,
        index: usize,
    ) -> SceneResult<Primitive> {
        let removed = self.primitive(kind, index)?;
        match kind {
            PrimitiveKind::Sphere => {
                self.spheres.remove(index);
            }
            PrimitiveKind::Plane => {
                self.planes.remove(index);
            }
            PrimitiveKind::Cuboid => {
                self.cuboids.remove(index);
            }
            PrimitiveKind::Cylinder => {
                self.cylinders.remove(index);
            }
            PrimitiveKind::Triangle => {
                self.triangles.remove(index);
            }
        }
        log::debug!("Removed {} #{}", kind, index);
        Ok(removed)
    }

    /// Move a primitive so its reference position is `position`.
    ///
    /// Triangles are translated rigidly so their centroid lands on `position`.
    pub fn set_primitive_position(
        &mut self,
        kind: PrimitiveKind,
        index: usize,
        position: Vec3,
    ) -> SceneResult<()> {
        let mut primitive = self.primitive(kind, index)?;
        match &mut primitive {
            Primitive::Sphere(s) => s.center = position,
            Primitive::Plane(p) => p.point = position,
            Primitive::Cuboid(b) => b.center = position,
            Primitive::Cylinder(c) => c.base = position,
            Primitive::Triangle(t) => {
                let offset = position - t.centroid();
                t.v0 += offset;
                t.v1 += offset;
                t.v2 += offset;
            }
        }
        self.replace(index, primitive)
    }

    /// Set the radius of a sphere or cylinder.
    pub fn set_primitive_radius(
        &mut self,
        kind: PrimitiveKind,
        index: usize,
        radius: f32,
    ) -> SceneResult<()> {
        let mut primitive = self.primitive(kind, index)?;
        match &mut primitive {
            Primitive::Sphere(s) => s.radius = radius,
            Primitive::Cylinder(c) => c.radius = radius,
            _ => {
                return Err(SceneError::UnsupportedProperty {
                    kind,
                    property: "radius",
                })
            }
        }
        self.replace(index, primitive)
    }

    /// Replace a primitive's material.
    pub fn set_primitive_material(
        &mut self,
        kind: PrimitiveKind,
        index: usize,
        material: Material,
    ) -> SceneResult<()> {
        let mut primitive = self.primitive(kind, index)?;
        match &mut primitive {
            Primitive::Sphere(s) => s.material = material,
            Primitive::Plane(p) => p.material = material,
            Primitive::Cuboid(b) => b.material = material,
            Primitive::Cylinder(c) => c.material = material,
            Primitive::Triangle(t) => t.material = material,
        }
        self.replace(index, primitive)
    }

    /// Remove every primitive and light, reset the sky and put back the
    /// default ground plane. The camera is kept.
    pub fn clear(&mut self) {
        self.spheres.clear();
        self.planes.clear();
        self.cuboids.clear();
        self.cylinders.clear();
        self.triangles.clear();
        self.lights.clear();
        self.background = DEFAULT_BACKGROUND;
        self.planes.push(ground_plane());
    }

    /// Replace the scene content with eight random spheres and the default
    /// light rig. The same seed always produces the same scene.
    pub fn random_scene(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.clear();

        for i in 0..8 {
            let x = (i as f32 - 4.0) * 2.0 + (rng.gen::<f32>() - 0.5) * 1.5;
            let z = -2.0 - rng.gen::<f32>() * 4.0;
            let radius = 0.3 + rng.gen::<f32>() * 0.5;

            let kind = match rng.gen_range(0..3) {
                1 => MaterialKind::Metal,
                2 => MaterialKind::Dielectric,
                _ => MaterialKind::Lambertian,
            };
            let albedo = Color::new(rng.gen(), rng.gen(), rng.gen());

            self.spheres.push(Sphere {
                center: Vec3::new(x, 0.0, z),
                radius,
                material: Material::new(kind, albedo, 0.1, 1.5),
            });
        }

        self.lights.extend(Light::default_rig());
        log::info!(
            "Populated random scene (seed {}) with {} spheres",
            seed,
            self.spheres.len()
        );
    }

    // ------------------------------------------------------------------
    // Lights
    // ------------------------------------------------------------------

    pub fn add_light(&mut self, light: Light) -> SceneResult<usize> {
        if self.lights.len() >= MAX_LIGHTS {
            return Err(SceneError::LightCapacityExceeded {
                capacity: MAX_LIGHTS,
            });
        }
        light.validate()?;
        self.lights.push(light);
        Ok(self.lights.len() - 1)
    }

    pub fn remove_light(&mut self, index: usize) -> SceneResult<Light> {
        if index >= self.lights.len() {
            return Err(SceneError::LightIndexOutOfRange {
                index,
                len: self.lights.len(),
            });
        }
        Ok(self.lights.remove(index))
    }

    pub fn clear_lights(&mut self) {
        self.lights.clear();
    }

    // ------------------------------------------------------------------
    // Camera
    // ------------------------------------------------------------------

    pub fn set_camera_position(&mut self, position: Vec3) {
        if position.is_finite() {
            self.camera.set_position(position);
        } else {
            log::warn!("Ignoring non-finite camera position {}", position);
        }
    }

    pub fn set_camera_target(&mut self, target: Vec3) {
        if !self.camera.look_at(target) {
            log::warn!("Ignoring camera target {} (non-finite or at the camera)", target);
        }
    }

    pub fn move_camera(&mut self, forward: f32, right: f32, up: f32) {
        if [forward, right, up].iter().all(|v| v.is_finite()) {
            self.camera.move_relative(forward, right, up);
        } else {
            log::warn!("Ignoring non-finite camera move ({}, {}, {})", forward, right, up);
        }
    }

    pub fn rotate_camera(&mut self, yaw_delta: f32, pitch_delta: f32) {
        if yaw_delta.is_finite() && pitch_delta.is_finite() {
            self.camera.rotate(yaw_delta, pitch_delta);
        } else {
            log::warn!("Ignoring non-finite camera rotation ({}, {})", yaw_delta, pitch_delta);
        }
    }

    pub fn set_camera_fov(&mut self, degrees: f32) {
        if degrees.is_finite() {
            self.camera.set_fov_degrees(degrees);
        } else {
            log::warn!("Ignoring non-finite camera fov {}", degrees);
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn check_index(&self, kind: PrimitiveKind, index: usize) -> SceneResult<()> {
        let len = self.primitive_count(kind);
        if index < len {
            Ok(())
        } else {
            Err(SceneError::IndexOutOfRange { kind, index, len })
        }
    }

    /// Validate and store an edited primitive at an index known to exist.
    fn replace(&mut self, index: usize, primitive: Primitive) -> SceneResult<()> {
        primitive.validate()?;
        match primitive {
            Primitive::Sphere(s) => self.spheres[index] = s,
            Primitive::Plane(p) => self.planes[index] = p,
            Primitive::Cuboid(b) => self.cuboids[index] = b,
            Primitive::Cylinder(c) => self.cylinders[index] = c,
            Primitive::Triangle(t) => self.triangles[index] = t,
        }
        Ok(())
    }
}

fn ground_plane() -> Plane {
    Plane {
        point: Vec3::new(0.0, -1.0, 0.0),
        normal: Vec3::Y,
        material: Material::lambertian(Color::splat(0.5)),
    }
}
