//! Geometric primitives stored in the scene.
//!
//! Every primitive carries its own [`Material`]. Constructors validate the
//! geometry and reject degenerate shapes (zero radius, zero extent, zero-area
//! triangles, zero-length normals or axes).

use std::fmt;

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::material::Material;

/// Tag identifying a primitive collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Sphere,
    Plane,
    #[serde(rename = "box")]
    Cuboid,
    Cylinder,
    Triangle,
}

impl PrimitiveKind {
    /// All kinds in scene iteration order.
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Sphere,
        PrimitiveKind::Plane,
        PrimitiveKind::Cuboid,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Triangle,
    ];

    /// Maximum number of primitives of this kind a scene can hold.
    pub const fn capacity(self) -> usize {
        match self {
            PrimitiveKind::Sphere => 10,
            PrimitiveKind::Plane => 5,
            PrimitiveKind::Cuboid => 5,
            PrimitiveKind::Cylinder => 5,
            PrimitiveKind::Triangle => 10,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::Sphere => "sphere",
            PrimitiveKind::Plane => "plane",
            PrimitiveKind::Cuboid => "box",
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::Triangle => "triangle",
        };
        f.write_str(name)
    }
}

fn require_finite(kind: PrimitiveKind, what: &str, v: Vec3) -> SceneResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SceneError::DegenerateGeometry(format!(
            "{kind} {what} is not finite: {v}"
        )))
    }
}

fn require_positive(kind: PrimitiveKind, what: &str, value: f32) -> SceneResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::DegenerateGeometry(format!(
            "{kind} {what} must be positive, got {value}"
        )))
    }
}

/// A sphere.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Material) -> SceneResult<Self> {
        let sphere = Self {
            center,
            radius,
            material,
        };
        sphere.validate()?;
        Ok(sphere)
    }

    pub fn validate(&self) -> SceneResult<()> {
        require_finite(PrimitiveKind::Sphere, "center", self.center)?;
        require_positive(PrimitiveKind::Sphere, "radius", self.radius)?;
        self.material.validate()
    }
}

/// An infinite plane through `point` with unit `normal`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
    pub material: Material,
}

impl Plane {
    /// Create a plane. The normal is normalized; a zero normal is rejected.
    pub fn new(point: Vec3, normal: Vec3, material: Material) -> SceneResult<Self> {
        require_positive(PrimitiveKind::Plane, "normal length", normal.length())?;
        let plane = Self {
            point,
            normal: normal.normalize(),
            material,
        };
        plane.validate()?;
        Ok(plane)
    }

    pub fn validate(&self) -> SceneResult<()> {
        require_finite(PrimitiveKind::Plane, "point", self.point)?;
        require_finite(PrimitiveKind::Plane, "normal", self.normal)?;
        if (self.normal.length() - 1.0).abs() > 1e-3 {
            return Err(SceneError::DegenerateGeometry(format!(
                "plane normal {} is not unit length",
                self.normal
            )));
        }
        self.material.validate()
    }
}

/// An axis-aligned box given by its centre and half extents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cuboid {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub material: Material,
}

impl Cuboid {
    pub fn new(center: Vec3, half_extents: Vec3, material: Material) -> SceneResult<Self> {
        let cuboid = Self {
            center,
            half_extents,
            material,
        };
        cuboid.validate()?;
        Ok(cuboid)
    }

    /// Create a box from full width/height/depth.
    pub fn from_size(center: Vec3, size: Vec3, material: Material) -> SceneResult<Self> {
        Self::new(center, size * 0.5, material)
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    pub fn validate(&self) -> SceneResult<()> {
        require_finite(PrimitiveKind::Cuboid, "center", self.center)?;
        require_finite(PrimitiveKind::Cuboid, "half extents", self.half_extents)?;
        require_positive(PrimitiveKind::Cuboid, "half extent", self.half_extents.min_element())?;
        self.material.validate()
    }
}

/// A capped-length cylinder without end disks.
///
/// The cylinder starts at `base` and extends along `axis`; the axis length is
/// the cylinder length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    pub base: Vec3,
    pub axis: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Cylinder {
    pub fn new(base: Vec3, axis: Vec3, radius: f32, material: Material) -> SceneResult<Self> {
        let cylinder = Self {
            base,
            axis,
            radius,
            material,
        };
        cylinder.validate()?;
        Ok(cylinder)
    }

    pub fn length(&self) -> f32 {
        self.axis.length()
    }

    pub fn validate(&self) -> SceneResult<()> {
        require_finite(PrimitiveKind::Cylinder, "base", self.base)?;
        require_finite(PrimitiveKind::Cylinder, "axis", self.axis)?;
        require_positive(PrimitiveKind::Cylinder, "length", self.length())?;
        require_positive(PrimitiveKind::Cylinder, "radius", self.radius)?;
        self.material.validate()
    }
}

/// A single triangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub material: Material,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> SceneResult<Self> {
        let triangle = Self {
            v0,
            v1,
            v2,
            material,
        };
        triangle.validate()?;
        Ok(triangle)
    }

    /// Unit face normal from the winding v0 -> v1 -> v2.
    pub fn normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(self.v2 - self.v0).normalize()
    }

    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    pub fn validate(&self) -> SceneResult<()> {
        for v in [self.v0, self.v1, self.v2] {
            require_finite(PrimitiveKind::Triangle, "vertex", v)?;
        }
        let doubled_area = (self.v1 - self.v0).cross(self.v2 - self.v0).length();
        if doubled_area <= 1e-12 {
            return Err(SceneError::DegenerateGeometry(
                "triangle has zero area".to_string(),
            ));
        }
        self.material.validate()
    }
}

/// Any primitive, tagged by kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Cuboid(Cuboid),
    Cylinder(Cylinder),
    Triangle(Triangle),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Sphere(_) => PrimitiveKind::Sphere,
            Primitive::Plane(_) => PrimitiveKind::Plane,
            Primitive::Cuboid(_) => PrimitiveKind::Cuboid,
            Primitive::Cylinder(_) => PrimitiveKind::Cylinder,
            Primitive::Triangle(_) => PrimitiveKind::Triangle,
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(s) => &s.material,
            Primitive::Plane(p) => &p.material,
            Primitive::Cuboid(b) => &b.material,
            Primitive::Cylinder(c) => &c.material,
            Primitive::Triangle(t) => &t.material,
        }
    }

    /// Reference position used by the editor: sphere/box centre, plane
    /// point, cylinder base and triangle centroid.
    pub fn position(&self) -> Vec3 {
        match self {
            Primitive::Sphere(s) => s.center,
            Primitive::Plane(p) => p.point,
            Primitive::Cuboid(b) => b.center,
            Primitive::Cylinder(c) => c.base,
            Primitive::Triangle(t) => t.centroid(),
        }
    }

    pub fn validate(&self) -> SceneResult<()> {
        match self {
            Primitive::Sphere(s) => s.validate(),
            Primitive::Plane(p) => p.validate(),
            Primitive::Cuboid(b) => b.validate(),
            Primitive::Cylinder(c) => c.validate(),
            Primitive::Triangle(t) => t.validate(),
        }
    }

    /// Build a primitive from the host's flat parameter list.
    ///
    /// Layouts per kind:
    /// - sphere: `cx cy cz radius`
    /// - plane: `px py pz nx ny nz`
    /// - box: `cx cy cz hx hy hz` (half extents)
    /// - cylinder: `bx by bz ax ay az radius`
    /// - triangle: `x0 y0 z0 x1 y1 z1 x2 y2 z2`
    pub fn from_params(
        kind: PrimitiveKind,
        params: &[f32],
        material: Material,
    ) -> SceneResult<Self> {
        let expected = match kind {
            PrimitiveKind::Sphere => 4,
            PrimitiveKind::Plane | PrimitiveKind::Cuboid => 6,
            PrimitiveKind::Cylinder => 7,
            PrimitiveKind::Triangle => 9,
        };
        if params.len() != expected {
            return Err(SceneError::DegenerateGeometry(format!(
                "{kind} expects {expected} geometry parameters, got {}",
                params.len()
            )));
        }
        let v = |i: usize| Vec3::new(params[i], params[i + 1], params[i + 2]);

        Ok(match kind {
            PrimitiveKind::Sphere => Primitive::Sphere(Sphere::new(v(0), params[3], material)?),
            PrimitiveKind::Plane => Primitive::Plane(Plane::new(v(0), v(3), material)?),
            PrimitiveKind::Cuboid => Primitive::Cuboid(Cuboid::new(v(0), v(3), material)?),
            PrimitiveKind::Cylinder => {
                Primitive::Cylinder(Cylinder::new(v(0), v(3), params[6], material)?)
            }
            PrimitiveKind::Triangle => {
                Primitive::Triangle(Triangle::new(v(0), v(3), v(6), material)?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Color;

    fn grey() -> Material {
        Material::lambertian(Color::splat(0.5))
    }

    #[test]
    fn test_degenerate_shapes_rejected() {
        assert!(matches!(
            Sphere::new(Vec3::ZERO, 0.0, grey()),
            Err(SceneError::DegenerateGeometry(_))
        ));
        assert!(Sphere::new(Vec3::ZERO, -1.0, grey()).is_err());
        assert!(Plane::new(Vec3::ZERO, Vec3::ZERO, grey()).is_err());
        assert!(Cuboid::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0), grey()).is_err());
        assert!(Cylinder::new(Vec3::ZERO, Vec3::ZERO, 1.0, grey()).is_err());
        assert!(Cylinder::new(Vec3::ZERO, Vec3::Y, 0.0, grey()).is_err());
        assert!(Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0, grey()).is_err());
    }

    #[test]
    fn test_plane_normal_is_normalized() {
        let plane = Plane::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0), grey()).unwrap();
        assert_eq!(plane.normal, Vec3::Y);
    }

    #[test]
    fn test_triangle_normal_and_centroid() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y, grey()).unwrap();
        assert_eq!(tri.normal(), Vec3::Z);
        assert!((tri.centroid() - Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_from_params() {
        let sphere = Primitive::from_params(PrimitiveKind::Sphere, &[1.0, 2.0, 3.0, 0.5], grey())
            .unwrap();
        assert_eq!(sphere.kind(), PrimitiveKind::Sphere);
        assert_eq!(sphere.position(), Vec3::new(1.0, 2.0, 3.0));

        let cylinder = Primitive::from_params(
            PrimitiveKind::Cylinder,
            &[0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.25],
            grey(),
        )
        .unwrap();
        match cylinder {
            Primitive::Cylinder(c) => assert_eq!(c.length(), 2.0),
            other => panic!("expected cylinder, got {other:?}"),
        }

        // Wrong arity
        assert!(Primitive::from_params(PrimitiveKind::Triangle, &[0.0; 6], grey()).is_err());
    }

    #[test]
    fn test_kind_display_and_capacity() {
        assert_eq!(PrimitiveKind::Cuboid.to_string(), "box");
        let total: usize = PrimitiveKind::ALL.iter().map(|k| k.capacity()).sum();
        assert_eq!(total, 35);
    }
}
