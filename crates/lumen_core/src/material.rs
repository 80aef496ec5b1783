//! Surface material parameters.
//!
//! A material is plain data here. How each kind scatters light lives in the
//! renderer; the scene only stores and validates the parameters.

use std::fmt;

use lumen_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Scattering model of a material.
///
/// The host addresses kinds by integer code: 0 = Lambertian, 1 = Metal, 2 = Dielectric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    Lambertian,
    Metal,
    Dielectric,
}

impl TryFrom<u32> for MaterialKind {
    type Error = SceneError;

    fn try_from(code: u32) -> SceneResult<Self> {
        match code {
            0 => Ok(MaterialKind::Lambertian),
            1 => Ok(MaterialKind::Metal),
            2 => Ok(MaterialKind::Dielectric),
            other => Err(SceneError::InvalidMaterialKind(other)),
        }
    }
}

impl From<MaterialKind> for u32 {
    fn from(kind: MaterialKind) -> Self {
        match kind {
            MaterialKind::Lambertian => 0,
            MaterialKind::Metal => 1,
            MaterialKind::Dielectric => 2,
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaterialKind::Lambertian => "lambertian",
            MaterialKind::Metal => "metal",
            MaterialKind::Dielectric => "dielectric",
        };
        f.write_str(name)
    }
}

/// A material definition attached to every primitive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Scattering model
    pub kind: MaterialKind,

    /// Albedo / tint colour (RGB, 0-1)
    pub albedo: Color,

    /// Metal roughness (0 = mirror, 1 = very rough). Ignored by other kinds.
    pub roughness: f32,

    /// Index of refraction. Only meaningful for dielectrics.
    pub ior: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::lambertian(Color::splat(0.5))
    }
}

impl Material {
    /// Create a material, clamping albedo and roughness into [0, 1].
    pub fn new(kind: MaterialKind, albedo: Color, roughness: f32, ior: f32) -> Self {
        Self {
            kind,
            albedo: albedo.clamp(Vec3::ZERO, Vec3::ONE),
            roughness: roughness.clamp(0.0, 1.0),
            ior,
        }
    }

    /// Create a material from the host's flat parameters and integer kind code.
    pub fn from_code(code: u32, albedo: Color, roughness: f32, ior: f32) -> SceneResult<Self> {
        let material = Self::new(MaterialKind::try_from(code)?, albedo, roughness, ior);
        material.validate()?;
        Ok(material)
    }

    /// Diffuse material.
    pub fn lambertian(albedo: Color) -> Self {
        Self::new(MaterialKind::Lambertian, albedo, 0.0, 1.0)
    }

    /// Metal with the given roughness.
    pub fn metal(albedo: Color, roughness: f32) -> Self {
        Self::new(MaterialKind::Metal, albedo, roughness, 1.0)
    }

    /// Clear glass-like dielectric.
    pub fn dielectric(ior: f32) -> Self {
        Self::new(MaterialKind::Dielectric, Color::ONE, 0.0, ior)
    }

    /// Dielectric whose volume absorbs toward `albedo`.
    pub fn tinted_dielectric(albedo: Color, ior: f32) -> Self {
        Self::new(MaterialKind::Dielectric, albedo, 0.0, ior)
    }

    /// Check the parameter ranges.
    ///
    /// Constructors clamp, but deserialized documents can carry anything.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.albedo.is_finite()
            || self.albedo.min_element() < 0.0
            || self.albedo.max_element() > 1.0
        {
            return Err(SceneError::InvalidMaterial(format!(
                "albedo {} outside [0, 1]",
                self.albedo
            )));
        }
        if !(0.0..=1.0).contains(&self.roughness) {
            return Err(SceneError::InvalidMaterial(format!(
                "roughness {} outside [0, 1]",
                self.roughness
            )));
        }
        if !self.ior.is_finite() || self.ior <= 0.0 {
            return Err(SceneError::InvalidMaterial(format!(
                "index of refraction {} must be positive",
                self.ior
            )));
        }
        Ok(())
    }
}
