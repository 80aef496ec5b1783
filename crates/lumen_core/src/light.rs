//! Point lights.

use lumen_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Maximum number of lights a scene can hold.
pub const MAX_LIGHTS: usize = 4;

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    pub fn new(position: Vec3, color: Color, intensity: f32) -> SceneResult<Self> {
        let light = Self {
            position,
            color,
            intensity,
        };
        light.validate()?;
        Ok(light)
    }

    pub fn validate(&self) -> SceneResult<()> {
        if !self.position.is_finite() || !self.color.is_finite() {
            return Err(SceneError::InvalidLight(format!(
                "non-finite light at {}",
                self.position
            )));
        }
        if self.color.min_element() < 0.0 {
            return Err(SceneError::InvalidLight(format!(
                "negative light colour {}",
                self.color
            )));
        }
        if !self.intensity.is_finite() || self.intensity < 0.0 {
            return Err(SceneError::InvalidLight(format!(
                "intensity {} must be >= 0",
                self.intensity
            )));
        }
        Ok(())
    }

    /// Radiant colour at unit distance (`color * intensity`).
    pub fn radiance(&self) -> Color {
        self.color * self.intensity
    }

    /// The three-light rig used by the demo and random scenes.
    pub fn default_rig() -> [Light; 3] {
        [
            // Key
            Light {
                position: Vec3::new(10.0, 10.0, 10.0),
                color: Color::new(1.0, 1.0, 0.9),
                intensity: 200.0,
            },
            // Sky fill
            Light {
                position: Vec3::new(-5.0, 8.0, 5.0),
                color: Color::new(0.7, 0.8, 1.0),
                intensity: 80.0,
            },
            // Overhead
            Light {
                position: Vec3::new(0.0, 15.0, 0.0),
                color: Color::new(0.9, 0.9, 0.8),
                intensity: 150.0,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_validation() {
        assert!(Light::new(Vec3::Y, Color::ONE, 0.0).is_ok());
        assert!(matches!(
            Light::new(Vec3::Y, Color::ONE, -1.0),
            Err(SceneError::InvalidLight(_))
        ));
        assert!(Light::new(Vec3::splat(f32::NAN), Color::ONE, 1.0).is_err());
    }

    #[test]
    fn test_default_rig_is_valid() {
        let rig = Light::default_rig();
        assert!(rig.len() <= MAX_LIGHTS);
        assert!(rig.iter().all(|l| l.validate().is_ok()));
        assert_eq!(rig[0].radiance(), Color::new(200.0, 200.0, 180.0));
    }
}
