// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod optics;
mod ray;

pub use interval::Interval;
pub use optics::{reflect, refract, schlick};
pub use ray::Ray;

/// Colour type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_color_is_componentwise() {
        let albedo = Color::new(0.5, 0.25, 1.0);
        let light = Color::new(2.0, 2.0, 0.5);
        assert_eq!(albedo * light, Color::new(1.0, 0.5, 0.5));
    }
}
