//! Scene documents: JSON export/import and the simplified Blender format.
//!
//! Loading always builds a complete new [`Scene`] first and only then swaps it
//! in, so a malformed or invalid document never touches the current scene.

use lumen_math::{Color, Vec3};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::camera::{Camera, CameraState};
use crate::error::{SceneError, SceneResult};
use crate::light::Light;
use crate::material::Material;
use crate::primitive::{Cuboid, Cylinder, Plane, Primitive, Sphere, Triangle};
use crate::scene::{Scene, DEFAULT_BACKGROUND};

/// Serialized form of a [`Scene`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub spheres: Vec<Sphere>,
    #[serde(default)]
    pub planes: Vec<Plane>,
    #[serde(default)]
    pub boxes: Vec<Cuboid>,
    #[serde(default)]
    pub cylinders: Vec<Cylinder>,
    #[serde(default)]
    pub triangles: Vec<Triangle>,
    #[serde(default)]
    pub lights: Vec<Light>,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default)]
    pub camera: Option<CameraState>,
}

fn default_background() -> Color {
    DEFAULT_BACKGROUND
}

impl From<&Scene> for SceneDocument {
    fn from(scene: &Scene) -> Self {
        Self {
            spheres: scene.spheres().to_vec(),
            planes: scene.planes().to_vec(),
            boxes: scene.cuboids().to_vec(),
            cylinders: scene.cylinders().to_vec(),
            triangles: scene.triangles().to_vec(),
            lights: scene.lights().to_vec(),
            background: scene.background(),
            camera: Some(scene.camera().state()),
        }
    }
}

impl TryFrom<SceneDocument> for Scene {
    type Error = SceneError;

    fn try_from(doc: SceneDocument) -> SceneResult<Self> {
        let mut scene = Scene::new();

        let primitives = doc
            .spheres
            .into_iter()
            .map(Primitive::Sphere)
            .chain(doc.planes.into_iter().map(Primitive::Plane))
            .chain(doc.boxes.into_iter().map(Primitive::Cuboid))
            .chain(doc.cylinders.into_iter().map(Primitive::Cylinder))
            .chain(doc.triangles.into_iter().map(Primitive::Triangle));
        for primitive in primitives {
            scene.add_primitive(primitive)?;
        }
        for light in doc.lights {
            scene.add_light(light)?;
        }

        if !doc.background.is_finite() {
            return Err(SceneError::InvalidMaterial(format!(
                "background colour {} is not finite",
                doc.background
            )));
        }
        scene.set_background(doc.background);

        if let Some(state) = doc.camera {
            if !state.position.is_finite() || !state.target.is_finite() || !state.fov.is_finite() {
                return Err(SceneError::DegenerateGeometry(
                    "camera state is not finite".to_string(),
                ));
            }
            *scene.camera_mut() = Camera::from_state(&state);
        }

        Ok(scene)
    }
}

impl Scene {
    /// Serialize the whole scene as pretty-printed JSON.
    pub fn export_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(&SceneDocument::from(self))?)
    }

    /// Parse and validate a scene document.
    pub fn from_json(json: &str) -> SceneResult<Scene> {
        let doc: SceneDocument = serde_json::from_str(json)?;
        Scene::try_from(doc)
    }

    /// Replace this scene with the one described by `json`.
    ///
    /// On any error the current scene is left untouched.
    pub fn load_json(&mut self, json: &str) -> SceneResult<()> {
        let scene = Scene::from_json(json)?;
        log::info!(
            "Loaded scene: {} primitives, {} lights",
            scene.total_primitive_count(),
            scene.lights().len()
        );
        *self = scene;
        Ok(())
    }
}

/// Import the simplified Blender export format.
///
/// Only `objects[]` entries are read. `MESH` objects become grey spheres at
/// `location` with radius `scale[0]`; `LIGHT` objects become white lights at
/// `location` with intensity `energy` (default 10). Other object types and
/// entries with missing vectors are skipped.
pub fn import_blender_json(json: &str) -> SceneResult<Scene> {
    let data: Value = serde_json::from_str(json)?;
    let mut scene = Scene::new();

    let objects = data
        .get("objects")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for obj in objects {
        let Some(obj_type) = obj.get("type").and_then(Value::as_str) else {
            log::warn!("Skipping Blender object without a type");
            continue;
        };

        match obj_type {
            "MESH" => {
                let (Some(location), Some(scale)) =
                    (read_vec3(obj, "location"), read_vec3(obj, "scale"))
                else {
                    log::warn!("Skipping Blender mesh without location/scale");
                    continue;
                };
                let material = Material::lambertian(Color::splat(0.7));
                scene.add_sphere(location, scale.x, material)?;
            }
            "LIGHT" => {
                let Some(location) = read_vec3(obj, "location") else {
                    log::warn!("Skipping Blender light without location");
                    continue;
                };
                let energy = obj.get("energy").and_then(Value::as_f64).unwrap_or(10.0) as f32;
                scene.add_light(Light::new(location, Color::ONE, energy)?)?;
            }
            other => log::debug!("Ignoring Blender object type {}", other),
        }
    }

    log::info!(
        "Imported Blender scene: {} spheres, {} lights",
        scene.spheres().len(),
        scene.lights().len()
    );
    Ok(scene)
}

fn read_vec3(obj: &Value, key: &str) -> Option<Vec3> {
    let values = obj.get(key)?.as_array()?;
    if values.len() < 3 {
        return None;
    }
    let component = |i: usize| values[i].as_f64().map(|v| v as f32);
    Some(Vec3::new(component(0)?, component(1)?, component(2)?))
}
