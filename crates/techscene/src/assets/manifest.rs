use std::f32::consts::TAU;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::api::error::SceneError;
use crate::api::types::{Category, ObjectId};
use crate::components::object::SceneObject;

static BUILTIN_MANIFEST: &str = include_str!("../../data/manifest.json");

/// Static scene description: every object, the microservice ring and the
/// data-flow pulses. Analogous to a level file; parsed from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneManifest {
    /// Explicitly placed objects, in draw order.
    pub objects: Vec<ObjectDescriptor>,
    /// Microservice nodes placed on a circle by index.
    #[serde(default)]
    pub ring: Option<RingDescriptor>,
    /// Data-flow pulses between fixed points.
    #[serde(default)]
    pub flows: Vec<FlowDescriptor>,
}

/// Describes a single scene object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    pub id: u32,
    pub category: Category,
    pub label: String,
    /// Base position in world units.
    pub position: [f32; 3],
    /// Animation phase in radians (default: the object's X coordinate).
    #[serde(default)]
    pub phase: Option<f32>,
    /// Image path for the object's material, resolved by the host.
    #[serde(default)]
    pub texture: Option<String>,
}

/// Microservice ring layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingDescriptor {
    /// Id of the first node; the rest follow consecutively.
    pub first_id: u32,
    /// Horizontal radius of the circle.
    pub radius: f32,
    /// Vertical amplitude: node `i` sits at `y = sin(i * 0.5) * height`.
    #[serde(default = "default_ring_height")]
    pub height: f32,
    /// Node labels, one per node, in angular order.
    pub labels: Vec<String>,
}

/// A pulse travelling back and forth between two points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FlowDescriptor {
    pub from: [f32; 3],
    pub to: [f32; 3],
    pub color: [f32; 3],
}

fn default_ring_height() -> f32 {
    1.5
}

impl SceneManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        serde_json::from_str(json).map_err(SceneError::ManifestParse)
    }

    /// The manifest shipped with the crate.
    pub fn builtin() -> Result<Self, SceneError> {
        Self::from_json(BUILTIN_MANIFEST)
    }

    /// Expand the manifest into scene objects: explicit objects first, then
    /// the ring nodes. Deterministic; id uniqueness is checked by the registry.
    pub fn create_objects(&self) -> Result<Vec<SceneObject>, SceneError> {
        let ring_len = self.ring.as_ref().map_or(0, |r| r.labels.len());
        let mut objects = Vec::with_capacity(self.objects.len() + ring_len);

        for desc in &self.objects {
            let position = Vec3::from_array(desc.position);
            let mut obj = SceneObject::new(ObjectId(desc.id), desc.category, position, desc.label.clone())
                .with_phase(desc.phase.unwrap_or(position.x));
            if let Some(path) = &desc.texture {
                obj = obj.with_texture(path.clone());
            }
            objects.push(obj);
        }

        if let Some(ring) = &self.ring {
            objects.extend(ring.nodes()?);
        }
        Ok(objects)
    }
}

impl RingDescriptor {
    /// Place each labelled node on the circle by index.
    pub fn nodes(&self) -> Result<Vec<SceneObject>, SceneError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SceneError::InvalidRing("radius must be positive"));
        }
        if self.labels.is_empty() {
            return Err(SceneError::InvalidRing("no labels"));
        }
        let n = self.labels.len() as f32;
        let nodes = self
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let angle = i as f32 / n * TAU;
                let position = Vec3::new(
                    angle.cos() * self.radius,
                    (i as f32 * 0.5).sin() * self.height,
                    angle.sin() * self.radius,
                );
                SceneObject::new(
                    ObjectId(self.first_id + i as u32),
                    Category::MicroserviceNode,
                    position,
                    label.clone(),
                )
                .with_phase(angle)
            })
            .collect();
        Ok(nodes)
    }
}

/// Build the built-in scene objects.
pub fn create_manifest() -> Result<Vec<SceneObject>, SceneError> {
    SceneManifest::builtin()?.create_objects()
}
