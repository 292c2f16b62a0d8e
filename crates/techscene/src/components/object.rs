use glam::Vec3;
use crate::api::types::{Category, ObjectId, SelectionKey};

/// Hover state of a scene object. Written only by the interaction dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualState {
    #[default]
    Idle,
    Hovered,
}

/// One visual entity in the showcase.
///
/// Created once from the manifest and never destroyed during a session.
/// The animated transform is recomputed from `base_position` every frame,
/// so nothing here accumulates over time.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: ObjectId,
    pub category: Category,
    /// Fixed at creation.
    pub base_position: Vec3,
    /// Per-object offset in radians so identical categories desynchronize.
    pub animation_phase: f32,
    /// Caption and content lookup name.
    pub label: String,
    /// Optional image path resolved by the host.
    pub texture: Option<String>,
    visual_state: VisualState,
}

impl SceneObject {
    pub fn new(id: ObjectId, category: Category, base_position: Vec3, label: impl Into<String>) -> Self {
        Self {
            id,
            category,
            base_position,
            animation_phase: 0.0,
            label: label.into(),
            texture: None,
            visual_state: VisualState::Idle,
        }
    }

    // -- Builder pattern --

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.animation_phase = phase;
        self
    }

    pub fn with_texture(mut self, path: impl Into<String>) -> Self {
        self.texture = Some(path.into());
        self
    }

    pub fn visual_state(&self) -> VisualState {
        self.visual_state
    }

    pub fn is_hovered(&self) -> bool {
        self.visual_state == VisualState::Hovered
    }

    pub(crate) fn set_visual_state(&mut self, state: VisualState) {
        self.visual_state = state;
    }

    /// The content key clicking this object selects, if it is selectable.
    pub fn selection_key(&self) -> Option<SelectionKey> {
        match self.category {
            Category::LogoBadge => Some(SelectionKey::Tech {
                name: self.label.clone(),
            }),
            other => other.selection_prefix().map(|category| SelectionKey::Service {
                category,
                name: self.label.clone(),
            }),
        }
    }
}

/// Animated transform of a scene object for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation about the vertical axis, radians.
    pub rotation_y: f32,
    /// Rotation about the horizontal X axis, radians.
    pub rotation_x: f32,
    /// Uniform scale multiplier.
    pub scale: f32,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation_y: 0.0,
            rotation_x: 0.0,
            scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rack_selects_service_key() {
        let rack = SceneObject::new(ObjectId(1), Category::ServerRack, Vec3::ZERO, "Load Balancer");
        let key = rack.selection_key().unwrap();
        assert_eq!(key.content_key(), "server-Load Balancer");
    }

    #[test]
    fn badge_selects_tech_key() {
        let badge = SceneObject::new(ObjectId(2), Category::LogoBadge, Vec3::ZERO, "Go")
            .with_texture("/logos/go.png");
        assert_eq!(badge.selection_key().unwrap().content_key(), "Go");
        assert_eq!(badge.texture.as_deref(), Some("/logos/go.png"));
    }

    #[test]
    fn sphere_is_not_selectable() {
        let sphere = SceneObject::new(ObjectId(3), Category::CentralSphere, Vec3::ZERO, "Core");
        assert!(sphere.selection_key().is_none());
        assert_eq!(sphere.visual_state(), VisualState::Idle);
    }
}
