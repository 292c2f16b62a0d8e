use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::assets::loader::Material;
use crate::components::object::{SceneObject, Transform};

/// Per-object render data read by the JS renderer.
/// Must match the JS protocol: 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ObjectInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rotation about the vertical axis, radians.
    pub rotation_y: f32,
    pub rotation_x: f32,
    pub scale: f32,
    /// 1.0 while hovered.
    pub highlight: f32,
    /// `Category` discriminant.
    pub category: f32,
    /// 0.0 = placeholder colour, 1.0 = textured.
    pub material: f32,
    /// Texture handle, or -1.0 when untextured.
    pub texture: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Category-specific scalar: typed characters for code windows,
    /// wireframe opacity for the central sphere.
    pub extra: f32,
    pub id: f32,
    pub _pad: f32,
}

impl ObjectInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(object: &SceneObject, transform: &Transform, material: Material, extra: f32) -> Self {
        let (mat, texture, rgb) = match material {
            Material::Placeholder { rgb } => (0.0, -1.0, rgb),
            Material::Textured { handle } => (1.0, handle.0 as f32, [1.0, 1.0, 1.0]),
        };
        Self {
            x: transform.position.x,
            y: transform.position.y,
            z: transform.position.z,
            rotation_y: transform.rotation_y,
            rotation_x: transform.rotation_x,
            scale: transform.scale,
            highlight: if object.is_hovered() { 1.0 } else { 0.0 },
            category: object.category.as_f32(),
            material: mat,
            texture,
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            extra,
            id: object.id.0 as f32,
            _pad: 0.0,
        }
    }
}

/// A data-flow pulse for one frame: position and colour. 8 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FlowPulse {
    pub position: [f32; 3],
    pub _pad0: f32,
    pub color: [f32; 3],
    pub _pad1: f32,
}

impl FlowPulse {
    pub const FLOATS: usize = 8;

    pub fn new(position: Vec3, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            _pad0: 0.0,
            color,
            _pad1: 0.0,
        }
    }
}

/// Everything the renderer needs for one frame. Rebuilt every tick.
pub struct FrameSnapshot {
    /// One instance per scene object, in registry order.
    pub instances: Vec<ObjectInstance>,
    pub flows: Vec<FlowPulse>,
    /// Rigid rotation (yaw, pitch) of the particle field.
    pub particle_rotation: [f32; 2],
}

impl FrameSnapshot {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(64),
            flows: Vec::with_capacity(8),
            particle_rotation: [0.0; 2],
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.flows.clear();
        self.particle_rotation = [0.0; 2];
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for renderer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn flow_count(&self) -> u32 {
        self.flows.len() as u32
    }

    pub fn flows_ptr(&self) -> *const f32 {
        self.flows.as_ptr() as *const f32
    }
}

impl Default for FrameSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
