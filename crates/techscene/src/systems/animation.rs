//! Animator: pure functions from (time, static parameters) to transforms.
//!
//! Nothing here keeps state. The same `t` always yields the same transform,
//! so pausing the clock never desynchronizes objects and frames can be
//! snapshot-tested.

use glam::Vec3;
use crate::components::motion::{MotionParams, HOVER_PULSE_FREQ};
use crate::components::object::{SceneObject, Transform, VisualState};

/// Rigid rotation of the particle field: Y spin rate and X wobble.
const FIELD_SPIN_RATE: f32 = 0.08;
const FIELD_WOBBLE_FREQ: f32 = 0.04;
const FIELD_WOBBLE_AMP: f32 = 0.25;

/// Code windows type one character every 0.1 s over a 60-character loop.
const TYPING_RATE: f32 = 10.0;
const TYPING_LOOP: u32 = 60;

/// Vertical float offset from the base position.
#[inline]
pub fn float_offset(t: f32, params: &MotionParams, phase: f32) -> f32 {
    (t * params.float_freq + phase).sin() * params.float_amp
}

/// Rotation about the vertical axis: continuous spin plus optional sway.
#[inline]
pub fn yaw(t: f32, params: &MotionParams) -> f32 {
    t * params.spin_rate + (t * params.sway_freq).sin() * params.sway_amp
}

/// Rotation about X: continuous tumble plus optional tilt.
#[inline]
pub fn pitch(t: f32, params: &MotionParams) -> f32 {
    t * params.tumble_rate + (t * params.tilt_freq).sin() * params.tilt_amp
}

/// Scale multiplier. Idle objects only breathe (if their category does);
/// hovered objects pulse on top of that.
#[inline]
pub fn scale(t: f32, params: &MotionParams, state: VisualState) -> f32 {
    let idle = 1.0 + (t * params.idle_pulse_freq).sin() * params.idle_pulse_amp;
    match state {
        VisualState::Idle => idle,
        VisualState::Hovered => {
            idle * params.hover_boost * (1.0 + (t * HOVER_PULSE_FREQ).sin() * params.hover_pulse_amp)
        }
    }
}

/// Full transform for one object at time `t`.
pub fn object_transform(object: &SceneObject, t: f32) -> Transform {
    let params = MotionParams::for_category(object.category);
    let mut position = object.base_position;
    position.y += float_offset(t, params, object.animation_phase);
    Transform {
        position,
        rotation_y: yaw(t, params),
        rotation_x: pitch(t, params),
        scale: scale(t, params, object.visual_state()),
    }
}

/// Rigid rotation (yaw, pitch) shared by every particle in the field.
#[inline]
pub fn particle_field_rotation(t: f32) -> [f32; 2] {
    [
        t * FIELD_SPIN_RATE,
        (t * FIELD_WOBBLE_FREQ).sin() * FIELD_WOBBLE_AMP,
    ]
}

/// Characters typed so far in a code window's loop.
#[inline]
pub fn typed_chars(t: f32) -> u32 {
    ((t.max(0.0) * TYPING_RATE) as u32) % TYPING_LOOP
}

/// Wireframe opacity of the central sphere.
#[inline]
pub fn wireframe_opacity(t: f32) -> f32 {
    0.6 + (t * 2.0).sin() * 0.3
}

/// Position of a data-flow pulse between two points.
#[inline]
pub fn flow_position(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let s = ((t * 2.0).sin() + 1.0) / 2.0;
    from.lerp(to, s)
}
