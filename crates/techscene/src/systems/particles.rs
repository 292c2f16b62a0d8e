//! Particle field generator.
//!
//! The field is generated once per scene construction and never mutated:
//! the renderer rotates the whole set rigidly using
//! [`particle_field_rotation`](crate::systems::animation::particle_field_rotation),
//! so per-frame cost is O(1) regardless of point count.

use std::f32::consts::TAU;
use bytemuck::{Pod, Zeroable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::api::config::DeviceClass;

/// Particle palette: neon green, electric cyan, laser blue, hot pink.
pub const PALETTE: [[f32; 3]; 4] = [
    [0.0, 1.0, 0.25],
    [0.0, 1.0, 1.0],
    [0.0, 0.5, 1.0],
    [1.0, 0.0, 1.0],
];

/// Upper bounds (exclusive) of the cumulative bucket proportions.
const BUCKET_BOUNDS: [f32; 4] = [0.25, 0.5, 0.75, 1.0];

/// One point of a generated field. Wire format: 8 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticlePoint {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    /// Palette bucket index (0..=3), or 4 for single-colour shells.
    pub bucket: f32,
}

impl ParticlePoint {
    pub const FLOATS: usize = 8;
}

/// Shape and look of a spherical shell of points.
#[derive(Debug, Clone, Copy)]
pub struct ShellSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Fixed colour; None draws from the four-bucket palette.
    pub color: Option<[f32; 3]>,
}

impl ShellSpec {
    /// The coloured shell around the central sphere.
    pub const PARTICLES: ShellSpec = ShellSpec {
        inner_radius: 4.0,
        outer_radius: 7.0,
        min_size: 0.05,
        max_size: 0.20,
        color: None,
    };

    /// The distant white star shell.
    pub const STARS: ShellSpec = ShellSpec {
        inner_radius: 100.0,
        outer_radius: 150.0,
        min_size: 0.5,
        max_size: 1.5,
        color: Some([1.0, 1.0, 1.0]),
    };
}

/// Map a uniform draw in [0, 1) to a palette bucket.
#[inline]
pub fn bucket_for(draw: f32) -> usize {
    BUCKET_BOUNDS
        .iter()
        .position(|&bound| draw < bound)
        .unwrap_or(BUCKET_BOUNDS.len() - 1)
}

/// Generate `count` points in a spherical shell using a uniform-angle
/// parametrization (radius, theta and phi each drawn uniformly).
pub fn generate_shell(shell: &ShellSpec, count: usize, rng: &mut StdRng) -> Vec<ParticlePoint> {
    (0..count)
        .map(|_| {
            let radius = rng.gen_range(shell.inner_radius..shell.outer_radius);
            let theta = rng.gen_range(0.0..TAU);
            let phi = rng.gen_range(0.0..TAU);
            let position = [
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            ];
            let (color, bucket) = match shell.color {
                Some(color) => (color, PALETTE.len() as f32),
                None => {
                    let b = bucket_for(rng.gen::<f32>());
                    (PALETTE[b], b as f32)
                }
            };
            ParticlePoint {
                position,
                size: rng.gen_range(shell.min_size..shell.max_size),
                color,
                bucket,
            }
        })
        .collect()
}

/// Generate the main particle field with the device-class budget.
pub fn generate(device_class: DeviceClass, rng: &mut StdRng) -> Vec<ParticlePoint> {
    generate_shell(&ShellSpec::PARTICLES, device_class.profile().particle_count, rng)
}

/// Both point clouds owned by a scene. Immutable after construction.
pub struct ParticleField {
    pub particles: Vec<ParticlePoint>,
    pub stars: Vec<ParticlePoint>,
}

impl ParticleField {
    pub fn new(device_class: DeviceClass, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = generate(device_class, &mut rng);
        let stars = generate_shell(&ShellSpec::STARS, device_class.profile().star_count, &mut rng);
        log::info!(
            "particle field: {} particles, {} stars ({:?})",
            particles.len(),
            stars.len(),
            device_class
        );
        Self { particles, stars }
    }

    /// Raw pointer to particle data for renderer reads.
    pub fn particles_ptr(&self) -> *const f32 {
        self.particles.as_ptr() as *const f32
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.stars.as_ptr() as *const f32
    }
}
