//! Orbiting particle field.
//!
//! Each particle circles a fixed anchor assigned at creation. The pointer can
//! tilt the whole field and push nearby particles away; the accumulated push
//! decays every step and is clamped so long interactive sessions cannot
//! drift a particle out of its neighborhood.

use crate::color::hsl_to_rgb;
use crate::constants::*;
use crate::pointer::repulsion_delta;
use glam::{Mat4, Vec2, Vec3};
use rand::prelude::*;

pub struct Particle {
    pub anchor: Vec3,
    pub orbit_radius: f32,
    pub angular_speed: f32,
    /// Orbit direction: -1.0 or 1.0.
    pub direction: f32,
    pub color: [f32; 3],
    pub base_size: f32,
    pub position: Vec3,
    pub size: f32,
    /// Accumulated pointer repulsion, decayed each step.
    pub displacement: Vec3,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    /// Whole-field rotation from pointer deflection (x = pitch, y = yaw).
    pub tilt: Vec2,
}

impl ParticleField {
    pub fn new(rng: &mut StdRng) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| {
                let anchor = Vec3::new(
                    (rng.gen::<f32>() - 0.5) * PARTICLE_VOLUME_X,
                    (rng.gen::<f32>() - 0.5) * PARTICLE_VOLUME_Y,
                    (rng.gen::<f32>() - 0.5) * PARTICLE_VOLUME_Z,
                );
                let hue =
                    PARTICLE_HUE_MIN + rng.gen::<f32>() * (PARTICLE_HUE_MAX - PARTICLE_HUE_MIN);
                Particle {
                    anchor,
                    orbit_radius: ORBIT_RADIUS_MIN
                        + rng.gen::<f32>() * (ORBIT_RADIUS_MAX - ORBIT_RADIUS_MIN),
                    angular_speed: ANGULAR_SPEED_MIN
                        + rng.gen::<f32>() * (ANGULAR_SPEED_MAX - ANGULAR_SPEED_MIN),
                    direction: if rng.gen::<bool>() { 1.0 } else { -1.0 },
                    color: hsl_to_rgb(hue, PARTICLE_SATURATION, PARTICLE_LIGHTNESS),
                    base_size: PARTICLE_SIZE_MIN
                        + rng.gen::<f32>() * (PARTICLE_SIZE_MAX - PARTICLE_SIZE_MIN),
                    position: anchor,
                    size: PARTICLE_SIZE_MIN,
                    displacement: Vec3::ZERO,
                }
            })
            .collect();
        let mut field = Self {
            particles,
            tilt: Vec2::ZERO,
        };
        field.step(0.0);
        field
    }

    /// Advance every particle to its orbital position for `time` and decay
    /// the accumulated repulsion displacement.
    pub fn step(&mut self, time: f32) {
        for (i, p) in self.particles.iter_mut().enumerate() {
            let angle = time * p.angular_speed * p.direction + phase_offset(i);
            let vertical =
                (time * VERTICAL_PULSE_RATE + i as f32 * 0.37).sin() * VERTICAL_PULSE_AMP;
            p.displacement *= REPULSE_DECAY_PER_STEP;
            p.position = p.anchor
                + Vec3::new(
                    angle.cos() * p.orbit_radius,
                    vertical,
                    angle.sin() * p.orbit_radius,
                )
                + p.displacement;
            p.size = p.base_size
                * (1.0 + SIZE_PULSE_FRACTION * (time * SIZE_PULSE_RATE + i as f32).sin());
        }
    }

    /// Rotate the whole field toward the pointer.
    pub fn set_pointer_tilt(&mut self, ndc: Vec2) {
        self.tilt = Vec2::new(ndc.y * PARTICLE_GROUP_TILT, ndc.x * PARTICLE_GROUP_TILT);
    }

    /// Push every particle within `REPULSE_RADIUS` of the pointer away from
    /// it. The accumulated offset is clamped to `REPULSE_MAX_OFFSET`.
    pub fn apply_repulsion(&mut self, pointer: Vec3) {
        for p in &mut self.particles {
            if let Some(delta) = repulsion_delta(p.position, pointer) {
                p.displacement = (p.displacement + delta).clamp_length_max(REPULSE_MAX_OFFSET);
            }
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.tilt.x) * Mat4::from_rotation_y(self.tilt.y)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

/// Per-particle phase so orbits are spread around the circle rather than
/// starting aligned. Golden-ratio spacing keeps neighbors decorrelated.
#[inline]
pub fn phase_offset(index: usize) -> f32 {
    index as f32 * 0.618_034 * std::f32::consts::TAU
}
