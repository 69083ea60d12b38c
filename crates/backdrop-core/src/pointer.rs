//! Pointer mapping and repulsion math.
//!
//! Everything here is a pure function of its inputs so the interaction
//! behavior can be tested without a window.

use crate::constants::*;
use glam::{Vec2, Vec3};

/// Map pixel coordinates to normalized device coordinates in \[-1, 1\],
/// with +Y up. Degenerate dimensions are treated as 1 pixel.
#[inline]
pub fn pointer_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new((x / w) * 2.0 - 1.0, -((y / h) * 2.0 - 1.0))
}

/// Project a pointer NDC position onto the particle volume's mid plane.
#[inline]
pub fn pointer_world(ndc: Vec2) -> Vec3 {
    Vec3::new(
        ndc.x * PARTICLE_VOLUME_X * 0.5,
        ndc.y * PARTICLE_VOLUME_Y * 0.5,
        0.0,
    )
}

/// One-shot repulsion displacement for a particle near the pointer.
///
/// Returns `None` outside `REPULSE_RADIUS`. Inside the radius the push is
/// directed away from the pointer with magnitude inversely proportional to
/// distance, floored at `REPULSE_MIN_DIST` so a coincident particle does not
/// receive an unbounded kick.
#[inline]
pub fn repulsion_delta(particle: Vec3, pointer: Vec3) -> Option<Vec3> {
    let offset = particle - pointer;
    let dist = offset.length();
    if dist >= REPULSE_RADIUS {
        return None;
    }
    let dir = if dist > 1e-6 { offset / dist } else { Vec3::X };
    Some(dir * (REPULSE_STRENGTH / dist.max(REPULSE_MIN_DIST)))
}
