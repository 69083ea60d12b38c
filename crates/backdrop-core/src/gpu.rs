//! GPU-facing packed data shared with the native frontend.
//!
//! Layouts here must match the vertex/uniform declarations in
//! `shaders/backdrop.wgsl`.

use crate::beam::BeamPool;
use crate::constants::BEAM_LENGTH;
use crate::particle::ParticleField;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
}

/// Per-draw uniform: a model transform plus a flat color (alpha carries the
/// layer opacity). Wave layers and the particle group each get one.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub pos: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BeamVertex {
    pub pos: [f32; 3],
    pub _pad: f32,
    pub color: [f32; 4],
}

/// Pack the particle field into instance data. The buffer is cleared and
/// refilled; with a capacity reserved once there is no steady-state
/// allocation.
pub fn particle_instances(field: &ParticleField, opacity: f32, out: &mut Vec<ParticleInstance>) {
    out.clear();
    for p in field.iter() {
        out.push(ParticleInstance {
            pos: p.position.to_array(),
            size: p.size,
            color: [p.color[0], p.color[1], p.color[2], opacity],
        });
    }
}

/// Pack the beam pool into line-list vertices (two per beam).
pub fn beam_vertices(pool: &BeamPool, opacity: f32, out: &mut Vec<BeamVertex>) {
    out.clear();
    for b in pool.iter() {
        let head = b.position;
        let tail = b.position - b.direction * BEAM_LENGTH;
        let color = [b.color[0], b.color[1], b.color[2], opacity];
        out.push(BeamVertex {
            pos: head.to_array(),
            _pad: 0.0,
            color,
        });
        out.push(BeamVertex {
            pos: tail.to_array(),
            _pad: 0.0,
            color: [color[0], color[1], color[2], 0.0], // fade toward the tail
        });
    }
}
