//! Deformable wave layers.
//!
//! Each layer is a planar grid whose vertex depths are recomputed every step
//! from a product of two sine fields. The grid itself is allocated once; the
//! per-step work only rewrites the depth component in place.

use crate::constants::*;
use glam::{Mat4, Vec2, Vec3};

pub struct WaveLayer {
    pub color: [f32; 3],
    pub y_offset: f32,
    pub amplitude: f32,
    /// Rotation about X: base tilt plus pointer deflection.
    pub tilt: f32,
    /// Rotation about Y, driven by pointer deflection.
    pub yaw: f32,
    /// Slow oscillating rotation about Z, driven by time.
    pub roll: f32,
    vertices: Vec<f32>, // flat (x, y, z) triples in grid-local space
}

impl WaveLayer {
    pub fn new(color: [f32; 3], y_offset: f32, amplitude: f32) -> Self {
        let cols = WAVE_SEGMENTS_X + 1;
        let rows = WAVE_SEGMENTS_Y + 1;
        let mut vertices = Vec::with_capacity(cols * rows * 3);
        for row in 0..rows {
            for col in 0..cols {
                let x = (col as f32 / WAVE_SEGMENTS_X as f32 - 0.5) * WAVE_WIDTH;
                let y = (row as f32 / WAVE_SEGMENTS_Y as f32 - 0.5) * WAVE_DEPTH;
                vertices.extend_from_slice(&[x, y, 0.0]);
            }
        }
        Self {
            color,
            y_offset,
            amplitude,
            tilt: WAVE_BASE_TILT,
            yaw: 0.0,
            roll: 0.0,
            vertices,
        }
    }

    pub fn vertex_count() -> usize {
        (WAVE_SEGMENTS_X + 1) * (WAVE_SEGMENTS_Y + 1)
    }

    /// Recompute every vertex depth for the given accumulated time and apply
    /// the slow roll oscillation. `layer_index` phase-shifts the field so
    /// stacked layers do not ripple in lockstep.
    pub fn deform(&mut self, time: f32, layer_index: usize) {
        let phase = layer_index as f32;
        for v in self.vertices.chunks_exact_mut(3) {
            v[2] = (v[0] * WAVE_FREQ + time + phase).sin()
                * (v[1] * WAVE_FREQ + time).sin()
                * self.amplitude;
        }
        self.roll = (time * WAVE_ROLL_RATE).sin() * WAVE_ROLL_AMPLITUDE;
    }

    /// Tilt the layer toward the pointer, proportional to NDC deflection.
    pub fn set_pointer_tilt(&mut self, ndc: Vec2) {
        self.tilt = WAVE_BASE_TILT + ndc.y * WAVE_POINTER_TILT;
        self.yaw = ndc.x * WAVE_POINTER_TILT;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.y_offset, 0.0))
            * Mat4::from_rotation_x(self.tilt)
            * Mat4::from_rotation_y(self.yaw)
            * Mat4::from_rotation_z(self.roll)
    }

    /// Flat (x, y, z) vertex data for upload.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Line-list indices tracing the grid's rows and columns. Identical for
    /// every layer, so callers build this once.
    pub fn grid_line_indices() -> Vec<u32> {
        let cols = (WAVE_SEGMENTS_X + 1) as u32;
        let rows = (WAVE_SEGMENTS_Y + 1) as u32;
        let mut indices = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                let i = row * cols + col;
                if col + 1 < cols {
                    indices.extend_from_slice(&[i, i + 1]);
                }
                if row + 1 < rows {
                    indices.extend_from_slice(&[i, i + cols]);
                }
            }
        }
        indices
    }
}
