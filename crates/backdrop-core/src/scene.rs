//! The backdrop scene: exclusive owner of the camera and every animated
//! entity, with an explicit init/dispose lifecycle.
//!
//! All mutation happens through `&mut self` on the driving thread between
//! frames; there is no interior mutability and no shared state.

use crate::beam::BeamPool;
use crate::camera::Camera;
use crate::constants::*;
use crate::particle::ParticleField;
use crate::pointer::pointer_world;
use crate::wave::WaveLayer;
use glam::{Vec2, Vec3};
use rand::prelude::*;

pub struct Scene {
    pub camera: Camera,
    pub waves: Vec<WaveLayer>,
    pub particles: ParticleField,
    pub beams: BeamPool,
    time: f32,
    disposed: bool,
}

impl Scene {
    /// Build the full scene for a surface of the given pixel size. Every
    /// entity is allocated here; nothing grows or shrinks afterwards. The
    /// same seed reproduces the same scene.
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: width as f32 / height.max(1) as f32,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        };
        let waves = WAVE_LAYERS
            .iter()
            .map(|&(color, y_offset, amplitude)| WaveLayer::new(color, y_offset, amplitude))
            .collect();
        // Distinct RNG streams per subsystem, derived from the base seed.
        let mut particle_rng = StdRng::seed_from_u64(subsystem_seed(seed, 0));
        let beam_rng = StdRng::seed_from_u64(subsystem_seed(seed, 1));
        Self {
            camera,
            waves,
            particles: ParticleField::new(&mut particle_rng),
            beams: BeamPool::new(beam_rng),
            time: 0.0,
            disposed: false,
        }
    }

    /// Advance the scene by one fixed time step. Returns `false` without
    /// doing any work once the scene is disposed, which tells the driver to
    /// stop requesting frames.
    pub fn advance(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.time += TIME_STEP;
        for (i, wave) in self.waves.iter_mut().enumerate() {
            wave.deform(self.time, i);
        }
        self.particles.step(self.time);
        let respawned = self.beams.step();
        if !respawned.is_empty() {
            log::debug!("recycled {} beam(s)", respawned.len());
        }
        true
    }

    /// React to pointer movement already mapped to NDC in \[-1, 1\]: tilt the
    /// wave layers, rotate the particle group, and repel nearby particles.
    pub fn pointer_moved(&mut self, ndc: Vec2) {
        if self.disposed {
            return;
        }
        for wave in &mut self.waves {
            wave.set_pointer_tilt(ndc);
        }
        self.particles.set_pointer_tilt(ndc);
        self.particles.apply_repulsion(pointer_world(ndc));
    }

    /// Track a surface resize. Only the camera aspect changes; repeating the
    /// same dimensions is a no-op.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = width as f32 / height.max(1) as f32;
    }

    /// Stop the scene. Idempotent; after this `advance` refuses to run.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            log::info!("scene disposed after {:.1}s of animation", self.time);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Accumulated animation time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Entity counts: (wave layers, particles, beams).
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.waves.len(), self.particles.len(), self.beams.len())
    }
}

#[inline]
fn subsystem_seed(seed: u64, index: u64) -> u64 {
    seed ^ (index + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
