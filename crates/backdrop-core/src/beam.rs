//! Recycled light beams.
//!
//! The pool is allocated once; a beam that outlives `max_age` is respawned in
//! place with fresh random parameters, so the steady state never allocates.

use crate::color::hsl_to_rgb;
use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;

pub struct Beam {
    pub position: Vec3,
    /// Unit travel direction.
    pub direction: Vec3,
    pub speed: f32,
    pub age: f32,
    pub max_age: f32,
    pub color: [f32; 3],
}

pub struct BeamPool {
    beams: Vec<Beam>,
    rng: StdRng,
}

impl BeamPool {
    pub fn new(mut rng: StdRng) -> Self {
        let beams = (0..BEAM_COUNT).map(|_| spawn(&mut rng)).collect();
        Self { beams, rng }
    }

    /// Advance every beam by one step, recycling expired ones in place.
    /// Returns the indices that were respawned this step.
    pub fn step(&mut self) -> SmallVec<[usize; 4]> {
        let mut respawned = SmallVec::new();
        for i in 0..self.beams.len() {
            {
                let b = &mut self.beams[i];
                b.position += b.direction * b.speed;
                b.age += TIME_STEP;
            }
            if self.beams[i].age > self.beams[i].max_age {
                self.beams[i] = spawn(&mut self.rng);
                respawned.push(i);
            }
        }
        respawned
    }

    pub fn len(&self) -> usize {
        self.beams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Beam> {
        self.beams.iter()
    }
}

fn spawn(rng: &mut StdRng) -> Beam {
    let position = Vec3::new(
        (rng.gen::<f32>() - 0.5) * PARTICLE_VOLUME_X,
        (rng.gen::<f32>() - 0.5) * PARTICLE_VOLUME_Y,
        (rng.gen::<f32>() - 0.5) * PARTICLE_VOLUME_Z,
    );
    let direction = random_unit(rng);
    let hue = PARTICLE_HUE_MIN + rng.gen::<f32>() * (PARTICLE_HUE_MAX - PARTICLE_HUE_MIN);
    Beam {
        position,
        direction,
        speed: BEAM_SPEED_MIN + rng.gen::<f32>() * (BEAM_SPEED_MAX - BEAM_SPEED_MIN),
        age: 0.0,
        max_age: BEAM_MAX_AGE_MIN + rng.gen::<f32>() * (BEAM_MAX_AGE_MAX - BEAM_MAX_AGE_MIN),
        color: hsl_to_rgb(hue, PARTICLE_SATURATION, PARTICLE_LIGHTNESS + 0.1),
    }
}

fn random_unit(rng: &mut StdRng) -> Vec3 {
    // Rejection sample inside the unit ball, then normalize.
    loop {
        let v = Vec3::new(
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-4 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}
