// Pointer mapping, repulsion determinism, and displacement decay/clamp.

use backdrop_core::particle::ParticleField;
use backdrop_core::pointer::*;
use backdrop_core::*;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn ndc_mapping_hits_corners_and_center() {
    let (w, h) = (800.0, 600.0);
    assert_eq!(pointer_to_ndc(0.0, 0.0, w, h), Vec2::new(-1.0, 1.0));
    assert_eq!(pointer_to_ndc(w, h, w, h), Vec2::new(1.0, -1.0));
    let center = pointer_to_ndc(w / 2.0, h / 2.0, w, h);
    assert!(center.x.abs() < 1e-6);
    assert!(center.y.abs() < 1e-6);
}

#[test]
fn ndc_mapping_survives_degenerate_dimensions() {
    let ndc = pointer_to_ndc(10.0, 10.0, 0.0, 0.0);
    assert!(ndc.x.is_finite());
    assert!(ndc.y.is_finite());
}

#[test]
fn repulsion_is_deterministic() {
    let particle = Vec3::new(3.0, 1.0, -2.0);
    let pointer = Vec3::new(1.0, 0.0, 0.0);
    let a = repulsion_delta(particle, pointer).unwrap();
    let b = repulsion_delta(particle, pointer).unwrap();
    assert_eq!(a.to_array(), b.to_array());
}

#[test]
fn repulsion_points_away_and_weakens_with_distance() {
    let pointer = Vec3::ZERO;
    let near = repulsion_delta(Vec3::new(2.0, 0.0, 0.0), pointer).unwrap();
    let far = repulsion_delta(Vec3::new(8.0, 0.0, 0.0), pointer).unwrap();
    assert!(near.x > 0.0);
    assert!(far.x > 0.0);
    assert!(near.length() > far.length());
}

#[test]
fn repulsion_is_none_outside_threshold() {
    let pointer = Vec3::ZERO;
    assert!(repulsion_delta(Vec3::new(REPULSE_RADIUS + 0.1, 0.0, 0.0), pointer).is_none());
    assert!(repulsion_delta(Vec3::new(0.0, REPULSE_RADIUS * 2.0, 0.0), pointer).is_none());
}

#[test]
fn coincident_particle_gets_a_finite_bounded_kick() {
    let delta = repulsion_delta(Vec3::ZERO, Vec3::ZERO).unwrap();
    assert!(delta.length().is_finite());
    assert!(delta.length() <= REPULSE_STRENGTH / REPULSE_MIN_DIST + 1e-4);
}

#[test]
fn accumulated_displacement_is_clamped() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut field = ParticleField::new(&mut rng);
    let target = field.iter().next().unwrap().position;
    for _ in 0..1_000 {
        field.apply_repulsion(target + Vec3::new(0.25, 0.0, 0.0));
    }
    for p in field.iter() {
        assert!(p.displacement.length() <= REPULSE_MAX_OFFSET + 1e-3);
    }
}

#[test]
fn displacement_decays_after_the_pointer_leaves() {
    let mut rng = StdRng::seed_from_u64(22);
    let mut field = ParticleField::new(&mut rng);
    let target = field.iter().next().unwrap().position;
    field.apply_repulsion(target + Vec3::new(0.5, 0.0, 0.0));
    let kicked = field.iter().next().unwrap().displacement.length();
    assert!(kicked > 0.0);
    let mut time = 0.0;
    for _ in 0..600 {
        time += TIME_STEP;
        field.step(time);
    }
    let remaining = field.iter().next().unwrap().displacement.length();
    assert!(
        remaining < kicked * 0.01,
        "displacement {remaining} did not decay from {kicked}"
    );
}

#[test]
fn pointer_world_spans_the_particle_volume() {
    let top_right = pointer_world(Vec2::new(1.0, 1.0));
    assert_eq!(top_right.x, PARTICLE_VOLUME_X * 0.5);
    assert_eq!(top_right.y, PARTICLE_VOLUME_Y * 0.5);
    assert_eq!(top_right.z, 0.0);
    assert_eq!(pointer_world(Vec2::ZERO), Vec3::ZERO);
}
