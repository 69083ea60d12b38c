// Lifecycle and population properties of the full scene.

use backdrop_core::gpu::{beam_vertices, particle_instances};
use backdrop_core::wave::WaveLayer;
use backdrop_core::*;
use glam::Vec2;

#[test]
fn population_is_fixed_over_many_steps() {
    let mut scene = Scene::new(1920, 1080, 42);
    assert_eq!(
        scene.counts(),
        (WAVE_LAYER_COUNT, PARTICLE_COUNT, BEAM_COUNT)
    );
    for step in 0..10_000 {
        assert!(scene.advance());
        if step % 1000 == 0 {
            assert_eq!(
                scene.counts(),
                (WAVE_LAYER_COUNT, PARTICLE_COUNT, BEAM_COUNT),
                "population changed at step {step}"
            );
        }
    }
    assert_eq!(
        scene.counts(),
        (WAVE_LAYER_COUNT, PARTICLE_COUNT, BEAM_COUNT)
    );
}

#[test]
fn dispose_stops_all_further_work() {
    let mut scene = Scene::new(800, 600, 1);
    for _ in 0..10 {
        assert!(scene.advance());
    }
    let time_before = scene.time();
    scene.dispose();
    assert!(scene.is_disposed());
    // No frame work happens after dispose; the accumulator freezes.
    for _ in 0..100 {
        assert!(!scene.advance());
    }
    assert_eq!(scene.time(), time_before);
    // Dispose is idempotent.
    scene.dispose();
    assert!(!scene.advance());
}

#[test]
fn pointer_input_after_dispose_is_a_noop() {
    let mut scene = Scene::new(800, 600, 1);
    scene.advance();
    scene.dispose();
    let tilt_before = scene.waves[0].tilt;
    scene.pointer_moved(Vec2::new(1.0, 1.0));
    assert_eq!(scene.waves[0].tilt, tilt_before);
}

#[test]
fn particles_stay_bounded_without_pointer_input() {
    let mut scene = Scene::new(1280, 720, 7);
    for _ in 0..2_000 {
        scene.advance();
        for p in scene.particles.iter() {
            let offset = p.position - p.anchor;
            let eps = 1e-4;
            assert!(
                offset.x.abs() <= p.orbit_radius + eps,
                "x offset {} exceeds orbit radius {}",
                offset.x,
                p.orbit_radius
            );
            assert!(offset.y.abs() <= VERTICAL_PULSE_AMP + eps);
            assert!(offset.z.abs() <= p.orbit_radius + eps);
        }
    }
}

#[test]
fn resize_with_same_dimensions_is_idempotent() {
    let mut scene = Scene::new(800, 600, 3);
    scene.resize(1024, 768);
    let aspect_first = scene.camera.aspect;
    scene.resize(1024, 768);
    assert_eq!(scene.camera.aspect, aspect_first);
    assert_eq!(aspect_first, 1024.0 / 768.0);
}

#[test]
fn resize_with_zero_height_does_not_blow_up() {
    let mut scene = Scene::new(800, 600, 3);
    scene.resize(800, 0);
    assert!(scene.camera.aspect.is_finite());
    assert!(scene.advance());
}

#[test]
fn same_seed_reproduces_the_same_scene() {
    let mut a = Scene::new(1920, 1080, 99);
    let mut b = Scene::new(1920, 1080, 99);
    for step in 0..500 {
        if step % 50 == 0 {
            let ndc = Vec2::new((step as f32 / 500.0) * 2.0 - 1.0, 0.25);
            a.pointer_moved(ndc);
            b.pointer_moved(ndc);
        }
        a.advance();
        b.advance();
    }
    for (pa, pb) in a.particles.iter().zip(b.particles.iter()) {
        assert_eq!(pa.position.to_array(), pb.position.to_array());
        assert_eq!(pa.size, pb.size);
    }
    for (ba, bb) in a.beams.iter().zip(b.beams.iter()) {
        assert_eq!(ba.position.to_array(), bb.position.to_array());
        assert_eq!(ba.age, bb.age);
    }
}

#[test]
fn wave_deformation_respects_layer_amplitude() {
    let mut scene = Scene::new(800, 600, 5);
    for _ in 0..200 {
        scene.advance();
        for wave in &scene.waves {
            for v in wave.vertices().chunks_exact(3) {
                assert!(v[2].abs() <= wave.amplitude + 1e-4);
            }
        }
    }
}

#[test]
fn packed_buffers_match_population() {
    let mut scene = Scene::new(800, 600, 11);
    scene.advance();
    let mut particles = Vec::new();
    particle_instances(&scene.particles, PARTICLE_OPACITY, &mut particles);
    assert_eq!(particles.len(), PARTICLE_COUNT);
    let mut beams = Vec::new();
    beam_vertices(&scene.beams, BEAM_OPACITY, &mut beams);
    assert_eq!(beams.len(), BEAM_COUNT * 2);
    // Repacking reuses the buffers without growing them.
    particle_instances(&scene.particles, PARTICLE_OPACITY, &mut particles);
    assert_eq!(particles.len(), PARTICLE_COUNT);
}

#[test]
fn grid_line_indices_cover_the_grid_once() {
    let cols = (WAVE_SEGMENTS_X + 1) as u32;
    let rows = (WAVE_SEGMENTS_Y + 1) as u32;
    let indices = WaveLayer::grid_line_indices();
    let expected_lines = rows * (cols - 1) + cols * (rows - 1);
    assert_eq!(indices.len() as u32, expected_lines * 2);
    let max = *indices.iter().max().unwrap();
    assert!(max < cols * rows);
    assert_eq!(WaveLayer::vertex_count(), (cols * rows) as usize);
}
