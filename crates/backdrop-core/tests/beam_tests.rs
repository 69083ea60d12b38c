// Beam pool recycling properties.

use backdrop_core::beam::BeamPool;
use backdrop_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_pool(seed: u64) -> BeamPool {
    BeamPool::new(StdRng::seed_from_u64(seed))
}

#[test]
fn pool_size_never_changes() {
    let mut pool = make_pool(1);
    assert_eq!(pool.len(), BEAM_COUNT);
    for _ in 0..10_000 {
        pool.step();
        assert_eq!(pool.len(), BEAM_COUNT);
    }
}

#[test]
fn age_never_exceeds_max_age_after_a_step() {
    let mut pool = make_pool(2);
    for _ in 0..5_000 {
        pool.step();
        for b in pool.iter() {
            assert!(
                b.age <= b.max_age + TIME_STEP,
                "beam age {} overshot max_age {}",
                b.age,
                b.max_age
            );
        }
    }
}

#[test]
fn expired_beams_are_respawned_in_place() {
    let mut pool = make_pool(3);
    let mut saw_respawn = false;
    for _ in 0..5_000 {
        let respawned = pool.step();
        for &i in &respawned {
            saw_respawn = true;
            let b = pool.iter().nth(i).unwrap();
            assert_eq!(b.age, 0.0);
            assert!(b.max_age >= BEAM_MAX_AGE_MIN);
            assert!(b.max_age <= BEAM_MAX_AGE_MAX);
        }
    }
    assert!(saw_respawn, "no beam expired over 5000 steps");
}

#[test]
fn directions_are_unit_length_and_speeds_in_range() {
    let mut pool = make_pool(4);
    for _ in 0..2_000 {
        pool.step();
        for b in pool.iter() {
            assert!((b.direction.length() - 1.0).abs() < 1e-3);
            assert!(b.speed >= BEAM_SPEED_MIN && b.speed <= BEAM_SPEED_MAX);
        }
    }
}

#[test]
fn beams_travel_along_their_direction() {
    let mut pool = make_pool(5);
    let before: Vec<_> = pool.iter().map(|b| (b.position, b.direction, b.speed)).collect();
    let respawned = pool.step();
    for (i, b) in pool.iter().enumerate() {
        if respawned.contains(&i) {
            continue;
        }
        let (pos, dir, speed) = before[i];
        let expected = pos + dir * speed;
        assert!((b.position - expected).length() < 1e-4);
    }
}
