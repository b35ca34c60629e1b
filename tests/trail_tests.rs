//! Integration tests driving the trail engine the way the frame loop does:
//! a simulated clock feeding ticks, with assertions on the aggregate ring
//! state and on the uniform block the renderer would upload.

use glam::Mat4;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use wisp::design::{DesignChange, DesignConfig, Shape};
use wisp::ring::{ParticleRing, UNUSED_SPAWN_TIME};
use wisp::trail::{path_position, TrailEngine};
use wisp::uniforms::TrailUniforms;

fn engine(capacity: usize, interval_ms: f32) -> TrailEngine {
    let ring = ParticleRing::with_rng(capacity, SmallRng::seed_from_u64(99));
    TrailEngine::with_ring(ring, interval_ms)
}

/// Drive `frames` ticks of `frame_ms` each, returning the total emitted.
fn drive(engine: &mut TrailEngine, frames: usize, frame_ms: f32, start: f32) -> u32 {
    let mut now = start;
    let mut total = 0;
    for _ in 0..frames {
        now += frame_ms / 1000.0;
        total += engine.tick(now, frame_ms, false);
    }
    total
}

#[test]
fn test_cumulative_count_is_exact_across_frame_rates() {
    // 10 seconds of wall time at a 100 ms interval owes 100 particles,
    // whatever the frame cadence.
    for frame_ms in [4.0, 16.7, 33.0, 250.0] {
        let frames = (10_000.0 / frame_ms) as usize;
        let mut eng = engine(256, 100.0);
        let total = drive(&mut eng, frames, frame_ms, 0.0);

        let expected = (frames as f32 * frame_ms / 100.0) as i64;
        assert!(
            (total as i64 - expected).abs() <= 1,
            "frame_ms={}: total {} vs expected {}",
            frame_ms,
            total,
            expected
        );
    }
}

#[test]
fn test_steady_driving_fills_then_cycles_the_ring() {
    let mut eng = engine(32, 100.0);

    // 3.36 seconds owes 33 particles: more than one full ring.
    drive(&mut eng, 210, 16.0, 0.0);
    assert!(eng
        .ring()
        .spawn_times()
        .iter()
        .all(|&t| t != UNUSED_SPAWN_TIME));

    // Keep driving: the cursor wraps and rewrites, capacity is unchanged.
    let wrapped_cursor = eng.ring().cursor();
    drive(&mut eng, 100, 16.0, 3.36);
    assert_eq!(eng.ring().capacity(), 32);
    assert_ne!(eng.ring().cursor(), wrapped_cursor);
}

#[test]
fn test_idle_gap_with_reset_does_not_burst() {
    let mut eng = engine(64, 100.0);
    drive(&mut eng, 50, 20.0, 0.0);
    let cursor = eng.ring().cursor();

    // A long idle gap arrives as one huge delta with the reset flag set,
    // the way the app resumes after the pointer re-enters.
    assert_eq!(eng.tick(120.0, 119_000.0, true), 0);
    assert_eq!(eng.ring().cursor(), cursor);

    // The next normal frame spawns at the normal rate.
    let emitted = eng.tick(120.1, 100.0, false);
    assert_eq!(emitted, 1);
}

#[test]
fn test_backfill_spans_consecutive_ticks() {
    let mut eng = engine(64, 100.0);
    eng.tick(1.0, 100.0, false);
    let anchor = eng.prev_position().unwrap();

    // One slow frame owing 4 particles: they must sit between the previous
    // anchor and the current path position, in order.
    let emitted = eng.tick(1.4, 400.0, false);
    assert_eq!(emitted, 4);
    let current = path_position(1.4);

    let ps = &eng.ring().positions()[1..5];
    for (i, p) in ps.iter().enumerate() {
        let expected = anchor.lerp(current, (i + 1) as f32 / 4.0);
        assert!((*p - expected).length() < 1e-5);
    }
}

#[test]
fn test_design_changes_reach_the_uniform_block() {
    let mut cfg = DesignConfig::default();

    assert!(cfg.apply(DesignChange::Shape(Shape::Angular)));
    assert!(!cfg.apply(DesignChange::EffectSpread(1.2)));
    assert!(!cfg.apply(DesignChange::BaseSize(800.0)));

    let u = TrailUniforms::new(&cfg, Mat4::IDENTITY, 3.0, [1280.0, 720.0]);
    assert_eq!(u.effect_spread, 1.2);
    assert_eq!(u.base_size, 800.0);
    assert_eq!(u.time, 3.0);

    // Out-of-range values clamp rather than pass through.
    cfg.apply(DesignChange::EffectBeat(99.0));
    let u = TrailUniforms::new(&cfg, Mat4::IDENTITY, 3.0, [1280.0, 720.0]);
    assert_eq!(u.effect_beat, wisp::EFFECT_MAX);
}

#[test]
fn test_shape_swap_keeps_particle_state() {
    let mut eng = engine(16, 100.0);
    drive(&mut eng, 30, 20.0, 0.0);
    let times: Vec<f32> = eng.ring().spawn_times().to_vec();

    // A shape change only swaps the sprite; ring contents are untouched.
    let mut cfg = DesignConfig::default();
    cfg.apply(DesignChange::Shape(Shape::Clouds));
    let sprite = cfg.shape.texture();
    assert_eq!(sprite.width, 64);
    assert_eq!(eng.ring().spawn_times(), times.as_slice());
}
