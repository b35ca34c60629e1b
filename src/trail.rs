//! Trail emission: parametric spawn path and gap-free interpolation.
//!
//! The engine combines the spawn accountant and the particle ring into one
//! `tick` entry point. Pointer activity only gates whether a tick happens;
//! the spawn position itself comes from a time-parameterized curve, so the
//! trail keeps its figure regardless of where the cursor sits.
//!
//! When a tick owes more than one particle (a slow frame, or a fast spawn
//! rate), intermediate positions are backfilled by linear interpolation
//! between the previous tick's spawn point and the current one. Without the
//! backfill a slow frame would leave visible gaps of discrete dots.

use glam::Vec3;

use crate::ring::ParticleRing;
use crate::spawn::SpawnAccountant;

/// Angular speed of the spawn path, radians per second.
const PATH_SPEED: f32 = 0.5;
/// World-space scale of the spawn path.
const PATH_SCALE: f32 = 7.0;
/// Spawn-time offset spread across particles emitted in one tick.
///
/// Keeps timestamps strictly increasing and distinct so age-driven shader
/// effects never collapse same-tick particles into identical states.
const SPAWN_TIME_EPSILON: f32 = 0.001;

/// Position on the spawn path at `t` seconds.
///
/// A Lissajous-like figure in the z=0 plane: `x = cos(t·s)/2`,
/// `y = sin(t·s)·cos(t·s)/2`, both scaled by [`PATH_SCALE`].
pub fn path_position(t: f32) -> Vec3 {
    let a = t * PATH_SPEED;
    Vec3::new(a.cos() / 2.0, a.sin() * a.cos() / 2.0, 0.0) * PATH_SCALE
}

/// Per-tick particle emission into a [`ParticleRing`].
///
/// Owns the accountant, the ring, and the previous-spawn anchor. Driven by a
/// host-provided frame clock through [`tick`](TrailEngine::tick); holds no
/// reference to any scheduling or rendering primitive.
pub struct TrailEngine {
    accountant: SpawnAccountant,
    ring: ParticleRing,
    /// Anchor for interpolation; `None` before the first emission.
    prev_position: Option<Vec3>,
}

impl TrailEngine {
    /// Create an engine with the given ring capacity and spawn interval.
    pub fn new(capacity: usize, spawn_interval_ms: f32) -> Self {
        Self {
            accountant: SpawnAccountant::new(spawn_interval_ms),
            ring: ParticleRing::new(capacity),
            prev_position: None,
        }
    }

    /// Swap in a pre-built ring (tests use this for deterministic sizes).
    pub fn with_ring(ring: ParticleRing, spawn_interval_ms: f32) -> Self {
        Self {
            accountant: SpawnAccountant::new(spawn_interval_ms),
            ring,
            prev_position: None,
        }
    }

    /// The particle ring backing this engine.
    #[inline]
    pub fn ring(&self) -> &ParticleRing {
        &self.ring
    }

    /// Mutable access for the attribute uploader.
    #[inline]
    pub fn ring_mut(&mut self) -> &mut ParticleRing {
        &mut self.ring
    }

    /// Last emitted spawn position, if any tick has emitted yet.
    #[inline]
    pub fn prev_position(&self) -> Option<Vec3> {
        self.prev_position
    }

    /// Advance one tick: account `delta_ms`, emit the owed particles along
    /// the path, and return how many were written.
    ///
    /// `now` is seconds since system start (the same clock the shader's
    /// `time` uniform uses). `reset` resynchronizes the accountant after an
    /// idle gap; such a tick never emits.
    ///
    /// Emitted positions interpolate from the previous anchor to the current
    /// path position at ratios `(i+1)/n`; the first emission ever has no
    /// anchor and places all particles at the current position. Spawn times
    /// are `now + ratio * epsilon`, strictly increasing within the tick.
    pub fn tick(&mut self, now: f32, delta_ms: f32, reset: bool) -> u32 {
        let emit = self.accountant.tick(delta_ms, reset);
        if emit == 0 {
            return 0;
        }

        let current = path_position(now);
        for i in 0..emit {
            let ratio = (i + 1) as f32 / emit as f32;
            let position = match self.prev_position {
                Some(prev) => prev.lerp(current, ratio),
                None => current,
            };
            self.ring.write(position, now + ratio * SPAWN_TIME_EPSILON);
        }

        // Anchor for the next tick's interpolation.
        self.prev_position = Some(current);
        emit
    }
}
