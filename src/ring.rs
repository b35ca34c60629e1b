//! Fixed-capacity particle attribute storage.
//!
//! Particles live in a ring of pre-allocated slots that are overwritten
//! cyclically. Nothing is ever allocated or freed per particle: once the
//! ring exists, writing a particle means stamping a position and spawn time
//! over whatever the slot held before. The oldest particle in a slot is
//! silently discarded when the cursor comes back around - that is the
//! bounded-memory policy, not an error.
//!
//! Attribute arrays are kept separate (positions, sizes, spawn times) so
//! each can be uploaded to its own GPU vertex buffer. Writes flag the
//! touched arrays dirty; the renderer drains the flags once per frame.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Spawn-time value marking a slot that has never held a particle.
///
/// The shader treats any negative spawn time as "do not render".
pub const UNUSED_SPAWN_TIME: f32 = -1.0;

/// Ring buffer of particle attributes with a cycling write cursor.
///
/// Per-slot sizes are assigned once at construction from a biased random
/// distribution (`rand^1.5 + 0.5`, range `[0.5, 1.5)`, favoring smaller
/// sizes) and never change afterwards. Cycling a slot reuses its original
/// size, so the size array is uploaded to the GPU exactly once.
pub struct ParticleRing {
    positions: Vec<Vec3>,
    sizes: Vec<f32>,
    spawn_times: Vec<f32>,
    cursor: usize,
    positions_dirty: bool,
    spawn_times_dirty: bool,
}

impl ParticleRing {
    /// Create a ring with `capacity` slots, all marked unused.
    ///
    /// Zero capacity is clamped to one slot so writes stay total.
    pub fn new(capacity: usize) -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_rng(capacity, SmallRng::seed_from_u64(seed))
    }

    /// Create a ring using the given RNG for slot sizes.
    ///
    /// Used by tests to make the size distribution reproducible.
    pub fn with_rng(capacity: usize, mut rng: SmallRng) -> Self {
        let capacity = capacity.max(1);
        let sizes = (0..capacity)
            .map(|_| rng.gen::<f32>().powf(1.5) + 0.5)
            .collect();

        Self {
            positions: vec![Vec3::ZERO; capacity],
            sizes,
            spawn_times: vec![UNUSED_SPAWN_TIME; capacity],
            cursor: 0,
            positions_dirty: false,
            spawn_times_dirty: false,
        }
    }

    /// Number of slots. Constant for the lifetime of the ring.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Index of the slot the next write will occupy.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Write a particle into the slot at the cursor, then advance.
    ///
    /// The slot's pre-assigned size is left untouched. Cannot fail: when the
    /// ring is full the oldest particle in the slot is overwritten.
    pub fn write(&mut self, position: Vec3, spawn_time: f32) {
        self.positions[self.cursor] = position;
        self.spawn_times[self.cursor] = spawn_time;
        self.positions_dirty = true;
        self.spawn_times_dirty = true;

        self.cursor += 1;
        if self.cursor >= self.capacity() {
            self.cursor = 0;
        }
    }

    /// World-space positions, one per slot.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-slot sizes, fixed at construction.
    #[inline]
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Per-slot spawn times; [`UNUSED_SPAWN_TIME`] marks unused slots.
    #[inline]
    pub fn spawn_times(&self) -> &[f32] {
        &self.spawn_times
    }

    /// Take the position-array dirty flag, clearing it.
    pub fn take_positions_dirty(&mut self) -> bool {
        std::mem::take(&mut self.positions_dirty)
    }

    /// Take the spawn-time-array dirty flag, clearing it.
    pub fn take_spawn_times_dirty(&mut self) -> bool {
        std::mem::take(&mut self.spawn_times_dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ring(capacity: usize) -> ParticleRing {
        ParticleRing::with_rng(capacity, SmallRng::seed_from_u64(7))
    }

    #[test]
    fn test_new_ring_is_unused() {
        let ring = test_ring(8);
        assert_eq!(ring.capacity(), 8);
        assert_eq!(ring.cursor(), 0);
        assert!(ring
            .spawn_times()
            .iter()
            .all(|&t| t == UNUSED_SPAWN_TIME));
    }

    #[test]
    fn test_cursor_is_write_count_mod_capacity() {
        let mut ring = test_ring(5);
        for k in 0..17 {
            assert_eq!(ring.cursor(), k % 5);
            ring.write(Vec3::ZERO, k as f32);
        }
        assert_eq!(ring.cursor(), 17 % 5);
    }

    #[test]
    fn test_sizes_biased_and_in_range() {
        let ring = test_ring(190);
        for &s in ring.sizes() {
            assert!((0.5..1.5).contains(&s));
        }
        // rand^1.5 pulls the mean below the range midpoint.
        let mean: f32 = ring.sizes().iter().sum::<f32>() / 190.0;
        assert!(mean < 1.0);
    }

    #[test]
    fn test_slot_size_survives_rewrites() {
        let mut ring = test_ring(4);
        let original: Vec<f32> = ring.sizes().to_vec();
        for k in 0..40 {
            ring.write(Vec3::splat(k as f32), k as f32);
        }
        assert_eq!(ring.sizes(), original.as_slice());
    }

    #[test]
    fn test_wrap_overwrites_oldest() {
        // capacity=4, write A,B,C,D,E: E lands on A's slot, cursor ends at 1.
        let mut ring = test_ring(4);
        for (i, t) in [0.0f32, 1.0, 2.0, 3.0, 4.0].iter().enumerate() {
            ring.write(Vec3::new(i as f32, 0.0, 0.0), *t);
        }
        assert_eq!(ring.spawn_times(), &[4.0, 1.0, 2.0, 3.0]);
        assert_eq!(ring.positions()[0], Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(ring.cursor(), 1);
    }

    #[test]
    fn test_dirty_flags_drain() {
        let mut ring = test_ring(4);
        assert!(!ring.take_positions_dirty());
        assert!(!ring.take_spawn_times_dirty());

        ring.write(Vec3::ONE, 0.5);
        assert!(ring.take_positions_dirty());
        assert!(ring.take_spawn_times_dirty());
        // Draining clears.
        assert!(!ring.take_positions_dirty());
        assert!(!ring.take_spawn_times_dirty());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let ring = test_ring(0);
        assert_eq!(ring.capacity(), 1);
    }
}
