//! Fractional spawn-rate accounting.
//!
//! Converts wall-clock time into whole particles to emit, carrying the
//! fractional remainder between ticks so that no time is lost or
//! double-counted when frame timing varies.
//!
//! # Example
//!
//! ```ignore
//! use wisp::spawn::SpawnAccountant;
//!
//! let mut accountant = SpawnAccountant::new(100.0); // one particle per 100 ms
//!
//! // In your frame loop:
//! let emit = accountant.tick(delta_ms, false);
//! for _ in 0..emit {
//!     // spawn a particle
//! }
//! ```

/// Tracks "owed" particles across ticks of uneven length.
///
/// The accumulator holds the fractional particle count that has built up but
/// not yet been emitted. After every [`tick`](SpawnAccountant::tick) the
/// fractional part is back in `[0, 1)`; the integer part consumed is exactly
/// the number returned.
#[derive(Debug, Clone)]
pub struct SpawnAccountant {
    /// Target interval between particles, in milliseconds.
    interval_ms: f32,
    /// Fractional particles owed from previous ticks.
    owed: f32,
}

impl SpawnAccountant {
    /// Create an accountant emitting one particle every `interval_ms`.
    ///
    /// Non-positive intervals are clamped to 1 ms to keep the tick total.
    pub fn new(interval_ms: f32) -> Self {
        Self {
            interval_ms: interval_ms.max(1.0),
            owed: 0.0,
        }
    }

    /// The configured spawn interval in milliseconds.
    #[inline]
    pub fn interval_ms(&self) -> f32 {
        self.interval_ms
    }

    /// Fractional particles currently owed. Always in `[0, 1)` between ticks.
    #[inline]
    pub fn owed(&self) -> f32 {
        self.owed
    }

    /// Account for `delta_ms` of elapsed time and return how many particles
    /// to emit this tick.
    ///
    /// With `reset` set, this tick contributes zero elapsed time: the caller
    /// resynchronized its clock (e.g. pointer activity just resumed) and a
    /// burst covering the idle gap must not happen. The retained fraction is
    /// below one, so a reset tick always returns 0.
    ///
    /// Negative deltas are treated as zero.
    pub fn tick(&mut self, delta_ms: f32, reset: bool) -> u32 {
        let delta_ms = if reset { 0.0 } else { delta_ms.max(0.0) };

        self.owed += delta_ms / self.interval_ms;
        let emit = self.owed.floor();
        self.owed -= emit;
        emit as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_rate() {
        let mut acc = SpawnAccountant::new(100.0);
        // 10 ticks of exactly one interval each.
        let total: u32 = (0..10).map(|_| acc.tick(100.0, false)).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn test_fractional_carry() {
        let mut acc = SpawnAccountant::new(100.0);
        // 60 ms per tick: emits nothing, then catches up.
        assert_eq!(acc.tick(60.0, false), 0);
        assert_eq!(acc.tick(60.0, false), 1);
        assert!(acc.owed() < 1.0);
        assert!(acc.owed() >= 0.0);
    }

    #[test]
    fn test_no_time_lost_over_uneven_ticks() {
        let mut acc = SpawnAccountant::new(100.0);
        let deltas = [16.7, 33.3, 8.0, 250.0, 99.9, 0.1, 142.0, 50.0];
        let mut total = 0u32;
        let mut elapsed = 0.0f32;
        for _ in 0..50 {
            for &d in &deltas {
                total += acc.tick(d, false);
                elapsed += d;
            }
        }
        let expected = elapsed / 100.0;
        assert!((total as f32 - expected).abs() <= 1.0);
    }

    #[test]
    fn test_reset_emits_zero() {
        let mut acc = SpawnAccountant::new(100.0);
        acc.tick(90.0, false);
        // A huge gap with reset set must not burst.
        assert_eq!(acc.tick(10_000.0, true), 0);
        // The owed fraction from before the gap survives.
        assert_eq!(acc.tick(10.0, false), 1);
    }

    #[test]
    fn test_negative_delta_clamps() {
        let mut acc = SpawnAccountant::new(100.0);
        assert_eq!(acc.tick(-500.0, false), 0);
        assert_eq!(acc.owed(), 0.0);
    }

    #[test]
    fn test_large_delta_bursts() {
        let mut acc = SpawnAccountant::new(100.0);
        assert_eq!(acc.tick(1000.0, false), 10);
        assert_eq!(acc.owed(), 0.0);
    }

    #[test]
    fn test_zero_interval_clamped() {
        let acc = SpawnAccountant::new(0.0);
        assert_eq!(acc.interval_ms(), 1.0);
    }
}
