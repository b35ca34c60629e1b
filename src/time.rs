//! Frame clock for the trail effect.
//!
//! One instance is the single source of truth for timing: the elapsed
//! seconds fed to the shader's `time` uniform and the spawn path, and the
//! millisecond delta fed to the spawn accountant. Timing is advisory wall
//! clock, never exact.

use std::time::Instant;

/// Wall-clock tracking, updated once per frame.
#[derive(Debug)]
pub struct Clock {
    /// When the clock started.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Seconds since start, cached at the last update.
    elapsed_secs: f32,
    /// Milliseconds between the last two updates.
    delta_ms: f32,
    /// Frames since start.
    frame_count: u64,
}

impl Clock {
    /// Start a clock at the current instant.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_ms: 0.0,
            frame_count: 0,
        }
    }

    /// Advance one frame. Returns `(elapsed_secs, delta_ms)`.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();
        self.delta_ms = now.duration_since(self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;
        self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
        self.frame_count += 1;
        (self.elapsed_secs, self.delta_ms)
    }

    /// Seconds since start, as of the last update.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Milliseconds between the last two updates.
    #[inline]
    pub fn delta_ms(&self) -> f32 {
        self.delta_ms
    }

    /// Frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_clock_starts_at_zero() {
        let clock = Clock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.delta_ms(), 0.0);
    }

    #[test]
    fn test_update_advances() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = clock.update();

        assert!(elapsed > 0.0);
        assert!(delta >= 10.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_delta_is_per_frame() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(20));
        clock.update();
        thread::sleep(Duration::from_millis(5));
        let (elapsed, delta) = clock.update();
        // Second delta covers only the second sleep, never the whole run.
        assert!(delta >= 5.0);
        assert!(delta < elapsed * 1000.0);
    }
}
