/// Scene clock. Elapsed time only advances while running, so pausing and
/// resuming never desynchronizes the time-parametrized animation.
pub struct FrameClock {
    /// Seconds of scene time elapsed since mount.
    elapsed: f32,
    /// Largest frame delta accepted in one advance.
    max_dt: f32,
    paused: bool,
    frame: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            elapsed: 0.0,
            max_dt: max_dt.max(0.0),
            paused: false,
            frame: 0,
        }
    }

    /// Advance by a display-refresh delta. Negative or non-finite deltas are
    /// ignored; long gaps are clamped. Returns the new elapsed time.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        if !self.paused && frame_dt.is_finite() && frame_dt > 0.0 {
            self.elapsed += frame_dt.min(self.max_dt);
        }
        self.frame += 1;
        self.elapsed
    }

    /// Seconds of scene time elapsed.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }

    /// Number of advance calls so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_deltas() {
        let mut clock = FrameClock::new(0.25);
        clock.advance(0.1);
        clock.advance(0.1);
        assert!((clock.elapsed_seconds() - 0.2).abs() < 1e-6);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn clamps_long_gaps() {
        let mut clock = FrameClock::new(0.25);
        clock.advance(10.0);
        assert!((clock.elapsed_seconds() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn paused_clock_holds_time() {
        let mut clock = FrameClock::new(0.25);
        clock.advance(0.1);
        clock.pause();
        clock.advance(0.1);
        assert!((clock.elapsed_seconds() - 0.1).abs() < 1e-6);
        clock.resume();
        clock.advance(0.1);
        assert!((clock.elapsed_seconds() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn ignores_bad_deltas() {
        let mut clock = FrameClock::new(0.25);
        clock.advance(-1.0);
        clock.advance(f32::NAN);
        assert_eq!(clock.elapsed_seconds(), 0.0);
    }
}
