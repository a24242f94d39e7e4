use std::thread;
use std::time::{Duration, Instant};

/// Caps the loop at a fixed tick rate by sleeping out the rest of each frame.
pub struct FrameClock {
    frame_duration: Duration,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(tick_rate: u32) -> Self {
        FrameClock {
            frame_duration: Duration::from_secs(1) / tick_rate.max(1),
            last_tick: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Sleeps until one frame has passed since the previous tick and returns
    /// the time the frame actually took. A frame that already overran is not
    /// made up for later.
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.frame_duration {
            thread::sleep(self.frame_duration - elapsed);
        }
        let now = Instant::now();
        let frame_time = now - self.last_tick;
        self.last_tick = now;
        frame_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration_for_sixty_hz() {
        let clock = FrameClock::new(60);
        assert_eq!(clock.frame_duration(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn test_tick_waits_out_the_frame() {
        let mut clock = FrameClock::new(100);
        let start = Instant::now();
        for _ in 0..3 {
            assert!(clock.tick() >= Duration::from_millis(10));
        }
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_overrun_frame_does_not_sleep() {
        let mut clock = FrameClock::new(1000);
        thread::sleep(Duration::from_millis(5));
        let start = Instant::now();
        clock.tick();
        assert!(start.elapsed() < Duration::from_millis(5));
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        let clock = FrameClock::new(0);
        assert_eq!(clock.frame_duration(), Duration::from_secs(1));
    }
}
