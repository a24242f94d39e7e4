use std::io;
use std::ops::RangeInclusive;

use crate::constants::*;

/// Immutable tuning values for one run of the game.
///
/// Built once at startup and handed to every component by reference.
/// All distances are world pixels, all speeds are pixels per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub screen_width: f64,
    pub screen_height: f64,
    pub tick_rate: u32,
    pub gravity: f64,
    pub flap_impulse: f64,
    pub bird_x: f64,
    pub bird_width: f64,
    pub bird_height: f64,
    pub pipe_width: f64,
    pub pipe_gap: f64,
    pub pipe_speed: f64,
    pub pipe_margin: f64,
    pub pipe_sprite_height: f64,
    pub pipe_count: usize,
    pub pipe_spacing: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,
            gravity: GRAVITY,
            flap_impulse: FLAP_STRENGTH,
            bird_x: BIRD_X,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_speed: PIPE_SPEED,
            pipe_margin: PIPE_MARGIN,
            pipe_sprite_height: PIPE_SPRITE_HEIGHT,
            pipe_count: PIPE_COUNT,
            pipe_spacing: PIPE_SPACING,
        }
    }
}

impl GameConfig {
    /// Inclusive range the top of a pipe gap is drawn from.
    pub fn gap_top_range(&self) -> RangeInclusive<f64> {
        self.pipe_margin..=(self.screen_height - self.pipe_gap - self.pipe_margin)
    }

    pub fn validate(&self) -> io::Result<()> {
        let range = self.gap_top_range();
        if range.start() > range.end() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "pipe gap {} with margin {} does not fit a screen {} high",
                    self.pipe_gap, self.pipe_margin, self.screen_height
                ),
            ));
        }
        if self.tick_rate == 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "tick rate must be positive"));
        }
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "screen size must be positive"));
        }
        Ok(())
    }
}
