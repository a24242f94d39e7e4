// --- Game Constants ---
pub const SCREEN_WIDTH: f64 = 400.0; // World pixels
pub const SCREEN_HEIGHT: f64 = 600.0;
pub const TICK_RATE: u32 = 60; // Ticks per second

pub const GRAVITY: f64 = 0.25; // Added to velocity every tick
pub const FLAP_STRENGTH: f64 = -6.0;

pub const BIRD_X: f64 = 50.0; // Horizontal centre of the bird, never changes
pub const BIRD_WIDTH: f64 = 50.0;
pub const BIRD_HEIGHT: f64 = 35.0;

pub const PIPE_WIDTH: f64 = 70.0;
pub const PIPE_GAP: f64 = 2.0 * BIRD_HEIGHT; // Gap is two bird heights tall
pub const PIPE_SPEED: f64 = 4.0; // Pixels per tick, pipes scroll left
pub const PIPE_MARGIN: f64 = 50.0; // Minimum segment height above and below the gap
pub const PIPE_SPRITE_HEIGHT: f64 = SCREEN_HEIGHT - PIPE_GAP - PIPE_MARGIN; // Tallest segment a gap can produce
pub const PIPE_COUNT: usize = 2;
pub const PIPE_SPACING: f64 = SCREEN_WIDTH / 2.0;

pub const TERMINAL_ASPECT_RATIO_COMPENSATION: f64 = 2.0; // Adjust this based on terminal character aspect ratio (height/width)

pub const ASSET_DIR: &str = "assets";
pub const LOG_FILE: &str = "vibe-flappy.log";

pub const DEBUG_DEFAULT_WIDTH: u16 = 80;
pub const DEBUG_DEFAULT_HEIGHT: u16 = 24;
pub const DEBUG_DEFAULT_MAX_FRAMES: u64 = 300;
pub const DEBUG_FLAP_INTERVAL: u64 = 48; // Frames between scripted flaps
pub const DEBUG_RESTART_INTERVAL: u64 = 120; // Frames between scripted restart presses
