use crate::config::GameConfig;
use crate::rendering::{GameGrid, Viewport};
use crate::sprites::SpriteSet;
use crate::types::Rect;
use rand::Rng;
use log::debug;

// --- Bird: vertical kinematics only, x never changes ---
#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    pub x: f64, // Centre of the bounding box
    pub y: f64,
    pub velocity: f64, // Pixels per tick, negative is up
    pub width: f64,
    pub height: f64,
    gravity: f64,
    flap_impulse: f64,
}

impl Bird {
    pub fn new(config: &GameConfig) -> Self {
        Bird {
            x: config.bird_x,
            y: config.screen_height / 2.0,
            velocity: 0.0,
            width: config.bird_width,
            height: config.bird_height,
            gravity: config.gravity,
            flap_impulse: config.flap_impulse,
        }
    }

    /// Overwrites the velocity with the flap impulse. Repeated flaps do not stack.
    pub fn flap(&mut self) {
        self.velocity = self.flap_impulse;
        debug!("Flap at y = {}", self.y);
    }

    pub fn update(&mut self) {
        self.velocity += self.gravity;
        self.y += self.velocity;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.x, self.y, self.width, self.height)
    }

    pub fn draw(&self, game_grid: &mut GameGrid, viewport: &Viewport, sprites: &SpriteSet) {
        let rect = self.rect();
        game_grid.blit(&sprites.bird, viewport.col_for(rect.left()), viewport.row_for(rect.top()));
    }
}

// --- Pipe: a top and a bottom segment around one gap ---
#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    pub x: f64, // Left edge
    pub gap_top: f64,
    pub gap_size: f64,
    pub width: f64,
    speed: f64,
    floor: f64,
}

impl Pipe {
    /// Spawns a pipe at `x` with its gap drawn uniformly from the configured range.
    pub fn spawn(x: f64, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let gap_top = rng.gen_range(config.gap_top_range());
        Pipe::with_gap(x, gap_top, config)
    }

    pub fn with_gap(x: f64, gap_top: f64, config: &GameConfig) -> Self {
        Pipe {
            x,
            gap_top,
            gap_size: config.pipe_gap,
            width: config.pipe_width,
            speed: config.pipe_speed,
            floor: config.screen_height,
        }
    }

    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    /// True once the right edge has moved past the left edge of the screen.
    pub fn is_off_screen(&self) -> bool {
        self.x < -self.width
    }

    pub fn gap_bottom(&self) -> f64 {
        self.gap_top + self.gap_size
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_top)
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(self.x, self.gap_bottom(), self.width, self.floor - self.gap_bottom())
    }

    pub fn collides_with(&self, bird: &Bird) -> bool {
        let bird_rect = bird.rect();
        self.top_rect().intersects(&bird_rect) || self.bottom_rect().intersects(&bird_rect)
    }

    pub fn draw(&self, game_grid: &mut GameGrid, viewport: &Viewport, sprites: &SpriteSet) {
        let col = viewport.col_for(self.x);
        // The rotated sprite hangs from above so that its bottom edge sits on the gap.
        let top_row = viewport.row_for(self.gap_top) - sprites.pipe_top.height as i32;
        game_grid.blit(&sprites.pipe_top, col, top_row);
        game_grid.blit(&sprites.pipe_bottom, col, viewport.row_for(self.gap_bottom()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bird_starts_centred_and_still() {
        let bird = Bird::new(&GameConfig::default());
        assert_eq!(bird.x, 50.0);
        assert_eq!(bird.y, 300.0);
        assert_eq!(bird.velocity, 0.0);
    }

    #[test]
    fn test_update_applies_velocity_then_position() {
        let mut bird = Bird::new(&GameConfig::default());
        bird.update();
        assert_eq!(bird.velocity, 0.25);
        assert_eq!(bird.y, 300.25);
        bird.update();
        assert_eq!(bird.velocity, 0.5);
        assert_eq!(bird.y, 300.75);
    }

    #[test]
    fn test_flap_overwrites_velocity() {
        let mut bird = Bird::new(&GameConfig::default());
        for _ in 0..30 {
            bird.update();
        }
        assert!(bird.velocity > 0.0);
        bird.flap();
        assert_eq!(bird.velocity, -6.0);
        bird.flap();
        assert_eq!(bird.velocity, -6.0);
    }

    #[test]
    fn test_bird_x_never_changes() {
        let mut bird = Bird::new(&GameConfig::default());
        for i in 0..100 {
            if i % 10 == 0 {
                bird.flap();
            }
            bird.update();
            assert_eq!(bird.x, 50.0);
        }
    }

    #[test]
    fn test_spawned_segments_stay_on_screen_and_apart() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let pipe = Pipe::spawn(config.screen_width, &config, &mut rng);
            let top = pipe.top_rect();
            let bottom = pipe.bottom_rect();
            assert!(top.top() >= 0.0);
            assert!(top.height >= config.pipe_margin);
            assert!(bottom.height >= config.pipe_margin);
            assert!(bottom.bottom() <= config.screen_height);
            assert!(top.bottom() < bottom.top());
            assert!((bottom.top() - top.bottom() - config.pipe_gap).abs() < 1e-9);
        }
    }

    #[test]
    fn test_pipe_scrolls_left_at_constant_speed() {
        let config = GameConfig::default();
        let mut pipe = Pipe::with_gap(400.0, 200.0, &config);
        pipe.update();
        assert_eq!(pipe.x, 396.0);
        assert_eq!(pipe.top_rect().x, 396.0);
        assert_eq!(pipe.bottom_rect().x, 396.0);
    }

    #[test]
    fn test_off_screen_after_exactly_118_ticks() {
        let config = GameConfig::default();
        let mut pipe = Pipe::with_gap(400.0, 200.0, &config);
        for _ in 0..117 {
            pipe.update();
            assert!(!pipe.is_off_screen());
        }
        assert_eq!(pipe.x, -68.0);
        pipe.update();
        assert_eq!(pipe.x, -72.0);
        assert!(pipe.is_off_screen());
    }

    #[test]
    fn test_right_edge_at_zero_is_still_on_screen() {
        let config = GameConfig::default();
        assert!(!Pipe::with_gap(-70.0, 200.0, &config).is_off_screen());
        assert!(Pipe::with_gap(-70.5, 200.0, &config).is_off_screen());
    }

    #[test]
    fn test_bird_in_gap_does_not_collide() {
        let config = GameConfig::default();
        let bird = Bird::new(&config); // 282.5..317.5
        let pipe = Pipe::with_gap(30.0, 265.0, &config); // gap 265..335
        assert!(!pipe.collides_with(&bird));
    }

    #[test]
    fn test_bird_hits_top_segment() {
        let config = GameConfig::default();
        let bird = Bird::new(&config);
        let pipe = Pipe::with_gap(30.0, 290.0, &config);
        assert!(pipe.collides_with(&bird));
    }

    #[test]
    fn test_bird_hits_bottom_segment() {
        let config = GameConfig::default();
        let bird = Bird::new(&config);
        let pipe = Pipe::with_gap(30.0, 200.0, &config); // bottom segment from 270
        assert!(pipe.collides_with(&bird));
    }

    #[test]
    fn test_bird_touching_segment_edge_does_not_collide() {
        let config = GameConfig::default();
        let bird = Bird::new(&config);
        // Top segment ends exactly at the bird's top edge
        let pipe = Pipe::with_gap(30.0, 282.5, &config);
        assert!(!pipe.collides_with(&bird));
        // Pipe's left edge exactly at the bird's right edge
        let pipe = Pipe::with_gap(75.0, 0.0, &config);
        assert!(!pipe.collides_with(&bird));
    }

    #[test]
    fn test_pipe_beside_bird_does_not_collide() {
        let config = GameConfig::default();
        let bird = Bird::new(&config);
        let pipe = Pipe::with_gap(200.0, 50.0, &config);
        assert!(!pipe.collides_with(&bird));
    }
}
