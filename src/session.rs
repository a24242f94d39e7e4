use rand::Rng;
use log::info;

use crate::collision::{boundary_violation, hits_any_pipe, CrashCause};
use crate::config::GameConfig;
use crate::entities::{Bird, Pipe};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// What happened during one tick, for the loop to log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub pipes_cleared: u32,
    pub crash: Option<CrashCause>,
}

/// Everything that belongs to one play-through.
pub struct Session {
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub phase: GamePhase,
}

impl Session {
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let pipes = (0..config.pipe_count)
            .map(|i| Pipe::spawn(config.screen_width + i as f64 * config.pipe_spacing, config, rng))
            .collect();
        Session {
            bird: Bird::new(config),
            pipes,
            score: 0,
            phase: GamePhase::Playing,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Ignored once the game is over.
    pub fn flap(&mut self) {
        if self.phase == GamePhase::Playing {
            self.bird.flap();
        }
    }

    /// Rebuilds the session in place. Only honoured after a game over;
    /// returns whether a restart happened.
    pub fn restart(&mut self, config: &GameConfig, rng: &mut impl Rng) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        *self = Session::new(config, rng);
        info!("Session restarted.");
        true
    }

    /// Advances the simulation by one tick. Does nothing after a game over.
    pub fn tick(&mut self, config: &GameConfig, rng: &mut impl Rng) -> TickReport {
        let mut report = TickReport::default();
        if self.phase == GamePhase::GameOver {
            return report;
        }

        self.bird.update();
        for pipe in &mut self.pipes {
            pipe.update();
        }
        report.pipes_cleared = self.recycle_pipes(config, rng);

        report.crash = if hits_any_pipe(&self.bird, &self.pipes) {
            Some(CrashCause::Pipe)
        } else {
            boundary_violation(&self.bird, config)
        };
        if report.crash.is_some() {
            self.phase = GamePhase::GameOver;
        }
        report
    }

    // Drops pipes that scrolled off the left edge, then appends one fresh pipe
    // per removal at the right edge. Each removal scores a point.
    fn recycle_pipes(&mut self, config: &GameConfig, rng: &mut impl Rng) -> u32 {
        let before = self.pipes.len();
        self.pipes.retain(|pipe| !pipe.is_off_screen());
        let cleared = before - self.pipes.len();
        for _ in 0..cleared {
            self.pipes.push(Pipe::spawn(config.screen_width, config, rng));
        }
        self.score += cleared as u32;
        cleared as u32
    }
}
