use crate::config::GameConfig;
use crate::entities::{Bird, Pipe};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrashCause {
    Pipe,
    Ceiling,
    Floor,
}

pub fn hits_any_pipe(bird: &Bird, pipes: &[Pipe]) -> bool {
    pipes.iter().any(|pipe| pipe.collides_with(bird))
}

/// Reaching the top or bottom edge counts as a crash, touching included.
pub fn boundary_violation(bird: &Bird, config: &GameConfig) -> Option<CrashCause> {
    let rect = bird.rect();
    if rect.top() <= 0.0 {
        Some(CrashCause::Ceiling)
    } else if rect.bottom() >= config.screen_height {
        Some(CrashCause::Floor)
    } else {
        None
    }
}
