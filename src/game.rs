use std::io::{self, Write};
use rand::Rng;
use log::{error, info};

use crate::clock::FrameClock;
use crate::config::GameConfig;
use crate::rendering::{GameGrid, OutputTarget, Viewport};
use crate::session::Session;
use crate::sprites::{Assets, SpriteSet};
use crate::terminal_io::{InputEvent, InputSource};

pub const CONTROLS_HINT: &str = "Space:Flap R:Restart Q:Quit";

pub struct Game<'a> {
    config: &'a GameConfig,
    assets: &'a Assets,
    pub stdout_target: OutputTarget,
    input: InputSource,
    viewport: Viewport,
    sprites: SpriteSet,
    game_grid: GameGrid,
    debug_mode_active: bool,
    max_frames: Option<u64>,
}

impl<'a> Game<'a> {
    pub fn new(
        config: &'a GameConfig,
        assets: &'a Assets,
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        input: InputSource,
        debug_mode_active: bool,
        max_frames: Option<u64>,
    ) -> Self {
        let viewport = Viewport::fit(terminal_width, terminal_height, config);
        Game {
            config,
            assets,
            stdout_target,
            input,
            viewport,
            sprites: assets.scaled(&viewport, config),
            game_grid: GameGrid::new(viewport.cols, viewport.rows),
            debug_mode_active,
            max_frames,
        }
    }

    /// Runs until quit input or the frame cap. Returns the score of the last session.
    pub fn run(&mut self) -> io::Result<u32> {
        let mut rng = rand::thread_rng();
        let mut session = Session::new(self.config, &mut rng);
        let mut clock = FrameClock::new(self.config.tick_rate);
        info!(
            "Session started. Viewport {}x{} cells at ({}, {}), frame budget {:?}.",
            self.viewport.cols,
            self.viewport.rows,
            self.viewport.x_offset,
            self.viewport.y_offset,
            clock.frame_duration()
        );

        let mut running = true;
        let mut frame_count: u64 = 0;

        while running && self.max_frames.is_none_or(|max| frame_count < max) {
            self.handle_input(&mut session, &mut running, frame_count, &mut rng)?;
            if !running {
                break;
            }

            let report = session.tick(self.config, &mut rng);
            if report.pipes_cleared > 0 {
                info!("Cleared {} pipe(s). Score: {}", report.pipes_cleared, session.score);
            }
            if let Some(cause) = report.crash {
                info!("Crashed ({:?}). Game over with score {}.", cause, session.score);
            }

            self.render(&session)?;
            clock.tick();
            frame_count += 1;
        }

        info!("Game loop ended after {} frames.", frame_count);
        Ok(session.score)
    }

    fn handle_input(
        &mut self,
        session: &mut Session,
        running: &mut bool,
        frame_count: u64,
        rng: &mut impl Rng,
    ) -> io::Result<()> {
        for event in self.input.poll_events(frame_count)? {
            match event {
                InputEvent::Quit => {
                    info!("Quit requested. Exiting game loop.");
                    *running = false;
                    return Ok(());
                }
                InputEvent::Flap => session.flap(),
                InputEvent::Restart => {
                    if session.restart(self.config, rng) {
                        info!("Restarted on frame {}.", frame_count);
                    }
                }
                InputEvent::Resize(width, height) => self.resize(width, height)?,
            }
        }
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.viewport = Viewport::fit(width, height, self.config);
        self.sprites = self.assets.scaled(&self.viewport, self.config);
        self.game_grid = GameGrid::new(self.viewport.cols, self.viewport.rows);
        info!("Terminal resized to {}x{}", width, height);
        GameGrid::clear_screen_manual(&mut self.stdout_target, width, height)
            .map_err(|e| { error!("Failed to clear screen after resize: {}", e); e })
    }

    fn render(&mut self, session: &Session) -> io::Result<()> {
        let viewport = self.viewport;
        let grid = &mut self.game_grid;
        grid.clear();
        grid.blit(&self.sprites.background, 0, 0);
        for pipe in &session.pipes {
            pipe.draw(grid, &viewport, &self.sprites);
        }
        session.bird.draw(grid, &viewport, &self.sprites);

        if session.is_game_over() {
            let half = self.config.screen_height / 2.0;
            grid.put_str_centered(viewport.row_for(self.config.screen_height / 3.0), "Game Over!");
            grid.put_str_centered(viewport.row_for(half), &format!("Your Score: {}", session.score));
            grid.put_str_centered(viewport.row_for(half + 50.0), "Press R to Restart");
        } else {
            grid.put_str(viewport.col_for(10.0), viewport.row_for(10.0), &format!("Score: {}", session.score));
        }
        grid.put_str_centered(viewport.rows as i32 - 1, CONTROLS_HINT);

        grid.render(&mut self.stdout_target, viewport.x_offset, viewport.y_offset)
            .map_err(|e| { error!("Failed to render game grid: {}", e); e })?;
        self.stdout_target.flush().map_err(|e| { error!("Failed to flush stdout after rendering: {}", e); e })?;

        if self.debug_mode_active {
            if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
                sb.print_to_log();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use crossterm::event::{Event, KeyCode};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::rendering::ScreenBuffer;
    use crate::session::GamePhase;
    use crate::sprites::tests::test_assets;
    use crate::terminal_io::SimulatedInput;

    fn screen_rows(game: &Game) -> Vec<String> {
        match &game.stdout_target {
            OutputTarget::ScreenBuffer(sb) => (0..sb.height).map(|y| sb.row_text(y)).collect(),
            OutputTarget::Stdout(_) => unreachable!(),
        }
    }

    fn headless<'a>(config: &'a GameConfig, assets: &'a Assets, events: HashMap<u64, Vec<Event>>) -> Game<'a> {
        Game::new(
            config,
            assets,
            80,
            24,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(80, 24)),
            InputSource::Simulated(SimulatedInput::new(events)),
            false,
            None,
        )
    }

    #[test]
    fn test_run_until_scripted_quit() {
        let config = GameConfig::default();
        let assets = test_assets();
        let mut events = HashMap::new();
        events.insert(1, vec![Event::Key(KeyCode::Char(' ').into())]);
        events.insert(5, vec![Event::Key(KeyCode::Char('q').into())]);
        let mut game = headless(&config, &assets, events);

        let score = game.run().unwrap();
        assert_eq!(score, 0);
        let rows = screen_rows(&game);
        assert!(rows.iter().any(|row| row.contains("Score: 0")));
        assert!(rows[23].contains(CONTROLS_HINT));
    }

    #[test]
    fn test_frame_cap_stops_loop() {
        let config = GameConfig::default();
        let assets = test_assets();
        let mut game = headless(&config, &assets, HashMap::new());
        game.max_frames = Some(3);
        assert_eq!(game.run().unwrap(), 0);
    }

    #[test]
    fn test_game_over_overlay() {
        let config = GameConfig::default();
        let assets = test_assets();
        let mut game = headless(&config, &assets, HashMap::new());
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = Session::new(&config, &mut rng);
        session.score = 3;
        session.phase = GamePhase::GameOver;

        game.render(&session).unwrap();
        let rows = screen_rows(&game);
        assert!(rows[8].contains("Game Over!"));
        assert!(rows[12].contains("Your Score: 3"));
        assert!(rows[14].contains("Press R to Restart"));
        assert!(!rows.iter().any(|row| row.contains("Score: 3") && !row.contains("Your")));
    }

    #[test]
    fn test_bird_and_pipes_are_drawn() {
        let config = GameConfig::default();
        let assets = test_assets();
        let mut game = headless(&config, &assets, HashMap::new());
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = Session::new(&config, &mut rng);
        session.pipes[0] = crate::entities::Pipe::with_gap(200.0, 250.0, &config);

        game.render(&session).unwrap();
        let rows = screen_rows(&game);
        // Bird box starts at world (25, 282.5): column 2, row 11 of the viewport
        let bird_row: Vec<char> = rows[11].chars().collect();
        assert_eq!(bird_row[24 + 2], '(');
        // Pipe at x=200 starts at viewport column 16; bottom segment from y=320 (row 12)
        let pipe_row: Vec<char> = rows[12].chars().collect();
        assert_eq!(pipe_row[24 + 16], '[');
        // Rotated cap sits directly above the gap at y=250 (row 10)
        let top_row: Vec<char> = rows[9].chars().collect();
        assert_eq!(top_row[24 + 16], '[');
        assert_eq!(rows[10].chars().nth(24 + 16), Some(' '));
    }

    #[test]
    fn test_resize_refits_viewport() {
        let config = GameConfig::default();
        let assets = test_assets();
        let mut game = headless(&config, &assets, HashMap::new());
        game.resize(40, 60).unwrap();
        assert_eq!(game.viewport, Viewport::fit(40, 60, &config));
        assert_eq!(game.game_grid.width, game.viewport.cols);
        assert_eq!(game.sprites.background.width, game.viewport.cols as usize);
    }

    #[test]
    fn test_restart_input_after_crash() {
        let config = GameConfig::default();
        let assets = test_assets();
        let mut events = HashMap::new();
        events.insert(0, vec![Event::Key(KeyCode::Char('r').into())]);
        let mut game = headless(&config, &assets, events);
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = Session::new(&config, &mut rng);
        session.score = 5;
        session.phase = GamePhase::GameOver;
        let mut running = true;

        game.handle_input(&mut session, &mut running, 0, &mut rng).unwrap();
        assert!(running);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.score, 0);
    }
}
