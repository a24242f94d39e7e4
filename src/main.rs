mod clock;
mod collision;
mod config;
mod constants;
mod entities;
mod game;
mod rendering;
mod session;
mod sprites;
mod terminal_io;
mod types;

use std::env;
use std::io;
use std::path::Path;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, size, Clear, ClearType},
};
use log::{error, info};

use config::GameConfig;
use constants::*;
use game::Game;
use rendering::{GameGrid, OutputTarget, ScreenBuffer};
use sprites::Assets;
use terminal_io::{InputSource, SimulatedInput};

#[derive(Debug, PartialEq)]
struct LaunchOptions {
    debug_mode_active: bool,
    debug_width: u16,
    debug_height: u16,
    max_frames: Option<u64>,
}

// vibe-flappy [MAX_FRAMES]
// vibe-flappy --debug [WIDTH HEIGHT [MAX_FRAMES]]
fn parse_args(args: &[String]) -> LaunchOptions {
    let debug_mode_active = args.get(1).is_some_and(|arg| arg == "--debug");
    if !debug_mode_active {
        return LaunchOptions {
            debug_mode_active,
            debug_width: DEBUG_DEFAULT_WIDTH,
            debug_height: DEBUG_DEFAULT_HEIGHT,
            max_frames: args.get(1).and_then(|arg| arg.parse::<u64>().ok()),
        };
    }

    let mut debug_width = DEBUG_DEFAULT_WIDTH;
    let mut debug_height = DEBUG_DEFAULT_HEIGHT;
    if args.len() >= 4 {
        debug_width = args[2].parse::<u16>().unwrap_or(DEBUG_DEFAULT_WIDTH);
        debug_height = args[3].parse::<u16>().unwrap_or(DEBUG_DEFAULT_HEIGHT);
    }
    let max_frames = args
        .get(4)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(DEBUG_DEFAULT_MAX_FRAMES);

    LaunchOptions { debug_mode_active, debug_width, debug_height, max_frames: Some(max_frames) }
}

fn run_debug(config: &GameConfig, assets: &Assets, options: &LaunchOptions) -> io::Result<u32> {
    info!("Debug mode enabled. Resolution {}x{}", options.debug_width, options.debug_height);
    let stdout_target = OutputTarget::ScreenBuffer(ScreenBuffer::new(options.debug_width, options.debug_height));
    let max_frames = options.max_frames.unwrap_or(DEBUG_DEFAULT_MAX_FRAMES);
    let input = InputSource::Simulated(SimulatedInput::scripted(max_frames));
    // The script quits on its own at max_frames
    let mut game = Game::new(config, assets, options.debug_width, options.debug_height, stdout_target, input, true, None);
    game.run()
}

fn run_in_terminal(config: &GameConfig, assets: &Assets, max_frames: Option<u64>) -> io::Result<u32> {
    let (terminal_width, terminal_height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", terminal_width, terminal_height);

    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    GameGrid::clear_screen_manual(&mut stdout_target, terminal_width, terminal_height)
        .map_err(|e| { error!("Failed to clear screen manually: {}", e); e })?;
    stdout_target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;

    let mut game = Game::new(config, assets, terminal_width, terminal_height, stdout_target, InputSource::Terminal, false, max_frames);
    game.run()
}

fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0), Show)
        .map_err(|e| { error!("Failed to restore screen on exit: {}", e); e })?;
    disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode on exit: {}", e); e })
}

fn main() -> io::Result<()> {
    simple_logging::log_to_file(LOG_FILE, log::LevelFilter::Info)?;
    info!("Starting vibe-flappy.");

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);

    let config = GameConfig::default();
    config.validate().map_err(|e| { error!("Invalid configuration: {}", e); e })?;
    let assets = Assets::load(Path::new(ASSET_DIR)).map_err(|e| { error!("Failed to load assets: {}", e); e })?;

    let score = if options.debug_mode_active {
        run_debug(&config, &assets, &options)?
    } else {
        info!("Attempting to enable raw mode.");
        enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
        // Always hand the terminal back, even when the game loop failed
        let result = run_in_terminal(&config, &assets, options.max_frames);
        restore_terminal()?;
        result?
    };

    info!("Exiting with final score {}.", score);
    Ok(())
}
