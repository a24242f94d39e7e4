use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::config::GameConfig;
use crate::constants::TERMINAL_ASPECT_RATIO_COMPENSATION;
use crate::sprites::Sprite;

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if self.cursor_y < self.height && self.cursor_x < self.width {
            self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row_text(&self, y: u16) -> String {
        self.buffer
            .get(y as usize)
            .map(|row| row.iter().collect())
            .unwrap_or_default()
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for y in 0..self.height {
            info!("{}", self.row_text(y));
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Ignore in debug mode
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

// --- Viewport maps world pixels onto terminal cells ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub x_offset: u16,
    pub y_offset: u16,
    world_width: f64,
    world_height: f64,
}

impl Viewport {
    /// Largest grid that keeps the world's aspect ratio, centred in the terminal.
    pub fn fit(terminal_width: u16, terminal_height: u16, config: &GameConfig) -> Self {
        let mut rows = terminal_height as f64;
        let mut cols = (rows * TERMINAL_ASPECT_RATIO_COMPENSATION * config.screen_width / config.screen_height).floor();
        if cols > terminal_width as f64 {
            cols = terminal_width as f64;
            rows = (cols * config.screen_height / (TERMINAL_ASPECT_RATIO_COMPENSATION * config.screen_width)).floor();
        }
        let cols = (cols as u16).max(1);
        let rows = (rows as u16).max(1);

        Viewport {
            cols,
            rows,
            x_offset: terminal_width.saturating_sub(cols) / 2,
            y_offset: terminal_height.saturating_sub(rows) / 2,
            world_width: config.screen_width,
            world_height: config.screen_height,
        }
    }

    pub fn col_for(&self, x: f64) -> i32 {
        (x * self.cols as f64 / self.world_width).floor() as i32
    }

    pub fn row_for(&self, y: f64) -> i32 {
        (y * self.rows as f64 / self.world_height).floor() as i32
    }

    pub fn cells_wide(&self, width: f64) -> usize {
        ((width * self.cols as f64 / self.world_width).round() as usize).max(1)
    }

    pub fn cells_high(&self, height: f64) -> usize {
        ((height * self.rows as f64 / self.world_height).round() as usize).max(1)
    }
}

// --- GameGrid for composing one frame ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: i32, y: i32, c: char) {
        if x >= 0 && y >= 0 && (y as u16) < self.height && (x as u16) < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn clear(&mut self) {
        self.grid = vec![vec![' '; self.width as usize]; self.height as usize];
    }

    /// Draws the opaque cells of `sprite` with its top-left corner at (`x`, `y`),
    /// clipping whatever falls outside the grid.
    pub fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) {
        for sy in 0..sprite.height {
            for sx in 0..sprite.width {
                if let Some(c) = sprite.glyph(sx, sy) {
                    self.set_char(x + sx as i32, y + sy as i32, c);
                }
            }
        }
    }

    pub fn put_str(&mut self, x: i32, y: i32, s: &str) {
        for (i, c) in s.chars().enumerate() {
            self.set_char(x + i as i32, y, c);
        }
    }

    pub fn put_str_centered(&mut self, y: i32, s: &str) {
        let x = (self.width as i32 - s.chars().count() as i32) / 2;
        self.put_str(x.max(0), y, s);
    }

    pub fn row_text(&self, y: u16) -> String {
        self.grid
            .get(y as usize)
            .map(|row| row.iter().collect())
            .unwrap_or_default()
    }

    pub fn render(&self, stdout: &mut OutputTarget, x_offset: u16, y_offset: u16) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(x_offset, y_offset + y))?;
            write!(stdout, "{}", self.row_text(y))?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(stdout: &mut OutputTarget, terminal_width: u16, terminal_height: u16) -> io::Result<()> {
        for y in 0..terminal_height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(terminal_width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}
