use std::fs;
use std::io;
use std::path::Path;
use log::info;

use crate::config::GameConfig;
use crate::rendering::Viewport;

pub const BIRD_SPRITE_FILE: &str = "bird.txt";
pub const PIPE_SPRITE_FILE: &str = "pipe.txt";
pub const BACKGROUND_SPRITE_FILE: &str = "background.txt";

/// A rectangular block of glyphs. Spaces are transparent.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub width: usize,
    pub height: usize,
    cells: Vec<Vec<char>>,
}

impl Sprite {
    /// Parses plain text into a sprite. Ragged lines are padded with spaces and
    /// trailing blank lines are dropped.
    pub fn parse(name: &str, text: &str) -> io::Result<Self> {
        let mut cells: Vec<Vec<char>> = text.lines().map(|line| line.chars().collect()).collect();
        while cells.last().is_some_and(|row| row.iter().all(|c| *c == ' ')) {
            cells.pop();
        }

        let width = cells.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("sprite '{}' has no visible content", name),
            ));
        }
        for row in &mut cells {
            row.resize(width, ' ');
        }

        Ok(Sprite { width, height: cells.len(), cells })
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            io::Error::new(e.kind(), format!("failed to load sprite {}: {}", path.display(), e))
        })?;
        Sprite::parse(&path.display().to_string(), &text)
    }

    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        self.cells.get(y)?.get(x).copied().filter(|c| *c != ' ')
    }

    /// Nearest-neighbour resize to `cols` x `rows` cells, sampling each
    /// target cell at its centre.
    pub fn scale(&self, cols: usize, rows: usize) -> Sprite {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let cells = (0..rows)
            .map(|y| {
                let src_row = &self.cells[(2 * y + 1) * self.height / (2 * rows)];
                (0..cols).map(|x| src_row[(2 * x + 1) * self.width / (2 * cols)]).collect()
            })
            .collect();
        Sprite { width: cols, height: rows, cells }
    }

    pub fn rotate_180(&self) -> Sprite {
        let cells = self
            .cells
            .iter()
            .rev()
            .map(|row| row.iter().rev().map(|&c| rotated_glyph(c)).collect())
            .collect();
        Sprite { width: self.width, height: self.height, cells }
    }
}

// Glyphs that read differently upside down. '/' and '\' are symmetric under a half turn.
fn rotated_glyph(c: char) -> char {
    match c {
        '^' => 'v',
        'v' => '^',
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        _ => c,
    }
}

/// The raw sprites, loaded once at startup.
pub struct Assets {
    pub bird: Sprite,
    pub pipe: Sprite,
    pub background: Sprite,
}

/// Sprites scaled for one viewport.
pub struct SpriteSet {
    pub bird: Sprite,
    pub pipe_bottom: Sprite,
    pub pipe_top: Sprite,
    pub background: Sprite,
}

impl Assets {
    pub fn load(dir: &Path) -> io::Result<Self> {
        let bird = Sprite::load(&dir.join(BIRD_SPRITE_FILE))?;
        let pipe = Sprite::load(&dir.join(PIPE_SPRITE_FILE))?;
        let background = Sprite::load(&dir.join(BACKGROUND_SPRITE_FILE))?;
        info!(
            "Loaded sprites from {}: bird {}x{}, pipe {}x{}, background {}x{}",
            dir.display(),
            bird.width, bird.height,
            pipe.width, pipe.height,
            background.width, background.height
        );
        Ok(Assets { bird, pipe, background })
    }

    pub fn scaled(&self, viewport: &Viewport, config: &GameConfig) -> SpriteSet {
        let pipe_bottom = self.pipe.scale(
            viewport.cells_wide(config.pipe_width),
            viewport.cells_high(config.pipe_sprite_height),
        );
        let pipe_top = pipe_bottom.rotate_180();
        SpriteSet {
            bird: self.bird.scale(
                viewport.cells_wide(config.bird_width),
                viewport.cells_high(config.bird_height),
            ),
            pipe_bottom,
            pipe_top,
            background: self.background.scale(viewport.cols as usize, viewport.rows as usize),
        }
    }
}
