//! Procedural raster rain shown while the `matrix` effect is on.

use std::time::Duration;

use rand::Rng;

use super::Viewport;

/// Width (and row height) of one glyph cell, in pixels
pub const COLUMN_WIDTH: f64 = 16.0;

/// Frame interval (~30 fps)
pub const RAIN_INTERVAL: Duration = Duration::from_millis(33);

/// Opacity of the overwrite that fades previous frames
pub const FADE_ALPHA: f64 = 0.05;

/// Chance per frame that a column past the bottom edge restarts at the top
pub const RESET_PROBABILITY: f64 = 0.025;

pub const GLYPHS: &[char] = &[
    'ア', 'カ', 'サ', 'タ', 'ナ', 'ハ', 'マ', 'ヤ', 'ラ', 'ワ', 'イ', 'キ', 'シ', 'チ', 'ニ',
    'ヒ', 'ミ', 'リ', 'ウ', 'ク', 'ス', 'ツ', 'ヌ', 'フ', 'ム', 'ユ', 'ル', 'エ', 'ケ', 'セ',
    'テ', 'ネ', 'ヘ', 'メ', 'レ', 'オ', 'コ', 'ソ', 'ト', 'ノ', 'ホ', 'モ', 'ヨ', 'ロ', 'ン',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'Z', 'X', 'Y',
];

/// One glyph drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub column: usize,
    pub row: u32,
    pub ch: char,
}

impl Glyph {
    /// Top-left pixel of the glyph cell
    pub fn origin(&self) -> (f64, f64) {
        (
            self.column as f64 * COLUMN_WIDTH,
            f64::from(self.row) * COLUMN_WIDTH,
        )
    }
}

/// Draw list of one frame: a translucent fade followed by one glyph per column
#[derive(Debug, Clone, PartialEq)]
pub struct RainFrame {
    pub fade_alpha: f64,
    pub glyphs: Vec<Glyph>,
}

/// Column counters of the raster rain
#[derive(Debug)]
pub struct MatrixRain {
    viewport: Viewport,
    drops: Vec<u32>,
    frames: u64,
}

impl MatrixRain {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            drops: vec![1; column_count(viewport)],
            frames: 0,
        }
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn drops(&self) -> &[u32] {
        &self.drops
    }

    /// Frames drawn since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Recount columns for a new viewport; surviving columns keep their row
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.drops.resize(column_count(viewport), 1);
    }

    /// Produce the next frame and advance every column
    pub fn step(&mut self, rng: &mut impl Rng) -> RainFrame {
        let bottom = self.viewport.height;
        let glyphs = self
            .drops
            .iter_mut()
            .enumerate()
            .map(|(column, row)| {
                let glyph = Glyph {
                    column,
                    row: *row,
                    ch: GLYPHS[rng.random_range(0..GLYPHS.len())],
                };
                if f64::from(*row) * COLUMN_WIDTH > bottom && rng.random_bool(RESET_PROBABILITY) {
                    *row = 0;
                }
                *row += 1;
                glyph
            })
            .collect();
        self.frames += 1;
        RainFrame {
            fade_alpha: FADE_ALPHA,
            glyphs,
        }
    }
}

/// Columns across the viewport, capped at [`Viewport::MAX_DIMENSION`] pixels
fn column_count(viewport: Viewport) -> usize {
    if !viewport.width.is_finite() {
        return 0;
    }
    (viewport.width.clamp(0.0, Viewport::MAX_DIMENSION) / COLUMN_WIDTH).floor() as usize
}
