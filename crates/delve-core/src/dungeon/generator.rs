//! Level generator seam
//!
//! The raw floor/wall layout of each level comes from a pluggable generator.
//! A generator reports every cell through a callback with a classification
//! value: [`OPEN`] becomes floor, anything else becomes wall.

use log::warn;

use crate::rng::GameRng;

use super::grid::LevelGrid;
use super::tile::Tile;

/// Classification value for an open cell
pub const OPEN: u8 = 0;

/// Classification value for a blocked cell
pub const BLOCKED: u8 = 1;

/// Produces the raw open/blocked layout of one level
pub trait LevelGenerator {
    /// Classify every cell of a `width` x `height` level by calling `visit(x, y, class)`
    fn generate(
        &mut self,
        width: usize,
        height: usize,
        rng: &mut GameRng,
        visit: &mut dyn FnMut(usize, usize, u8),
    );
}

/// Run a generator and record its output as a level of floor and wall
///
/// Cells the generator never visits stay wall. Visits outside the level are
/// ignored.
pub fn generate_level(
    generator: &mut dyn LevelGenerator,
    width: usize,
    height: usize,
    rng: &mut GameRng,
) -> LevelGrid {
    let mut level = LevelGrid::new(width, height, Tile::Wall);
    let mut stray = 0usize;

    generator.generate(width, height, rng, &mut |x, y, class| {
        if x >= width || y >= height {
            stray += 1;
            return;
        }
        let tile = if class == OPEN { Tile::Floor } else { Tile::Wall };
        level.set(x, y, tile);
    });

    if stray > 0 {
        warn!("level generator visited {stray} cells outside {width}x{height}");
    }

    level
}

/// Replays fixed ASCII layouts, one per level
///
/// `.` is open and every other character is blocked. Layouts are used in
/// order and the last one repeats once the list runs out. Rows shorter than
/// the level are padded with wall.
#[derive(Debug, Clone, Default)]
pub struct LayoutGenerator {
    layouts: Vec<Vec<String>>,
    next: usize,
}

impl LayoutGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layout given as rows of text
    pub fn with_layout<S: AsRef<str>>(mut self, rows: &[S]) -> Self {
        self.layouts
            .push(rows.iter().map(|r| r.as_ref().to_string()).collect());
        self
    }
}

impl LevelGenerator for LayoutGenerator {
    fn generate(
        &mut self,
        width: usize,
        height: usize,
        _rng: &mut GameRng,
        visit: &mut dyn FnMut(usize, usize, u8),
    ) {
        let Some(layout) = self
            .layouts
            .get(self.next)
            .or_else(|| self.layouts.last())
        else {
            return;
        };
        self.next += 1;

        for x in 0..width {
            for y in 0..height {
                let open = layout
                    .get(y)
                    .and_then(|row| row.as_bytes().get(x))
                    .is_some_and(|&b| b == b'.');
                visit(x, y, if open { OPEN } else { BLOCKED });
            }
        }
    }
}
