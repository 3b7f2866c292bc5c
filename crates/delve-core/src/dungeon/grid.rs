//! Two-dimensional level storage
//!
//! Cells are stored column-major and indexed `[x][y]`, matching how the rest
//! of the dungeon code walks a level.

use core::fmt;
use core::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::tile::Tile;

/// Identifier of a connected region on one level
///
/// Ids start at 1 and restart on every level; `RegionId::NONE` marks a cell
/// that belongs to no surviving region.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct RegionId(pub u32);

impl RegionId {
    pub const NONE: RegionId = RegionId(0);
    pub const FIRST: RegionId = RegionId(1);

    /// Check if this id names a region
    pub const fn is_some(&self) -> bool {
        self.0 > 0
    }

    pub const fn next(&self) -> RegionId {
        RegionId(self.0 + 1)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fixed-size 2D grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<Vec<T>>,
}

/// Terrain of one dungeon level
pub type LevelGrid = Grid<Tile>;

/// Region labels of one dungeon level
pub type RegionGrid = Grid<RegionId>;

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `fill`
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![fill; height]; width],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a signed coordinate lies on the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Get the cell at a signed coordinate, or `None` off the grid
    pub fn get(&self, x: i32, y: i32) -> Option<T> {
        if self.in_bounds(x, y) {
            Some(self.cells[x as usize][y as usize])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        self.cells[x][y] = value;
    }

    /// Iterate over all coordinates in scan order (x outer, y inner)
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + use<T> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    /// Iterate over all cells with their coordinates in scan order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(x, col)| col.iter().enumerate().map(move |(y, &v)| (x, y, v)))
    }

    /// Count cells matching a predicate
    pub fn count(&self, mut pred: impl FnMut(T) -> bool) -> usize {
        self.iter().filter(|&(_, _, v)| pred(v)).count()
    }
}

impl<T> Index<usize> for Grid<T> {
    type Output = [T];

    fn index(&self, x: usize) -> &[T] {
        &self.cells[x]
    }
}

impl<T> IndexMut<usize> for Grid<T> {
    fn index_mut(&mut self, x: usize) -> &mut [T] {
        &mut self.cells[x]
    }
}

impl LevelGrid {
    /// Terrain at a signed coordinate, `Tile::Null` off the grid
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.get(x, y).unwrap_or(Tile::Null)
    }

    /// Render the level as text, one row per line
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.cells[x][y].symbol());
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_and_fill() {
        let grid = LevelGrid::new(4, 3, Tile::Wall);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.count(|t| t == Tile::Wall), 12);
    }

    #[test]
    fn test_out_of_bounds_is_null() {
        let grid = LevelGrid::new(4, 3, Tile::Floor);
        assert_eq!(grid.tile(0, 0), Tile::Floor);
        assert_eq!(grid.tile(3, 2), Tile::Floor);
        assert_eq!(grid.tile(-1, 0), Tile::Null);
        assert_eq!(grid.tile(0, -1), Tile::Null);
        assert_eq!(grid.tile(4, 0), Tile::Null);
        assert_eq!(grid.tile(0, 3), Tile::Null);
    }

    #[test]
    fn test_scan_order_is_column_major() {
        let grid = RegionGrid::new(2, 2, RegionId::NONE);
        let coords: Vec<_> = grid.coords().collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_index_and_set() {
        let mut grid = LevelGrid::new(3, 3, Tile::Wall);
        grid.set(1, 2, Tile::Floor);
        grid[2][0] = Tile::StairsDown;
        assert_eq!(grid[1][2], Tile::Floor);
        assert_eq!(grid.tile(2, 0), Tile::StairsDown);
    }

    #[test]
    fn test_render() {
        let mut grid = LevelGrid::new(3, 2, Tile::Wall);
        grid.set(1, 0, Tile::Floor);
        grid.set(2, 1, Tile::StairsUp);
        assert_eq!(grid.render(), "#.#\n##<\n");
    }

    #[test]
    fn test_region_id() {
        assert!(!RegionId::NONE.is_some());
        assert!(RegionId::FIRST.is_some());
        assert_eq!(RegionId::FIRST.next(), RegionId(2));
        assert_eq!(RegionId(3).to_string(), "#3");
    }
}
