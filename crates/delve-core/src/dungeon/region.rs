//! Region labeling
//!
//! Splits the walkable cells of one level into connected regions with an
//! iterative flood fill, then walls in every region too small to be worth
//! visiting. After labeling, a cell carries a region id exactly when it is
//! walkable.
//!
//! Ids are handed out in scan order starting at 1. A pruned region gives its
//! id back, so the surviving regions of a level are always numbered `1..=n`.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::grid::{LevelGrid, RegionGrid, RegionId};
use super::tile::Tile;

/// Offsets of the eight surrounding cells
const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Offsets of the four orthogonal cells
const VON_NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Which neighbors count as connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Neighborhood {
    /// 8-connected, diagonals included
    #[default]
    Moore,
    /// 4-connected
    VonNeumann,
}

impl Neighborhood {
    pub const fn offsets(&self) -> &'static [(i32, i32)] {
        match self {
            Neighborhood::Moore => &MOORE_OFFSETS,
            Neighborhood::VonNeumann => &VON_NEUMANN_OFFSETS,
        }
    }
}

/// Summary of one surviving region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionInfo {
    pub id: RegionId,
    /// Number of cells in the region
    pub size: usize,
}

/// Result of labeling one level
#[derive(Debug, Clone)]
pub struct RegionMap {
    grid: RegionGrid,
    regions: Vec<RegionInfo>,
    pruned: usize,
}

impl RegionMap {
    /// Per-cell region ids
    pub fn grid(&self) -> &RegionGrid {
        &self.grid
    }

    /// Region id at a cell, `RegionId::NONE` off the grid
    pub fn id_at(&self, x: i32, y: i32) -> RegionId {
        self.grid.get(x, y).unwrap_or(RegionId::NONE)
    }

    /// Surviving regions in id order
    pub fn regions(&self) -> &[RegionInfo] {
        &self.regions
    }

    /// Number of regions that were walled in for being too small
    pub fn pruned(&self) -> usize {
        self.pruned
    }

    pub fn into_grid(self) -> RegionGrid {
        self.grid
    }
}

/// Flood fill state for a single level
struct Labeler<'a> {
    tiles: &'a mut LevelGrid,
    grid: RegionGrid,
    neighborhood: Neighborhood,
    stack: Vec<(usize, usize)>,
}

impl<'a> Labeler<'a> {
    fn new(tiles: &'a mut LevelGrid, neighborhood: Neighborhood) -> Self {
        let grid = RegionGrid::new(tiles.width(), tiles.height(), RegionId::NONE);
        Self {
            tiles,
            grid,
            neighborhood,
            stack: Vec::new(),
        }
    }

    /// A cell can join a region if it is on the level, unlabeled and walkable
    fn can_fill(&self, x: i32, y: i32) -> bool {
        match self.grid.get(x, y) {
            Some(id) => !id.is_some() && self.tiles[x as usize][y as usize].is_walkable(),
            None => false,
        }
    }

    /// Label every cell connected to the seed, returning the cells filled
    fn fill(&mut self, region: RegionId, seed_x: usize, seed_y: usize) -> Vec<(usize, usize)> {
        let mut filled = vec![(seed_x, seed_y)];
        self.grid.set(seed_x, seed_y, region);
        self.stack.push((seed_x, seed_y));

        while let Some((x, y)) = self.stack.pop() {
            for &(dx, dy) in self.neighborhood.offsets() {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if self.can_fill(nx, ny) {
                    let (ux, uy) = (nx as usize, ny as usize);
                    self.grid.set(ux, uy, region);
                    self.stack.push((ux, uy));
                    filled.push((ux, uy));
                }
            }
        }

        filled
    }

    /// Turn a region back into solid wall
    fn remove(&mut self, region: RegionId, cells: &[(usize, usize)]) {
        for &(x, y) in cells {
            assert_eq!(
                self.grid[x][y], region,
                "cell ({x}, {y}) left region {region} before removal"
            );
            self.grid.set(x, y, RegionId::NONE);
            self.tiles.set(x, y, Tile::Wall);
        }
    }
}

/// Label the regions of one level and wall in those of `min_size` cells or fewer
///
/// `tiles` is modified in place: cells of pruned regions become `Tile::Wall`.
pub fn label_regions(
    tiles: &mut LevelGrid,
    min_size: usize,
    neighborhood: Neighborhood,
) -> RegionMap {
    let mut labeler = Labeler::new(tiles, neighborhood);
    let mut regions = Vec::new();
    let mut pruned = 0;
    let mut next = RegionId::FIRST;

    for (x, y) in labeler.grid.coords() {
        if !labeler.can_fill(x as i32, y as i32) {
            continue;
        }

        let cells = labeler.fill(next, x, y);
        if cells.len() <= min_size {
            trace!(
                "pruning region of {} cells seeded at ({}, {})",
                cells.len(),
                x,
                y
            );
            labeler.remove(next, &cells);
            pruned += 1;
        } else {
            regions.push(RegionInfo {
                id: next,
                size: cells.len(),
            });
            next = next.next();
        }
    }

    debug!(
        "labeled {} regions ({} pruned) on {}x{} level",
        regions.len(),
        pruned,
        labeler.grid.width(),
        labeler.grid.height()
    );

    RegionMap {
        grid: labeler.grid,
        regions,
        pruned,
    }
}
