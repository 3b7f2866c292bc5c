//! Dungeon system
//!
//! Contains tiles, level grids, region labeling, staircase placement and the
//! builder that ties them together.

mod builder;
mod connector;
mod generator;
mod grid;
mod region;
mod tile;
mod uniform;

pub use builder::{Dungeon, DungeonBuilder};
pub use connector::{OverlapKey, Overlaps, Staircase, connect_levels, find_overlaps};
pub use generator::{BLOCKED, LayoutGenerator, LevelGenerator, OPEN, generate_level};
pub use grid::{Grid, LevelGrid, RegionGrid, RegionId};
pub use region::{Neighborhood, RegionInfo, RegionMap, label_regions};
pub use tile::{Tile, TileFlags};
pub use uniform::UniformGenerator;
