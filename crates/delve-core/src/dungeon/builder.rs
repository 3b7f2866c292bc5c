//! Dungeon construction
//!
//! Builds every level from the generator, labels and prunes its regions,
//! then joins each pair of adjacent levels with staircases. Region labels
//! are scratch state owned by the build and dropped before the finished
//! dungeon is handed back.

use log::info;
use serde::{Deserialize, Serialize};

use crate::rng::GameRng;
use crate::world::{BuildError, BuilderConfig};

use super::connector::{Staircase, connect_levels};
use super::generator::{LevelGenerator, generate_level};
use super::grid::{LevelGrid, RegionGrid};
use super::region::label_regions;
use super::tile::Tile;
use super::uniform::UniformGenerator;

/// Validated settings for building dungeons
#[derive(Debug, Clone)]
pub struct DungeonBuilder {
    config: BuilderConfig,
}

impl DungeonBuilder {
    /// Check the configuration; nothing is allocated on failure
    pub fn new(config: BuilderConfig) -> Result<Self, BuildError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Build a dungeon with the room-and-corridor generator
    pub fn build(&self, rng: &mut GameRng) -> Dungeon {
        let mut generator = UniformGenerator::new(self.config.generator.clone());
        self.build_with(&mut generator, rng)
    }

    /// Build a dungeon with a caller-supplied generator
    pub fn build_with(&self, generator: &mut dyn LevelGenerator, rng: &mut GameRng) -> Dungeon {
        let mut ctx = BuildContext::new(&self.config);
        ctx.generate_levels(generator, rng);
        ctx.connect_all(rng);
        ctx.finish()
    }
}

/// Working state of one build
///
/// Owns the tile and region grids exclusively until the build finishes.
struct BuildContext<'a> {
    config: &'a BuilderConfig,
    tiles: Vec<LevelGrid>,
    regions: Vec<RegionGrid>,
    stairs: Vec<Staircase>,
    pruned: usize,
}

impl<'a> BuildContext<'a> {
    fn new(config: &'a BuilderConfig) -> Self {
        Self {
            config,
            tiles: Vec::with_capacity(config.depth),
            regions: Vec::with_capacity(config.depth),
            stairs: Vec::new(),
            pruned: 0,
        }
    }

    /// Generate and label every level
    fn generate_levels(&mut self, generator: &mut dyn LevelGenerator, rng: &mut GameRng) {
        for _ in 0..self.config.depth {
            let mut level = generate_level(generator, self.config.width, self.config.height, rng);
            let map = label_regions(
                &mut level,
                self.config.min_region_size,
                self.config.neighborhood,
            );
            self.pruned += map.pruned();
            self.tiles.push(level);
            self.regions.push(map.into_grid());
        }
    }

    /// Join level `z` to level `z + 1`
    fn connect(&mut self, z: usize, rng: &mut GameRng) {
        let (above, below) = self.tiles.split_at_mut(z + 1);
        let stairs = connect_levels(
            &mut above[z],
            &mut below[0],
            &self.regions[z],
            &self.regions[z + 1],
            z,
            rng,
        );
        self.stairs.extend(stairs);
    }

    fn connect_all(&mut self, rng: &mut GameRng) {
        for z in 0..self.tiles.len().saturating_sub(1) {
            self.connect(z, rng);
        }
    }

    fn finish(self) -> Dungeon {
        info!(
            "built {}x{}x{} dungeon: {} regions pruned, {} staircases",
            self.config.width,
            self.config.height,
            self.config.depth,
            self.pruned,
            self.stairs.len()
        );
        Dungeon {
            width: self.config.width,
            height: self.config.height,
            levels: self.tiles,
            stairs: self.stairs,
        }
    }
}

/// A finished multi-level dungeon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    width: usize,
    height: usize,
    levels: Vec<LevelGrid>,
    stairs: Vec<Staircase>,
}

impl Dungeon {
    /// Build a dungeon of the given size with default settings
    pub fn generate(
        width: usize,
        height: usize,
        depth: usize,
        rng: &mut GameRng,
    ) -> Result<Self, BuildError> {
        let builder = DungeonBuilder::new(BuilderConfig::with_dimensions(width, height, depth))?;
        Ok(builder.build(rng))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Terrain at a coordinate, `Tile::Null` outside the dungeon
    pub fn tile(&self, x: i32, y: i32, z: i32) -> Tile {
        if z < 0 {
            return Tile::Null;
        }
        self.levels
            .get(z as usize)
            .map_or(Tile::Null, |level| level.tile(x, y))
    }

    pub fn level(&self, z: usize) -> Option<&LevelGrid> {
        self.levels.get(z)
    }

    /// All levels, indexed `[z][x][y]`
    pub fn levels(&self) -> &[LevelGrid] {
        &self.levels
    }

    /// Every staircase pair, ordered by level and then scan order
    pub fn stairs(&self) -> &[Staircase] {
        &self.stairs
    }

    /// Staircases leading down from level `z`
    pub fn stairs_down_from(&self, z: usize) -> impl Iterator<Item = &Staircase> {
        self.stairs.iter().filter(move |s| s.z == z)
    }

    /// Take ownership of the levels
    pub fn into_levels(self) -> Vec<LevelGrid> {
        self.levels
    }

    /// Coordinates of plain floor on level `z`
    pub fn floor_positions(&self, z: usize) -> Vec<(usize, usize)> {
        self.levels.get(z).map_or_else(Vec::new, |level| {
            level
                .iter()
                .filter(|&(_, _, t)| t == Tile::Floor)
                .map(|(x, y, _)| (x, y))
                .collect()
        })
    }

    /// Pick a random plain floor cell on level `z`, if it has any
    pub fn random_floor_position(&self, z: usize, rng: &mut GameRng) -> Option<(usize, usize)> {
        rng.choose(&self.floor_positions(z)).copied()
    }

    /// Render level `z` as text
    pub fn render_level(&self, z: usize) -> Option<String> {
        self.levels.get(z).map(LevelGrid::render)
    }
}
