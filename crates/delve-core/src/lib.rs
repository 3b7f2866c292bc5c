//! delve-core: multi-level dungeon construction
//!
//! Generates a stack of floor/wall levels, splits each level into connected
//! regions, walls in regions too small to matter, and joins adjacent levels
//! with staircases so that every overlapping pair of regions is reachable.
//!
//! All randomness comes from a caller-supplied [`GameRng`], so a seed fully
//! determines the dungeon for a given generator.

pub mod dungeon;
pub mod world;

mod consts;
mod rng;

pub use consts::*;
pub use dungeon::{Dungeon, DungeonBuilder, Tile};
pub use rng::GameRng;
pub use world::{BuildError, BuilderConfig, GeneratorConfig};
