//! Tile types
//!
//! Tiles are plain `Copy` values from a closed set, so two tiles of the same
//! kind are always equal and nothing can mutate a tile in place.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

bitflags! {
    /// Semantic attributes carried by a tile
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TileFlags: u8 {
        const WALKABLE = 0x01;
        const BLOCKS_LIGHT = 0x02;
    }
}

/// Terrain at a single dungeon coordinate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    /// Returned for any coordinate outside the dungeon
    #[default]
    Null = 0,
    Wall = 1,
    Floor = 2,
    StairsUp = 3,
    StairsDown = 4,
}

impl Tile {
    /// Attribute flags for this tile
    pub const fn flags(&self) -> TileFlags {
        match self {
            Tile::Null => TileFlags::BLOCKS_LIGHT,
            Tile::Wall => TileFlags::BLOCKS_LIGHT,
            Tile::Floor | Tile::StairsUp | Tile::StairsDown => TileFlags::WALKABLE,
        }
    }

    /// Check if a creature can stand on this tile
    pub const fn is_walkable(&self) -> bool {
        self.flags().contains(TileFlags::WALKABLE)
    }

    /// Check if this tile blocks line of sight
    pub const fn blocks_light(&self) -> bool {
        self.flags().contains(TileFlags::BLOCKS_LIGHT)
    }

    /// Check if this tile leads to another level
    pub const fn is_stairs(&self) -> bool {
        matches!(self, Tile::StairsUp | Tile::StairsDown)
    }

    /// Get the display character for this tile
    pub const fn symbol(&self) -> char {
        match self {
            Tile::Null => ' ',
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::StairsUp => '<',
            Tile::StairsDown => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_walkability() {
        assert!(Tile::Floor.is_walkable());
        assert!(Tile::StairsUp.is_walkable());
        assert!(Tile::StairsDown.is_walkable());
        assert!(!Tile::Wall.is_walkable());
        assert!(!Tile::Null.is_walkable());
    }

    #[test]
    fn test_light_blocking() {
        assert!(Tile::Wall.blocks_light());
        assert!(Tile::Null.blocks_light());
        assert!(!Tile::Floor.blocks_light());
        assert!(!Tile::StairsDown.blocks_light());
    }

    #[test]
    fn test_walkable_tiles_never_block_light() {
        for tile in Tile::iter() {
            assert_ne!(tile.is_walkable(), tile.blocks_light(), "{tile}");
        }
    }

    #[test]
    fn test_symbols_are_distinct() {
        let mut symbols: Vec<char> = Tile::iter().map(|t| t.symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 5);
    }

    #[test]
    fn test_default_is_null() {
        assert_eq!(Tile::default(), Tile::Null);
        assert_eq!(Tile::StairsUp.to_string(), "StairsUp");
    }
}
