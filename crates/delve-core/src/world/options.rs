//! Dungeon builder configuration
//!
//! Plain serde structs so a host can keep them in whatever config format it
//! already loads. Every field has a default.

use serde::{Deserialize, Serialize};

use crate::dungeon::Neighborhood;
use crate::{COLNO, DEFAULT_DEPTH, MAX_CELLS, MIN_REGION_SIZE, ROWNO};

use super::BuildError;

/// Settings for a whole dungeon build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub width: usize,
    pub height: usize,
    pub depth: usize,

    /// Regions with this many cells or fewer are walled in
    pub min_region_size: usize,

    /// Which neighbors count as connected during region labeling
    pub neighborhood: Neighborhood,

    /// Settings for the default room-and-corridor generator
    pub generator: GeneratorConfig,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            width: COLNO,
            height: ROWNO,
            depth: DEFAULT_DEPTH,
            min_region_size: MIN_REGION_SIZE,
            neighborhood: Neighborhood::Moore,
            generator: GeneratorConfig::default(),
        }
    }
}

impl BuilderConfig {
    /// Config with the given dimensions and defaults for everything else
    pub fn with_dimensions(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
            ..Self::default()
        }
    }

    /// Total number of cells across all levels
    pub fn cell_count(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)
            .and_then(|area| area.checked_mul(self.depth))
    }

    /// Reject dimensions that cannot produce a dungeon
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            return Err(BuildError::InvalidDimensions {
                width: self.width,
                height: self.height,
                depth: self.depth,
            });
        }

        match self.cell_count() {
            Some(cells) if cells <= MAX_CELLS => {}
            cells => {
                return Err(BuildError::TooLarge {
                    cells: cells.unwrap_or(usize::MAX),
                    max: MAX_CELLS,
                });
            }
        }

        self.generator.validate()
    }
}

/// Settings for [`UniformGenerator`](crate::dungeon::UniformGenerator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Inclusive range of room interior widths
    pub room_width: (usize, usize),

    /// Inclusive range of room interior heights
    pub room_height: (usize, usize),

    /// Stop placing rooms once this fraction of the level is open
    pub dug_percentage: f32,

    /// Upper bound on room placement attempts per level
    pub max_room_attempts: u32,

    /// Wall-clock budget for one level, in milliseconds
    ///
    /// Hitting this limit stops room placement early, so a seed only
    /// reproduces the same dungeon while placement finishes within it.
    pub time_limit_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            room_width: (3, 9),
            room_height: (3, 5),
            dug_percentage: 0.25,
            max_room_attempts: 500,
            time_limit_ms: 5000,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), BuildError> {
        let ranges = [("room_width", self.room_width), ("room_height", self.room_height)];
        for (name, (min, max)) in ranges {
            if min == 0 || min > max {
                return Err(BuildError::InvalidGenerator {
                    reason: format!("{name} range {min}..={max} is empty or zero"),
                });
            }
        }

        if !(self.dug_percentage > 0.0 && self.dug_percentage <= 1.0) {
            return Err(BuildError::InvalidGenerator {
                reason: format!("dug_percentage {} must lie in (0, 1]", self.dug_percentage),
            });
        }

        if self.max_room_attempts == 0 || self.time_limit_ms == 0 {
            return Err(BuildError::InvalidGenerator {
                reason: format!(
                    "max_room_attempts {} and time_limit_ms {} must both be positive",
                    self.max_room_attempts, self.time_limit_ms
                ),
            });
        }

        Ok(())
    }
}
