//! Errors reported by the dungeon builder
//!
//! Only configuration problems are recoverable. Broken internal invariants
//! panic instead of surfacing here.

use thiserror::Error;

/// Errors that can occur before a dungeon is built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Invalid dungeon dimensions {width}x{height}x{depth}: every dimension must be positive")]
    InvalidDimensions {
        width: usize,
        height: usize,
        depth: usize,
    },

    #[error("Dungeon of {cells} cells exceeds the limit of {max}")]
    TooLarge { cells: usize, max: usize },

    #[error("Invalid generator configuration: {reason}")]
    InvalidGenerator { reason: String },
}
