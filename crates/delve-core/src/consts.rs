//! Core dungeon constants

/// Default level dimensions
pub const COLNO: usize = 80;
pub const ROWNO: usize = 21;

/// Default number of depth levels
pub const DEFAULT_DEPTH: usize = 5;

/// Regions with this many cells or fewer are filled back in with wall
pub const MIN_REGION_SIZE: usize = 20;

/// Upper bound on `width * height * depth` accepted by the builder
pub const MAX_CELLS: usize = 1 << 26;
