//! Staircase placement between adjacent levels
//!
//! Two regions on neighboring levels overlap where both levels have floor
//! at the same (x, y). Every overlapping pair of regions gets exactly one
//! staircase: a down staircase on the upper level and an up staircase
//! directly below it. The cell is drawn uniformly from the overlap so stairs
//! do not pile up in the top-left corner of each region.

use hashbrown::HashMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

use super::grid::{LevelGrid, RegionGrid, RegionId};
use super::tile::Tile;

/// Pair of regions on adjacent levels: (upper level, lower level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlapKey {
    pub upper: RegionId,
    pub lower: RegionId,
}

/// A placed staircase pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staircase {
    pub x: usize,
    pub y: usize,
    /// Level holding the down staircase; the up staircase is on `z + 1`
    pub z: usize,
    /// Regions joined by this staircase
    pub regions: OverlapKey,
}

/// Overlapping cells of two adjacent levels, grouped by region pair
#[derive(Debug, Clone, Default)]
pub struct Overlaps {
    /// Keys in the order their first cell was scanned
    order: Vec<OverlapKey>,
    cells: HashMap<OverlapKey, Vec<(usize, usize)>>,
}

impl Overlaps {
    /// Region pairs in scan order of their first shared cell
    pub fn keys(&self) -> &[OverlapKey] {
        &self.order
    }

    /// All shared cells of one region pair
    pub fn cells(&self, key: &OverlapKey) -> &[(usize, usize)] {
        self.cells.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Collect every cell where both levels are floor inside a surviving region
pub fn find_overlaps(
    upper: &LevelGrid,
    lower: &LevelGrid,
    upper_regions: &RegionGrid,
    lower_regions: &RegionGrid,
) -> Overlaps {
    let mut overlaps = Overlaps::default();

    for (x, y) in upper.coords() {
        if upper[x][y] != Tile::Floor || lower[x][y] != Tile::Floor {
            continue;
        }
        let key = OverlapKey {
            upper: upper_regions[x][y],
            lower: lower_regions[x][y],
        };
        if !key.upper.is_some() || !key.lower.is_some() {
            continue;
        }

        overlaps
            .cells
            .entry(key)
            .or_insert_with(|| {
                overlaps.order.push(key);
                Vec::new()
            })
            .push((x, y));
    }

    overlaps
}

/// Join level `z` (upper) to level `z + 1` (lower) with staircases
///
/// Places one staircase pair per overlapping region pair and returns them in
/// scan order. Region pairs with no shared floor are left unconnected.
pub fn connect_levels(
    upper: &mut LevelGrid,
    lower: &mut LevelGrid,
    upper_regions: &RegionGrid,
    lower_regions: &RegionGrid,
    z: usize,
    rng: &mut GameRng,
) -> Vec<Staircase> {
    assert!(
        upper.width() == lower.width() && upper.height() == lower.height(),
        "levels {z} and {} differ in size",
        z + 1
    );

    let overlaps = find_overlaps(upper, lower, upper_regions, lower_regions);
    let mut stairs = Vec::with_capacity(overlaps.len());

    for &key in overlaps.keys() {
        let Some(&(x, y)) = rng.choose(overlaps.cells(&key)) else {
            continue;
        };

        upper.set(x, y, Tile::StairsDown);
        lower.set(x, y, Tile::StairsUp);
        trace!(
            "stairs at ({x}, {y}) join region {} on level {z} to region {} below",
            key.upper, key.lower
        );

        stairs.push(Staircase {
            x,
            y,
            z,
            regions: key,
        });
    }

    debug!(
        "connected {} region pairs between levels {} and {}",
        stairs.len(),
        z,
        z + 1
    );

    stairs
}
