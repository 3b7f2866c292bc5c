//! Property tests for region labeling and staircase placement

use std::collections::VecDeque;

use delve_core::dungeon::{
    LevelGrid, Neighborhood, RegionGrid, RegionId, connect_levels, find_overlaps, label_regions,
};
use delve_core::{GameRng, MIN_REGION_SIZE, Tile};
use proptest::prelude::*;

fn grid_from_cells(width: usize, height: usize, cells: &[bool]) -> LevelGrid {
    let mut grid = LevelGrid::new(width, height, Tile::Wall);
    for x in 0..width {
        for y in 0..height {
            if cells[x * height + y] {
                grid.set(x, y, Tile::Floor);
            }
        }
    }
    grid
}

fn level_strategy() -> impl Strategy<Value = LevelGrid> {
    (1usize..24, 1usize..24).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::bool::weighted(0.6), w * h)
            .prop_map(move |cells| grid_from_cells(w, h, &cells))
    })
}

fn level_pair_strategy() -> impl Strategy<Value = (LevelGrid, LevelGrid)> {
    (4usize..20, 4usize..20).prop_flat_map(|(w, h)| {
        (
            prop::collection::vec(prop::bool::weighted(0.65), w * h),
            prop::collection::vec(prop::bool::weighted(0.65), w * h),
        )
            .prop_map(move |(a, b)| (grid_from_cells(w, h, &a), grid_from_cells(w, h, &b)))
    })
}

fn assert_labels_consistent(tiles: &LevelGrid, regions: &RegionGrid) {
    for (x, y, tile) in tiles.iter() {
        assert_eq!(tile.is_walkable(), regions[x][y].is_some(), "({x}, {y})");
    }
}

/// Cells reachable from `start` through walkable tiles, found by breadth-first search
fn reachable(tiles: &LevelGrid, start: (usize, usize)) -> Vec<(usize, usize)> {
    let mut seen = vec![vec![false; tiles.height()]; tiles.width()];
    let mut queue = VecDeque::from([start]);
    let mut reached = Vec::new();
    seen[start.0][start.1] = true;

    while let Some((x, y)) = queue.pop_front() {
        reached.push((x, y));
        for &(dx, dy) in Neighborhood::Moore.offsets() {
            let (nx, ny) = (x as i32 + dx, y as i32 + dy);
            if !tiles.tile(nx, ny).is_walkable() {
                continue;
            }
            let (ux, uy) = (nx as usize, ny as usize);
            if !seen[ux][uy] {
                seen[ux][uy] = true;
                queue.push_back((ux, uy));
            }
        }
    }

    reached
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_floor_iff_region(mut tiles in level_strategy()) {
        let map = label_regions(&mut tiles, MIN_REGION_SIZE, Neighborhood::Moore);
        assert_labels_consistent(&tiles, map.grid());
    }

    #[test]
    fn prop_regions_are_large_and_numbered_densely(mut tiles in level_strategy()) {
        let map = label_regions(&mut tiles, MIN_REGION_SIZE, Neighborhood::Moore);
        for (i, region) in map.regions().iter().enumerate() {
            prop_assert_eq!(region.id, RegionId(i as u32 + 1));
            prop_assert!(region.size > MIN_REGION_SIZE);
            prop_assert_eq!(map.grid().count(|id| id == region.id), region.size);
        }
    }

    #[test]
    fn prop_neighbors_share_a_region(mut tiles in level_strategy()) {
        let map = label_regions(&mut tiles, MIN_REGION_SIZE, Neighborhood::Moore);
        let grid = map.grid();
        for (x, y, id) in grid.iter() {
            if !id.is_some() {
                continue;
            }
            for &(dx, dy) in Neighborhood::Moore.offsets() {
                if let Some(other) = grid.get(x as i32 + dx, y as i32 + dy) {
                    prop_assert!(other == id || !other.is_some());
                    // a walkable neighbor always belongs to the same region
                    if tiles.tile(x as i32 + dx, y as i32 + dy).is_walkable() {
                        prop_assert_eq!(other, id);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_each_region_is_one_connected_component(mut tiles in level_strategy()) {
        let map = label_regions(&mut tiles, MIN_REGION_SIZE, Neighborhood::Moore);
        let grid = map.grid();
        for region in map.regions() {
            let start = grid
                .iter()
                .find(|&(_, _, id)| id == region.id)
                .map(|(x, y, _)| (x, y));
            prop_assert!(start.is_some(), "region {} has no cells", region.id);

            let component = reachable(&tiles, start.unwrap());
            prop_assert_eq!(component.len(), region.size);
            for (x, y) in component {
                prop_assert_eq!(grid[x][y], region.id);
            }
        }
    }

    #[test]
    fn prop_relabeling_is_idempotent(mut tiles in level_strategy()) {
        let first = label_regions(&mut tiles, MIN_REGION_SIZE, Neighborhood::Moore);
        let pruned = tiles.clone();
        let second = label_regions(&mut tiles, MIN_REGION_SIZE, Neighborhood::Moore);

        prop_assert_eq!(&tiles, &pruned);
        prop_assert_eq!(second.pruned(), 0);
        prop_assert_eq!(first.grid(), second.grid());
    }

    #[test]
    fn prop_every_overlapping_pair_connected_once(
        (mut upper, mut lower) in level_pair_strategy(),
        seed in any::<u64>(),
    ) {
        let upper_regions = label_regions(&mut upper, MIN_REGION_SIZE, Neighborhood::Moore).into_grid();
        let lower_regions = label_regions(&mut lower, MIN_REGION_SIZE, Neighborhood::Moore).into_grid();
        let overlaps = find_overlaps(&upper, &lower, &upper_regions, &lower_regions);

        let mut rng = GameRng::new(seed);
        let stairs = connect_levels(&mut upper, &mut lower, &upper_regions, &lower_regions, 0, &mut rng);

        prop_assert_eq!(stairs.len(), overlaps.len());
        for (s, key) in stairs.iter().zip(overlaps.keys()) {
            prop_assert_eq!(s.regions, *key);
            prop_assert!(overlaps.cells(key).contains(&(s.x, s.y)));
            prop_assert_eq!(upper[s.x][s.y], Tile::StairsDown);
            prop_assert_eq!(lower[s.x][s.y], Tile::StairsUp);
        }
        prop_assert_eq!(upper.count(|t| t == Tile::StairsDown), stairs.len());
        prop_assert_eq!(lower.count(|t| t == Tile::StairsUp), stairs.len());
    }
}
