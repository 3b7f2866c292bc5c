//! Room-and-corridor level generator
//!
//! Scatters non-overlapping rectangular rooms until enough of the level is
//! dug out, then joins them with winding corridors:
//! 1. Connect each room to the next one placed
//! 2. Sometimes connect rooms two steps apart, for loops
//!
//! Placement stops early when the attempt budget or the time limit runs out.
//! Whatever has been dug by then is reported as-is.

use std::time::{Duration, Instant};

use log::warn;

use crate::rng::GameRng;
use crate::world::GeneratorConfig;

use super::generator::{BLOCKED, LevelGenerator, OPEN};

/// Rectangular room interior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Room {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl Room {
    /// Check if this room overlaps another, with a buffer zone between them
    fn overlaps(&self, other: &Room, buffer: usize) -> bool {
        let x1 = self.x.saturating_sub(buffer);
        let y1 = self.y.saturating_sub(buffer);
        let x2 = self.x + self.width + buffer;
        let y2 = self.y + self.height + buffer;

        !(x2 <= other.x || x1 >= other.x + other.width || y2 <= other.y || y1 >= other.y + other.height)
    }

    fn center(&self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Default generator used by the dungeon builder
#[derive(Debug, Clone, Default)]
pub struct UniformGenerator {
    config: GeneratorConfig,
}

impl UniformGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Place rooms until the dug target, attempt budget or time limit is hit
    fn place_rooms(&self, width: usize, height: usize, rng: &mut GameRng) -> Vec<Room> {
        let mut rooms: Vec<Room> = Vec::new();
        if width < 3 || height < 3 {
            return rooms;
        }

        let interior = (width - 2) * (height - 2);
        let target = (interior as f32 * self.config.dug_percentage).ceil() as usize;
        let deadline = Duration::from_millis(self.config.time_limit_ms);
        let started = Instant::now();
        let mut dug = 0;

        for _ in 0..self.config.max_room_attempts {
            if dug >= target {
                break;
            }
            if started.elapsed() > deadline {
                warn!(
                    "room placement hit its {}ms time limit with {} rooms",
                    self.config.time_limit_ms,
                    rooms.len()
                );
                break;
            }

            let (min_w, max_w) = self.config.room_width;
            let (min_h, max_h) = self.config.room_height;
            let room_w = rng.between(min_w, max_w);
            let room_h = rng.between(min_h, max_h);

            // Leave a wall on every side of the level
            if room_w + 2 > width || room_h + 2 > height {
                continue;
            }
            let x = 1 + rng.below(width - room_w - 1);
            let y = 1 + rng.below(height - room_h - 1);
            let room = Room {
                x,
                y,
                width: room_w,
                height: room_h,
            };

            if rooms.iter().any(|r| room.overlaps(r, 1)) {
                continue;
            }

            dug += room.area();
            rooms.push(room);
        }

        rooms
    }
}

/// Dig a winding corridor between two points
///
/// Each step moves along the axis with the larger remaining distance most of
/// the time, occasionally the other one.
fn dig_corridor(
    open: &mut [Vec<bool>],
    (start_x, start_y): (usize, usize),
    (end_x, end_y): (usize, usize),
    rng: &mut GameRng,
) {
    let mut x = start_x as i32;
    let mut y = start_y as i32;
    let tx = end_x as i32;
    let ty = end_y as i32;

    open[start_x][start_y] = true;

    while x != tx || y != ty {
        let dx = tx - x;
        let dy = ty - y;

        let (move_x, move_y) = if dx.abs() > dy.abs() {
            if dy == 0 || rng.below(dx.unsigned_abs() as usize + 1) > 0 {
                (dx.signum(), 0)
            } else {
                (0, dy.signum())
            }
        } else if dy.abs() > dx.abs() {
            if dx == 0 || rng.below(dy.unsigned_abs() as usize + 1) > 0 {
                (0, dy.signum())
            } else {
                (dx.signum(), 0)
            }
        } else if rng.one_in(2) {
            (dx.signum(), 0)
        } else {
            (0, dy.signum())
        };

        x += move_x;
        y += move_y;
        open[x as usize][y as usize] = true;
    }
}

impl LevelGenerator for UniformGenerator {
    fn generate(
        &mut self,
        width: usize,
        height: usize,
        rng: &mut GameRng,
        visit: &mut dyn FnMut(usize, usize, u8),
    ) {
        let mut open = vec![vec![false; height]; width];
        let rooms = self.place_rooms(width, height, rng);

        for room in &rooms {
            for col in &mut open[room.x..room.x + room.width] {
                col[room.y..room.y + room.height].fill(true);
            }
        }

        for pair in rooms.windows(2) {
            dig_corridor(&mut open, pair[0].center(), pair[1].center(), rng);
        }
        for pair in rooms.windows(3) {
            if rng.one_in(2) {
                dig_corridor(&mut open, pair[0].center(), pair[2].center(), rng);
            }
        }

        for (x, col) in open.iter().enumerate() {
            for (y, &cell) in col.iter().enumerate() {
                visit(x, y, if cell { OPEN } else { BLOCKED });
            }
        }
    }
}
