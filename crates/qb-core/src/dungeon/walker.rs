//! Room placement walk
//!
//! A self-avoiding random walk with step 2 starting from the map center.
//! Each draw picks a direction; the cursor always moves, but a room (and the
//! corridor cell behind it) is only recorded when the target cell is inside
//! the border and has not been seen before.

use hashbrown::HashSet;
use log::debug;
use qb_rng::Lcg;
use serde::{Deserialize, Serialize};

use super::room::{Direction, Point, Room};
use crate::{DRAWS_PER_ROOM, ROOM_STEP};

/// Result of a walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkOutcome {
    /// Rooms in placement order, lock state final
    pub rooms: Vec<Room>,
    /// Corridor cells in placement order
    pub corridors: Vec<Point>,
    /// Generator values consumed
    pub draws: u64,
    /// True if the draw budget ran out before `rooms_total` was reached
    pub exhausted: bool,
}

/// Room placement walker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walker {
    rooms_total: usize,
    unlocked: usize,
    draws_per_room: usize,
}

impl Walker {
    /// `rooms_total` and `unlocked` are expected already clamped.
    pub fn new(rooms_total: usize, unlocked: usize) -> Self {
        Self {
            rooms_total,
            unlocked,
            draws_per_room: DRAWS_PER_ROOM,
        }
    }

    /// Override the per-room draw allowance (at least 1)
    pub fn with_draws_per_room(mut self, draws_per_room: usize) -> Self {
        self.draws_per_room = draws_per_room.max(1);
        self
    }

    /// Total number of draws the walk may consume
    pub fn draw_budget(&self) -> u64 {
        (self.draws_per_room as u64).saturating_mul(self.rooms_total as u64)
    }

    pub fn walk(&self, rng: &mut Lcg) -> WalkOutcome {
        let budget = self.draw_budget();
        let first_draw = rng.draws();

        let mut cursor = Point::center();
        let mut rooms = vec![Room::start()];
        let mut corridors = Vec::with_capacity(self.rooms_total);
        let mut seen: HashSet<Point> = HashSet::with_capacity(self.rooms_total);
        seen.insert(cursor);

        let mut exhausted = false;
        while rooms.len() < self.rooms_total {
            if rng.draws() - first_draw >= budget {
                exhausted = true;
                break;
            }

            let dir = Direction::from_draw(rng.next_u32());
            let next = cursor.step(dir, ROOM_STEP);

            if next.is_interior() && seen.insert(next) {
                rooms.push(Room::placed(next, rooms.len()));
                corridors.push(cursor.midpoint(&next));
            }

            cursor = next;
        }

        for room in rooms.iter_mut().take(self.unlocked) {
            room.locked = false;
        }

        let draws = rng.draws() - first_draw;
        if exhausted {
            debug!(
                "walk budget of {} draws spent with {}/{} rooms placed",
                budget,
                rooms.len(),
                self.rooms_total
            );
        }

        WalkOutcome {
            rooms,
            corridors,
            draws,
            exhausted,
        }
    }
}
