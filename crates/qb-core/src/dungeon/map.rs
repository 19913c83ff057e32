//! Map parameters and the assembled dungeon map

use log::debug;
use qb_rng::Lcg;
use serde::{Deserialize, Serialize};

use super::glyph::{FancyGlyphs, Glyph, GlyphSet};
use super::grid::{self, Grid};
use super::room::{Point, Room};
use super::walker::Walker;
use crate::{DRAWS_PER_ROOM, MAX_ROOMS, MIN_ROOMS};

/// Clamped inputs of one map build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapParams {
    pub rooms_total: usize,
    pub unlocked: usize,
    pub seed: u32,
    pub draws_per_room: usize,
}

impl MapParams {
    /// Clamp caller counts: rooms to [3, 60], unlocked to [1, rooms].
    pub fn new(rooms_total: i64, unlocked: i64, seed: u32) -> Self {
        let rooms_total = rooms_total.clamp(MIN_ROOMS as i64, MAX_ROOMS as i64) as usize;
        let unlocked = unlocked.clamp(1, rooms_total as i64) as usize;
        Self {
            rooms_total,
            unlocked,
            seed,
            draws_per_room: DRAWS_PER_ROOM,
        }
    }

    pub fn with_draws_per_room(mut self, draws_per_room: usize) -> Self {
        self.draws_per_room = draws_per_room.max(1);
        self
    }

    /// Every room unlocked: the boss shows up
    pub fn is_cleared(&self) -> bool {
        self.unlocked >= self.rooms_total
    }
}

/// A generated map with its structure kept alongside the glyphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonMap {
    pub params: MapParams,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Point>,
    /// Generator values consumed by the walk
    pub draws: u64,
    /// The walk ran out of draws before placing every room
    pub exhausted: bool,
    #[serde(skip)]
    pub grid: Grid,
}

impl DungeonMap {
    pub fn build(params: MapParams) -> Self {
        let mut rng = Lcg::new(params.seed);
        let outcome = Walker::new(params.rooms_total, params.unlocked)
            .with_draws_per_room(params.draws_per_room)
            .walk(&mut rng);

        let grid = grid::render(&outcome.rooms, &outcome.corridors, params.is_cleared());
        debug!(
            "built map seed={} rooms={}/{} unlocked={} draws={}",
            params.seed,
            outcome.rooms.len(),
            params.rooms_total,
            params.unlocked,
            outcome.draws
        );

        Self {
            params,
            rooms: outcome.rooms,
            corridors: outcome.corridors,
            draws: outcome.draws,
            exhausted: outcome.exhausted,
            grid,
        }
    }

    pub fn start_room(&self) -> &Room {
        &self.rooms[0]
    }

    /// The room wearing the boss marker, if the board is cleared
    pub fn boss_room(&self) -> Option<&Room> {
        if self.params.is_cleared() {
            self.rooms.last()
        } else {
            None
        }
    }

    pub fn placed(&self) -> usize {
        self.rooms.len()
    }

    pub fn unlocked_rooms(&self) -> usize {
        self.rooms.iter().filter(|r| !r.locked).count()
    }

    pub fn glyph_at(&self, p: Point) -> Option<Glyph> {
        self.grid.get(p)
    }

    pub fn to_text(&self, glyphs: &dyn GlyphSet) -> String {
        self.grid.to_text(glyphs)
    }

    pub fn into_generated(self, glyphs: &dyn GlyphSet) -> GeneratedMap {
        GeneratedMap {
            art: self.to_text(glyphs),
            rooms_total: self.params.rooms_total,
            unlocked: self.params.unlocked,
        }
    }
}

/// Rendered art plus the counts actually used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedMap {
    pub art: String,
    pub rooms_total: usize,
    pub unlocked: usize,
}

/// Build a map and render it with the given glyphs
pub fn generate_with(params: MapParams, glyphs: &dyn GlyphSet) -> GeneratedMap {
    DungeonMap::build(params).into_generated(glyphs)
}

/// Build a map with default settings, rendered with fancy glyphs
pub fn generate(rooms_total: i64, unlocked: i64, seed: u32) -> GeneratedMap {
    generate_with(MapParams::new(rooms_total, unlocked, seed), &FancyGlyphs)
}
