//! Dungeon map engine
//!
//! Seed → walker → rooms and corridors → paint passes → glyph grid.

mod glyph;
mod grid;
mod map;
mod room;
mod walker;

pub use glyph::{ClassicGlyphs, FancyGlyphs, Glyph, GlyphSet, GraphicsMode, glyph_set_for};
pub use grid::{
    Grid, paint_border, paint_boss, paint_corridors, paint_rooms, paint_start, render,
};
pub use map::{DungeonMap, GeneratedMap, MapParams, generate, generate_with};
pub use room::{Direction, Point, Room};
pub use walker::{WalkOutcome, Walker};
