//! qb-core: daily dungeon map engine for questboard
//!
//! A calendar date seeds a deterministic walk that lays out rooms on a
//! fixed grid; the number of quests finished that day decides how many of
//! those rooms are unlocked. Everything here is pure and free of I/O apart
//! from reading and writing the options file.

pub mod daily;
pub mod dungeon;
pub mod options;

mod consts;

pub use consts::*;
pub use daily::{DayProgress, seed_for_date};
pub use dungeon::{DungeonMap, GeneratedMap, MapParams, generate, generate_with};
pub use options::{BoardOptions, OptionsError};
pub use qb_rng::Lcg;
