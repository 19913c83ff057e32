//! Per-day inputs: the date seed and quest progress

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dungeon::MapParams;

/// Rooms added on top of the quests due that day
const EXTRA_ROOMS: usize = 3;
/// Smallest map shown for a day
const MIN_DAY_ROOMS: usize = 5;

/// Seed from the digits of the ISO date, e.g. 2024-01-01 → 20240101.
pub fn seed_for_date(date: NaiveDate) -> u32 {
    let year = date.year().rem_euclid(10_000) as u32;
    year * 10_000 + date.month() * 100 + date.day()
}

/// How far along a day's quests are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayProgress {
    /// Quests due that day
    pub total_due: usize,
    /// Of those, how many are done
    pub completed: usize,
}

impl DayProgress {
    pub fn new(total_due: usize, completed: usize) -> Self {
        Self {
            total_due,
            completed,
        }
    }

    /// Requested room count before engine clamping
    pub fn rooms_total(&self) -> usize {
        (self.total_due + EXTRA_ROOMS).max(MIN_DAY_ROOMS)
    }

    /// Requested unlocked count before engine clamping; the start room counts
    pub fn unlocked(&self) -> usize {
        (self.completed + 1).max(1)
    }

    pub fn map_params(&self, seed: u32) -> MapParams {
        MapParams::new(self.rooms_total() as i64, self.unlocked() as i64, seed)
    }

    pub fn all_done(&self) -> bool {
        self.total_due > 0 && self.completed >= self.total_due
    }
}
