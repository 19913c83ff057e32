//! Rooms and walk directions

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{MAP_HEIGHT, MAP_WIDTH, START_LABEL};

/// Low bits discarded from a draw before picking a direction
const DRAW_SHIFT: u32 = 16;

/// Grid coordinate. Signed because the walk cursor may leave the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center cell of the map, where the start room sits
    pub const fn center() -> Self {
        Self::new((MAP_WIDTH / 2) as i32, (MAP_HEIGHT / 2) as i32)
    }

    /// True when the point is inside the border margin
    pub const fn is_interior(&self) -> bool {
        self.x >= 1
            && self.x <= MAP_WIDTH as i32 - 2
            && self.y >= 1
            && self.y <= MAP_HEIGHT as i32 - 2
    }

    /// True when the point is anywhere on the map, border included
    pub const fn on_map(&self) -> bool {
        self.x >= 0 && self.x < MAP_WIDTH as i32 && self.y >= 0 && self.y < MAP_HEIGHT as i32
    }

    /// Point `distance` cells away in `dir`
    pub const fn step(&self, dir: Direction, distance: i32) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }

    /// Cell halfway between two points
    pub const fn midpoint(&self, other: &Point) -> Self {
        Self::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }
}

/// Cardinal walk directions, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum Direction {
    East = 0,
    West = 1,
    South = 2,
    North = 3,
}

impl Direction {
    const ORDER: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];

    /// Direction selected by a raw generator value.
    ///
    /// Uses bits 16..18: the low two bits of the LCG only cycle with
    /// period 4, which would pin the walk to a closed square.
    pub const fn from_draw(value: u32) -> Self {
        Self::ORDER[((value >> DRAW_SHIFT) % 4) as usize]
    }

    /// Unit offset, y growing downward
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
            Direction::North => (0, -1),
        }
    }
}

/// A placed room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub pos: Point,
    pub locked: bool,
    pub label: char,
}

impl Room {
    /// The unlocked start room at the map center
    pub fn start() -> Self {
        Self {
            pos: Point::center(),
            locked: false,
            label: START_LABEL,
        }
    }

    /// A locked room labelled with the last digit of its placement index
    pub fn placed(pos: Point, index: usize) -> Self {
        let label = char::from_digit((index % 10) as u32, 10).unwrap_or('0');
        Self {
            pos,
            locked: true,
            label,
        }
    }
}
