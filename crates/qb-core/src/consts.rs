//! Engine constants

/// Map dimensions, border included
pub const MAP_WIDTH: usize = 35;
pub const MAP_HEIGHT: usize = 17;

/// Room count limits applied to caller input
pub const MIN_ROOMS: usize = 3;
pub const MAX_ROOMS: usize = 60;

/// Default generator draws allowed per requested room before the walk gives up
pub const DRAWS_PER_ROOM: usize = 50;

/// Distance between neighbouring room cells
pub const ROOM_STEP: i32 = 2;

/// Label carried by the start room
pub const START_LABEL: char = 'S';
