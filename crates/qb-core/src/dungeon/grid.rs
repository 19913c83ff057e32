//! Glyph grid and the paint passes that fill it
//!
//! Passes run in a fixed order and later passes overwrite earlier ones:
//! corridors, rooms, start marker, boss marker, border.

use serde::{Deserialize, Serialize};

use super::glyph::{Glyph, GlyphSet};
use super::room::{Point, Room};
use crate::{MAP_HEIGHT, MAP_WIDTH};

/// Fixed-size row-major glyph buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Glyph>,
}

impl Grid {
    pub const WIDTH: usize = MAP_WIDTH;
    pub const HEIGHT: usize = MAP_HEIGHT;

    /// A blank grid
    pub fn new() -> Self {
        Self {
            cells: vec![Glyph::Blank; Self::WIDTH * Self::HEIGHT],
        }
    }

    fn index(p: Point) -> Option<usize> {
        p.on_map()
            .then(|| p.y as usize * Self::WIDTH + p.x as usize)
    }

    pub fn get(&self, p: Point) -> Option<Glyph> {
        Self::index(p).map(|i| self.cells[i])
    }

    /// Set a cell; points off the map are ignored
    pub fn set(&mut self, p: Point, glyph: Glyph) {
        if let Some(i) = Self::index(p) {
            self.cells[i] = glyph;
        }
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.cells.chunks(Self::WIDTH)
    }

    /// Number of cells holding `glyph`
    pub fn count(&self, glyph: Glyph) -> usize {
        self.cells.iter().filter(|g| **g == glyph).count()
    }

    /// Number of cells matching a predicate
    pub fn count_where(&self, pred: impl Fn(Glyph) -> bool) -> usize {
        self.cells.iter().filter(|g| pred(**g)).count()
    }

    /// Serialize as newline-joined rows
    pub fn to_text(&self, glyphs: &dyn GlyphSet) -> String {
        self.lines(glyphs).join("\n")
    }

    pub fn lines(&self, glyphs: &dyn GlyphSet) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|g| glyphs.glyph_char(*g)).collect())
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

pub fn paint_corridors(grid: &mut Grid, corridors: &[Point]) {
    for cell in corridors {
        grid.set(*cell, Glyph::Corridor);
    }
}

pub fn paint_rooms(grid: &mut Grid, rooms: &[Room]) {
    for room in rooms {
        let glyph = if room.locked {
            Glyph::LockedRoom
        } else {
            Glyph::UnlockedRoom
        };
        grid.set(room.pos, glyph);
    }
}

pub fn paint_start(grid: &mut Grid) {
    grid.set(Point::center(), Glyph::Start);
}

/// Mark the last placed room as the boss once the board is cleared
pub fn paint_boss(grid: &mut Grid, rooms: &[Room], cleared: bool) {
    if !cleared {
        return;
    }
    if let Some(last) = rooms.last() {
        grid.set(last.pos, Glyph::Boss);
    }
}

pub fn paint_border(grid: &mut Grid) {
    let right = Grid::WIDTH as i32 - 1;
    let bottom = Grid::HEIGHT as i32 - 1;

    for x in 0..=right {
        grid.set(Point::new(x, 0), Glyph::HBorder);
        grid.set(Point::new(x, bottom), Glyph::HBorder);
    }
    for y in 0..=bottom {
        grid.set(Point::new(0, y), Glyph::VBorder);
        grid.set(Point::new(right, y), Glyph::VBorder);
    }

    grid.set(Point::new(0, 0), Glyph::TopLeft);
    grid.set(Point::new(right, 0), Glyph::TopRight);
    grid.set(Point::new(0, bottom), Glyph::BottomLeft);
    grid.set(Point::new(right, bottom), Glyph::BottomRight);
}

/// Run every paint pass over a fresh grid
pub fn render(rooms: &[Room], corridors: &[Point], cleared: bool) -> Grid {
    let mut grid = Grid::new();
    paint_corridors(&mut grid, corridors);
    paint_rooms(&mut grid, rooms);
    paint_start(&mut grid);
    paint_boss(&mut grid, rooms, cleared);
    paint_border(&mut grid);
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::glyph::ClassicGlyphs;

    fn sample_rooms() -> Vec<Room> {
        let mut second = Room::placed(Point::new(19, 8), 1);
        second.locked = false;
        vec![
            Room::start(),
            second,
            Room::placed(Point::new(19, 6), 2),
        ]
    }

    #[test]
    fn test_blank_grid_dimensions() {
        let grid = Grid::new();
        let text = grid.to_text(&ClassicGlyphs);
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 17);
        assert!(lines.iter().all(|l| l.chars().count() == 35));
    }

    #[test]
    fn test_off_map_writes_ignored() {
        let mut grid = Grid::new();
        grid.set(Point::new(-1, 3), Glyph::Corridor);
        grid.set(Point::new(35, 3), Glyph::Corridor);
        assert_eq!(grid.count(Glyph::Corridor), 0);
        assert_eq!(grid.get(Point::new(-1, 3)), None);
    }

    #[test]
    fn test_room_overrides_corridor() {
        let mut grid = Grid::new();
        let p = Point::new(5, 5);
        paint_corridors(&mut grid, &[p]);
        paint_rooms(&mut grid, &[Room::placed(p, 3)]);
        assert_eq!(grid.get(p), Some(Glyph::LockedRoom));
    }

    #[test]
    fn test_start_overrides_room() {
        let grid = render(&sample_rooms(), &[], false);
        assert_eq!(grid.get(Point::center()), Some(Glyph::Start));
        assert_eq!(grid.get(Point::new(19, 8)), Some(Glyph::UnlockedRoom));
        assert_eq!(grid.get(Point::new(19, 6)), Some(Glyph::LockedRoom));
    }

    #[test]
    fn test_boss_only_when_cleared() {
        let rooms = sample_rooms();
        let grid = render(&rooms, &[], false);
        assert_eq!(grid.count(Glyph::Boss), 0);

        let grid = render(&rooms, &[], true);
        assert_eq!(grid.get(Point::new(19, 6)), Some(Glyph::Boss));
        assert_eq!(grid.count(Glyph::Boss), 1);
    }

    #[test]
    fn test_boss_overrides_start_when_alone() {
        let grid = render(&[Room::start()], &[], true);
        assert_eq!(grid.get(Point::center()), Some(Glyph::Boss));
    }

    #[test]
    fn test_border_overrides_interior() {
        let corridors = [Point::new(0, 8), Point::new(34, 4)];
        let grid = render(&sample_rooms(), &corridors, false);
        assert_eq!(grid.get(Point::new(0, 8)), Some(Glyph::VBorder));
        assert_eq!(grid.get(Point::new(34, 4)), Some(Glyph::VBorder));
    }

    #[test]
    fn test_corners_painted_last() {
        let grid = render(&[], &[], false);
        assert_eq!(grid.get(Point::new(0, 0)), Some(Glyph::TopLeft));
        assert_eq!(grid.get(Point::new(34, 0)), Some(Glyph::TopRight));
        assert_eq!(grid.get(Point::new(0, 16)), Some(Glyph::BottomLeft));
        assert_eq!(grid.get(Point::new(34, 16)), Some(Glyph::BottomRight));
        assert_eq!(grid.count(Glyph::HBorder), 2 * 33);
        assert_eq!(grid.count(Glyph::VBorder), 2 * 15);
    }

    #[test]
    fn test_classic_text() {
        let grid = render(&sample_rooms(), &[Point::new(18, 8), Point::new(19, 7)], false);
        let lines = grid.lines(&ClassicGlyphs);
        assert_eq!(lines[0], format!("+{}+", "-".repeat(33)));
        assert_eq!(&lines[8][16..20], " @.o");
        assert_eq!(&lines[7][18..20], " .");
        assert_eq!(&lines[6][18..20], " #");
    }
}
