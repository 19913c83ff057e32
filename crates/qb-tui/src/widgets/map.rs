//! Map display widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use qb_core::dungeon::{DungeonMap, Glyph, GlyphSet, Point};
use qb_core::{MAP_HEIGHT, MAP_WIDTH};

use crate::theme::Theme;

/// Rows the map panel needs, block border included
pub const MAP_PANEL_HEIGHT: u16 = MAP_HEIGHT as u16 + 2;
/// Columns the map panel needs, block border included
pub const MAP_PANEL_WIDTH: u16 = MAP_WIDTH as u16 + 2;

/// Widget for rendering a day's dungeon map
pub struct MapWidget<'a> {
    map: &'a DungeonMap,
    glyphs: &'a dyn GlyphSet,
    theme: &'a Theme,
    title: &'a str,
}

impl<'a> MapWidget<'a> {
    pub fn new(map: &'a DungeonMap, glyphs: &'a dyn GlyphSet, theme: &'a Theme) -> Self {
        Self {
            map,
            glyphs,
            theme,
            title: "Dungeon",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    fn cell_display(&self, glyph: Glyph) -> (char, Style) {
        let mut style = Style::default().fg(self.theme.glyph_color(glyph));
        if matches!(glyph, Glyph::Start | Glyph::Boss) {
            style = style.bold();
        }
        (self.glyphs.glyph_char(glyph), style)
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title)
            .title_style(Style::default().fg(self.theme.accent))
            .border_style(Style::default().fg(self.theme.border));

        let inner = block.inner(area);
        block.render(area, buf);

        for y in 0..MAP_HEIGHT.min(inner.height as usize) {
            for x in 0..MAP_WIDTH.min(inner.width as usize) {
                let glyph = self
                    .map
                    .glyph_at(Point::new(x as i32, y as i32))
                    .unwrap_or_default();
                let (ch, style) = self.cell_display(glyph);
                if let Some(cell) =
                    buf.cell_mut(Position::new(inner.x + x as u16, inner.y + y as u16))
                {
                    cell.set_char(ch);
                    cell.set_style(style);
                }
            }
        }
    }
}
