//! Status line widget

use chrono::NaiveDate;
use ratatui::prelude::*;
use ratatui::widgets::Widget;

use qb_core::DayProgress;
use qb_core::dungeon::DungeonMap;

use crate::theme::Theme;

/// One-line summary of the shown day
pub struct StatusWidget<'a> {
    date: NaiveDate,
    map: &'a DungeonMap,
    progress: DayProgress,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(
        date: NaiveDate,
        map: &'a DungeonMap,
        progress: DayProgress,
        theme: &'a Theme,
    ) -> Self {
        Self {
            date,
            map,
            progress,
            theme,
        }
    }

    pub fn text(&self) -> String {
        let p = &self.map.params;
        let mut line = format!(
            "{} rooms:{}/{} unlocked:{} seed:{} quests:{}/{}",
            self.date.format("%Y-%m-%d"),
            self.map.placed(),
            p.rooms_total,
            self.map.unlocked_rooms(),
            p.seed,
            self.progress.completed,
            self.progress.total_due,
        );
        if self.map.boss_room().is_some() {
            line.push_str(" cleared");
        } else if self.progress.all_done() {
            line.push_str(" all done");
        }
        line
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = if self.map.boss_room().is_some() {
            self.theme.good
        } else if self.progress.all_done() {
            self.theme.accent
        } else {
            self.theme.text
        };
        let line = self.text();
        buf.set_string(area.x, area.y, &line, Style::default().fg(color));
    }
}
