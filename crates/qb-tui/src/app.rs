//! Main application state and logic

use chrono::{Days, NaiveDate};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, warn};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use qb_core::dungeon::{DungeonMap, Glyph, GlyphSet};
use qb_core::{DayProgress, seed_for_date};
use qb_store::{Quest, QuestPatch, QuestStore, StoreError};

use crate::input::{Command, key_to_command};
use crate::theme::Theme;
use crate::widgets::{MAP_PANEL_HEIGHT, MapWidget, QuestListWidget, StatusWidget};

/// UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Normal,
    Help,
}

/// Application state
pub struct App {
    store: QuestStore,

    /// Day being shown
    date: NaiveDate,

    /// Day `t` jumps back to
    today: NaiveDate,

    /// Map for `date`, rebuilt after every change
    map: DungeonMap,

    /// Generator draws allowed per requested room
    draws_per_room: usize,

    /// Index into the shown day's quests
    cursor: usize,

    mode: UiMode,

    should_quit: bool,

    /// Last error, shown under the status line
    message: Option<String>,

    /// Color theme (adapts to light/dark terminal background)
    theme: Theme,

    /// Glyph set for rendering map features
    glyph_set: Box<dyn GlyphSet>,
}

impl App {
    pub fn new(
        store: QuestStore,
        today: NaiveDate,
        theme: Theme,
        glyph_set: Box<dyn GlyphSet>,
        draws_per_room: usize,
    ) -> Self {
        let map = build_map(&store, today, draws_per_room);
        Self {
            store,
            date: today,
            today,
            map,
            draws_per_room,
            cursor: 0,
            mode: UiMode::Normal,
            should_quit: false,
            message: None,
            theme,
            glyph_set,
        }
    }

    pub fn store(&self) -> &QuestStore {
        &self.store
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn map(&self) -> &DungeonMap {
        &self.map
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Quests due on the shown day, newest first
    pub fn quests(&self) -> Vec<&Quest> {
        self.store.due_on(self.date)
    }

    pub fn progress(&self) -> DayProgress {
        self.store.progress_for(self.date)
    }

    /// Handle input event - returns a command if one should be executed
    pub fn handle_event(&mut self, event: Event) -> Option<Command> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match self.mode {
            UiMode::Normal => key_to_command(key),
            UiMode::Help => {
                self.handle_help_input(key);
                None
            }
        }
    }

    /// Handle input when viewing help
    fn handle_help_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('?') | KeyCode::Char('q') => {
                self.mode = UiMode::Normal;
            }
            _ => {}
        }
    }

    /// Run a command; store failures end up in `message()`
    pub fn execute(&mut self, command: Command) {
        if let Err(e) = self.try_execute(command) {
            warn!("{}", e);
            self.message = Some(e.to_string());
        }
    }

    fn try_execute(&mut self, command: Command) -> Result<(), StoreError> {
        match command {
            Command::Up => self.cursor = self.cursor.saturating_sub(1),
            Command::Down => {
                let len = self.quests().len();
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
            }
            Command::CycleStatus => self.cycle_selected()?,
            Command::PrevDay => self.show_day(self.date.checked_sub_days(Days::new(1))),
            Command::NextDay => self.show_day(self.date.checked_add_days(Days::new(1))),
            Command::Today => self.show_day(Some(self.today)),
            Command::Help => self.mode = UiMode::Help,
            Command::Redraw => {}
            Command::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn cycle_selected(&mut self) -> Result<(), StoreError> {
        let Some((id, status)) = self
            .quests()
            .get(self.cursor)
            .map(|q| (q.id, q.status))
        else {
            return Ok(());
        };
        self.store.update(id, QuestPatch::status(status.cycle()))?;
        self.store.save()?;
        self.message = None;
        self.regenerate();
        Ok(())
    }

    fn show_day(&mut self, date: Option<NaiveDate>) {
        let Some(date) = date else {
            return;
        };
        self.date = date;
        self.cursor = 0;
        self.regenerate();
    }

    /// Rebuild the map from the store's progress for the shown day
    pub fn regenerate(&mut self) {
        self.map = build_map(&self.store, self.date, self.draws_per_room);
        let len = self.quests().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    /// Render the UI
    pub fn render(&self, frame: &mut Frame) {
        // Layout: map at top, status below it, then the day's quests
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(MAP_PANEL_HEIGHT), // Map + border
                Constraint::Length(1),                // Status line
                Constraint::Length(1),                // Message
                Constraint::Min(3),                   // Quests
            ])
            .split(frame.area());

        let title = format!("Dungeon {}", self.date.format("%Y-%m-%d"));
        let map_widget =
            MapWidget::new(&self.map, self.glyph_set.as_ref(), &self.theme).title(&title);
        frame.render_widget(map_widget, chunks[0]);

        let status_widget = StatusWidget::new(self.date, &self.map, self.progress(), &self.theme);
        frame.render_widget(status_widget, chunks[1]);

        let hint = match &self.message {
            Some(msg) => Paragraph::new(msg.as_str()).style(Style::default().fg(self.theme.bad)),
            None => Paragraph::new("? help  [ ] day  t today  space status  q quit")
                .style(Style::default().fg(self.theme.text_dim)),
        };
        frame.render_widget(hint, chunks[2]);

        let quests = self.quests();
        let selected = (!quests.is_empty()).then_some(self.cursor);
        let list_title = format!("Quests due {}", self.date.format("%Y-%m-%d"));
        let list = QuestListWidget::new(&quests, &self.theme)
            .title(&list_title)
            .selected(selected);
        frame.render_widget(list, chunks[3]);

        if self.mode == UiMode::Help {
            self.render_help(frame);
        }
    }

    /// Help overlay text; the map legend uses the active glyph set
    pub fn help_text(&self) -> String {
        let g = |glyph| self.glyph_set.glyph_char(glyph);
        format!(
            r#"Quests:
  j / Down     Next quest
  k / Up       Previous quest
  Space/Enter  Cycle status (backlog, doing, done)

Days:
  [ / Left     Previous day
  ] / Right    Next day
  t            Today

Map:
  {} start   {} open room   {} locked room   {} corridor
  {} boss (every room open)

  ?  Help        q  Quit

Press ESC or SPACE to close"#,
            g(Glyph::Start),
            g(Glyph::UnlockedRoom),
            g(Glyph::LockedRoom),
            g(Glyph::Corridor),
            g(Glyph::Boss),
        )
    }

    /// Render help overlay
    fn render_help(&self, frame: &mut Frame) {
        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_accent));

        let paragraph = Paragraph::new(self.help_text())
            .block(block)
            .style(Style::default().fg(self.theme.text));

        frame.render_widget(paragraph, area);
    }
}

fn build_map(store: &QuestStore, date: NaiveDate, draws_per_room: usize) -> DungeonMap {
    let params = store
        .progress_for(date)
        .map_params(seed_for_date(date))
        .with_draws_per_room(draws_per_room);
    debug!("building map for {}", date);
    DungeonMap::build(params)
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use qb_core::dungeon::{ClassicGlyphs, FancyGlyphs};
    use qb_store::{NewQuest, QuestStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn app_with(name: &str, titles: &[&str]) -> App {
        let mut path = std::env::temp_dir();
        path.push(format!("qb-tui-app-{}-{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&path);
        path.push("quests.json");

        let mut store = QuestStore::open(&path).unwrap();
        for title in titles {
            store.create(NewQuest::titled(*title), today()).unwrap();
        }
        App::new(store, today(), Theme::dark(), Box::new(ClassicGlyphs), 50)
    }

    fn press(app: &mut App, code: KeyCode) {
        let event = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        if let Some(cmd) = app.handle_event(event) {
            app.execute(cmd);
        }
    }

    #[test]
    fn test_map_follows_progress() {
        let app = app_with("progress", &["a", "b", "c"]);
        assert_eq!(app.map().params.rooms_total, 6);
        assert_eq!(app.map().params.unlocked, 1);
        assert_eq!(app.map().params.seed, 20261018);
    }

    #[test]
    fn test_cursor_stays_in_range() {
        let mut app = app_with("cursor", &["a", "b"]);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor(), 0);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor(), 1);
    }

    #[test]
    fn test_cycle_status_unlocks_room() {
        let mut app = app_with("cycle", &["a", "b"]);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.quests()[0].status, QuestStatus::Doing);
        assert_eq!(app.map().params.unlocked, 1);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.quests()[0].status, QuestStatus::Done);
        assert_eq!(app.map().params.unlocked, 2);
        assert_eq!(app.progress(), DayProgress::new(2, 1));

        // Saved to disk
        let reopened = QuestStore::open(app.store().path()).unwrap();
        assert_eq!(reopened.progress_for(today()), DayProgress::new(2, 1));
    }

    #[test]
    fn test_cycle_on_empty_day_is_noop() {
        let mut app = app_with("empty", &[]);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.message().is_none());
        assert_eq!(app.map().params.rooms_total, 5);
    }

    #[test]
    fn test_day_navigation() {
        let mut app = app_with("days", &["a"]);
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.date(), today().succ_opt().unwrap());
        assert_eq!(app.map().params.seed, 20261019);
        assert!(app.quests().is_empty());

        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.map().params.seed, 20261017);

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.date(), today());
        assert_eq!(app.quests().len(), 1);
    }

    #[test]
    fn test_help_mode_swallows_keys() {
        let mut app = app_with("help", &["a"]);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode(), UiMode::Help);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.mode(), UiMode::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode(), UiMode::Normal);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_help_legend_follows_glyph_set() {
        let classic = app_with("legend-classic", &[]);
        let text = classic.help_text();
        assert!(text.contains("@ start"));
        assert!(text.contains("# locked room"));
        assert!(text.contains("B boss"));

        let mut path = std::env::temp_dir();
        path.push(format!("qb-tui-app-{}-legend-fancy", std::process::id()));
        let _ = std::fs::remove_dir_all(&path);
        path.push("quests.json");
        let store = QuestStore::open(&path).unwrap();
        let fancy = App::new(store, today(), Theme::dark(), Box::new(FancyGlyphs), 50);
        let text = fancy.help_text();
        assert!(text.contains("◎ start"));
        assert!(text.contains("□ open room"));
        assert!(text.contains("■ locked room"));
        assert!(text.contains("☠ boss"));
        assert!(!text.contains("@ start"));
    }

    #[test]
    fn test_quit() {
        let mut app = app_with("quit", &[]);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_centered_rect_fits() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 50, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
    }
}
