//! Terminal color theme system
//!
//! Provides palettes for dark and light terminal backgrounds.
//! Auto-detects via the COLORFGBG env var, or manual override with
//! QB_LIGHT_BG=1. `plain()` leaves every color to the terminal.

use qb_core::dungeon::Glyph;
use qb_store::QuestStatus;
use ratatui::style::Color;

/// Color theme for terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    // General UI text
    /// Primary foreground text
    pub text: Color,
    /// Secondary/hint text (footers, instructions)
    pub text_dim: Color,
    /// Muted text (empty states, placeholder)
    pub text_muted: Color,

    // Borders
    pub border: Color,
    /// Informational border (help)
    pub border_accent: Color,

    // Interactive elements
    pub cursor_fg: Color,
    pub cursor_bg: Color,

    // Semantic colors
    pub accent: Color,
    pub good: Color,
    pub bad: Color,

    // Map glyphs
    pub map_corridor: Color,
    pub map_locked: Color,
    pub map_unlocked: Color,
    pub map_start: Color,
    pub map_boss: Color,
    pub map_border: Color,

    // Quest status
    pub status_backlog: Color,
    pub status_doing: Color,
    pub status_done: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            text_muted: Color::Gray,
            border: Color::White,
            border_accent: Color::Cyan,
            cursor_fg: Color::Yellow,
            cursor_bg: Color::DarkGray,
            accent: Color::Cyan,
            good: Color::Green,
            bad: Color::Red,
            map_corridor: Color::DarkGray,
            map_locked: Color::Gray,
            map_unlocked: Color::Green,
            map_start: Color::Cyan,
            map_boss: Color::Red,
            map_border: Color::Gray,
            status_backlog: Color::Gray,
            status_doing: Color::Yellow,
            status_done: Color::Green,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            text_muted: Color::DarkGray,
            border: Color::DarkGray,
            border_accent: Color::Blue,
            cursor_fg: Color::Yellow,
            cursor_bg: Color::DarkGray,
            accent: Color::Blue,
            good: Color::Green,
            bad: Color::Red,
            map_corridor: Color::Gray,
            map_locked: Color::DarkGray,
            map_unlocked: Color::Green,
            map_start: Color::Blue,
            map_boss: Color::Red,
            map_border: Color::DarkGray,
            status_backlog: Color::DarkGray,
            status_doing: Color::Yellow,
            status_done: Color::Green,
        }
    }

    /// Every color left to the terminal defaults
    pub fn plain() -> Self {
        Self {
            text: Color::Reset,
            text_dim: Color::Reset,
            text_muted: Color::Reset,
            border: Color::Reset,
            border_accent: Color::Reset,
            cursor_fg: Color::Reset,
            cursor_bg: Color::Reset,
            accent: Color::Reset,
            good: Color::Reset,
            bad: Color::Reset,
            map_corridor: Color::Reset,
            map_locked: Color::Reset,
            map_unlocked: Color::Reset,
            map_start: Color::Reset,
            map_boss: Color::Reset,
            map_border: Color::Reset,
            status_backlog: Color::Reset,
            status_doing: Color::Reset,
            status_done: Color::Reset,
        }
    }

    /// Auto-detect terminal background and return appropriate theme.
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Theme from the `color` option
    pub fn for_color(color: bool) -> Self {
        if color { Self::detect() } else { Self::plain() }
    }

    pub fn glyph_color(&self, glyph: Glyph) -> Color {
        match glyph {
            Glyph::Blank => Color::Reset,
            Glyph::Corridor => self.map_corridor,
            Glyph::LockedRoom => self.map_locked,
            Glyph::UnlockedRoom => self.map_unlocked,
            Glyph::Start => self.map_start,
            Glyph::Boss => self.map_boss,
            _ => self.map_border,
        }
    }

    pub fn status_color(&self, status: QuestStatus) -> Color {
        match status {
            QuestStatus::Backlog => self.status_backlog,
            QuestStatus::Doing => self.status_doing,
            QuestStatus::Done => self.status_done,
        }
    }

    fn is_light_background() -> bool {
        if let Ok(val) = std::env::var("QB_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is "fg;bg" with color indices (0-15)
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
