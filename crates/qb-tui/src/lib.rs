//! qb-tui: terminal interface for questboard
//!
//! Shows the day's dungeon map next to the day's quests.

pub mod app;
pub mod display;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::{App, UiMode};
pub use display::detect_glyph_set;
pub use input::Command;
pub use theme::Theme;
