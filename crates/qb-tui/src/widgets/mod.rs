//! Board widgets

mod map;
mod quests;
mod status;

pub use map::{MAP_PANEL_HEIGHT, MAP_PANEL_WIDTH, MapWidget};
pub use quests::QuestListWidget;
pub use status::StatusWidget;
