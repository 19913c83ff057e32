//! Quest records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Where a quest sits on the board
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    #[default]
    Backlog,
    Doing,
    Done,
}

impl QuestStatus {
    /// Next status in the backlog → doing → done → backlog cycle
    pub fn cycle(self) -> Self {
        match self {
            QuestStatus::Backlog => QuestStatus::Doing,
            QuestStatus::Doing => QuestStatus::Done,
            QuestStatus::Done => QuestStatus::Backlog,
        }
    }

    pub fn is_done(self) -> bool {
        self == QuestStatus::Done
    }
}

/// A stored quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub status: QuestStatus,
    /// Day the quest counts toward
    pub due: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new quest
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewQuest {
    pub title: String,
    pub note: String,
    pub status: Option<QuestStatus>,
    pub due: Option<NaiveDate>,
}

impl NewQuest {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update; `None` leaves a field untouched
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestPatch {
    pub title: Option<String>,
    pub note: Option<String>,
    pub status: Option<QuestStatus>,
    pub due: Option<NaiveDate>,
}

impl QuestPatch {
    pub fn status(status: QuestStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.note.is_none() && self.status.is_none() && self.due.is_none()
    }
}
