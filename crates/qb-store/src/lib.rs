//! qb-store: quest storage for questboard
//!
//! Quests live in a single JSON document with a versioned header.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use qb_core::DayProgress;

mod quest;

pub use quest::{NewQuest, Quest, QuestPatch, QuestStatus};

/// Current store file format version
pub const STORE_VERSION: u32 = 1;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("quest {0} not found")]
    NotFound(u64),

    #[error("title is required")]
    EmptyTitle,

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("no valid fields")]
    NoFields,

    #[error("Invalid store file header")]
    InvalidHeader,

    #[error("Incompatible store version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },
}

/// Parse a status string from outside input
pub fn parse_status(s: &str) -> Result<QuestStatus, StoreError> {
    QuestStatus::from_str(s.trim()).map_err(|_| StoreError::InvalidStatus(s.to_string()))
}

/// Store file header for versioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreHeader {
    pub magic: String,
    pub version: u32,
}

impl StoreHeader {
    const MAGIC: &'static str = "QBRS";

    pub fn new() -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: STORE_VERSION,
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.magic != Self::MAGIC {
            return Err(StoreError::InvalidHeader);
        }
        if self.version != STORE_VERSION {
            return Err(StoreError::IncompatibleVersion {
                expected: STORE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

impl Default for StoreHeader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    header: StoreHeader,
    next_id: u64,
    quests: Vec<Quest>,
}

/// Quest collection bound to a file
#[derive(Debug)]
pub struct QuestStore {
    path: PathBuf,
    file: StoreFile,
}

impl QuestStore {
    /// Open a store, starting empty if the file does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let file: StoreFile = serde_json::from_reader(reader)?;
            file.header.validate()?;
            debug!("loaded {} quests from {}", file.quests.len(), path.display());
            file
        } else {
            debug!("no store at {}, starting empty", path.display());
            StoreFile {
                next_id: 1,
                ..StoreFile::default()
            }
        };
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the store back to its file
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(writer, &self.file)?;
        debug!("saved {} quests to {}", self.file.quests.len(), self.path.display());
        Ok(())
    }

    /// All quests, newest first
    pub fn list(&self) -> Vec<&Quest> {
        let mut quests: Vec<&Quest> = self.file.quests.iter().collect();
        quests.sort_by(|a, b| b.id.cmp(&a.id));
        quests
    }

    /// Quests due on `date`, newest first
    pub fn due_on(&self, date: NaiveDate) -> Vec<&Quest> {
        self.list().into_iter().filter(|q| q.due == date).collect()
    }

    pub fn get(&self, id: u64) -> Option<&Quest> {
        self.file.quests.iter().find(|q| q.id == id)
    }

    /// Add a quest; a missing due date means `today`
    pub fn create(&mut self, new: NewQuest, today: NaiveDate) -> Result<&Quest, StoreError> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        let id = self.file.next_id.max(1);
        self.file.next_id = id + 1;
        self.file.quests.push(Quest {
            id,
            title: title.to_string(),
            note: new.note.trim().to_string(),
            status: new.status.unwrap_or_default(),
            due: new.due.unwrap_or(today),
            created_at: Utc::now(),
        });
        info!("created quest {}", id);

        self.get(id).ok_or(StoreError::NotFound(id))
    }

    /// Apply a partial update
    pub fn update(&mut self, id: u64, patch: QuestPatch) -> Result<&Quest, StoreError> {
        if patch.is_empty() {
            return Err(StoreError::NoFields);
        }
        let title = match patch.title {
            Some(ref t) if t.trim().is_empty() => return Err(StoreError::EmptyTitle),
            Some(ref t) => Some(t.trim().to_string()),
            None => None,
        };

        let quest = self
            .file
            .quests
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(title) = title {
            quest.title = title;
        }
        if let Some(note) = patch.note {
            quest.note = note.trim().to_string();
        }
        if let Some(status) = patch.status {
            quest.status = status;
        }
        if let Some(due) = patch.due {
            quest.due = due;
        }
        info!("updated quest {}", id);
        Ok(quest)
    }

    pub fn delete(&mut self, id: u64) -> Result<Quest, StoreError> {
        let idx = self
            .file
            .quests
            .iter()
            .position(|q| q.id == id)
            .ok_or(StoreError::NotFound(id))?;
        info!("deleted quest {}", id);
        Ok(self.file.quests.remove(idx))
    }

    /// Due and completed counts for a day
    pub fn progress_for(&self, date: NaiveDate) -> DayProgress {
        let due = self.due_on(date);
        let completed = due.iter().filter(|q| q.status.is_done()).count();
        DayProgress::new(due.len(), completed)
    }
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    let mut path = base.unwrap_or_else(|| PathBuf::from("."));
    path.push("questboard");
    path
}

/// Default quest store location
pub fn default_store_path() -> PathBuf {
    let mut path = app_dir(dirs::data_local_dir());
    path.push("quests.json");
    path
}

/// Default options file location
pub fn default_config_path() -> PathBuf {
    let mut path = app_dir(dirs::config_dir());
    path.push("questboardrc");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_validation() {
        assert!(StoreHeader::new().validate().is_ok());

        let bad_magic = StoreHeader {
            magic: "JUNK".to_string(),
            version: STORE_VERSION,
        };
        assert!(matches!(bad_magic.validate(), Err(StoreError::InvalidHeader)));

        let future = StoreHeader {
            magic: "QBRS".to_string(),
            version: 9,
        };
        assert!(matches!(
            future.validate(),
            Err(StoreError::IncompatibleVersion { expected: 1, found: 9 })
        ));
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status(" done ").unwrap(), QuestStatus::Done);
        assert!(matches!(parse_status("later"), Err(StoreError::InvalidStatus(s)) if s == "later"));
    }

    #[test]
    fn test_default_paths() {
        assert!(default_store_path().ends_with("questboard/quests.json"));
        assert!(default_config_path().ends_with("questboard/questboardrc"));
    }
}
