//! Board options and configuration file handling
//!
//! The file is rc-style: `OPTIONS=` lines holding comma-separated options,
//! `#` comments. Booleans are negated with `!name` or `noname`; valued
//! options take `name:value` or `name=value`, split at whichever comes
//! first. `datafile` takes the rest of its line so paths may hold commas.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dungeon::GraphicsMode;
use crate::DRAWS_PER_ROOM;

/// Options parsing error
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("Missing value for option '{0}'")]
    MissingValue(String),
}

/// User-configurable options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardOptions {
    pub graphics: GraphicsMode,
    pub color: bool,
    /// Quest store location; `None` means the platform default
    pub datafile: Option<PathBuf>,
    /// Generator draws allowed per requested room
    pub draw_budget: usize,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            graphics: GraphicsMode::Auto,
            color: true,
            datafile: None,
            draw_budget: DRAWS_PER_ROOM,
        }
    }
}

impl BoardOptions {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_config(&contents)
    }

    /// Load options, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, OptionsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.strip_prefix("OPTIONS=") {
                Some(opts) => {
                    for opt in split_options(opts) {
                        options.parse_option(opt)?;
                    }
                }
                None => warn!("ignoring config line: {}", line),
            }
        }

        Ok(options)
    }

    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if let Some((key, value)) = split_key_value(opt) {
            return self.set_option(key.trim(), value.trim());
        }

        let (negated, name) = if let Some(name) = opt.strip_prefix('!') {
            (true, name)
        } else if let Some(name) = opt.strip_prefix("no") {
            (true, name)
        } else {
            (false, opt)
        };
        self.set_bool_option(name, !negated)
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "color" | "colour" => self.color = value,
            "graphics" | "datafile" | "draw_budget" => {
                return Err(OptionsError::MissingValue(name.to_string()));
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());
        if value.is_empty() {
            return Err(OptionsError::MissingValue(name.to_string()));
        }

        match name {
            "graphics" => self.graphics = GraphicsMode::from_str(value).map_err(|_| invalid())?,
            "datafile" => self.datafile = Some(PathBuf::from(value)),
            "draw_budget" => {
                let budget: usize = value.parse().map_err(|_| invalid())?;
                if budget == 0 {
                    return Err(invalid());
                }
                self.draw_budget = budget;
            }
            "color" | "colour" => {
                self.color = match value.to_lowercase().as_str() {
                    "on" | "true" | "yes" | "1" => true,
                    "off" | "false" | "no" | "0" => false,
                    _ => return Err(invalid()),
                };
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        std::fs::write(path, self.to_config_string())?;
        Ok(())
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        let mut lines = vec!["# questboard configuration".to_string(), String::new()];
        lines.push(format!("OPTIONS=graphics:{}", self.graphics));
        lines.push(format!(
            "OPTIONS={}",
            if self.color { "color" } else { "!color" }
        ));
        lines.push(format!("OPTIONS=draw_budget:{}", self.draw_budget));
        if let Some(ref path) = self.datafile {
            lines.push(format!("OPTIONS=datafile:{}", path.display()));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Options that swallow the rest of their line, commas included
const REST_OF_LINE_OPTIONS: &[&str] = &["datafile"];

/// Split at the first `:` or `=`, whichever comes first
fn split_key_value(opt: &str) -> Option<(&str, &str)> {
    opt.find([':', '=']).map(|i| (&opt[..i], &opt[i + 1..]))
}

/// Comma-separated options of one `OPTIONS=` line
fn split_options(line: &str) -> Vec<&str> {
    let mut opts = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        let takes_rest = split_key_value(rest)
            .is_some_and(|(key, _)| REST_OF_LINE_OPTIONS.contains(&key.trim()));
        let (opt, tail) = if takes_rest {
            (rest, "")
        } else {
            rest.split_once(',').unwrap_or((rest, ""))
        };
        let opt = opt.trim();
        if !opt.is_empty() {
            opts.push(opt);
        }
        rest = tail;
    }
    opts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = BoardOptions::default();
        assert_eq!(opts.graphics, GraphicsMode::Auto);
        assert!(opts.color);
        assert_eq!(opts.draw_budget, 50);
        assert!(opts.datafile.is_none());
    }

    #[test]
    fn test_parse_bool_option() {
        let opts = BoardOptions::parse_config("OPTIONS=!color").unwrap();
        assert!(!opts.color);
        let opts = BoardOptions::parse_config("OPTIONS=nocolor\nOPTIONS=color").unwrap();
        assert!(opts.color);
    }

    #[test]
    fn test_parse_value_options() {
        let config = "# mine\nOPTIONS=graphics:classic, draw_budget=80\nOPTIONS=datafile:/tmp/q.json";
        let opts = BoardOptions::parse_config(config).unwrap();
        assert_eq!(opts.graphics, GraphicsMode::Classic);
        assert_eq!(opts.draw_budget, 80);
        assert_eq!(opts.datafile, Some(PathBuf::from("/tmp/q.json")));
    }

    #[test]
    fn test_unknown_option() {
        let err = BoardOptions::parse_config("OPTIONS=autopickup").unwrap_err();
        assert!(matches!(err, OptionsError::UnknownOption(ref o) if o == "autopickup"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            BoardOptions::parse_config("OPTIONS=draw_budget:0"),
            Err(OptionsError::InvalidValue(..))
        ));
        assert!(matches!(
            BoardOptions::parse_config("OPTIONS=graphics:sparkly"),
            Err(OptionsError::InvalidValue(..))
        ));
        assert!(matches!(
            BoardOptions::parse_config("OPTIONS=graphics"),
            Err(OptionsError::MissingValue(..))
        ));
    }

    #[test]
    fn test_roundtrip() {
        let opts = BoardOptions {
            graphics: GraphicsMode::Fancy,
            color: false,
            datafile: Some(PathBuf::from("/srv/quests.json")),
            draw_budget: 75,
        };
        let parsed = BoardOptions::parse_config(&opts.to_config_string()).unwrap();
        assert_eq!(parsed, opts);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("qb-core-no-such-rc");
        let opts = BoardOptions::load_or_default(&path).unwrap();
        assert_eq!(opts, BoardOptions::default());
    }

    #[test]
    fn test_datafile_path_with_comma_roundtrip() {
        let opts = BoardOptions {
            datafile: Some(PathBuf::from("/home/me/quests,2026.json")),
            ..BoardOptions::default()
        };
        let parsed = BoardOptions::parse_config(&opts.to_config_string()).unwrap();
        assert_eq!(parsed, opts);

        // Options before datafile on the same line still split on commas
        let parsed = BoardOptions::parse_config("OPTIONS=!color,datafile:/a,b.json").unwrap();
        assert!(!parsed.color);
        assert_eq!(parsed.datafile, Some(PathBuf::from("/a,b.json")));
    }

    #[test]
    fn test_equals_value_with_colon() {
        let parsed = BoardOptions::parse_config("OPTIONS=datafile=/srv/a:b.json").unwrap();
        assert_eq!(parsed.datafile, Some(PathBuf::from("/srv/a:b.json")));

        let parsed = BoardOptions::parse_config("OPTIONS=graphics=fancy,draw_budget=7").unwrap();
        assert_eq!(parsed.graphics, GraphicsMode::Fancy);
        assert_eq!(parsed.draw_budget, 7);

        // A colon path written with `:` keeps everything after the first colon
        let parsed = BoardOptions::parse_config("OPTIONS=datafile:C:/quests.json").unwrap();
        assert_eq!(parsed.datafile, Some(PathBuf::from("C:/quests.json")));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("qb-core-rc-{}", std::process::id()));
        let opts = BoardOptions {
            graphics: GraphicsMode::Classic,
            draw_budget: 10,
            ..BoardOptions::default()
        };
        opts.save_to_file(&path).unwrap();
        assert_eq!(BoardOptions::load_from_file(&path).unwrap(), opts);
        let _ = std::fs::remove_file(&path);
    }
}
