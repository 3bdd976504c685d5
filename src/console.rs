//! Developer console: the sink for `Logged`-tier errors.
//!
//! Entries are appended as JSON lines to `~/.botdash/console.jsonl` and can
//! be echoed to stderr. All file I/O is best-effort; a console that cannot
//! write never interrupts the dashboard.

use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::config::schema::ConsoleConfig;

/// A single developer-console entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleEntry {
    pub timestamp: String,
    /// Which routine produced the entry, e.g. `"Failed to load models"`.
    pub source: String,
    pub message: String,
}

/// Where console entries go.
#[derive(Debug, Clone)]
pub struct ConsoleLog {
    path: Option<PathBuf>,
    echo: bool,
}

impl ConsoleLog {
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self {
            path: if config.enabled {
                console_log_path()
            } else {
                None
            },
            echo: config.echo,
        }
    }

    /// Console writing to an explicit file (no stderr echo).
    pub fn at(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            echo: false,
        }
    }

    /// Console that drops everything.
    pub fn disabled() -> Self {
        Self {
            path: None,
            echo: false,
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Record one entry.
    pub fn error(&self, source: &str, message: &str) {
        if self.echo {
            eprintln!("{}", format!("[console] {source}: {message}").dimmed());
        }

        let entry = ConsoleEntry {
            timestamp: Utc::now().to_rfc3339(),
            source: source.to_string(),
            message: message.to_string(),
        };
        let _ = self.append(&entry);
    }

    fn append(&self, entry: &ConsoleEntry) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let json = serde_json::to_string(entry)?;
        writeln!(file, "{json}")?;

        Ok(())
    }

    /// Read the last `limit` entries, oldest first.
    ///
    /// Silently skips malformed lines; a missing file yields no entries.
    pub fn tail(&self, limit: usize) -> Vec<ConsoleEntry> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        let Ok(file) = fs::File::open(path) else {
            return Vec::new();
        };

        let entries: Vec<ConsoleEntry> = BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect();

        let skip = entries.len().saturating_sub(limit);
        entries.into_iter().skip(skip).collect()
    }
}

/// Return the path to the console log file.
pub fn console_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".botdash").join("console.jsonl"))
}
