use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::controller::RoundSummary;
use crate::difficulty::Difficulty;
use crate::error::Result;

/// One matched phrase, as written to the history csv
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub finished_at: String,
    pub difficulty: Difficulty,
    pub words: usize,
    pub elapsed_secs: f64,
    pub wpm: Option<u32>,
    pub score: u32,
}

impl From<&RoundSummary> for RoundRecord {
    fn from(summary: &RoundSummary) -> Self {
        Self {
            finished_at: Local::now().to_rfc3339(),
            difficulty: summary.difficulty,
            words: summary.words,
            elapsed_secs: summary.elapsed_ms as f64 / 1000.0,
            wpm: summary.wpm.value(),
            score: summary.score,
        }
    }
}

/// Append-only csv log of matched rounds
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::history_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &RoundRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // If the log doesn't exist yet, we need to emit a header
        let needs_header = !self.path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        Ok(())
    }

    pub fn read_all(&self) -> Result<Vec<RoundRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<RoundRecord>, csv::Error>>()?;
        Ok(records)
    }

    /// Best measured wpm on record for a difficulty
    pub fn best_wpm(&self, difficulty: Difficulty) -> Result<Option<u32>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|r| r.difficulty == difficulty)
            .filter_map(|r| r.wpm)
            .max())
    }
}
