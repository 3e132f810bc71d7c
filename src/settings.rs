use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::difficulty::Difficulty;

pub const DIFFICULTY_KEY: &str = "difficulty";

/// String key-value storage that outlives one app run
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> std::io::Result<()>;
}

/// Settings persisted as a flat JSON object of strings
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::settings_path(),
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

    /// Missing file reads as empty. An unreadable or corrupt file also reads
    /// as empty and is replaced on the next `set`.
    fn read_all(&self) -> BTreeMap<String, String> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(err) => {
                warn!(%err, path = %self.path.display(), "cannot read settings");
                return BTreeMap::new();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|err| {
            warn!(%err, path = %self.path.display(), "discarding corrupt settings");
            BTreeMap::new()
        })
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> std::io::Result<()> {
        let mut values = self.read_all();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&values)?;
        fs::write(&self.path, data)
    }
}

/// In-memory store; clones share the same values
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> std::io::Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stored difficulty, falling back to the default when absent or unrecognised
pub fn load_difficulty(store: &dyn SettingsStore) -> Difficulty {
    match store.get(DIFFICULTY_KEY) {
        None => Difficulty::default(),
        Some(raw) => raw.parse().unwrap_or_else(|err| {
            warn!(%err, "ignoring stored difficulty");
            Difficulty::default()
        }),
    }
}

pub fn save_difficulty(store: &mut dyn SettingsStore, difficulty: Difficulty) -> std::io::Result<()> {
    store.set(DIFFICULTY_KEY, &difficulty.to_string())
}
