use include_dir::{include_dir, Dir};
use rand::Rng;
use std::collections::BTreeMap;
use std::path::Path;

use crate::difficulty::Difficulty;
use crate::error::{GameError, Result};

static PHRASE_DIR: Dir = include_dir!("src/phrases");

const EMBEDDED_FILE: &str = "phrases.json";

/// Read-only phrase pools, one per difficulty.
///
/// Construction validates that every difficulty has at least one non-empty
/// phrase, so drawing never fails afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseCorpus {
    phrases: BTreeMap<Difficulty, Vec<String>>,
}

impl PhraseCorpus {
    pub fn new(phrases: BTreeMap<Difficulty, Vec<String>>) -> Result<Self> {
        for difficulty in Difficulty::ALL {
            let list = phrases
                .get(&difficulty)
                .filter(|list| !list.is_empty())
                .ok_or(GameError::EmptyPhraseList(difficulty))?;

            if let Some(index) = list.iter().position(|p| p.is_empty()) {
                return Err(GameError::EmptyPhrase { difficulty, index });
            }
        }

        Ok(Self { phrases })
    }

    /// The phrase set compiled into the binary
    pub fn embedded() -> Result<Self> {
        let file = PHRASE_DIR
            .get_file(EMBEDDED_FILE)
            .ok_or_else(|| GameError::MissingCorpus(EMBEDDED_FILE.to_string()))?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| GameError::MissingCorpus(EMBEDDED_FILE.to_string()))?;

        Self::from_json(contents)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse `{"easy": [...], "medium": [...], ...}`
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;

        let mut phrases = BTreeMap::new();
        for (key, list) in raw {
            let difficulty = key
                .parse::<Difficulty>()
                .map_err(|_| GameError::UnknownDifficulty(key))?;
            phrases.insert(difficulty, list);
        }

        Self::new(phrases)
    }

    pub fn phrases(&self, difficulty: Difficulty) -> &[String] {
        self.phrases
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, difficulty: Difficulty, phrase: &str) -> bool {
        self.phrases(difficulty).iter().any(|p| p == phrase)
    }

    /// Uniform random pick from the pool for `difficulty`
    pub fn draw<R: Rng>(&self, difficulty: Difficulty, rng: &mut R) -> &str {
        let list = self.phrases(difficulty);
        &list[rng.gen_range(0..list.len())]
    }
}
