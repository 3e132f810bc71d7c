use thiserror::Error;

use crate::difficulty::Difficulty;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("phrase list for `{0}` is missing or empty")]
    EmptyPhraseList(Difficulty),

    #[error("phrase {index} for `{difficulty}` is empty")]
    EmptyPhrase { difficulty: Difficulty, index: usize },

    #[error("unknown difficulty `{0}` in phrase corpus")]
    UnknownDifficulty(String),

    #[error("embedded phrase file `{0}` not found")]
    MissingCorpus(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("History log error: {0}")]
    History(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
