use crate::word_source::{CategoryId, WordId};
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a word source or its backing stores.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid word bank: {0}")]
    InvalidWordBank(String),
    #[error("no category matches '{0}'")]
    UnknownCategory(String),
    #[error("category {0} does not exist")]
    MissingCategory(CategoryId),
    #[error("word {0} does not exist")]
    UnknownWord(WordId),
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("no user is signed in (pass --user or set VOCAB_QUIZ_USER)")]
    NotSignedIn,
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
