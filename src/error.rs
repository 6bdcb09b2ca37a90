use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a usable pool of records.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no usable term,definition rows in {0:?}")]
    Empty(PathBuf),

    #[error("failed to scan {path:?}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no csv files found in {0:?}")]
    NoFiles(PathBuf),
}

/// Not enough unused records are left to build a question.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("requires {required} unused records but only {available} remain")]
pub struct Insufficient {
    pub required: usize,
    pub available: usize,
}

/// Preferences that can not be satisfied by the pool.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PreferencesError {
    #[error("Only {pool_size} questions possible with current data.")]
    TooManyQuestions { requested: usize, pool_size: usize },

    #[error("Choices must be between 2 and {pool_size}.")]
    ChoicesOutOfRange { choices: usize, pool_size: usize },

    #[error("You must create at least one question!")]
    NoQuestions,

    #[error("You're requesting {total} questions but only have {pool_size} terms.")]
    TotalExceedsPool { total: usize, pool_size: usize },
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("invalid preferences: {0}")]
    Preferences(#[from] PreferencesError),

    #[error("failed to parse preferences file {path:?}: {source}")]
    PreferencesFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}
