//! Quiz preferences, either typed in or read from a yaml file.

use crate::error::{PreferencesError, QuizError};
use serde::Deserialize;
use std::path::Path;

/// Choice count used when a question type is not requested.
pub const DEFAULT_CHOICES: usize = 4;

fn default_choices() -> usize {
    DEFAULT_CHOICES
}

/// Preferences as written in a yaml file, not yet checked against a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RawPreferences {
    #[serde(default)]
    pub definition_questions: usize,
    #[serde(default = "default_choices")]
    pub definition_choices: usize,
    #[serde(default)]
    pub term_questions: usize,
    #[serde(default = "default_choices")]
    pub term_choices: usize,
    #[serde(default)]
    pub true_false_questions: usize,
}

impl Default for RawPreferences {
    fn default() -> Self {
        RawPreferences {
            definition_questions: 0,
            definition_choices: DEFAULT_CHOICES,
            term_questions: 0,
            term_choices: DEFAULT_CHOICES,
            true_false_questions: 0,
        }
    }
}

impl RawPreferences {
    pub fn total_questions(&self) -> usize {
        self.definition_questions + self.term_questions + self.true_false_questions
    }
}

/// A question count may never exceed the pool.
pub fn check_count(count: usize, pool_size: usize) -> Result<(), PreferencesError> {
    if count > pool_size {
        return Err(PreferencesError::TooManyQuestions {
            requested: count,
            pool_size,
        });
    }
    Ok(())
}

/// Every choice question needs at least two options, and can't show more than the pool holds.
pub fn check_choices(choices: usize, pool_size: usize) -> Result<(), PreferencesError> {
    if choices < 2 || choices > pool_size {
        return Err(PreferencesError::ChoicesOutOfRange { choices, pool_size });
    }
    Ok(())
}

/// Preferences that have been validated against a pool size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    raw: RawPreferences,
}

impl Preferences {
    pub fn new(raw: RawPreferences, pool_size: usize) -> Result<Self, PreferencesError> {
        check_count(raw.definition_questions, pool_size)?;
        if raw.definition_questions > 0 {
            check_choices(raw.definition_choices, pool_size)?;
        }
        check_count(raw.term_questions, pool_size)?;
        if raw.term_questions > 0 {
            check_choices(raw.term_choices, pool_size)?;
        }
        check_count(raw.true_false_questions, pool_size)?;

        let total = raw.total_questions();
        if total == 0 {
            return Err(PreferencesError::NoQuestions);
        }
        if total > pool_size {
            return Err(PreferencesError::TotalExceedsPool { total, pool_size });
        }
        Ok(Preferences { raw })
    }

    /// Read preferences from a yaml file and validate them.
    pub fn from_yaml(path: &Path, pool_size: usize) -> Result<Self, QuizError> {
        let file = std::fs::File::open(path)?;
        let raw: RawPreferences =
            serde_yaml::from_reader(file).map_err(|source| QuizError::PreferencesFile {
                path: path.to_owned(),
                source,
            })?;
        Ok(Preferences::new(raw, pool_size)?)
    }

    pub fn definition_questions(&self) -> usize {
        self.raw.definition_questions
    }
    pub fn definition_choices(&self) -> usize {
        self.raw.definition_choices
    }
    pub fn term_questions(&self) -> usize {
        self.raw.term_questions
    }
    pub fn term_choices(&self) -> usize {
        self.raw.term_choices
    }
    pub fn true_false_questions(&self) -> usize {
        self.raw.true_false_questions
    }

    pub fn total_questions(&self) -> usize {
        self.raw.total_questions()
    }
}
