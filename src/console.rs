//! Line based console interaction; prompts, menus and feedback.

use crate::config::{check_choices, check_count, Preferences, RawPreferences};
use crate::error::{LoadError, PreferencesError, QuizError};
use crate::loader::{count_records, discover, Discovery};
use crate::traits::{Label, Question, Responder, SessionEvent};
use crossterm::style::Stylize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons to start the preference questions over.
#[derive(Debug, Error)]
enum Rejected {
    #[error("Please enter valid numbers.")]
    NotANumber,
    #[error("Please enter a non-negative number.")]
    Negative,
    #[error("{0}")]
    Preferences(#[from] PreferencesError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Console on top of any line reader and writer, stdin and stdout in the binary.
pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print a line.
    pub fn say(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Print the prompt and read a trimmed line, running out of input is an error.
    fn ask_line(&mut self, prompt: &str) -> std::io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input ended while waiting for an answer",
            ));
        }
        Ok(line.trim().to_owned())
    }

    fn ask_integer(&mut self, prompt: &str) -> Result<i64, Rejected> {
        self.ask_line(prompt)?
            .parse::<i64>()
            .map_err(|_| Rejected::NotANumber)
    }

    fn ask_count(&mut self, prompt: &str, pool_size: usize) -> Result<usize, Rejected> {
        let count = usize::try_from(self.ask_integer(prompt)?).map_err(|_| Rejected::Negative)?;
        check_count(count, pool_size)?;
        Ok(count)
    }

    fn ask_choices(&mut self, prompt: &str, pool_size: usize) -> Result<usize, Rejected> {
        // Negative answers are reported as out of range, like any other bad choice count.
        let choices = usize::try_from(self.ask_integer(prompt)?).unwrap_or(0);
        check_choices(choices, pool_size)?;
        Ok(choices)
    }

    fn ask_preferences(&mut self, pool_size: usize) -> Result<Preferences, Rejected> {
        let mut raw = RawPreferences::default();

        raw.definition_questions =
            self.ask_count("How many 'pick correct definition' questions? ", pool_size)?;
        if raw.definition_questions > 0 {
            raw.definition_choices =
                self.ask_choices("How many choices for definition questions? ", pool_size)?;
        }

        raw.term_questions =
            self.ask_count("How many 'pick correct term' questions? ", pool_size)?;
        if raw.term_questions > 0 {
            raw.term_choices =
                self.ask_choices("How many choices for term questions? ", pool_size)?;
        }

        raw.true_false_questions =
            self.ask_count("How many True/False questions? ", pool_size)?;

        Ok(Preferences::new(raw, pool_size)?)
    }

    /// Ask for the question counts until they fit the pool. Choice counts are only asked for
    /// question types that are requested, the others keep their default.
    pub fn collect_preferences(&mut self, pool_size: usize) -> Result<Preferences, QuizError> {
        self.say("=== Test Maker ===")?;
        self.say(&format!("Total terms available: {pool_size}"))?;
        loop {
            self.say("\n--- Question Type Settings ---")?;
            match self.ask_preferences(pool_size) {
                Ok(p) => return Ok(p),
                Err(Rejected::Io(e)) => return Err(e.into()),
                Err(rejected) => self.say(&rejected.to_string())?,
            }
        }
    }

    /// Show the numbered files with their term counts and return the index picked.
    pub fn choose_file(
        &mut self,
        folder: &str,
        files: &[(PathBuf, usize)],
    ) -> Result<usize, QuizError> {
        self.say(&format!("Available CSV files in '{folder}' folder:"))?;
        self.say(&"-".repeat(40))?;
        for (i, (path, count)) in files.iter().enumerate() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            self.say(&format!("{}. {name} ({count} terms)", i + 1))?;
        }
        self.say(&"-".repeat(40))?;

        let n = files.len();
        loop {
            let line = self.ask_line(&format!("Select a file (1-{n}): "))?;
            match line.parse::<usize>() {
                Ok(choice) if (1..=n).contains(&choice) => return Ok(choice - 1),
                Ok(_) => self.say(&format!("Please enter a number between 1 and {n}."))?,
                Err(_) => self.say("Please enter a valid number.")?,
            }
        }
    }

    /// Pick the quiz file; `explicit` wins, otherwise the user chooses from the csv files in
    /// `data_dir`. Having nothing to choose from prints the expected format and fails.
    pub fn select_file(
        &mut self,
        data_dir: &Path,
        explicit: Option<&Path>,
    ) -> Result<PathBuf, QuizError> {
        if let Some(file) = explicit {
            return Ok(file.to_owned());
        }

        let folder = data_dir.display().to_string();
        let files = match discover(data_dir)? {
            Discovery::Created => {
                self.say(&format!(
                    "Created '{folder}' folder. Please add your CSV files there."
                ))?;
                vec![]
            }
            Discovery::Files(files) => files,
        };

        if files.is_empty() {
            self.say(&format!("No CSV files found in the '{folder}' folder."))?;
            self.say("Please add CSV files with the following format:")?;
            self.say("term1,definition1")?;
            self.say("term2,definition2")?;
            self.say("...")?;
            return Err(LoadError::NoFiles(data_dir.to_owned()).into());
        }

        let listing = files
            .into_iter()
            .map(|f| {
                let count = count_records(&f);
                (f, count)
            })
            .collect::<Vec<_>>();
        let index = self.choose_file(&folder, &listing)?;
        Ok(listing[index].0.clone())
    }

    /// Read an option number until it is one of the `count` options.
    fn read_choice(&mut self, count: usize) -> std::io::Result<Label> {
        loop {
            let line = self.ask_line("\nYour answer (enter 1, 2, 3, etc.): ")?;
            match line.parse::<usize>() {
                Ok(choice) if (1..=count).contains(&choice) => return Ok(Label(choice)),
                _ => self.say(&format!("Please enter a valid choice (1-{count})"))?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Responder for Console<R, W> {
    fn ask(&mut self, number: usize, question: &Question) -> Result<Label, QuizError> {
        self.say(&format!("\n--- Question {number} ---"))?;
        self.say(&question.prompt)?;
        self.say("\nOptions:")?;
        for (i, option) in question.options.iter().enumerate() {
            self.say(&format!("{}. {option}", i + 1))?;
        }
        Ok(self.read_choice(question.options.len())?)
    }

    fn notify(&mut self, event: &SessionEvent) -> Result<(), QuizError> {
        match event {
            SessionEvent::Started { total_questions } => {
                self.say("\n=== Starting Test ===")?;
                self.say(&format!("Total questions: {total_questions}"))?;
            }
            SessionEvent::Answered { correct: true, .. } => {
                writeln!(self.output, "{}", "✓ Correct!".green())?;
            }
            SessionEvent::Answered {
                correct: false,
                expected,
            } => {
                let text = format!("✗ Incorrect. The correct answer was {expected}.");
                writeln!(self.output, "{}", text.red())?;
            }
            SessionEvent::BlockTruncated(kind) => {
                self.say(&format!(
                    "Not enough terms for all {} questions.",
                    kind.describe()
                ))?;
            }
            SessionEvent::Finished(report) => {
                self.say("\n=== Test Results ===")?;
                self.say(&format!(
                    "Score: {}/{} ({:.1}%)",
                    report.score,
                    report.total_answered,
                    report.percentage()
                ))?;
                self.say(report.band().message())?;
            }
        }
        Ok(())
    }
}
