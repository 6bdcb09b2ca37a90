use crate::error::QuizError;
use rand::RngCore;

/// A single term/definition pair. Only the loader creates these, after both fields have been
/// trimmed and found non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    term: String,
    definition: String,
}

impl Record {
    pub(crate) fn new(term: &str, definition: &str) -> Self {
        Record {
            term: term.to_owned(),
            definition: definition.to_owned(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }
}

/// Indices into the pool that have been consumed as a correct answer.
pub type UsedSet = std::collections::BTreeSet<usize>;

/// 1-based position of an option as shown to the user.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Label(pub usize);

impl Label {
    pub const TRUE: Label = Label(1);
    pub const FALSE: Label = Label(2);

    /// Zero-based index into the options. Label(0) is not a valid label, it maps onto the first
    /// option.
    pub fn index(&self) -> usize {
        self.0.saturating_sub(1)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum QuestionKind {
    /// Pick the definition belonging to a term.
    Definition,
    /// Pick the term belonging to a definition.
    Term,
    TrueFalse,
}

impl QuestionKind {
    pub fn describe(&self) -> &'static str {
        match *self {
            QuestionKind::Definition => "definition",
            QuestionKind::Term => "term",
            QuestionKind::TrueFalse => "True/False",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_label: Label,

    /// Pool index of the record this question is about.
    pub record: usize,
}

impl Question {
    pub fn is_correct(&self, answer: Label) -> bool {
        self.correct_label == answer
    }

    /// Text of the option marked as correct.
    pub fn correct_text(&self) -> &str {
        &self.options[self.correct_label.index()]
    }
}

/// Something that creates questions of one kind from a pool of records.
pub trait QuestionBuilder: std::fmt::Debug {
    /// The kind of question this builder produces.
    fn kind(&self) -> QuestionKind;

    /// Build the next question, retiring the chosen record in `used`. Returns None when the pool
    /// no longer holds enough unused records for this kind of question.
    fn build(&self, pool: &[Record], used: &mut UsedSet, rng: &mut dyn RngCore)
        -> Option<Question>;
}

/// Things the session reports while it runs.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { total_questions: usize },
    Answered { correct: bool, expected: Label },
    BlockTruncated(QuestionKind),
    Finished(crate::session::Report),
}

/// The party answering the questions, typically a person on the console.
pub trait Responder {
    /// Show the question and return the label that was picked, always within the options.
    fn ask(&mut self, number: usize, question: &Question) -> Result<Label, QuizError>;

    /// Notify about progress of the session.
    fn notify(&mut self, event: &SessionEvent) -> Result<(), QuizError>;
}
