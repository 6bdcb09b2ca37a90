//! Quiz generation from term,definition tables.

// Questions come in three flavours; pick the definition for a term, pick the term for a
// definition and true/false on a pairing. A record asked about once is never asked again in
// the same quiz.

/// Main types and traits
pub mod traits;

/// Error types.
pub mod error;

/// Reading csv tables and finding them on disk.
pub mod loader;

/// Drawing correct answers and distractors.
pub mod sampler;

/// Question builders for the three question kinds.
pub mod builder;

/// Quiz preferences.
pub mod config;

/// Runs a quiz from preferences to report.
pub mod session;

/// Console implementation of the responder.
pub mod console;
