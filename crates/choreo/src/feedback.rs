//! Interpreter feedback (notes and warnings).
//!
//! Interpretation is total: an unrecognized prompt falls back to an idle
//! action instead of failing. Feedback records what the interpreter
//! assumed or dropped along the way, indexed by clause.

use serde::{Deserialize, Serialize};

/// A single piece of feedback attached to a clause of the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub message: String,
    /// Zero-based index of the clause this refers to.
    pub clause: usize,
}

impl Feedback {
    pub fn warning(message: impl Into<String>, clause: usize) -> Self {
        Feedback {
            level: FeedbackLevel::Warning,
            message: message.into(),
            clause,
        }
    }

    pub fn info(message: impl Into<String>, clause: usize) -> Self {
        Feedback {
            level: FeedbackLevel::Info,
            message: message.into(),
            clause,
        }
    }
}

/// There is no Error level: no prompt is a parse error by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackLevel {
    /// Parsed with assumptions, likely not what the user intended.
    Warning,
    /// Minor note about a decision the interpreter made.
    Info,
}

/// The interpreter's output: a value plus whatever feedback accumulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult<T> {
    pub value: T,
    pub feedback: Vec<Feedback>,
}

impl<T> ParseResult<T> {
    pub fn new(value: T, feedback: Vec<Feedback>) -> Self {
        ParseResult { value, feedback }
    }

    pub fn ok(value: T) -> Self {
        ParseResult {
            value,
            feedback: Vec::new(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        self.feedback
            .iter()
            .any(|f| f.level == FeedbackLevel::Warning)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Feedback> {
        self.feedback
            .iter()
            .filter(|f| f.level == FeedbackLevel::Warning)
    }
}
