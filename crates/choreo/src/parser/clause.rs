//! Clause segmentation.
//!
//! A prompt splits into clauses on the separator tokens "then" and "and"
//! (whole words only) and commas. Word-boundary matching matters: a
//! substring split would tear words like "sandwich" apart at the "and".

use std::sync::OnceLock;

use regex::Regex;

/// A clause of the prompt, with its position for feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Clause {
    pub text: String,
    /// Zero-based ordinal among the non-empty clauses.
    pub index: usize,
}

fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| {
        Regex::new(r"\bthen\b|\band\b|,").expect("separator pattern is a valid literal regex")
    })
}

/// Split an already-lowercased prompt into trimmed, non-empty clauses in
/// their original left-to-right order.
pub(crate) fn split_clauses(prompt: &str) -> Vec<Clause> {
    separator()
        .split(prompt)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .enumerate()
        .map(|(index, text)| Clause {
            text: text.to_string(),
            index,
        })
        .collect()
}
