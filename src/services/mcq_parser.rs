//! Line-oriented parser for the `## MCQ` blocks the generation service returns.
//!
//! Each block is expected to look like:
//!
//! ```text
//! ## MCQ
//! Question: What is the capital of Italy?
//! A) Paris
//! B) Rome
//! C) Berlin
//! D) Madrid
//! Correct Answer: B
//! ```
//!
//! Malformed blocks are reported in [`ParseReport::rejected`] and never abort
//! the parse.

use crate::models::question::{Question, OPTION_LETTERS};

pub const BLOCK_DELIMITER: &str = "## MCQ";
const QUESTION_LABEL: &str = "Question:";
const ANSWER_LABEL: &str = "Correct Answer:";
const MIN_BLOCK_LINES: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockError {
    #[error("block has {found} non-empty lines, expected at least 6")]
    TooFewLines { found: usize },
    #[error("'{0}' is not one of the option letters A-D")]
    InvalidAnswerLetter(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedBlock {
    /// Zero-based position among the non-blank blocks.
    pub index: usize,
    pub error: BlockError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub questions: Vec<Question>,
    pub rejected: Vec<RejectedBlock>,
}

pub fn parse_mcqs(raw: &str) -> ParseReport {
    let mut report = ParseReport::default();

    let blocks = raw.split(BLOCK_DELIMITER).filter(|b| !b.trim().is_empty());
    for (index, block) in blocks.enumerate() {
        match parse_block(block) {
            Ok(question) => report.questions.push(question),
            Err(error) => {
                tracing::debug!(index, %error, "Skipping malformed MCQ block");
                report.rejected.push(RejectedBlock { index, error });
            }
        }
    }

    report
}

pub fn parse_block(block: &str) -> Result<Question, BlockError> {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < MIN_BLOCK_LINES {
        return Err(BlockError::TooFewLines { found: lines.len() });
    }

    let question = strip_label(lines[0], QUESTION_LABEL).to_string();
    let options = [
        strip_option_prefix(lines[1]),
        strip_option_prefix(lines[2]),
        strip_option_prefix(lines[3]),
        strip_option_prefix(lines[4]),
    ];
    let letter = strip_label(lines[5], ANSWER_LABEL);
    let index = letter_index(letter).ok_or_else(|| BlockError::InvalidAnswerLetter(letter.to_string()))?;

    Question::from_letter(question, options, index)
        .ok_or_else(|| BlockError::InvalidAnswerLetter(letter.to_string()))
}

fn strip_label<'a>(line: &'a str, label: &str) -> &'a str {
    line.strip_prefix(label).unwrap_or(line).trim()
}

/// Drops the two-character `A)` marker.
fn strip_option_prefix(line: &str) -> String {
    let mut chars = line.chars();
    chars.next();
    chars.next();
    chars.as_str().trim().to_string()
}

/// Accepts `B`, `b`, `B)` or `B.`; rejects anything longer such as `Both`.
fn letter_index(raw: &str) -> Option<usize> {
    let mut chars = raw.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.any(|c| c.is_alphanumeric()) {
        return None;
    }
    OPTION_LETTERS.iter().position(|&l| l == letter)
}
