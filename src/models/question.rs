use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// A multiple-choice question with exactly four options.
///
/// `correct_answer` holds the option text rather than its letter, so grading
/// compares submitted form values directly against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: [String; 4],
    pub correct_answer: String,
}

impl Question {
    /// Returns `None` when `answer_index` does not point at one of the options.
    pub fn from_letter(question: String, options: [String; 4], answer_index: usize) -> Option<Self> {
        let correct_answer = options.get(answer_index)?.clone();
        Some(Self {
            question,
            options,
            correct_answer,
        })
    }

    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o == &self.correct_answer)
    }

    pub fn lettered_options(&self) -> impl Iterator<Item = (char, &str)> {
        OPTION_LETTERS
            .iter()
            .copied()
            .zip(self.options.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    #[serde(flatten)]
    pub question: Question,
    /// `None` when the question was left unanswered.
    pub user_answer: Option<String>,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

impl AnsweredQuestion {
    pub fn user_answer_label(&self) -> &str {
        self.user_answer.as_deref().unwrap_or("No answer")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Intermediate,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Hard => "hard",
        }
    }

    pub fn guidance(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Generate simple, straightforward questions suitable for beginners. Focus on basic concepts and definitions.",
            Difficulty::Intermediate => "Generate moderately challenging questions that test understanding and application of concepts.",
            Difficulty::Hard => "Generate complex questions that test deep understanding, analysis, and synthesis of concepts.",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "easy" => Ok(Difficulty::Easy),
            "intermediate" => Ok(Difficulty::Intermediate),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty level: {}", other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the quiz content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizSource {
    Topic(String),
    File { filename: String, content: String },
}

impl QuizSource {
    pub fn content(&self) -> &str {
        match self {
            QuizSource::Topic(topic) => topic,
            QuizSource::File { content, .. } => content,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, QuizSource::File { .. })
    }
}
