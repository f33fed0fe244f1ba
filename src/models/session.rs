use crate::models::question::{AnsweredQuestion, Question};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifies one generation attempt. A newer attempt makes older ones stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationId(Uuid);

impl GenerationId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Questions handed out to the user, plus the material they were built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveQuiz {
    pub questions: Vec<Question>,
    /// Extracted document text for file sources, the topic string otherwise.
    pub source_text: String,
    pub from_file: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedQuiz {
    pub quiz: ActiveQuiz,
    pub answers: Vec<AnsweredQuestion>,
    pub score: usize,
    pub total: usize,
    pub results_file: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuizPhase {
    #[default]
    Idle,
    Generating(GenerationId),
    Active(ActiveQuiz),
    Submitted(SubmittedQuiz),
}

impl QuizPhase {
    pub fn name(&self) -> &'static str {
        match self {
            QuizPhase::Idle => "idle",
            QuizPhase::Generating(_) => "generating",
            QuizPhase::Active(_) => "active",
            QuizPhase::Submitted(_) => "submitted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} while the quiz is {phase}")]
pub struct TransitionError {
    pub action: &'static str,
    pub phase: &'static str,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    phase: QuizPhase,
    latest_notes: Option<String>,
    touched_at: Instant,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self {
            phase: QuizPhase::Idle,
            latest_notes: None,
            touched_at: Instant::now(),
        }
    }
}

impl QuizSession {
    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn latest_notes(&self) -> Option<&str> {
        self.latest_notes.as_deref()
    }

    pub fn touched_at(&self) -> Instant {
        self.touched_at
    }

    pub fn touch(&mut self) {
        self.touched_at = Instant::now();
    }

    /// Drops questions, answers, score and notes.
    pub fn reset(&mut self) {
        self.phase = QuizPhase::Idle;
        self.latest_notes = None;
    }

    /// Starting a generation always discards whatever the session held.
    /// The returned id must be presented to finish or abort this attempt.
    pub fn begin_generation(&mut self) -> GenerationId {
        self.reset();
        let id = GenerationId::new();
        self.phase = QuizPhase::Generating(id);
        id
    }

    pub fn complete_generation(
        &mut self,
        id: GenerationId,
        quiz: ActiveQuiz,
    ) -> Result<(), TransitionError> {
        match self.phase {
            QuizPhase::Generating(current) if current == id => {}
            QuizPhase::Generating(_) => {
                return Err(TransitionError {
                    action: "store questions from a superseded generation",
                    phase: "generating",
                })
            }
            _ => return Err(self.refuse("store generated questions")),
        }
        if quiz.questions.is_empty() {
            self.phase = QuizPhase::Idle;
            return Err(TransitionError {
                action: "activate an empty quiz",
                phase: "generating",
            });
        }
        self.phase = QuizPhase::Active(quiz);
        Ok(())
    }

    /// Only the attempt that is still current goes back to idle.
    pub fn abort_generation(&mut self, id: GenerationId) {
        if self.phase == QuizPhase::Generating(id) {
            self.phase = QuizPhase::Idle;
        }
    }

    pub fn active_quiz(&self) -> Option<&ActiveQuiz> {
        match &self.phase {
            QuizPhase::Active(quiz) => Some(quiz),
            _ => None,
        }
    }

    pub fn submitted(&self) -> Option<&SubmittedQuiz> {
        match &self.phase {
            QuizPhase::Submitted(submitted) => Some(submitted),
            _ => None,
        }
    }

    /// The question set, whether or not it has been graded yet.
    pub fn current_quiz(&self) -> Option<&ActiveQuiz> {
        match &self.phase {
            QuizPhase::Active(quiz) => Some(quiz),
            QuizPhase::Submitted(submitted) => Some(&submitted.quiz),
            _ => None,
        }
    }

    /// Only accepts a grading of the exact quiz that is still active.
    pub fn record_submission(&mut self, submitted: SubmittedQuiz) -> Result<(), TransitionError> {
        match &self.phase {
            QuizPhase::Active(quiz) if *quiz == submitted.quiz => {
                self.phase = QuizPhase::Submitted(submitted);
                Ok(())
            }
            QuizPhase::Active(_) => Err(TransitionError {
                action: "grade a quiz that was replaced",
                phase: "active",
            }),
            _ => Err(self.refuse("submit answers")),
        }
    }

    pub fn set_latest_notes(&mut self, filename: String) {
        self.latest_notes = Some(filename);
    }

    fn refuse(&self, action: &'static str) -> TransitionError {
        TransitionError {
            action,
            phase: self.phase.name(),
        }
    }
}
