use crate::models::question::{AnsweredQuestion, Question};
use std::collections::HashMap;

pub struct GradingService;

impl GradingService {
    /// Form field name the quiz page uses for the question at `index`.
    pub fn field_name(index: usize) -> String {
        format!("question_{}", index)
    }

    /// Pulls the submitted option for every question out of the posted form,
    /// in question order. Missing fields become `None`.
    pub fn collect_answers(
        question_count: usize,
        form: &HashMap<String, String>,
    ) -> Vec<Option<String>> {
        (0..question_count)
            .map(|i| form.get(&Self::field_name(i)).cloned())
            .collect()
    }

    /// Exact, case-sensitive comparison against the stored option text.
    /// Returns the graded questions (without explanations) and the score.
    pub fn grade(questions: &[Question], answers: &[Option<String>]) -> (Vec<AnsweredQuestion>, usize) {
        let mut score = 0;
        let mut graded = Vec::with_capacity(questions.len());

        for (idx, q) in questions.iter().enumerate() {
            let user_answer = answers.get(idx).cloned().flatten();
            let is_correct = user_answer.as_deref() == Some(q.correct_answer.as_str());
            if is_correct {
                score += 1;
            }

            graded.push(AnsweredQuestion {
                question: q.clone(),
                user_answer,
                is_correct,
                explanation: None,
            });
        }

        (graded, score)
    }
}
