use crate::error::Result;
use crate::models::question::AnsweredQuestion;
use crate::models::session::{ActiveQuiz, SubmittedQuiz};
use crate::services::ai_service::AIService;
use crate::services::artifact_store::{ArtifactKind, ArtifactStore};
use crate::services::grading_service::GradingService;
use crate::services::render_service;

#[derive(Clone)]
pub struct QuizService {
    ai: AIService,
    artifacts: ArtifactStore,
}

impl QuizService {
    pub fn new(ai: AIService, artifacts: ArtifactStore) -> Self {
        Self { ai, artifacts }
    }

    /// Grades the answers, explains every question and stores a results PDF.
    ///
    /// Never fails: explanations fall back to a fixed text and a PDF that
    /// cannot be produced just leaves `results_file` empty.
    pub async fn submit(&self, quiz: &ActiveQuiz, answers: &[Option<String>]) -> SubmittedQuiz {
        let (mut graded, score) = GradingService::grade(&quiz.questions, answers);
        let total = quiz.questions.len();
        tracing::info!(score, total, "Quiz graded");

        for answer in graded.iter_mut() {
            answer.explanation = Some(self.ai.explain_or_fallback(&answer.question).await);
        }

        let results_file = match self.store_results(&graded, score, total).await {
            Ok(name) => Some(name),
            Err(e) => {
                tracing::error!("Failed to produce results PDF: {}", e);
                None
            }
        };

        SubmittedQuiz {
            quiz: quiz.clone(),
            answers: graded,
            score,
            total,
            results_file,
        }
    }

    async fn store_results(
        &self,
        graded: &[AnsweredQuestion],
        score: usize,
        total: usize,
    ) -> Result<String> {
        let bytes = render_service::render_results_pdf(graded, score, total)?;
        self.artifacts.save(ArtifactKind::Results, &bytes).await
    }

    /// Writes study notes for the quiz and returns the stored PDF's name.
    pub async fn generate_notes(&self, quiz: &ActiveQuiz) -> Result<String> {
        let notes = self
            .ai
            .write_study_notes(&quiz.source_text, &quiz.questions)
            .await?;
        let bytes = render_service::render_notes_pdf(&notes)?;
        let filename = self.artifacts.save(ArtifactKind::StudyNotes, &bytes).await?;
        tracing::info!("Study notes written to {}", filename);
        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::question::Question;
    use crate::services::ai_service::{MockTextGenerator, EXPLANATION_FALLBACK};
    use std::sync::Arc;

    fn quiz() -> ActiveQuiz {
        ActiveQuiz {
            questions: vec![
                Question::from_letter(
                    "Capital of Italy?".into(),
                    ["Paris", "Rome", "Berlin", "Madrid"].map(String::from),
                    1,
                )
                .unwrap(),
                Question::from_letter("2+2?".into(), ["1", "2", "3", "4"].map(String::from), 3)
                    .unwrap(),
            ],
            source_text: "general knowledge".into(),
            from_file: false,
        }
    }

    fn service(mock: MockTextGenerator) -> (QuizService, ArtifactStore) {
        let dir = std::env::temp_dir().join(format!("quiz-service-{}", uuid::Uuid::new_v4()));
        let artifacts = ArtifactStore::new(dir);
        (
            QuizService::new(AIService::new(Arc::new(mock)), artifacts.clone()),
            artifacts,
        )
    }

    #[tokio::test]
    async fn submit_explains_each_question_and_stores_results() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .times(2)
            .returning(|_| Ok("  Because it is.  ".to_string()));
        let (service, artifacts) = service(mock);

        let submitted = service
            .submit(&quiz(), &[Some("Rome".into()), Some("3".into())])
            .await;

        assert_eq!(submitted.score, 1);
        assert_eq!(submitted.total, 2);
        assert!(submitted
            .answers
            .iter()
            .all(|a| a.explanation.as_deref() == Some("Because it is.")));
        let file = submitted.results_file.unwrap();
        assert!(file.starts_with("results_"));
        assert!(artifacts.resolve(&file).await.is_ok());
    }

    #[tokio::test]
    async fn failing_explanations_still_produce_results() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .times(2)
            .returning(|_| Err(Error::Generation("unavailable".into())));
        let (service, _) = service(mock);

        let submitted = service.submit(&quiz(), &[None, None]).await;

        assert_eq!(submitted.score, 0);
        assert!(submitted
            .answers
            .iter()
            .all(|a| a.explanation.as_deref() == Some(EXPLANATION_FALLBACK)));
        assert!(submitted.results_file.is_some());
    }

    #[tokio::test]
    async fn notes_are_rendered_and_stored() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|p: &str| p.contains("general knowledge") && p.contains("Capital of Italy?"))
            .times(1)
            .returning(|_| Ok("Key Concepts:\n- Rome is the capital of Italy\n".to_string()));
        let (service, artifacts) = service(mock);

        let name = service.generate_notes(&quiz()).await.unwrap();
        assert!(name.starts_with("study_notes_"));
        let path = artifacts.resolve(&name).await.unwrap();
        assert!(std::fs::read(path).unwrap().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn notes_generation_failure_is_reported() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .returning(|_| Err(Error::Generation("quota".into())));
        let (service, _) = service(mock);

        assert!(matches!(
            service.generate_notes(&quiz()).await,
            Err(Error::Generation(_))
        ));
    }
}
