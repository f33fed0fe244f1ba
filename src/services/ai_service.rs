use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::question::{Difficulty, Question, QuizSource};
use crate::services::{mcq_parser, prompts};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const EXPLANATION_FALLBACK: &str = "Explanation not available.";

/// Anything that turns a prompt into free text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(client: Client, api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model,
            timeout,
        }
    }

    pub fn from_config(config: &Config, client: Client) -> Self {
        Self::new(
            client,
            config.google_api_key.clone(),
            config.generation_model.clone(),
            Duration::from_secs(config.generation_timeout_secs),
        )
        .with_base_url(&config.generation_base_url)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn chat_gemini(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Generation(format!("Gemini API error {}: {}", status, text)));
        }

        let parsed: GenerateResponse = res
            .json()
            .await
            .map_err(|e| Error::Generation(format!("invalid response body: {}", e)))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::Generation("empty response".to_string()));
        }
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.chat_gemini(prompt).await
    }
}

#[derive(Clone)]
pub struct AIService {
    generator: Arc<dyn TextGenerator>,
}

impl AIService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Fails with `Generation` when the upstream call fails and with
    /// `NoValidQuestions` when the reply holds no well-formed block.
    pub async fn generate_questions(
        &self,
        source: &QuizSource,
        num_questions: usize,
        difficulty: Difficulty,
    ) -> Result<Vec<Question>> {
        let prompt = prompts::mcq_prompt(source, num_questions, difficulty);
        tracing::info!(
            num_questions,
            %difficulty,
            from_file = source.is_file(),
            "Requesting MCQ generation"
        );

        let raw = self.generator.generate(&prompt).await.map_err(|e| {
            tracing::error!("MCQ generation failed: {}", e);
            e
        })?;

        let report = mcq_parser::parse_mcqs(&raw);
        if !report.rejected.is_empty() {
            tracing::warn!(
                rejected = report.rejected.len(),
                parsed = report.questions.len(),
                "Dropped malformed MCQ blocks"
            );
        }
        if report.questions.is_empty() {
            tracing::warn!("Generated text contained no valid questions");
            return Err(Error::NoValidQuestions);
        }

        tracing::info!("Parsed {} questions", report.questions.len());
        Ok(report.questions)
    }

    pub async fn explain_answer(&self, question: &str, correct_answer: &str) -> Result<String> {
        let prompt = prompts::explanation_prompt(question, correct_answer);
        let text = self.generator.generate(&prompt).await?;
        Ok(text.trim().to_string())
    }

    pub async fn explain_or_fallback(&self, question: &Question) -> String {
        match self.explain_answer(&question.question, &question.correct_answer).await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => EXPLANATION_FALLBACK.to_string(),
            Err(e) => {
                tracing::warn!("Explanation failed, using fallback: {}", e);
                EXPLANATION_FALLBACK.to_string()
            }
        }
    }

    pub async fn write_study_notes(&self, source_text: &str, questions: &[Question]) -> Result<String> {
        let prompt = prompts::notes_prompt(source_text, questions);
        self.generator.generate(&prompt).await
    }
}
