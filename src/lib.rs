pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
pub mod views;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use reqwest::Client;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::middleware::{rate_limit::RateLimiter, session::SessionKey};
use crate::services::{
    ai_service::{AIService, GeminiClient, TextGenerator},
    artifact_store::ArtifactStore,
    quiz_service::QuizService,
    session_store::SessionStore,
    upload_service::UploadService,
};

#[derive(Clone)]
pub struct AppState {
    pub ai_service: AIService,
    pub quiz_service: QuizService,
    pub upload_service: UploadService,
    pub artifacts: ArtifactStore,
    pub sessions: SessionStore,
    pub session_key: SessionKey,
    pub limiter: RateLimiter,
    pub max_questions: usize,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Wires services against the global config and the Gemini client.
    pub fn new() -> error::Result<Self> {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.generation_timeout_secs + 10))
            .build()?;
        let generator = Arc::new(GeminiClient::from_config(config, http_client));
        Ok(Self::from_config(config, generator))
    }

    pub fn from_config(config: &Config, generator: Arc<dyn TextGenerator>) -> Self {
        let ai_service = AIService::new(generator);
        let artifacts = ArtifactStore::new(config.results_dir.clone());
        let quiz_service = QuizService::new(ai_service.clone(), artifacts.clone());

        Self {
            ai_service,
            quiz_service,
            upload_service: UploadService::new(config.upload_dir.clone()),
            artifacts,
            sessions: SessionStore::new(Duration::from_secs(config.session_ttl_secs)),
            session_key: SessionKey::new(&config.session_secret),
            limiter: RateLimiter::per_minute(config.generation_limit_per_minute),
            max_questions: config.max_questions,
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    use crate::middleware::{rate_limit::session_rate_limit, session::session_middleware};
    use axum::middleware::from_fn_with_state;

    let limit = from_fn_with_state(state.limiter.clone(), session_rate_limit);

    let generation_routes = Router::new()
        .route("/generate", post(routes::generate::generate))
        .route("/get_reasoning", post(routes::api::get_reasoning))
        .route("/generate_notes", post(routes::api::generate_notes))
        .route_layer(limit.clone());

    let pages = Router::new()
        .route("/", get(routes::pages::index))
        .route("/home", get(routes::pages::home))
        .route(
            "/quiz",
            get(routes::pages::quiz).merge(post(routes::pages::submit_quiz).route_layer(limit)),
        )
        .route("/scoreboard", get(routes::pages::scoreboard))
        .route("/download/:filename", get(routes::download::download));

    let base_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api-docs/openapi.json", get(routes::openapi::openapi_json));

    let max_upload_bytes = state.max_upload_bytes;
    let session_key = state.session_key.clone();

    base_routes
        .merge(pages)
        .merge(generation_routes)
        .with_state(state)
        .layer(from_fn_with_state(session_key, session_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
