#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use study_quiz_backend::{
    build_router,
    config::Config,
    error::{Error, Result},
    services::ai_service::TextGenerator,
    AppState,
};
use tower::ServiceExt;

pub const TWO_QUESTIONS: &str = "Here are your questions.\n\n## MCQ\nQuestion: Capital of Italy?\nA) Paris\nB) Rome\nC) Berlin\nD) Madrid\nCorrect Answer: B\n\n## MCQ\nQuestion: 2+2?\nA) 1\nB) 2\nC) 3\nD) 4\nCorrect Answer: D\n";

pub const BOUNDARY: &str = "quizformboundary";

/// Questions for generation prompts, a short text for everything else.
pub fn happy_reply(prompt: &str) -> Result<String> {
    if prompt.starts_with("Generate") {
        Ok(TWO_QUESTIONS.to_string())
    } else if prompt.contains("study notes") {
        Ok("Key Concepts:\n- Rome is the capital of Italy\nArithmetic is fun.\n".to_string())
    } else {
        Ok("Because it is.".to_string())
    }
}

type Responder = dyn Fn(&str) -> Result<String> + Send + Sync;
type Latency = dyn Fn(&str) -> Duration + Send + Sync;

/// Answers prompts with a fixed script and counts the calls.
pub struct ScriptedGenerator {
    respond: Box<Responder>,
    latency: Box<Latency>,
    pub calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(respond: impl Fn(&str) -> Result<String> + Send + Sync + 'static) -> Arc<Self> {
        Self::slow(respond, |_| Duration::ZERO)
    }

    /// Like `new`, but each reply waits for `latency(prompt)` first.
    pub fn slow(
        respond: impl Fn(&str) -> Result<String> + Send + Sync + 'static,
        latency: impl Fn(&str) -> Duration + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            latency: Box::new(latency),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn happy() -> Arc<Self> {
        Self::new(happy_reply)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let wait = (self.latency)(prompt);
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        (self.respond)(prompt)
    }
}

pub fn generation_error() -> Error {
    Error::Generation("upstream unavailable".into())
}

pub struct TestApp {
    pub router: Router,
    pub upload_dir: PathBuf,
    pub results_dir: PathBuf,
}

pub fn test_config(limit_per_minute: u32) -> Config {
    let root = std::env::temp_dir().join(format!("quiz-it-{}", uuid::Uuid::new_v4()));
    Config {
        server_address: "127.0.0.1:0".into(),
        google_api_key: "test-key".into(),
        generation_model: "gemini-test".into(),
        generation_base_url: "http://127.0.0.1:9".into(),
        generation_timeout_secs: 5,
        session_secret: "integration-secret".into(),
        session_ttl_secs: 600,
        upload_dir: root.join("uploads"),
        results_dir: root.join("results"),
        max_questions: 10,
        max_upload_bytes: 1024 * 1024,
        generation_limit_per_minute: limit_per_minute,
    }
}

pub fn app_with(generator: Arc<dyn TextGenerator>, config: Config) -> TestApp {
    let state = AppState::from_config(&config, generator);
    TestApp {
        router: build_router(state),
        upload_dir: config.upload_dir,
        results_dir: config.results_dir,
    }
}

pub fn app(generator: Arc<dyn TextGenerator>) -> TestApp {
    app_with(generator, test_config(100))
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }

    /// Opens a session and returns its `sid=...` cookie pair.
    pub async fn new_session(&self) -> String {
        let res = self
            .send(Request::get("/health").body(Body::empty()).unwrap())
            .await;
        session_cookie(&res).expect("new session cookie")
    }
}

pub fn session_cookie(res: &Response<Body>) -> Option<String> {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("sid="))
        .and_then(|v| v.split(';').next())
        .map(String::from)
}

pub fn location(res: &Response<Body>) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn body_text(res: Response<Body>) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

pub async fn body_json(res: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        data: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn generate_request(cookie: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::post("/generate")
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, cookie: &str, form: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

pub fn post_json(uri: &str, cookie: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn topic_request(cookie: &str, topic: &str) -> Request<Body> {
    generate_request(
        cookie,
        &[
            Part::Text("topic", topic),
            Part::Text("num_questions", "2"),
            Part::Text("difficulty", "easy"),
        ],
    )
}

/// Starts a two-question topic quiz in the given session.
pub async fn start_topic_quiz(app: &TestApp, cookie: &str) {
    let res = app.send(topic_request(cookie, "Geography")).await;
    assert_eq!(res.status(), axum::http::StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/quiz"));
}
