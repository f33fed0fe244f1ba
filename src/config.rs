use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub google_api_key: String,
    pub generation_model: String,
    pub generation_base_url: String,
    pub generation_timeout_secs: u64,
    pub session_secret: String,
    pub session_ttl_secs: u64,
    pub upload_dir: PathBuf,
    pub results_dir: PathBuf,
    pub max_questions: usize,
    pub max_upload_bytes: usize,
    pub generation_limit_per_minute: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "127.0.0.1:5000"),
            google_api_key: get_env("GOOGLE_API_KEY")?,
            generation_model: get_env_or("GENERATION_MODEL", "gemini-2.0-flash"),
            generation_base_url: get_env_or(
                "GENERATION_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            ),
            generation_timeout_secs: get_env_parse_or("GENERATION_TIMEOUT_SECS", 120)?,
            session_secret: get_env("SESSION_SECRET")?,
            session_ttl_secs: get_env_parse_or("SESSION_TTL_SECS", 2 * 60 * 60)?,
            upload_dir: get_env_or("UPLOAD_DIR", "uploads").into(),
            results_dir: get_env_or("RESULTS_DIR", "results").into(),
            max_questions: get_env_parse_or("MAX_QUESTIONS", 50)?,
            max_upload_bytes: get_env_parse_or("MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
            generation_limit_per_minute: get_env_parse_or("GENERATION_LIMIT_PER_MINUTE", 10)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
