use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::screening::vocabulary::Vocabulary;

/// Where uploaded resume files live.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// Local folders: uploads first, then the screenings folder as fallback.
    Local {
        upload_dir: PathBuf,
        screening_dir: PathBuf,
    },
    /// S3-compatible bucket (MinIO locally, AWS in production).
    S3 {
        bucket: String,
        endpoint: String,
        prefix: String,
        access_key_id: String,
        secret_access_key: String,
    },
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub storage: StorageBackend,
    pub anthropic_api_key: Option<String>,
    pub enable_llm_entity_tagging: bool,
    pub extraction_timeout: Duration,
    pub analysis_timeout: Duration,
    pub vocabulary: Vocabulary,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let storage = match optional_env("RESUME_STORAGE")
            .unwrap_or_else(|| "local".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "local" => StorageBackend::Local {
                upload_dir: optional_env("UPLOAD_DIR")
                    .unwrap_or_else(|| "static/uploads".to_string())
                    .into(),
                screening_dir: optional_env("SCREENING_DIR")
                    .unwrap_or_else(|| "static/screenings".to_string())
                    .into(),
            },
            "s3" => StorageBackend::S3 {
                bucket: require_env("S3_BUCKET")?,
                endpoint: require_env("S3_ENDPOINT")?,
                prefix: optional_env("S3_PREFIX").unwrap_or_else(|| "resumes/".to_string()),
                access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
                secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            },
            other => bail!("RESUME_STORAGE must be 'local' or 's3', got '{other}'"),
        };

        let mut vocabulary = Vocabulary::default();
        if let Some(skills) = optional_env("SKILL_VOCABULARY") {
            vocabulary.skills = parse_term_list(&skills);
        }
        if let Some(professions) = optional_env("PROFESSION_VOCABULARY") {
            vocabulary.professions = parse_term_list(&professions);
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            storage,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            enable_llm_entity_tagging: parse_flag("ENABLE_LLM_ENTITY_TAGGING")?,
            extraction_timeout: parse_secs("EXTRACTION_TIMEOUT_SECS", 20)?,
            analysis_timeout: parse_secs("ANALYSIS_TIMEOUT_SECS", 20)?,
            vocabulary,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(key: &str) -> Result<bool> {
    match optional_env(key) {
        None => Ok(false),
        Some(v) => match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => bail!("{key} must be a boolean, got '{v}'"),
        },
    }
}

fn parse_secs(key: &str, default: u64) -> Result<Duration> {
    let secs = match optional_env(key) {
        Some(v) => v
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of seconds"))?,
        None => default,
    };
    Ok(Duration::from_secs(secs))
}

/// Splits a comma-separated vocabulary override into lowercase, de-duplicated terms.
pub fn parse_term_list(raw: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in raw.split(',').map(|t| t.trim().to_lowercase()) {
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}
