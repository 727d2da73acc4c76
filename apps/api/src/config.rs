use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::ats::{AtsConfig, DEFAULT_QUERY_KEYWORD_COUNT};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing. No credentials live in source.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub adzuna: AdzunaConfig,
    pub google: GoogleConfig,
    pub upstream_timeout_secs: u64,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub query_keyword_count: usize,
    pub extra_stopwords: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct AdzunaConfig {
    pub base_url: String,
    pub app_id: String,
    pub app_key: String,
    pub country: String,
    pub results_per_page: u32,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub base_url: String,
    pub api_key: String,
    pub cx: String,
    pub results: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            adzuna: AdzunaConfig {
                base_url: optional_env("ADZUNA_BASE_URL")
                    .unwrap_or_else(|| "https://api.adzuna.com/v1/api".to_string()),
                app_id: require_env("ADZUNA_APP_ID")?,
                app_key: require_env("ADZUNA_APP_KEY")?,
                country: optional_env("ADZUNA_COUNTRY").unwrap_or_else(|| "in".to_string()),
                results_per_page: parse_env("ADZUNA_RESULTS_PER_PAGE", 10)?,
            },
            google: GoogleConfig {
                base_url: optional_env("GOOGLE_BASE_URL")
                    .unwrap_or_else(|| "https://www.googleapis.com".to_string()),
                api_key: require_env("GOOGLE_API_KEY")?,
                cx: require_env("GOOGLE_CX")?,
                results: parse_env("GOOGLE_RESULTS", 5)?,
            },
            upstream_timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", 15)?,
            upload_dir: optional_env("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            query_keyword_count: parse_env("QUERY_KEYWORD_COUNT", DEFAULT_QUERY_KEYWORD_COUNT)?,
            extra_stopwords: optional_env("ATS_EXTRA_STOPWORDS")
                .map(|raw| split_list(&raw))
                .unwrap_or_default(),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Builds the immutable scoring configuration.
    pub fn ats_config(&self) -> AtsConfig {
        let mut ats = AtsConfig::with_extra_stopwords(&self.extra_stopwords);
        ats.query_keyword_count = self.query_keyword_count;
        ats
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_drops_blanks() {
        assert_eq!(split_list(" team, ,experience ,"), vec!["team", "experience"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u32 = parse_env("JOBMATCH_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_require_env_reports_key() {
        let err = require_env("JOBMATCH_TEST_MISSING_REQUIRED").unwrap_err();
        assert!(err.to_string().contains("JOBMATCH_TEST_MISSING_REQUIRED"));
    }
}
