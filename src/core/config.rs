use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-5";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MAX_RETRIES: usize = 3;
pub const DEFAULT_SUMMARIZE_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_SUMMARY_SENTENCES: usize = 3;
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Which summarizer implementation serves `/summarize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarizerBackend {
    OpenAi,
    Lead,
}

impl FromStr for SummarizerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "lead" => Ok(Self::Lead),
            other => Err(format!(
                "SUMMARIZER_BACKEND: unknown backend '{other}' (expected 'openai' or 'lead')"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub backend: SummarizerBackend,
    pub openai_api_key: Option<String>,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub openai_max_retries: usize,
    pub summarize_timeout: Duration,
    pub summary_sentences: usize,
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns a message naming the offending variable when a value cannot be parsed.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = get("OPENAI_API_KEY");
        let backend = match get("SUMMARIZER_BACKEND") {
            Some(raw) => raw.parse()?,
            None if openai_api_key.is_some() => SummarizerBackend::OpenAi,
            None => SummarizerBackend::Lead,
        };

        if backend == SummarizerBackend::OpenAi && openai_api_key.is_none() {
            return Err("OPENAI_API_KEY: required when SUMMARIZER_BACKEND is 'openai'".to_string());
        }

        let summary_sentences = parse_or(&get, "SUMMARY_SENTENCES", DEFAULT_SUMMARY_SENTENCES)?;
        if summary_sentences == 0 {
            return Err("SUMMARY_SENTENCES: must be at least 1".to_string());
        }

        let summarize_timeout_secs =
            parse_or(&get, "SUMMARIZE_TIMEOUT_SECS", DEFAULT_SUMMARIZE_TIMEOUT_SECS)?;
        if summarize_timeout_secs == 0 {
            return Err("SUMMARIZE_TIMEOUT_SECS: must be at least 1".to_string());
        }

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            backend,
            openai_api_key,
            openai_org_id: get("OPENAI_ORG_ID"),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_max_retries: parse_or(&get, "OPENAI_MAX_RETRIES", DEFAULT_OPENAI_MAX_RETRIES)?,
            summarize_timeout: Duration::from_secs(summarize_timeout_secs),
            summary_sentences,
            max_body_bytes: parse_or(&get, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("{key}: invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}
