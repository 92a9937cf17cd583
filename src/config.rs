//! Environment-backed configuration.
//!
//! Every recognized key is an explicit struct field; there is no free-form
//! settings map. Values come from the process environment, with `.env`
//! loaded first when present.

use anyhow::{bail, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub openai_model: String,
    pub database_url: String,
    /// Hard length bounds for a publishable post, in code points.
    pub min_post_chars: usize,
    pub max_post_chars: usize,
    /// Substrings that unconditionally invalidate a post.
    pub forbidden_words: Vec<String>,
    /// Local-time offset used for scene selection (+8 = Asia/Taipei).
    pub timezone_offset_hours: i32,
    /// Upstream re-draft attempts after a rejection or network failure.
    pub max_retries: u32,
}

impl Config {
    /// Load configuration from the environment (and `.env` when present).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let config = Self {
            openai_api_key: env_or("OPENAI_API_KEY", ""),
            openai_base_url: std::env::var("OPENAI_BASE_URL").ok(),
            openai_model: env_or("OPENAI_MODEL", "gpt-4-turbo-preview"),
            database_url: env_or("DATABASE_URL", "sqlite://threads_poster.db"),
            min_post_chars: env_parsed("MIN_POST_CHARS", 20),
            max_post_chars: env_parsed("MAX_POST_CHARS", 500),
            forbidden_words: env_or("FORBIDDEN_WORDS", "髒話,暴力,色情")
                .split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(String::from)
                .collect(),
            timezone_offset_hours: env_parsed("TIMEZONE_OFFSET_HOURS", 8),
            max_retries: env_parsed("MAX_RETRIES", 3),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.openai_api_key.is_empty() {
            bail!("missing required setting: OPENAI_API_KEY");
        }
        if self.min_post_chars > self.max_post_chars {
            bail!(
                "MIN_POST_CHARS ({}) must not exceed MAX_POST_CHARS ({})",
                self.min_post_chars,
                self.max_post_chars
            );
        }
        Ok(())
    }

    /// Current hour in the configured local timezone.
    pub fn local_hour(&self) -> u32 {
        use chrono::{FixedOffset, Timelike, Utc};
        let offset = FixedOffset::east_opt(self.timezone_offset_hours * 3600)
            .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
        Utc::now().with_timezone(&offset).hour()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
