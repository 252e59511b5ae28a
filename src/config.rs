use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, anyhow};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://clever-semolina-03e5ef.netlify.app";
pub const DEFAULT_OUTPUT_DIR: &str = "generated_docs";

/// Application configuration, read once at startup and handed to the app.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub request_timeout: Option<Duration>,
    pub allowed_origin: String,
    pub output_dir: PathBuf,
}

impl Config {
    /// Reads the process environment.
    /// Fails when the API key is missing so the server never starts without it.
    pub fn from_env() -> anyhow::Result<Self> {
        let cwd = env::current_dir().context("Failed to resolve working directory")?;
        Self::from_lookup(|key| env::var(key).ok(), &cwd)
    }

    /// Builds the configuration from `lookup`; relative output directories
    /// are resolved against `cwd`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cwd: &Path,
    ) -> anyhow::Result<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("OPENAI_API_KEY not set"))?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid number, got {raw:?}"))?,
            None => 5000,
        };

        let request_timeout = match lookup("OPENAI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse().with_context(|| {
                    format!("OPENAI_TIMEOUT_SECS must be a number of seconds, got {raw:?}")
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let output_dir = lookup("OUTPUT_DIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());
        let output_dir = cwd.join(output_dir);

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            api_key,
            api_url: lookup("OPENAI_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request_timeout,
            allowed_origin: lookup("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            output_dir,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

// Hand-written so the API key never reaches the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &"***API_KEY***")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .field("allowed_origin", &self.allowed_origin)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}
