//! Configuration for the NCF inference adapter
use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Main configuration struct, loaded from environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Invocation URI of the model server, e.g.
    /// `http://localhost:8501/v1/models/ncf:predict`
    pub model_server_url: String,

    /// HTTP bind host
    #[serde(default = "default_http_host")]
    pub http_host: String,

    /// HTTP bind port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Number of actix workers (actix default when unset)
    #[serde(default)]
    pub http_workers: Option<usize>,

    /// Maximum accepted inbound payload size
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,

    /// `json` switches the log output to JSON lines
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_max_payload_bytes() -> usize {
    6 * 1024 * 1024 // 6 MiB
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow!("HTTP port must be greater than 0"));
        }

        if self.model_server_url.is_empty() {
            return Err(anyhow!("MODEL_SERVER_URL is required"));
        }

        if !(self.model_server_url.starts_with("http://")
            || self.model_server_url.starts_with("https://"))
        {
            return Err(anyhow!(
                "MODEL_SERVER_URL must be an http(s) URL, got {}",
                self.model_server_url
            ));
        }

        if self.max_payload_bytes == 0 {
            return Err(anyhow!("MAX_PAYLOAD_BYTES must be greater than 0"));
        }

        if self.http_workers == Some(0) {
            return Err(anyhow!("HTTP_WORKERS must be greater than 0"));
        }

        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
