use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, time::Duration};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8787";
pub const DEFAULT_AI_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
pub const DEFAULT_TIMEOUT_S: u64 = 30;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    pub account_id: String,
    pub api_token: String,
    #[serde(default = "default_ai_base_url")]
    pub ai_base_url: String,
    #[serde(default = "default_timeout_s")]
    pub request_timeout_s: u64,
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_ai_base_url() -> String {
    DEFAULT_AI_BASE_URL.to_string()
}

fn default_timeout_s() -> u64 {
    DEFAULT_TIMEOUT_S
}

impl ServerConfig {
    pub fn load(path: &str) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path))?;
        serde_json::from_str(&data).with_context(|| format!("invalid config JSON in {}", path))
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// `PLAYCALL_CONFIG` points at a JSON file; otherwise read the environment.
    pub fn resolve() -> Result<Self> {
        match std::env::var("PLAYCALL_CONFIG") {
            Ok(path) => Self::load(&path),
            Err(_) => Self::from_env(),
        }
    }

    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut bind_addr = get("BIND_ADDR").unwrap_or_else(default_bind_addr);
        if let Some(port) = get("PORT") {
            let port: u16 = port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {}", port))?;
            let host = bind_addr
                .rsplit_once(':')
                .map(|(h, _)| h.to_string())
                .unwrap_or(bind_addr);
            bind_addr = format!("{}:{}", host, port);
        }

        let request_timeout_s = match get("AI_TIMEOUT_S") {
            Some(s) => s
                .parse()
                .with_context(|| format!("AI_TIMEOUT_S is not a number: {}", s))?,
            None => DEFAULT_TIMEOUT_S,
        };

        Ok(Self {
            bind_addr,
            account_id: get("CF_ACCOUNT_ID").context("CF_ACCOUNT_ID not set")?,
            api_token: get("CF_API_TOKEN").context("CF_API_TOKEN not set")?,
            ai_base_url: get("AI_BASE_URL").unwrap_or_else(default_ai_base_url),
            request_timeout_s,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_s)
    }
}
