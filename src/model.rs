use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    /// Transport-level failure talking to the inference service.
    #[error("{0}")]
    Transport(String),
    /// The service answered but reported a failure (quota, model error, ...).
    #[error("{0}")]
    Service(String),
}

/// What a model run hands back. `response` is absent when the service
/// produced no usable text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceOutput {
    pub response: Option<String>,
}

impl InferenceOutput {
    pub fn text(s: impl Into<String>) -> Self {
        Self { response: Some(s.into()) }
    }
}

/// Runs a named model against a prompt.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn run(&self, model: &str, prompt: &str) -> Result<InferenceOutput, InferenceError>;
}

// Envelope returned by the hosted Workers AI REST API.
#[derive(Deserialize, Debug)]
struct RunEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    errors: Vec<EnvelopeMessage>,
}

#[derive(Deserialize, Debug)]
struct EnvelopeMessage {
    #[serde(default)]
    message: String,
}

/// Client for `POST {base_url}/accounts/{account_id}/ai/run/{model}`.
pub struct WorkersAiClient {
    client: Client,
    base_url: String,
    account_id: String,
    api_token: String,
}

impl WorkersAiClient {
    pub fn new(
        base_url: &str,
        account_id: &str,
        api_token: &str,
        timeout: Duration,
    ) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            account_id: account_id.to_string(),
            api_token: api_token.to_string(),
        })
    }

    fn run_url(&self, model: &str) -> String {
        format!("{}/accounts/{}/ai/run/{}", self.base_url, self.account_id, model)
    }
}

#[async_trait]
impl InferenceClient for WorkersAiClient {
    async fn run(&self, model: &str, prompt: &str) -> Result<InferenceOutput, InferenceError> {
        let url = self.run_url(model);
        tracing::debug!("running {} ({} prompt chars)", model, prompt.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        let envelope: RunEnvelope = serde_json::from_str(&body).map_err(|e| {
            InferenceError::Service(format!(
                "unreadable inference response (status {}): {}; body: {}",
                status,
                e,
                snippet(&body)
            ))
        })?;
        if !status.is_success() || !envelope.success {
            let msg = envelope
                .errors
                .into_iter()
                .map(|e| e.message)
                .find(|m| !m.is_empty())
                .unwrap_or_else(|| format!("inference request failed with status {}", status));
            return Err(InferenceError::Service(msg));
        }

        Ok(output_from_result(&envelope.result))
    }
}

const SNIPPET_CHARS: usize = 200;

fn snippet(body: &str) -> String {
    let mut out: String = body.chars().take(SNIPPET_CHARS).collect();
    if body.chars().count() > SNIPPET_CHARS {
        out.push_str("...");
    }
    out
}

// `result.response` when it is text; anything else counts as no response.
fn output_from_result(result: &Value) -> InferenceOutput {
    InferenceOutput {
        response: result
            .get("response")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}
