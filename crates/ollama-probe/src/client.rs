//! HTTP client for the Ollama REST API.
//!
//! Covers the three endpoints a smoke test needs: `/api/version`,
//! `/api/tags` and non-streaming `/api/generate`.

use crate::result::{ProbeError, ProbeResult};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Timeout for the liveness probe.
pub const VERSION_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for the model inventory.
pub const TAGS_TIMEOUT: Duration = Duration::from_secs(10);

/// Sampling temperature sent with every text generation.
pub const TEMPERATURE: f64 = 0.7;

/// Nucleus sampling threshold sent with every text generation.
pub const TOP_P: f64 = 0.9;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Body of `GET /api/version`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionResponse {
    /// Server version string.
    #[serde(default)]
    pub version: Option<String>,
}

/// One installed model as reported by `GET /api/tags`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Model identifier, e.g. `deepseek-r1:7b`.
    #[serde(default)]
    pub name: String,
    /// Size on disk in bytes.
    #[serde(default)]
    pub size: u64,
}

impl ModelDescriptor {
    /// Create a descriptor.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Size in GiB, for display.
    #[must_use]
    pub fn size_gb(&self) -> f64 {
        self.size as f64 / BYTES_PER_GB
    }
}

/// Body of `GET /api/tags`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagsResponse {
    /// Installed models, in server order.
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

/// Generation options for `POST /api/generate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Maximum tokens to generate.
    pub num_predict: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus sampling threshold.
    pub top_p: f64,
}

impl GenerateOptions {
    /// Fixed sampling parameters with the given token budget.
    #[must_use]
    pub const fn with_max_tokens(num_predict: u32) -> Self {
        Self {
            num_predict,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }
}

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model to run.
    pub model: String,
    /// Prompt text.
    pub prompt: String,
    /// Always `false`; the whole completion comes back in one body.
    #[serde(default)]
    pub stream: bool,
    /// Sampling options; omitted for image-prompt requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerateOptions>,
}

impl GenerateRequest {
    /// Text generation request with a token budget and fixed sampling.
    pub fn text(model: impl Into<String>, prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
            options: Some(GenerateOptions::with_max_tokens(max_tokens)),
        }
    }

    /// Request without generation options.
    pub fn bare(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
            options: None,
        }
    }
}

/// Body of a successful `POST /api/generate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated text.
    #[serde(default)]
    pub response: String,
    /// Total server-side duration in nanoseconds.
    #[serde(default)]
    pub total_duration: u64,
    /// Number of generated tokens.
    #[serde(default)]
    pub eval_count: u64,
}

impl GenerateResponse {
    /// Server-side duration in seconds.
    #[must_use]
    pub fn total_duration_secs(&self) -> f64 {
        self.total_duration as f64 / 1e9
    }
}

/// A response value with the client-side wall-clock time of its request.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    /// Response payload.
    pub value: T,
    /// Wall-clock time for the whole request.
    pub latency: Duration,
}

/// Client for an Ollama-compatible server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl OllamaClient {
    /// Create a client pointing at the given base URL.
    ///
    /// Timeouts are applied per request, so the underlying client has none.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder().build().unwrap_or_default();
        Self::with_client(base_url, client)
    }

    /// Create a client with a custom reqwest client.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Query the server version.
    ///
    /// Returns `"unknown"` when the body carries no version field.
    pub async fn version(&self) -> ProbeResult<String> {
        let url = self.url("/api/version");
        let body = self
            .fetch(self.client.get(&url), &url, VERSION_TIMEOUT)
            .await?;
        let parsed: VersionResponse = serde_json::from_str(&body)?;
        Ok(parsed.version.unwrap_or_else(|| "unknown".to_string()))
    }

    /// List installed models in the order the server reports them.
    pub async fn list_models(&self) -> ProbeResult<Vec<ModelDescriptor>> {
        let url = self.url("/api/tags");
        let body = self.fetch(self.client.get(&url), &url, TAGS_TIMEOUT).await?;
        let parsed: TagsResponse = serde_json::from_str(&body)?;
        tracing::debug!(count = parsed.models.len(), "model inventory received");
        Ok(parsed.models)
    }

    /// Send a non-streaming generation request and parse the reply.
    pub async fn generate(
        &self,
        request: &GenerateRequest,
        timeout: Duration,
    ) -> ProbeResult<Timed<GenerateResponse>> {
        let timed = self.generate_raw(request, timeout).await?;
        Ok(Timed {
            value: serde_json::from_str(&timed.value)?,
            latency: timed.latency,
        })
    }

    /// Send a generation request and return the body without parsing it.
    pub async fn generate_raw(
        &self,
        request: &GenerateRequest,
        timeout: Duration,
    ) -> ProbeResult<Timed<String>> {
        let url = self.url("/api/generate");
        tracing::debug!(
            model = %request.model,
            prompt_chars = request.prompt.chars().count(),
            timeout_ms = timeout.as_millis() as u64,
            "sending generation request"
        );
        let start = Instant::now();
        let body = self
            .fetch(self.client.post(&url).json(request), &url, timeout)
            .await?;
        Ok(Timed {
            value: body,
            latency: start.elapsed(),
        })
    }

    /// Send a request and return the body of a 200 response.
    async fn fetch(
        &self,
        builder: reqwest::RequestBuilder,
        url: &str,
        timeout: Duration,
    ) -> ProbeResult<String> {
        let resp = builder
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, url, timeout))?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "non-200 response");
            return Err(ProbeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        resp.text()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, url, timeout))
    }
}
