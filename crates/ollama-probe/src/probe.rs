//! Single-model test invocation.
//!
//! One configurable entry point for text generation plus the heavier
//! image-prompt variant. Both make exactly one attempt.

use crate::client::{GenerateRequest, OllamaClient};
use crate::result::ProbeResult;
use std::time::Duration;

/// Timeout for image-prompt generation.
pub const IMAGE_PROMPT_TIMEOUT: Duration = Duration::from_secs(300);

/// How much of the generated text to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsePreview {
    /// Cut after this many characters and append `...`
    Truncated(usize),
    /// Print everything
    Full,
}

impl ResponsePreview {
    /// Render generated text for display.
    #[must_use]
    pub fn render(self, text: &str) -> String {
        match self {
            Self::Truncated(max) => truncate_chars(text, max),
            Self::Full => text.to_string(),
        }
    }
}

/// Cut `text` to `max` characters, appending `...` when anything was dropped.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Knobs for a single text-generation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Token budget sent as `num_predict`
    pub max_tokens: u32,
    /// Request timeout
    pub timeout: Duration,
    /// Characters of the prompt echoed before sending
    pub prompt_preview_chars: usize,
    /// How much of the answer to print
    pub response_preview: ResponsePreview,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self::batch()
    }
}

impl ProbeOptions {
    /// Settings for sweeping every installed model: short answers, terse output.
    #[must_use]
    pub const fn batch() -> Self {
        Self {
            max_tokens: 300,
            timeout: Duration::from_secs(180),
            prompt_preview_chars: 80,
            response_preview: ResponsePreview::Truncated(200),
        }
    }

    /// Settings for a single hand-picked model: longer answers, full output.
    #[must_use]
    pub const fn interactive() -> Self {
        Self {
            max_tokens: 500,
            timeout: Duration::from_secs(120),
            prompt_preview_chars: 100,
            response_preview: ResponsePreview::Full,
        }
    }

    /// Override the token budget.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Prompt text as it should be echoed.
    #[must_use]
    pub fn prompt_preview(&self, prompt: &str) -> String {
        truncate_chars(prompt, self.prompt_preview_chars)
    }
}

/// Outcome of a successful text generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// Model that answered
    pub model: String,
    /// Generated text
    pub text: String,
    /// Server-reported duration in seconds
    pub total_duration_secs: f64,
    /// Server-reported generated token count
    pub eval_count: u64,
}

/// Send one prompt to one model with fixed sampling parameters.
pub async fn run_generation(
    client: &OllamaClient,
    model: &str,
    prompt: &str,
    options: &ProbeOptions,
) -> ProbeResult<Generation> {
    let request = GenerateRequest::text(model, prompt, options.max_tokens);
    let timed = client.generate(&request, options.timeout).await?;
    let response = timed.value;
    tracing::info!(
        model,
        eval_count = response.eval_count,
        latency_ms = timed.latency.as_millis() as u64,
        "generation succeeded"
    );
    Ok(Generation {
        model: model.to_string(),
        total_duration_secs: response.total_duration_secs(),
        eval_count: response.eval_count,
        text: response.response,
    })
}

/// Send an image-prompt request and return the wall-clock time it took.
/// The reply body is not inspected.
pub async fn run_image_prompt(
    client: &OllamaClient,
    model: &str,
    prompt: &str,
    timeout: Duration,
) -> ProbeResult<Duration> {
    let request = GenerateRequest::bare(model, prompt);
    let timed = client.generate_raw(&request, timeout).await?;
    tracing::info!(
        model,
        latency_ms = timed.latency.as_millis() as u64,
        "image prompt generated"
    );
    Ok(timed.latency)
}
