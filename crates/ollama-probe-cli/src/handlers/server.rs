//! Liveness probe and model discovery, with console output.

use crate::output::Reporter;
use ollama_probe::{ModelDescriptor, OllamaClient, ProbeError, ProbeResult};

/// Probe `/api/version` once. Never fails; prints why the server is down.
pub async fn check_status(client: &OllamaClient, reporter: &Reporter) -> bool {
    match client.version().await {
        Ok(version) => {
            reporter.success(&format!("Ollama is running (version: {version})"));
            true
        }
        Err(ProbeError::Api { status, .. }) => {
            tracing::warn!(status, "version endpoint returned an error");
            reporter.failure(&format!("Error connecting to Ollama: {status}"));
            false
        }
        Err(e) => {
            tracing::warn!("liveness probe failed: {e}");
            reporter.failure(&format!("Cannot connect to Ollama: {e}"));
            reporter.detail(&format!(
                "Make sure Ollama is running at {}",
                client.base_url()
            ));
            false
        }
    }
}

/// List installed models, printing a diagnostic when the request fails.
///
/// An empty inventory is `Ok(vec![])`; callers report it themselves.
pub async fn discover_models(
    client: &OllamaClient,
    reporter: &Reporter,
) -> ProbeResult<Vec<ModelDescriptor>> {
    client.list_models().await.map_err(|e| {
        tracing::warn!("model discovery failed: {e}");
        match &e {
            ProbeError::Api { status, .. } => {
                reporter.failure(&format!("Error fetching models: {status}"));
            }
            _ => reporter.failure(&format!("Connection error: {e}")),
        }
        e
    })
}

/// `   • name`
#[must_use]
pub fn format_name_line(model: &ModelDescriptor) -> String {
    format!("   • {}", model.name)
}

/// `   • name (X.XGB)`
#[must_use]
pub fn format_size_line(model: &ModelDescriptor) -> String {
    format!("   • {} ({:.1}GB)", model.name, model.size_gb())
}
