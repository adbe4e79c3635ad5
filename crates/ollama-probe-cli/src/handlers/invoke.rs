//! Single generation with console output.

use crate::output::Reporter;
use ollama_probe::{
    run_generation, run_image_prompt, Generation, OllamaClient, ProbeError, ProbeOptions,
    ProbeResult,
};
use std::time::Duration;

/// Headline and optional detail line for a failed invocation.
#[must_use]
pub fn failure_lines(err: &ProbeError) -> (String, Option<String>) {
    match err {
        ProbeError::Api { status, body } => (
            format!("Error in response: {status}"),
            Some(format!("Details: {body}")),
        ),
        ProbeError::Timeout { timeout, .. } => (
            format!("Timeout: the response took longer than {timeout:?}"),
            None,
        ),
        ProbeError::Transport(e) => (format!("Connection error: {e}"), None),
        other => (format!("Error: {other}"), None),
    }
}

fn report_failure(reporter: &Reporter, err: &ProbeError) {
    let (headline, detail) = failure_lines(err);
    reporter.failure(&headline);
    if let Some(detail) = detail {
        reporter.detail(&detail);
    }
}

/// Send one prompt to one model and print the answer and metrics.
///
/// `description` is the test profile label; interactive runs have none.
pub async fn test_model(
    client: &OllamaClient,
    reporter: &Reporter,
    model: &str,
    prompt: &str,
    description: Option<&str>,
    options: &ProbeOptions,
) -> ProbeResult<Generation> {
    reporter.blank();
    reporter.info(&format!("Testing model: {model}"));
    if let Some(description) = description {
        reporter.plain(&format!("Type: {description}"));
    }
    reporter.plain(&format!("Prompt: {}", options.prompt_preview(prompt)));
    reporter.rule();

    match run_generation(client, model, prompt, options).await {
        Ok(generation) => {
            reporter.success(&format!(
                "Response ({:.2}s):",
                generation.total_duration_secs
            ));
            reporter.plain(&options.response_preview.render(&generation.text));
            reporter.blank();
            reporter.plain(&format!("Time: {:.2}s", generation.total_duration_secs));
            reporter.plain(&format!("Tokens: {}", generation.eval_count));
            Ok(generation)
        }
        Err(e) => {
            tracing::warn!(model, "generation failed: {e}");
            report_failure(reporter, &e);
            Err(e)
        }
    }
}

/// Send one image-prompt request and acknowledge it.
pub async fn test_image_prompt(
    client: &OllamaClient,
    reporter: &Reporter,
    model: &str,
    prompt: &str,
    timeout: Duration,
) -> ProbeResult<Duration> {
    reporter.blank();
    reporter.info(&format!("Testing image prompt generation with: {model}"));
    reporter.plain(&format!("Prompt: {prompt}"));
    reporter.rule();

    match run_image_prompt(client, model, prompt, timeout).await {
        Ok(elapsed) => {
            reporter.success("Image prompt generated successfully");
            reporter.plain(&format!("Time: {:.2}s", elapsed.as_secs_f64()));
            Ok(elapsed)
        }
        Err(e) => {
            tracing::warn!(model, "image prompt generation failed: {e}");
            report_failure(reporter, &e);
            Err(e)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_lines_api_includes_status() {
        let err = ProbeError::Api {
            status: 500,
            body: "model runner crashed".to_string(),
        };
        let (headline, detail) = failure_lines(&err);
        assert!(headline.contains("500"));
        assert_eq!(detail.as_deref(), Some("Details: model runner crashed"));
    }

    #[test]
    fn test_failure_lines_timeout_is_distinct() {
        let err = ProbeError::Timeout {
            url: "http://localhost:11434/api/generate".to_string(),
            timeout: Duration::from_secs(120),
        };
        let (headline, detail) = failure_lines(&err);
        assert!(headline.starts_with("Timeout"));
        assert!(headline.contains("120s"));
        assert!(detail.is_none());
    }

    #[test]
    fn test_failure_lines_sub_second_timeout() {
        let err = ProbeError::Timeout {
            url: "http://localhost:11434/api/generate".to_string(),
            timeout: Duration::from_millis(500),
        };
        let (headline, _) = failure_lines(&err);
        assert_eq!(headline, "Timeout: the response took longer than 500ms");
    }

    #[test]
    fn test_failure_lines_other() {
        let err = ProbeError::ModelNotInstalled {
            model: "opencoder:8b".to_string(),
        };
        let (headline, _) = failure_lines(&err);
        assert!(headline.starts_with("Error:"));
    }

    #[tokio::test]
    async fn test_model_connection_refused_fails_once() {
        let client = OllamaClient::new("http://127.0.0.1:9");
        let reporter = Reporter::new(false, true);
        let opts = ProbeOptions::batch().with_timeout(Duration::from_secs(2));
        let result = test_model(&client, &reporter, "m", "p", Some("General test"), &opts).await;
        assert!(result.is_err());
    }
}
