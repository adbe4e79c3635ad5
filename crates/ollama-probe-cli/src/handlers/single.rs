//! Handler for `test-ollama`.
//!
//! Resolves a model key through the alias table, checks the model is
//! installed, picks a prompt and runs one text or image-prompt generation.

use super::block_on;
use super::invoke::{test_image_prompt, test_model};
use super::server::{check_status, discover_models, format_size_line};
use crate::commands::TestOllamaArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::logging;
use crate::output::Reporter;
use clap::CommandFactory;
use ollama_probe::{
    is_image_prompt_model, resolve_alias, ModelDescriptor, OllamaClient, ProbeError, ProbeOptions,
    ProbeResult, PromptKind, DEFAULT_MODEL, IMAGE_PROMPT_TIMEOUT, MODEL_ALIASES,
};
use std::fmt::Write as _;
use std::time::Duration;

/// What the user asked for on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleRun {
    /// Alias key; `None` selects the default model
    pub model_key: Option<String>,
    /// Custom prompt words; empty selects an example prompt
    pub prompt_words: Vec<String>,
}

impl From<&TestOllamaArgs> for SingleRun {
    fn from(args: &TestOllamaArgs) -> Self {
        Self {
            model_key: args.model.clone(),
            prompt_words: args.prompt.clone(),
        }
    }
}

/// clap usage followed by every model key and a few examples.
#[must_use]
pub fn help_text() -> String {
    let mut out = TestOllamaArgs::command().render_help().to_string();
    out.push_str("\nAvailable models:\n");
    for alias in MODEL_ALIASES {
        let _ = writeln!(out, "  {:<22}- {}", alias.key, alias.description);
    }
    out.push_str("\nExamples:\n");
    out.push_str("  test-ollama\n");
    out.push_str("  test-ollama deepseek-r1-1.5b\n");
    out.push_str("  test-ollama opencoder-1.5b \"Write a Fibonacci function\"\n");
    out.push_str("  test-ollama genaiimagecsprompt \"space cat\"\n");
    out
}

/// How the resolved model is exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Request without generation options
    ImagePrompt {
        /// Request timeout
        timeout: Duration,
    },
    /// Text generation with the interactive preset
    Text(ProbeOptions),
}

impl Invocation {
    /// Image-prompt models take the long bare request, everything else text.
    #[must_use]
    pub fn for_model(model: &str, config: &CliConfig) -> Self {
        if is_image_prompt_model(model) {
            Self::ImagePrompt {
                timeout: IMAGE_PROMPT_TIMEOUT,
            }
        } else {
            Self::Text(config.apply_overrides(ProbeOptions::interactive()))
        }
    }
}

/// Resolve the model key, falling back to the default model.
pub fn resolve_model(key: Option<&str>) -> ProbeResult<&'static str> {
    key.map_or(Ok(DEFAULT_MODEL), resolve_alias)
}

/// Fail unless `model` is among the discovered models.
pub fn ensure_installed(model: &str, installed: &[ModelDescriptor]) -> ProbeResult<()> {
    if installed.iter().any(|m| m.name == model) {
        Ok(())
    } else {
        Err(ProbeError::ModelNotInstalled {
            model: model.to_string(),
        })
    }
}

/// Join custom prompt words, or pick the example prompt for the model.
#[must_use]
pub fn resolve_prompt(model: &str, words: &[String]) -> String {
    if words.is_empty() {
        PromptKind::for_model(model).prompt().to_string()
    } else {
        words.join(" ")
    }
}

fn print_inventory(reporter: &Reporter, models: &[ModelDescriptor]) {
    if models.is_empty() {
        reporter.info("No models downloaded");
        return;
    }
    reporter.info("Available models:");
    for model in models {
        reporter.plain(&format_size_line(model));
    }
}

/// Run one model test end to end.
pub async fn run_single(
    client: &OllamaClient,
    config: &CliConfig,
    reporter: &Reporter,
    run: &SingleRun,
) -> CliResult<()> {
    reporter.header("Ollama single model test");

    if !check_status(client, reporter).await {
        return Err(CliError::server_unavailable(client.base_url()));
    }

    let installed = discover_models(client, reporter).await?;
    print_inventory(reporter, &installed);

    let model = match resolve_model(run.model_key.as_deref()) {
        Ok(model) => model,
        Err(e) => {
            reporter.failure(&e.to_string());
            reporter.detail("Run 'test-ollama help' to list the available model keys");
            return Err(e.into());
        }
    };
    if run.model_key.is_none() {
        reporter.info(&format!("Using default model: {model}"));
    }

    if let Err(e) = ensure_installed(model, &installed) {
        reporter.warning(&format!("Model '{model}' is not downloaded"));
        reporter.detail(&format!("Download it with: ollama pull {model}"));
        return Err(e.into());
    }

    let prompt = resolve_prompt(model, &run.prompt_words);
    let outcome = match Invocation::for_model(model, config) {
        Invocation::ImagePrompt { timeout } => {
            test_image_prompt(client, reporter, model, &prompt, timeout)
                .await
                .map(|_| ())
        }
        Invocation::Text(options) => {
            test_model(client, reporter, model, &prompt, None, &options)
                .await
                .map(|_| ())
        }
    };

    reporter.blank();
    match outcome {
        Ok(()) => {
            reporter.success("Test completed successfully!");
            Ok(())
        }
        Err(e) => {
            reporter.failure("Test failed");
            Err(e.into())
        }
    }
}

/// Execute `test-ollama`.
pub fn execute_test_ollama(args: &TestOllamaArgs) -> CliResult<()> {
    if args.wants_help() {
        println!("{}", help_text());
        return Ok(());
    }

    let config = args.to_config();
    logging::init(config.verbosity);

    let reporter = Reporter::from_config(&config);
    let client = OllamaClient::new(&config.base_url);
    block_on(run_single(&client, &config, &reporter, &SingleRun::from(args)))?
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_alias() {
        let help = help_text();
        for alias in MODEL_ALIASES {
            assert!(help.contains(alias.key), "missing {}", alias.key);
        }
        assert!(help.contains("Usage: test-ollama"));
        assert!(help.contains("--url"));
        assert!(help.contains(DEFAULT_MODEL));
    }

    #[test]
    fn test_resolve_model_alias() {
        assert_eq!(resolve_model(Some("deepseek-r1-1.5b")).unwrap(), "deepseek-r1:1.5b");
        assert_eq!(resolve_model(Some("opencoder-8b")).unwrap(), "opencoder:8b");
    }

    #[test]
    fn test_resolve_model_default() {
        assert_eq!(resolve_model(None).unwrap(), DEFAULT_MODEL);
    }

    #[test]
    fn test_resolve_model_unknown() {
        let err = resolve_model(Some("nonexistent-model")).unwrap_err();
        assert!(matches!(err, ProbeError::UnknownModel { .. }));
    }

    #[test]
    fn test_ensure_installed() {
        let installed = vec![
            ModelDescriptor::new("deepseek-r1:1.5b", 1),
            ModelDescriptor::new("opencoder:8b", 1),
        ];
        assert!(ensure_installed("deepseek-r1:1.5b", &installed).is_ok());
        let err = ensure_installed("deepseek-r1:70b", &installed).unwrap_err();
        assert!(matches!(err, ProbeError::ModelNotInstalled { ref model } if model == "deepseek-r1:70b"));
        assert!(ensure_installed("opencoder:8b", &[]).is_err());
    }

    #[test]
    fn test_resolve_prompt_joins_words() {
        let words = vec!["Write".to_string(), "a".to_string(), "haiku".to_string()];
        assert_eq!(resolve_prompt("deepseek-r1:7b", &words), "Write a haiku");
    }

    #[test]
    fn test_resolve_prompt_by_model() {
        assert_eq!(
            resolve_prompt("opencoder:1.5b", &[]),
            PromptKind::Coding.prompt()
        );
        assert_eq!(
            resolve_prompt("deepseek-r1:1.5b", &[]),
            PromptKind::Reasoning.prompt()
        );
        assert_eq!(
            resolve_prompt("alientelligence/genaiimagecsprompt", &[]),
            PromptKind::ImagePrompt.prompt()
        );
        assert_eq!(resolve_prompt("llama3:8b", &[]), PromptKind::General.prompt());
    }

    #[test]
    fn test_invocation_text_uses_interactive_preset() {
        assert_eq!(
            Invocation::for_model("deepseek-r1:1.5b", &CliConfig::default()),
            Invocation::Text(ProbeOptions::interactive())
        );
        let config = CliConfig::new().with_max_tokens(Some(16));
        assert_eq!(
            Invocation::for_model("opencoder:8b", &config),
            Invocation::Text(ProbeOptions::interactive().with_max_tokens(16))
        );
    }

    #[test]
    fn test_invocation_image_prompt_uses_long_timeout() {
        let config = CliConfig::new().with_max_tokens(Some(16));
        assert_eq!(
            Invocation::for_model("alientelligence/genaiimagecsprompt", &config),
            Invocation::ImagePrompt {
                timeout: Duration::from_secs(300)
            }
        );
    }

    #[test]
    fn test_single_run_from_args() {
        use clap::Parser;
        let args = TestOllamaArgs::parse_from(["test-ollama", "deepseek-r1-7b", "why", "sky"]);
        let run = SingleRun::from(&args);
        assert_eq!(run.model_key.as_deref(), Some("deepseek-r1-7b"));
        assert_eq!(run.prompt_words, ["why", "sky"]);
    }
}
