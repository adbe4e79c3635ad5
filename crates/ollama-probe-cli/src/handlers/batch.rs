//! Handler for `test-all-models`.
//!
//! Probes liveness, discovers every installed model and runs the
//! category-appropriate prompt against each one in discovery order.

use super::block_on;
use super::invoke::test_model;
use super::server::{check_status, discover_models, format_name_line};
use crate::commands::TestAllArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::logging;
use crate::output::Reporter;
use ollama_probe::{categorize, BatchSummary, OllamaClient, ProbeOptions, TestResult, Verdict};

/// Test every discovered model once, sequentially.
///
/// Aborts before any generation when the server is down, discovery fails or
/// no models are installed. Individual failures never stop the sweep.
pub async fn run_batch(
    client: &OllamaClient,
    config: &CliConfig,
    reporter: &Reporter,
) -> CliResult<BatchSummary> {
    reporter.header("Ollama: testing all installed models");

    if !check_status(client, reporter).await {
        return Err(CliError::server_unavailable(client.base_url()));
    }

    let models = discover_models(client, reporter).await?;
    if models.is_empty() {
        reporter.warning("No models available");
        reporter.detail("Pull some models with: ollama pull <model>");
        return Err(CliError::NoModels);
    }

    reporter.info(&format!("Models found: {}", models.len()));
    for model in &models {
        reporter.plain(&format_name_line(model));
    }

    let options = config.apply_overrides(ProbeOptions::batch());
    let mut summary = BatchSummary::new();

    for model in &models {
        let category = categorize(&model.name);
        let profile = category.profile_or_fallback();
        tracing::info!(model = %model.name, %category, "testing model");

        let outcome = test_model(
            client,
            reporter,
            &model.name,
            profile.prompt,
            Some(profile.description),
            &options,
        )
        .await;
        summary.record(TestResult::new(model.name.clone(), category, outcome.is_ok()));

        if !config.pause.is_zero() {
            tokio::time::sleep(config.pause).await;
        }
    }

    reporter.batch_summary(&summary);
    Ok(summary)
}

/// Execute `test-all-models`.
pub fn execute_test_all(args: &TestAllArgs) -> CliResult<()> {
    let config = args.to_config();
    logging::init(config.verbosity);

    let reporter = Reporter::from_config(&config);
    let client = OllamaClient::new(&config.base_url);
    let summary = block_on(run_batch(&client, &config, &reporter))??;

    match summary.verdict() {
        Verdict::AllPassed => Ok(()),
        Verdict::SomePassed | Verdict::AllFailed => Err(CliError::test_failed(format!(
            "{} tests successful",
            summary.tally()
        ))),
    }
}
