//! CLI argument definitions using clap

use crate::config::{CliConfig, ColorChoice, Verbosity};
use clap::{Args, Parser, ValueEnum};
use ollama_probe::DEFAULT_BASE_URL;
use std::time::Duration;

/// Flags shared by both binaries
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Base URL of the Ollama server
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only failures are printed)
    #[arg(short, long)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorArg,

    /// Override the generation token budget
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

impl GlobalArgs {
    /// Fold flags into a configuration
    #[must_use]
    pub fn to_config(&self) -> CliConfig {
        CliConfig::new()
            .with_verbosity(Verbosity::from_flags(self.quiet, self.verbose))
            .with_color(self.color.clone().into())
            .with_base_url(self.url.clone())
            .with_max_tokens(self.max_tokens)
    }
}

/// test-all-models: run a smoke prompt against every installed model
#[derive(Parser, Debug)]
#[command(name = "test-all-models")]
#[command(author, version, about, long_about = None)]
pub struct TestAllArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Pause between models in milliseconds
    #[arg(long, default_value = "1000")]
    pub pause_ms: u64,
}

impl TestAllArgs {
    /// Build the run configuration
    #[must_use]
    pub fn to_config(&self) -> CliConfig {
        self.global
            .to_config()
            .with_pause(Duration::from_millis(self.pause_ms))
    }
}

/// test-ollama: send one prompt to one model
#[derive(Parser, Debug)]
#[command(name = "test-ollama")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct TestOllamaArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Show usage, model keys and examples
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Model key (see --help); defaults to deepseek-r1:1.5b
    pub model: Option<String>,

    /// Custom prompt; remaining words are joined with spaces
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub prompt: Vec<String>,
}

impl TestOllamaArgs {
    /// `-h`, `--help`, or a literal `help` model key
    #[must_use]
    pub fn wants_help(&self) -> bool {
        self.help || self.model.as_deref() == Some("help")
    }

    /// Build the run configuration
    #[must_use]
    pub fn to_config(&self) -> CliConfig {
        self.global.to_config()
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
