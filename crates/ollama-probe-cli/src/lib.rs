//! ollama-probe CLI library
//!
//! Shared plumbing for the `test-all-models` and `test-ollama` binaries:
//! argument parsing, configuration, console output, logging and the
//! command handlers.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{ColorArg, GlobalArgs, TestAllArgs, TestOllamaArgs};
pub use config::{CliConfig, ColorChoice, Verbosity, DEFAULT_PAUSE};
pub use error::{CliError, CliResult};
pub use output::{Level, Reporter};
