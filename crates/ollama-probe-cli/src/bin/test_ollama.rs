//! test-ollama: send one prompt to one model on a local Ollama server
//!
//! ## Usage
//!
//! ```bash
//! test-ollama                                          # Default model, example prompt
//! test-ollama deepseek-r1-1.5b                         # Pick a model key
//! test-ollama opencoder-1.5b Write a Fibonacci function
//! test-ollama help                                     # List model keys
//! ```

use clap::Parser;
use ollama_probe_cli::{handlers::execute_test_ollama, TestOllamaArgs};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = TestOllamaArgs::parse();
    match execute_test_ollama(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
