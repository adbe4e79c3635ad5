//! test-all-models: smoke-test every model installed on a local Ollama server
//!
//! ## Usage
//!
//! ```bash
//! test-all-models                              # Default server, 1s pause
//! test-all-models --url http://gpu-box:11434   # Remote server
//! test-all-models --pause-ms 0 -v              # No pause, request logs
//! ```

use clap::Parser;
use ollama_probe_cli::{handlers::execute_test_all, TestAllArgs};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = TestAllArgs::parse();
    match execute_test_all(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
