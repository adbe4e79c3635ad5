//! Command handlers - kept out of the binaries for testability
//!
//! Each handler module contains:
//! - The execution logic for one entry point
//! - Pure helper functions
//! - Tests

pub mod batch;
pub mod invoke;
pub mod server;
pub mod single;

pub use batch::{execute_test_all, run_batch};
pub use invoke::{failure_lines, test_image_prompt, test_model};
pub use server::{check_status, discover_models};
pub use single::{
    ensure_installed, execute_test_ollama, help_text, resolve_model, resolve_prompt, run_single,
    Invocation, SingleRun,
};

use crate::error::CliResult;
use std::future::Future;

/// Drive a future to completion on a current-thread runtime.
pub(crate) fn block_on<F: Future>(future: F) -> CliResult<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
