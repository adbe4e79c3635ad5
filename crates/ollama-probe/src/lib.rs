//! ollama-probe: smoke tests for a locally running Ollama server.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  /api/version│──►│  /api/tags   │──►│ categorize + │──►│ /api/generate│
//! │  (liveness)  │   │  (discovery) │   │ pick prompt  │   │ (one attempt)│
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! - [`client`]: typed HTTP client for the three endpoints
//! - [`catalog`]: static category markers, prompts and the alias table
//! - [`probe`]: single-model and image-prompt invocations
//! - [`report`]: per-model results and the batch verdict

#![warn(missing_docs)]

pub mod catalog;
pub mod client;
#[cfg(feature = "mock-server")]
pub mod mock;
pub mod probe;
pub mod report;
mod result;

pub use catalog::{
    categorize, is_image_prompt_model, resolve_alias, Category, ModelAlias, PromptKind,
    TestProfile, DEFAULT_MODEL, FALLBACK_PROFILE, IMAGE_PROMPT_MARKER, MODEL_ALIASES,
};
pub use client::{ModelDescriptor, OllamaClient, DEFAULT_BASE_URL};
pub use probe::{
    run_generation, run_image_prompt, truncate_chars, Generation, ProbeOptions, ResponsePreview,
    IMAGE_PROMPT_TIMEOUT,
};
pub use report::{BatchSummary, TestResult, Verdict};
pub use result::{ProbeError, ProbeResult};
