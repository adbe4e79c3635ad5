//! In-process mock of the Ollama HTTP API.
//!
//! Serves `/api/version`, `/api/tags` and `/api/generate` from an axum router
//! on an ephemeral loopback port, on its own thread and runtime, so both
//! async tests and blocking binary tests can point a client at it.
//! Every `/api/generate` body is recorded for later inspection.
//!
//! ```rust,ignore
//! let server = MockOllama::start(MockOllamaConfig::default().with_models(["opencoder:1.5b"]))?;
//! let client = OllamaClient::new(server.base_url());
//! ```

use crate::client::{GenerateRequest, GenerateResponse, ModelDescriptor, TagsResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::oneshot;

/// Canned behavior for the mock server.
#[derive(Debug, Clone)]
pub struct MockOllamaConfig {
    /// Version reported by `/api/version`; `None` omits the field
    pub version: Option<String>,
    /// Status for `/api/version`
    pub version_status: u16,
    /// Inventory reported by `/api/tags`
    pub models: Vec<ModelDescriptor>,
    /// Status for `/api/tags`
    pub tags_status: u16,
    /// Body returned by a successful `/api/generate`
    pub generation: GenerateResponse,
    /// Status for `/api/generate`
    pub generate_status: u16,
    /// Body sent with non-200 `/api/generate` replies
    pub error_body: String,
    /// Models whose generations fail with 500 regardless of `generate_status`
    pub failing_models: Vec<String>,
    /// Delay before answering `/api/generate`
    pub generate_delay: Duration,
}

impl Default for MockOllamaConfig {
    fn default() -> Self {
        Self {
            version: Some("0.5.7".to_string()),
            version_status: 200,
            models: Vec::new(),
            tags_status: 200,
            generation: GenerateResponse {
                response: "Hello from the mock server".to_string(),
                total_duration: 1_500_000_000,
                eval_count: 12,
            },
            generate_status: 200,
            error_body: "internal server error".to_string(),
            failing_models: Vec::new(),
            generate_delay: Duration::ZERO,
        }
    }
}

impl MockOllamaConfig {
    /// Report these model names, 1 GiB each.
    #[must_use]
    pub fn with_models<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = names
            .into_iter()
            .map(|n| ModelDescriptor::new(n, 1 << 30))
            .collect();
        self
    }

    /// Override the `/api/version` status.
    #[must_use]
    pub const fn with_version_status(mut self, status: u16) -> Self {
        self.version_status = status;
        self
    }

    /// Override the `/api/tags` status.
    #[must_use]
    pub const fn with_tags_status(mut self, status: u16) -> Self {
        self.tags_status = status;
        self
    }

    /// Override the successful generation body.
    #[must_use]
    pub fn with_generation(mut self, generation: GenerateResponse) -> Self {
        self.generation = generation;
        self
    }

    /// Fail every generation with this status and body.
    #[must_use]
    pub fn with_generate_error(mut self, status: u16, body: impl Into<String>) -> Self {
        self.generate_status = status;
        self.error_body = body.into();
        self
    }

    /// Fail generations for one model with 500.
    #[must_use]
    pub fn with_failing_model(mut self, model: impl Into<String>) -> Self {
        self.failing_models.push(model.into());
        self
    }

    /// Delay every generation.
    #[must_use]
    pub const fn with_generate_delay(mut self, delay: Duration) -> Self {
        self.generate_delay = delay;
        self
    }
}

#[derive(Debug)]
struct MockState {
    config: MockOllamaConfig,
    requests: Mutex<Vec<GenerateRequest>>,
}

/// Running mock server. Shuts down on drop.
#[derive(Debug)]
pub struct MockOllama {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl MockOllama {
    /// Bind an ephemeral loopback port and start serving.
    pub fn start(config: MockOllamaConfig) -> std::io::Result<Self> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;

        let state = Arc::new(MockState {
            config,
            requests: Mutex::new(Vec::new()),
        });
        let app = router(state.clone());
        let (tx, rx) = oneshot::channel::<()>();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let thread = std::thread::Builder::new()
            .name("mock-ollama".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    let listener = match tokio::net::TcpListener::from_std(listener) {
                        Ok(l) => l,
                        Err(e) => {
                            tracing::error!("mock server listener failed: {e}");
                            return;
                        }
                    };
                    let served = axum::serve(listener, app)
                        .with_graceful_shutdown(async move {
                            let _ = rx.await;
                        })
                        .await;
                    if let Err(e) = served {
                        tracing::error!("mock server stopped: {e}");
                    }
                });
            })?;

        tracing::debug!(%addr, "mock ollama listening");
        Ok(Self {
            addr,
            state,
            shutdown: Some(tx),
            thread: Some(thread),
        })
    }

    /// Base URL to hand to a client.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Generation requests received so far, in arrival order.
    #[must_use]
    pub fn generate_requests(&self) -> Vec<GenerateRequest> {
        self.state
            .requests
            .lock()
            .map(|reqs| reqs.clone())
            .unwrap_or_default()
    }

    /// Number of generation requests received so far.
    #[must_use]
    pub fn generate_count(&self) -> usize {
        self.generate_requests().len()
    }
}

impl Drop for MockOllama {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/version", get(version))
        .route("/api/tags", get(tags))
        .route("/api/generate", post(generate))
        .with_state(state)
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn version(State(state): State<Arc<MockState>>) -> Response {
    let code = status(state.config.version_status);
    if code != StatusCode::OK {
        return (code, "version unavailable").into_response();
    }
    let body = match &state.config.version {
        Some(v) => serde_json::json!({ "version": v }),
        None => serde_json::json!({}),
    };
    Json(body).into_response()
}

async fn tags(State(state): State<Arc<MockState>>) -> Response {
    let code = status(state.config.tags_status);
    if code != StatusCode::OK {
        return (code, "tags unavailable").into_response();
    }
    Json(TagsResponse {
        models: state.config.models.clone(),
    })
    .into_response()
}

async fn generate(
    State(state): State<Arc<MockState>>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    if let Ok(mut reqs) = state.requests.lock() {
        reqs.push(request.clone());
    }

    if !state.config.generate_delay.is_zero() {
        tokio::time::sleep(state.config.generate_delay).await;
    }

    if state.config.failing_models.contains(&request.model) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            state.config.error_body.clone(),
        )
            .into_response();
    }

    let code = status(state.config.generate_status);
    if code != StatusCode::OK {
        return (code, state.config.error_body.clone()).into_response();
    }
    Json(state.config.generation.clone()).into_response()
}
