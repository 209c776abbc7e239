//! Telemetry initialization and Bybit request span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, warn, Span};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize `tracing` and format developer logs.
///
/// Logs always go to stderr; stdout belongs to the stdio transport.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper recording the start and outcome of one Bybit REST call.
pub struct EndpointSpan {
    span: Span,
    started_at: Instant,
    endpoint: &'static str,
}

impl EndpointSpan {
    /// Start a span for `endpoint`.
    pub fn start(endpoint: &'static str, method: &'static str, path: &'static str) -> Self {
        let span = info_span!(
            target: "bybit_mcp::bybit",
            "bybit_request",
            endpoint,
            method,
            path
        );
        Self {
            span,
            started_at: Instant::now(),
            endpoint,
        }
    }

    /// Close the span after a successful response.
    pub fn succeeded(self) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "bybit_mcp::bybit",
            endpoint = self.endpoint,
            status = "ok",
            elapsed_ms = elapsed_ms,
            "Completed Bybit request"
        );
    }

    /// Close the span after a failure.
    pub fn failed(self, error: &dyn std::error::Error) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        warn!(
            target: "bybit_mcp::bybit",
            endpoint = self.endpoint,
            status = "failed",
            elapsed_ms = elapsed_ms,
            error = %error,
            "Bybit request failed"
        );
    }
}

/// Payload for logging MCP runtime state as structured telemetry.
#[derive(Debug, Serialize)]
pub struct RuntimeModeTelemetry<'a> {
    pub transport: &'a str,
    pub bind_addr: Option<&'a str>,
    pub config_path: Option<&'a str>,
    pub network: &'a str,
    pub credentials_configured: bool,
    pub tool_count: usize,
    pub launch_args: &'a [String],
}

/// Emit runtime mode to `tracing`.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    info!(
        target: "bybit_mcp::runtime",
        transport = telemetry.transport,
        bind_addr = telemetry.bind_addr.unwrap_or(""),
        config_path = telemetry.config_path.unwrap_or(""),
        network = telemetry.network,
        credentials_configured = telemetry.credentials_configured,
        tool_count = telemetry.tool_count,
        launch_args = ?telemetry.launch_args,
        "Starting Bybit MCP server in {} mode",
        telemetry.transport
    );
}
