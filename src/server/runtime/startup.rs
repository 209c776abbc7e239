use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Error};
use rmcp::{
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ServiceExt,
};
use tokio::net::TcpListener;

use crate::{
    cli::LaunchProfile,
    lib::telemetry::{emit_runtime_mode, RuntimeModeTelemetry},
    server::{
        config::{ServerConfig, TransportMode},
        runtime::{build_instructions, BybitServer},
    },
};

/// Path the streamable HTTP endpoint is mounted on.
pub const HTTP_MCP_PATH: &str = "/mcp";

/// Bundles a runtime error message with the process exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:#}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    /// Print the message to stderr and hand back the exit code.
    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Start the MCP server on the transport chosen by the configuration.
pub async fn run_server(profile: LaunchProfile, config: ServerConfig) -> Result<(), RuntimeExit> {
    let instructions = build_instructions(&config);
    let server = BybitServer::new(&config, instructions).map_err(RuntimeExit::from_error)?;

    let bind_addr = config.server.bind_addr();
    let config_path = config
        .source_path
        .as_deref()
        .map(|path| path.display().to_string());
    emit_runtime_mode(&RuntimeModeTelemetry {
        transport: config.server.transport.as_str(),
        bind_addr: match config.server.transport {
            TransportMode::Stdio => None,
            TransportMode::Sse => Some(bind_addr.as_str()),
        },
        config_path: config_path.as_deref(),
        network: config.bybit.network(),
        credentials_configured: config.bybit.credentials.is_some(),
        tool_count: server.tool_count(),
        launch_args: &profile.launch_args,
    });

    match config.server.transport {
        TransportMode::Stdio => run_stdio(server).await,
        TransportMode::Sse => run_http(server, &bind_addr).await,
    }
}

async fn run_stdio(server: BybitServer) -> Result<(), RuntimeExit> {
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(RuntimeExit::from_error)?;
    running.waiting().await.map_err(RuntimeExit::from_error)?;
    Ok(())
}

async fn run_http(server: BybitServer, addr: &str) -> Result<(), RuntimeExit> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP port {addr}"))
        .map_err(RuntimeExit::from_error)?;
    let local_addr = listener
        .local_addr()
        .context("failed to read the bound HTTP address")
        .map_err(RuntimeExit::from_error)?;

    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig::default(),
    );
    let router = axum::Router::new().nest_service(HTTP_MCP_PATH, service);

    tracing::info!(
        target: "bybit_mcp::runtime",
        transport = "sse",
        bind_addr = %local_addr,
        path = HTTP_MCP_PATH,
        "Started listening for streamable HTTP clients"
    );

    axum::serve(listener, router)
        .await
        .with_context(|| format!("HTTP server on {local_addr} stopped"))
        .map_err(RuntimeExit::from_error)?;
    Ok(())
}
