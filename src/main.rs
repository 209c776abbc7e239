//! Entry point for the Bybit MCP server.
use std::process::ExitCode;

use bybit_mcp::{
    cli::LaunchProfileArgs,
    lib::telemetry,
    server::{
        config::ServerConfig,
        runtime::{self, RuntimeExit},
    },
};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let profile = LaunchProfileArgs::parse().build();
    let config = ServerConfig::load(&profile).map_err(RuntimeExit::from_error)?;
    runtime::run_server(profile, config).await
}
