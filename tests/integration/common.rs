use std::{
    io,
    net::SocketAddr,
    path::PathBuf,
    process::Stdio,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{HeaderMap, Method, Uri},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, ReadBuf},
    net::TcpListener,
    process::{Child, ChildStdin, ChildStdout, Command},
    task::JoinHandle,
};

use bybit_mcp::{
    bybit::Credentials,
    server::{
        config::{BybitSection, ServerConfig, ServerSection},
        runtime::BybitServer,
    },
};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_bybit-mcp");
pub const API_KEY: &str = "integration-key";
pub const API_SECRET: &str = "integration-secret";

/// Spawn the binary on stdio with the given extra environment.
pub async fn spawn_server_process(
    envs: &[(&str, &str)],
) -> Result<(Child, ChildIoBridge, JoinHandle<String>)> {
    let mut command = Command::new(BINARY_PATH);
    command
        .env("MCP_CONFIG_PATH", fixture("tests/fixtures/config_default.toml"))
        .env("RUST_LOG", "bybit_mcp=info")
        .env_remove("MCP_TRANSPORT")
        .env_remove("BYBIT_API_KEY")
        .env_remove("BYBIT_API_SECRET")
        .envs(envs.iter().copied())
        .stdout(Stdio::piped())
        .stdin(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = command.spawn().context("failed to spawn server process")?;
    let stdout = child.stdout.take().context("child stdout")?;
    let stdin = child.stdin.take().context("child stdin")?;
    let stderr = child.stderr.take().context("child stderr")?;
    let stderr_task = tokio::spawn(collect_output(stderr));
    Ok((child, ChildIoBridge::new(stdout, stdin), stderr_task))
}

pub async fn collect_output(mut reader: impl AsyncRead + Unpin) -> String {
    let mut buf = Vec::new();
    let _ = reader.read_to_end(&mut buf).await;
    String::from_utf8_lossy(&buf).into_owned()
}

pub fn fixture(relative: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join(relative).display().to_string()
}

pub struct ChildIoBridge {
    stdout: ChildStdout,
    stdin: ChildStdin,
}

impl ChildIoBridge {
    pub fn new(stdout: ChildStdout, stdin: ChildStdin) -> Self {
        Self { stdout, stdin }
    }
}

impl AsyncRead for ChildIoBridge {
    fn poll_read(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdout).poll_read(cx, buf)
    }
}

impl AsyncWrite for ChildIoBridge {
    fn poll_write(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        data: &[u8],
    ) -> std::task::Poll<io::Result<usize>> {
        std::pin::Pin::new(&mut self.stdin).poll_write(cx, data)
    }

    fn poll_flush(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_flush(cx)
    }

    fn poll_shutdown(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_shutdown(cx)
    }
}

/// One request seen by [`MockBybit`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    response: Arc<Value>,
}

/// Local HTTP server standing in for the Bybit REST API.
pub struct MockBybit {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl MockBybit {
    /// Answer every request with a `retCode: 0` envelope.
    pub async fn ok(result: Value) -> Result<Self> {
        Self::start(json!({
            "retCode": 0,
            "retMsg": "OK",
            "result": result,
            "retExtInfo": {},
            "time": 1_700_000_000_000_i64
        }))
        .await
    }

    pub async fn start(response: Value) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind mock Bybit listener")?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: requests.clone(),
            response: Arc::new(response),
        };
        let router = Router::new().fallback(record).with_state(state);
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Ok(Self {
            addr,
            requests,
            task,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Drop for MockBybit {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Json<Value> {
    if let Ok(mut requests) = state.requests.lock() {
        requests.push(RecordedRequest {
            method,
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            headers,
            body,
        });
    }
    Json((*state.response).clone())
}

/// Server wired to `base_url`, signing with the integration credentials when asked.
pub fn build_server(base_url: &str, with_credentials: bool) -> Result<BybitServer> {
    let config = ServerConfig {
        server: ServerSection::default(),
        bybit: BybitSection {
            credentials: with_credentials.then(|| Credentials::new(API_KEY, API_SECRET)),
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..BybitSection::default()
        },
        source_path: None,
    };
    Ok(BybitServer::new(&config, "bybit-integration".into())?)
}
