use std::time::Duration;

use anyhow::{Context, Result};
use rmcp::{model::ClientInfo, serve_client, transport::StreamableHttpClientTransport};
use tokio::{net::TcpStream, time::timeout};

use crate::common::spawn_server_process;

#[tokio::test]
async fn unset_transport_serves_stdio_with_every_tool_and_the_market_resource() -> Result<()> {
    let (mut child, transport, stderr_task) = spawn_server_process(&[]).await?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let tools = client.list_all_tools().await?;
    assert_eq!(tools.len(), 36, "unexpected tool list: {tools:?}");
    for name in ["get_tickers", "place_order", "modify_position_margin"] {
        assert!(
            tools.iter().any(|tool| tool.name.as_ref() == name),
            "list_tools should include {name}"
        );
    }

    let resources = client.list_all_resources().await?;
    assert!(
        resources
            .iter()
            .any(|resource| resource.uri == "bybit://market/info"),
        "market info resource missing: {resources:?}"
    );

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    let stderr = stderr_task.await?;
    assert!(
        stderr.contains("Starting Bybit MCP server in stdio mode"),
        "startup log missing: {stderr}"
    );
    Ok(())
}

#[tokio::test]
async fn unsupported_transport_exits_with_failure() -> Result<()> {
    let (mut child, _transport, stderr_task) =
        spawn_server_process(&[("MCP_TRANSPORT", "foo")]).await?;

    let status = timeout(Duration::from_secs(10), child.wait()).await??;
    assert!(!status.success(), "foo transport must fail: {status:?}");
    let stderr = stderr_task.await?;
    assert!(
        stderr.contains("Unsupported MCP_TRANSPORT mode: foo"),
        "stderr should name the transport: {stderr}"
    );
    Ok(())
}

#[tokio::test]
async fn sse_transport_serves_mcp_over_http() -> Result<()> {
    let port = {
        let reserved = std::net::TcpListener::bind("127.0.0.1:0").context("reserve a port")?;
        reserved.local_addr()?.port()
    };
    let port_text = port.to_string();
    let (mut child, _transport, stderr_task) = spawn_server_process(&[
        ("MCP_TRANSPORT", "sse"),
        ("MCP_HOST", "127.0.0.1"),
        ("MCP_PORT", port_text.as_str()),
    ])
    .await?;

    let connected = timeout(Duration::from_secs(10), async {
        loop {
            if TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    })
    .await;

    if connected.is_err() {
        child.kill().await?;
        let stderr = stderr_task.await?;
        anyhow::bail!("port {port} never accepted: {stderr}");
    }

    let transport =
        StreamableHttpClientTransport::from_uri(format!("http://127.0.0.1:{port}/mcp"));
    let exchange = async {
        let client = serve_client(ClientInfo::default(), transport).await?;
        let server_name = client.peer_info().map(|info| info.server_info.name.clone());
        let tools = client.list_all_tools().await?;
        client.cancel().await?;
        anyhow::Ok((server_name, tools.len()))
    };
    let exchange = timeout(Duration::from_secs(10), exchange).await;

    child.kill().await?;
    let stderr = stderr_task.await?;
    let (server_name, tool_count) = exchange
        .context("MCP exchange over HTTP timed out")?
        .with_context(|| format!("MCP exchange over HTTP failed: {stderr}"))?;
    assert_eq!(server_name.as_deref(), Some("bybit-mcp"));
    assert_eq!(tool_count, 36);
    assert!(
        stderr.contains("Starting Bybit MCP server in sse mode"),
        "startup log missing: {stderr}"
    );
    Ok(())
}
