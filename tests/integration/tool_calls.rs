use anyhow::{Context, Result};
use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, ClientInfo, ErrorData, ReadResourceRequestParam,
        ResourceContents,
    },
    serve_client,
    service::{RoleClient, RunningService, ServiceError},
    ServiceExt,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use bybit_mcp::{bybit::sign_payload, server::runtime::BybitServer};

use crate::common::{build_server, MockBybit, API_KEY, API_SECRET};

struct Session {
    client: RunningService<RoleClient, ClientInfo>,
    server_task: JoinHandle<Result<()>>,
}

impl Session {
    async fn start(server: BybitServer) -> Result<Self> {
        let (server_transport, client_transport) = tokio::io::duplex(4096);
        let server_task = tokio::spawn(async move {
            server.serve(server_transport).await?.waiting().await?;
            Result::<_, anyhow::Error>::Ok(())
        });
        let client = serve_client(ClientInfo::default(), client_transport).await?;
        Ok(Self {
            client,
            server_task,
        })
    }

    async fn call(&self, name: &'static str, args: Value) -> Result<CallToolResult, ServiceError> {
        self.client
            .call_tool(CallToolRequestParam {
                name: name.into(),
                arguments: args.as_object().cloned(),
            })
            .await
    }

    async fn finish(self) {
        let _ = self.client.cancel().await;
        let _ = self.server_task.await;
    }
}

fn mcp_error(result: Result<CallToolResult, ServiceError>) -> Result<ErrorData> {
    match result {
        Ok(response) => anyhow::bail!("expected an error, got {response:?}"),
        Err(ServiceError::McpError(inner)) => Ok(inner),
        Err(other) => anyhow::bail!("unexpected error: {other:?}"),
    }
}

fn error_code(error: &ErrorData) -> Option<&str> {
    error
        .data
        .as_ref()
        .and_then(|data| data.get("code"))
        .and_then(Value::as_str)
}

#[tokio::test]
async fn public_get_forwards_query_and_returns_envelope() -> Result<()> {
    let mock =
        MockBybit::ok(json!({ "category": "linear", "symbol": "BTCUSDT", "list": [] })).await?;
    let session = Session::start(build_server(&mock.base_url(), false)?).await?;

    let response = session
        .call(
            "get_kline",
            json!({
                "category": "linear",
                "symbol": "BTCUSDT",
                "interval": "60",
                "limit": 2
            }),
        )
        .await?;
    session.finish().await;

    let payload = response.structured_content.context("structured_content")?;
    assert_eq!(payload["retCode"], json!(0));
    assert_eq!(payload["result"]["symbol"], json!("BTCUSDT"));

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/v5/market/kline");
    assert_eq!(
        request.query.as_deref(),
        Some("category=linear&symbol=BTCUSDT&interval=60&limit=2")
    );
    assert!(request.header("X-BAPI-SIGN").is_none());
    Ok(())
}

#[tokio::test]
async fn private_post_is_signed_over_the_json_body() -> Result<()> {
    let mock =
        MockBybit::ok(json!({ "orderId": "1321003749386327552", "orderLinkId": "" })).await?;
    let session = Session::start(build_server(&mock.base_url(), true)?).await?;

    let response = session
        .call(
            "place_order",
            json!({
                "category": "linear",
                "symbol": "BTCUSDT",
                "side": "Buy",
                "order_type": "Limit",
                "qty": "0.01",
                "price": "25000",
                "time_in_force": "GTC"
            }),
        )
        .await?;
    session.finish().await;

    let payload = response.structured_content.context("structured_content")?;
    assert_eq!(payload["result"]["orderId"], json!("1321003749386327552"));

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/v5/order/create");
    assert_eq!(request.header("X-BAPI-API-KEY"), Some(API_KEY));

    let body: Value = serde_json::from_str(&request.body)?;
    assert_eq!(body["orderType"], json!("Limit"));
    assert_eq!(body["timeInForce"], json!("GTC"));
    assert_eq!(body["qty"], json!("0.01"));

    let timestamp = request.header("X-BAPI-TIMESTAMP").context("timestamp header")?;
    let recv_window = request
        .header("X-BAPI-RECV-WINDOW")
        .context("recv window header")?;
    assert_eq!(recv_window, "5000");
    let expected = sign_payload(
        API_SECRET,
        &format!("{timestamp}{API_KEY}{recv_window}{}", request.body),
    )
    .expect("HMAC takes any key length");
    assert_eq!(request.header("X-BAPI-SIGN"), Some(expected.as_str()));
    Ok(())
}

#[tokio::test]
async fn private_get_signs_the_query_string() -> Result<()> {
    let mock = MockBybit::ok(json!({ "list": [] })).await?;
    let session = Session::start(build_server(&mock.base_url(), true)?).await?;

    session
        .call(
            "get_wallet_balance",
            json!({ "account_type": "UNIFIED", "coin": "USDT" }),
        )
        .await?;
    session.finish().await;

    let requests = mock.requests();
    let request = requests.first().context("wallet request")?;
    assert_eq!(request.path, "/v5/account/wallet-balance");
    let query = request.query.clone().unwrap_or_default();
    assert_eq!(query, "accountType=UNIFIED&coin=USDT");

    let timestamp = request.header("X-BAPI-TIMESTAMP").context("timestamp header")?;
    let expected = sign_payload(API_SECRET, &format!("{timestamp}{API_KEY}5000{query}"))
        .expect("HMAC takes any key length");
    assert_eq!(request.header("X-BAPI-SIGN"), Some(expected.as_str()));
    Ok(())
}

#[tokio::test]
async fn private_tool_without_credentials_fails_before_sending() -> Result<()> {
    let mock = MockBybit::ok(json!({})).await?;
    let session = Session::start(build_server(&mock.base_url(), false)?).await?;

    let result = session
        .call("get_position_info", json!({ "category": "linear" }))
        .await;
    session.finish().await;

    let error = mcp_error(result)?;
    assert_eq!(error_code(&error), Some("bybit_credentials_missing"));
    assert!(mock.requests().is_empty(), "no request may reach Bybit");
    Ok(())
}

#[tokio::test]
async fn non_zero_ret_code_becomes_api_error() -> Result<()> {
    let mock = MockBybit::start(json!({
        "retCode": 10001,
        "retMsg": "params error: symbol invalid",
        "result": {},
        "retExtInfo": {},
        "time": 1_700_000_000_000_i64
    }))
    .await?;
    let session = Session::start(build_server(&mock.base_url(), false)?).await?;

    let result = session
        .call(
            "get_tickers",
            json!({ "category": "spot", "symbol": "NOPE" }),
        )
        .await;
    session.finish().await;

    let error = mcp_error(result)?;
    assert_eq!(error_code(&error), Some("bybit_api_error"));
    let details = error
        .data
        .as_ref()
        .and_then(|data| data.get("details"))
        .context("details")?;
    assert_eq!(details["ret_code"], json!(10001));
    assert_eq!(details["ret_msg"], json!("params error: symbol invalid"));
    assert_eq!(details["tool"], json!("get_tickers"));
    Ok(())
}

#[tokio::test]
async fn invalid_arguments_are_rejected_locally() -> Result<()> {
    let mock = MockBybit::ok(json!({})).await?;
    let session = Session::start(build_server(&mock.base_url(), true)?).await?;

    let result = session
        .call(
            "place_order",
            json!({
                "category": "linear",
                "symbol": "BTCUSDT",
                "side": "Sell",
                "order_type": "Limit",
                "qty": "1"
            }),
        )
        .await;
    session.finish().await;

    let error = mcp_error(result)?;
    assert_eq!(error_code(&error), Some("invalid_request_params"));
    assert!(error.message.contains("price"), "{}", error.message);
    assert!(mock.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn market_info_resource_is_readable() -> Result<()> {
    let mock = MockBybit::ok(json!({})).await?;
    let session = Session::start(build_server(&mock.base_url(), false)?).await?;

    let read = session
        .client
        .read_resource(ReadResourceRequestParam {
            uri: "bybit://market/info".into(),
        })
        .await?;
    let missing = session
        .client
        .read_resource(ReadResourceRequestParam {
            uri: "bybit://market/unknown".into(),
        })
        .await;
    session.finish().await;

    let text = match read.contents.first().context("resource contents")? {
        ResourceContents::TextResourceContents { text, .. } => text.clone(),
        other => anyhow::bail!("expected text contents, got {other:?}"),
    };
    assert!(text.starts_with("# Bybit MCP Server"), "{text}");
    assert!(text.contains("get_server_time"), "{text}");
    assert!(missing.is_err(), "unknown URIs must be rejected");
    Ok(())
}
