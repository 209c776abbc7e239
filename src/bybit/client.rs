use std::time::Duration;

use chrono::Utc;
use reqwest::{header::CONTENT_TYPE, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    auth::{Credentials, HEADER_API_KEY, HEADER_RECV_WINDOW, HEADER_SIGN, HEADER_TIMESTAMP},
    endpoint::{Endpoint, HttpMethod},
};
use crate::{
    lib::{errors::BybitError, telemetry::EndpointSpan},
    server::config::BybitSection,
};

/// Longest HTTP error body kept in `BybitError::HttpStatus`.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Bybit v5 REST client shared by every tool.
#[derive(Debug, Clone)]
pub struct BybitClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
    recv_window: u64,
}

#[derive(Debug, Deserialize)]
struct EnvelopeHeader {
    #[serde(rename = "retCode")]
    ret_code: i64,
    #[serde(rename = "retMsg", default)]
    ret_msg: String,
}

impl BybitClient {
    pub fn new(config: &BybitSection) -> Result<Self, BybitError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("bybit-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| BybitError::ClientBuild { source })?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.credentials.clone(),
            recv_window: config.recv_window,
        })
    }

    /// Send `params` to `endpoint` and return the full response envelope.
    ///
    /// GET parameters travel as the query string, POST parameters as a JSON
    /// body. Private endpoints are signed; without credentials they fail
    /// before any request is sent.
    pub async fn call<P>(&self, endpoint: &Endpoint, params: &P) -> Result<Value, BybitError>
    where
        P: Serialize + ?Sized,
    {
        let span = EndpointSpan::start(endpoint.name, endpoint.method.as_str(), endpoint.path);
        let result = self.send(endpoint, params).await;
        match &result {
            Ok(_) => span.succeeded(),
            Err(err) => span.failed(err),
        }
        result
    }

    async fn send<P>(&self, endpoint: &Endpoint, params: &P) -> Result<Value, BybitError>
    where
        P: Serialize + ?Sized,
    {
        let credentials = if endpoint.requires_auth() {
            Some(
                self.credentials
                    .as_ref()
                    .ok_or(BybitError::MissingCredentials {
                        endpoint: endpoint.name,
                    })?,
            )
        } else {
            None
        };

        let url = format!("{}{}", self.base_url, endpoint.path);
        let (request, payload) = match endpoint.method {
            HttpMethod::Get => {
                let query =
                    serde_urlencoded::to_string(params).map_err(|err| BybitError::Encode {
                        endpoint: endpoint.name,
                        message: err.to_string(),
                    })?;
                let url = if query.is_empty() {
                    url
                } else {
                    format!("{url}?{query}")
                };
                (self.http.get(url), query)
            }
            HttpMethod::Post => {
                let body = serde_json::to_string(params).map_err(|err| BybitError::Encode {
                    endpoint: endpoint.name,
                    message: err.to_string(),
                })?;
                let request = self
                    .http
                    .post(url)
                    .header(CONTENT_TYPE, "application/json")
                    .body(body.clone());
                (request, body)
            }
        };

        let request = match credentials {
            Some(credentials) => self.sign(endpoint.name, request, credentials, &payload)?,
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|source| BybitError::Transport {
                endpoint: endpoint.name,
                source,
            })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| BybitError::Transport {
                endpoint: endpoint.name,
                source,
            })?;

        if !status.is_success() {
            return Err(BybitError::HttpStatus {
                endpoint: endpoint.name,
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        parse_envelope(endpoint.name, &body)
    }

    fn sign(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
        credentials: &Credentials,
        payload: &str,
    ) -> Result<RequestBuilder, BybitError> {
        let timestamp = Utc::now().timestamp_millis();
        let signature = credentials
            .sign(timestamp, self.recv_window, payload)
            .map_err(|err| BybitError::Encode {
                endpoint,
                message: format!("failed to sign request: {err}"),
            })?;
        Ok(request
            .header(HEADER_API_KEY, credentials.api_key.as_str())
            .header(HEADER_TIMESTAMP, timestamp.to_string())
            .header(HEADER_RECV_WINDOW, self.recv_window.to_string())
            .header(HEADER_SIGN, signature))
    }
}

/// Decode a Bybit response body and reject non-zero `retCode` values.
pub fn parse_envelope(endpoint: &'static str, body: &str) -> Result<Value, BybitError> {
    let value: Value =
        serde_json::from_str(body).map_err(|source| BybitError::Decode { endpoint, source })?;
    let header = EnvelopeHeader::deserialize(&value)
        .map_err(|source| BybitError::Decode { endpoint, source })?;
    if header.ret_code != 0 {
        return Err(BybitError::Api {
            endpoint,
            ret_code: header.ret_code,
            ret_msg: header.ret_msg,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn zero_ret_code_returns_full_envelope() {
        let body = r#"{"retCode":0,"retMsg":"OK","result":{"timeSecond":"1700000000"},"retExtInfo":{},"time":1700000000000}"#;
        let value = parse_envelope("get_server_time", body).expect("retCode 0 is success");
        assert_eq!(value["result"], json!({ "timeSecond": "1700000000" }));
        assert_eq!(value["retMsg"], "OK");
    }

    #[test]
    fn non_zero_ret_code_is_an_api_error() {
        let body = r#"{"retCode":10001,"retMsg":"params error: symbol invalid","result":{}}"#;
        let err = parse_envelope("get_tickers", body).expect_err("retCode != 0 must fail");
        match err {
            BybitError::Api {
                endpoint,
                ret_code,
                ret_msg,
            } => {
                assert_eq!(endpoint, "get_tickers");
                assert_eq!(ret_code, 10001);
                assert_eq!(ret_msg, "params error: symbol invalid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_ret_code_is_a_decode_error() {
        let err = parse_envelope("get_tickers", r#"{"result":{}}"#)
            .expect_err("envelope without retCode must fail");
        assert!(matches!(err, BybitError::Decode { .. }), "{err:?}");
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let err = parse_envelope("get_tickers", "<html>").expect_err("html must fail");
        assert!(matches!(err, BybitError::Decode { .. }), "{err:?}");
    }
}
