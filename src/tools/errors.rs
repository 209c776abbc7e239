//! Centralized error-to-ErrorData mapping for Bybit tools.
use rmcp::model::ErrorData;
use serde_json::{json, Value};

use super::validation::RequestValidationError;
use crate::lib::errors::{BybitError, ToolErrorDescriptor};

pub const INVALID_PARAMS_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::invalid_params(
    "invalid_request_params",
    "Tool parameters failed validation",
    "Fix the reported parameter and call the tool again.",
);

pub const CREDENTIALS_MISSING_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::invalid_request(
    "bybit_credentials_missing",
    "Bybit API credentials are not configured",
    "Set BYBIT_API_KEY and BYBIT_API_SECRET (or bybit.api_key / bybit.api_secret) and restart the server.",
);

pub const API_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::invalid_request(
    "bybit_api_error",
    "Bybit rejected the request",
    "Look up ret_code in the Bybit v5 error code table and adjust the request.",
);

pub const HTTP_STATUS_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::internal(
    "bybit_http_status",
    "Bybit returned a non-success HTTP status",
    "Retry later for 5xx or 429 responses; otherwise check bybit.base_url.",
);

pub const TRANSPORT_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::internal(
    "bybit_transport_failed",
    "Could not reach the Bybit API",
    "Check network connectivity and bybit.base_url, then retry.",
);

pub const DECODE_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::internal(
    "bybit_decode_failed",
    "Bybit response could not be decoded",
    "Verify that bybit.base_url points at the Bybit v5 REST API.",
);

pub const ENCODE_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::internal(
    "bybit_encode_failed",
    "Tool parameters could not be encoded",
    "Report the tool name and arguments; the request never left the server.",
);

/// Bybit ret codes for request-frequency limits.
const RATE_LIMIT_RET_CODES: [i64; 2] = [10006, 10018];

pub fn validation_error_to_error_data(
    tool: &'static str,
    err: RequestValidationError,
) -> ErrorData {
    build_error_data(
        &INVALID_PARAMS_ERROR,
        err.to_string(),
        json!({ "tool": tool }),
        false,
    )
}

pub fn bybit_error_to_error_data(err: BybitError) -> ErrorData {
    let reason = err.to_string();
    match err {
        BybitError::MissingCredentials { endpoint } => build_error_data(
            &CREDENTIALS_MISSING_ERROR,
            reason,
            json!({ "tool": endpoint }),
            false,
        ),
        BybitError::Api {
            endpoint,
            ret_code,
            ret_msg,
        } => build_error_data(
            &API_ERROR,
            reason,
            json!({ "tool": endpoint, "ret_code": ret_code, "ret_msg": ret_msg }),
            RATE_LIMIT_RET_CODES.contains(&ret_code),
        ),
        BybitError::HttpStatus {
            endpoint, status, ..
        } => build_error_data(
            &HTTP_STATUS_ERROR,
            reason,
            json!({ "tool": endpoint, "status": status }),
            status == 429 || (500..600).contains(&status),
        ),
        BybitError::Transport { endpoint, .. } => build_error_data(
            &TRANSPORT_ERROR,
            reason,
            json!({ "tool": endpoint }),
            true,
        ),
        BybitError::ClientBuild { .. } => {
            build_error_data(&TRANSPORT_ERROR, reason, Value::Null, false)
        }
        BybitError::Decode { endpoint, .. } => build_error_data(
            &DECODE_ERROR,
            reason,
            json!({ "tool": endpoint }),
            false,
        ),
        BybitError::Encode { endpoint, .. } => build_error_data(
            &ENCODE_ERROR,
            reason,
            json!({ "tool": endpoint }),
            false,
        ),
    }
}

fn build_error_data(
    descriptor: &ToolErrorDescriptor,
    reason: String,
    details: Value,
    retryable: bool,
) -> ErrorData {
    let mut builder = descriptor.builder().retryable(retryable).reason(reason);
    if !details.is_null() {
        builder = builder.details(details);
    }
    builder
        .build()
        .unwrap_or_else(|err| ErrorData::internal_error(err.to_string(), None))
}
