use std::path::PathBuf;

use config::ConfigError as ConfigLoaderError;
use rmcp::model::ErrorData;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::tools::ToolDomain;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration sources.
    #[error("Failed to read configuration {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize the merged sources into a struct.
    #[error("Failed to parse configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
    /// Transport mode is neither `stdio` nor `sse`.
    #[error("Unsupported MCP_TRANSPORT mode: {value}")]
    UnsupportedTransport { value: String },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures raised while talking to the Bybit REST API.
#[derive(Debug, Error)]
pub enum BybitError {
    #[error("Endpoint `{endpoint}` requires BYBIT_API_KEY and BYBIT_API_SECRET")]
    MissingCredentials { endpoint: &'static str },
    #[error("Failed to build the HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to encode parameters for `{endpoint}`: {message}")]
    Encode {
        endpoint: &'static str,
        message: String,
    },
    #[error("Request to `{endpoint}` failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("`{endpoint}` returned HTTP {status}: {body}")]
    HttpStatus {
        endpoint: &'static str,
        status: u16,
        body: String,
    },
    #[error("Failed to decode the `{endpoint}` response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Bybit rejected `{endpoint}` (retCode={ret_code}): {ret_msg}")]
    Api {
        endpoint: &'static str,
        ret_code: i64,
        ret_msg: String,
    },
}

/// Registration failures for tools and resources.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool `{name}` is already registered by the {existing} domain (incoming: {incoming})")]
    DuplicateTool {
        name: String,
        existing: ToolDomain,
        incoming: ToolDomain,
    },
    #[error("resource `{uri}` is already registered")]
    DuplicateResource { uri: String },
}

/// Failures while assembling the MCP server before it starts serving.
#[derive(Debug, Error)]
pub enum ServerBuildError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Client(#[from] BybitError),
}

/// MCP error category a descriptor is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidParams,
    InvalidRequest,
    Internal,
}

/// Structured error metadata returned by MCP tools.
#[derive(Debug, Clone, Serialize)]
pub struct ToolErrorDescriptor {
    /// Error code.
    pub code: &'static str,
    /// User-facing message.
    pub message: &'static str,
    /// Recommended remediation.
    pub remediation: &'static str,
    /// MCP error category.
    pub kind: ErrorKind,
}

impl ToolErrorDescriptor {
    /// Descriptor reported as `invalid_params`.
    pub const fn invalid_params(
        code: &'static str,
        message: &'static str,
        remediation: &'static str,
    ) -> Self {
        Self::new(code, message, remediation, ErrorKind::InvalidParams)
    }

    /// Descriptor reported as `invalid_request`.
    pub const fn invalid_request(
        code: &'static str,
        message: &'static str,
        remediation: &'static str,
    ) -> Self {
        Self::new(code, message, remediation, ErrorKind::InvalidRequest)
    }

    /// Descriptor reported as `internal_error`.
    pub const fn internal(
        code: &'static str,
        message: &'static str,
        remediation: &'static str,
    ) -> Self {
        Self::new(code, message, remediation, ErrorKind::Internal)
    }

    const fn new(
        code: &'static str,
        message: &'static str,
        remediation: &'static str,
        kind: ErrorKind,
    ) -> Self {
        Self {
            code,
            message,
            remediation,
            kind,
        }
    }

    /// Create a builder.
    pub fn builder(&self) -> ToolErrorDescriptorBuilder<'_> {
        ToolErrorDescriptorBuilder::new(self)
    }
}

/// Builder for error data that fails if required fields are missing.
pub struct ToolErrorDescriptorBuilder<'a> {
    descriptor: &'a ToolErrorDescriptor,
    retryable: Option<bool>,
    reason: Option<String>,
    details: Option<Value>,
}

impl<'a> ToolErrorDescriptorBuilder<'a> {
    pub fn new(descriptor: &'a ToolErrorDescriptor) -> Self {
        Self {
            descriptor,
            retryable: None,
            reason: None,
            details: None,
        }
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    /// Appended to the descriptor message as `"{message}: {reason}"`.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn build(self) -> Result<ErrorData, ToolErrorBuilderError> {
        if self.descriptor.remediation.trim().is_empty() {
            return Err(ToolErrorBuilderError::MissingRemediation {
                code: self.descriptor.code,
            });
        }
        let retryable = self
            .retryable
            .ok_or(ToolErrorBuilderError::MissingRetryable {
                code: self.descriptor.code,
            })?;

        let mut data = Map::new();
        data.insert("code".into(), Value::String(self.descriptor.code.into()));
        data.insert(
            "remediation".into(),
            Value::String(self.descriptor.remediation.into()),
        );
        data.insert("retryable".into(), Value::Bool(retryable));
        if let Some(details) = self.details {
            data.insert("details".into(), details);
        }

        let message = match self.reason {
            Some(reason) => format!("{}: {reason}", self.descriptor.message),
            None => self.descriptor.message.to_string(),
        };
        let data = Some(Value::Object(data));
        Ok(match self.descriptor.kind {
            ErrorKind::InvalidParams => ErrorData::invalid_params(message, data),
            ErrorKind::InvalidRequest => ErrorData::invalid_request(message, data),
            ErrorKind::Internal => ErrorData::internal_error(message, data),
        })
    }
}

/// Errors when required builder fields are missing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolErrorBuilderError {
    #[error("retryable is missing (code={code})")]
    MissingRetryable { code: &'static str },
    #[error("remediation is empty (code={code})")]
    MissingRemediation { code: &'static str },
}
