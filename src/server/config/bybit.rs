use std::path::Path;

use serde::Deserialize;

use crate::{
    bybit::{
        Credentials, DEFAULT_RECV_WINDOW, DEFAULT_TIMEOUT_SECS, MAINNET_BASE_URL, TESTNET_BASE_URL,
    },
    lib::errors::ConfigError,
};

/// Bybit REST settings.
#[derive(Debug, Clone)]
pub struct BybitSection {
    pub credentials: Option<Credentials>,
    pub testnet: bool,
    pub base_url: String,
    pub recv_window: u64,
    pub timeout_secs: u64,
}

impl BybitSection {
    pub fn network(&self) -> &'static str {
        if self.testnet {
            "testnet"
        } else {
            "mainnet"
        }
    }
}

impl Default for BybitSection {
    fn default() -> Self {
        Self {
            credentials: None,
            testnet: false,
            base_url: MAINNET_BASE_URL.to_string(),
            recv_window: DEFAULT_RECV_WINDOW,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawBybitSection {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub testnet: Option<bool>,
    pub base_url: Option<String>,
    pub recv_window: Option<u64>,
    pub timeout_secs: Option<u64>,
}

pub fn parse_bybit_section(
    raw: Option<RawBybitSection>,
    path: &Path,
) -> Result<BybitSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let api_key = non_blank(raw.api_key);
    let api_secret = non_blank(raw.api_secret);
    let credentials = match (api_key, api_secret) {
        (Some(key), Some(secret)) => Some(Credentials::new(key, secret)),
        (None, None) => None,
        (Some(_), None) => {
            return Err(invalid(
                path,
                "bybit.api_secret",
                "api_key is set but api_secret is missing",
            ))
        }
        (None, Some(_)) => {
            return Err(invalid(
                path,
                "bybit.api_key",
                "api_secret is set but api_key is missing",
            ))
        }
    };

    let testnet = raw.testnet.unwrap_or(false);
    let base_url = match non_blank(raw.base_url) {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => url,
        Some(url) => {
            return Err(invalid(
                path,
                "bybit.base_url",
                &format!("`{url}` must start with http:// or https://"),
            ))
        }
        None if testnet => TESTNET_BASE_URL.to_string(),
        None => MAINNET_BASE_URL.to_string(),
    };

    let recv_window = raw.recv_window.unwrap_or(DEFAULT_RECV_WINDOW);
    if recv_window == 0 {
        return Err(invalid(path, "bybit.recv_window", "must be greater than 0"));
    }
    let timeout_secs = raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(invalid(path, "bybit.timeout_secs", "must be greater than 0"));
    }

    Ok(BybitSection {
        credentials,
        testnet,
        base_url,
        recv_window,
        timeout_secs,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn invalid(path: &Path, field: &'static str, message: &str) -> ConfigError {
    ConfigError::InvalidField {
        path: path.to_path_buf(),
        field,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    #[test]
    fn testnet_switches_default_base_url() {
        let section = parse_bybit_section(
            Some(RawBybitSection {
                testnet: Some(true),
                ..RawBybitSection::default()
            }),
            &path(),
        )
        .expect("testnet section is valid");
        assert_eq!(section.base_url, TESTNET_BASE_URL);
        assert_eq!(section.network(), "testnet");
    }

    #[test]
    fn explicit_base_url_wins_over_network() {
        let section = parse_bybit_section(
            Some(RawBybitSection {
                testnet: Some(true),
                base_url: Some("http://127.0.0.1:9999".into()),
                ..RawBybitSection::default()
            }),
            &path(),
        )
        .expect("explicit base url is valid");
        assert_eq!(section.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn half_configured_credentials_are_rejected() {
        let err = parse_bybit_section(
            Some(RawBybitSection {
                api_key: Some("key".into()),
                ..RawBybitSection::default()
            }),
            &path(),
        )
        .expect_err("key without secret must fail");
        match err {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "bybit.api_secret"),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_credentials_count_as_unset() {
        let section = parse_bybit_section(
            Some(RawBybitSection {
                api_key: Some("  ".into()),
                api_secret: Some(String::new()),
                ..RawBybitSection::default()
            }),
            &path(),
        )
        .expect("blank credentials are ignored");
        assert!(section.credentials.is_none());
    }
}
