//! Minimal Bybit v5 REST client used by the MCP tools.
//!
//! Only request construction, signing and response-envelope checks live here;
//! endpoint parameter types belong to the tool modules.
pub mod auth;
pub mod client;
pub mod endpoint;
pub mod model;

pub use auth::{sign_payload, Credentials};
pub use client::{parse_envelope, BybitClient};
pub use endpoint::{Access, Endpoint, HttpMethod};
pub use model::{
    AccountType, Category, KlineInterval, OrderType, Side, StatsPeriod, TimeInForce, TpslMode,
    TriggerBy,
};

/// Mainnet REST base URL.
pub const MAINNET_BASE_URL: &str = "https://api.bybit.com";
/// Testnet REST base URL.
pub const TESTNET_BASE_URL: &str = "https://api-testnet.bybit.com";
/// Default signing window in milliseconds.
pub const DEFAULT_RECV_WINDOW: u64 = 5000;
/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
