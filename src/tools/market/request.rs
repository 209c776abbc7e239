use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    bybit::{Category, KlineInterval, StatsPeriod},
    tools::validation::{
        limit_in_range, optional_text, require_text, time_range, RequestValidationError, Validate,
    },
};

/// Input for `get_tickers`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct TickersRequest {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Options only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_coin: Option<String>,
    /// Options expiry date, e.g. `25DEC22`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_date: Option<String>,
}

impl Validate for TickersRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        optional_text("symbol", self.symbol.as_deref())?;
        optional_text("base_coin", self.base_coin.as_deref())
    }
}

/// Input for `get_order_book`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct OrderBookRequest {
    pub category: Category,
    pub symbol: String,
    /// Depth per side. Max 200 (spot), 500 (linear/inverse), 25 (option).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Validate for OrderBookRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("symbol", &self.symbol)?;
        let max = match self.category {
            Category::Spot => 200,
            Category::Linear | Category::Inverse => 500,
            Category::Option => 25,
        };
        limit_in_range("limit", self.limit, max)
    }
}

/// Input for `get_recent_trades`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct RecentTradesRequest {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_coin: Option<String>,
    /// `Call` or `Put` (options only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_type: Option<String>,
    /// Max 60 for spot, 1000 otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Validate for RecentTradesRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        optional_text("symbol", self.symbol.as_deref())?;
        let max = match self.category {
            Category::Spot => 60,
            _ => 1000,
        };
        limit_in_range("limit", self.limit, max)
    }
}

/// Input shared by the kline tools (trade, mark, index and premium index prices).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct KlineRequest {
    /// Defaults to `linear` on the Bybit side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub symbol: String,
    pub interval: KlineInterval,
    /// Start timestamp in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// End timestamp in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// 1..=1000, default 200.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Validate for KlineRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("symbol", &self.symbol)?;
        time_range("start", self.start, "end", self.end)?;
        limit_in_range("limit", self.limit, 1000)
    }
}

/// Input for `get_instruments_info`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct InstrumentsInfoRequest {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// e.g. `Trading`, `PreLaunch`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_coin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Pagination cursor from a previous response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Validate for InstrumentsInfoRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        optional_text("symbol", self.symbol.as_deref())?;
        limit_in_range("limit", self.limit, 1000)
    }
}

/// Input for `get_funding_rate_history`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct FundingRateHistoryRequest {
    pub category: Category,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Validate for FundingRateHistoryRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("symbol", &self.symbol)?;
        time_range("start_time", self.start_time, "end_time", self.end_time)?;
        limit_in_range("limit", self.limit, 200)
    }
}

/// Input for `get_open_interest`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct OpenInterestRequest {
    pub category: Category,
    pub symbol: String,
    pub interval_time: StatsPeriod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Validate for OpenInterestRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("symbol", &self.symbol)?;
        time_range("start_time", self.start_time, "end_time", self.end_time)?;
        limit_in_range("limit", self.limit, 200)
    }
}

/// Input for `get_insurance`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct InsuranceRequest {
    /// Omit for every coin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin: Option<String>,
}

impl Validate for InsuranceRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        optional_text("coin", self.coin.as_deref())
    }
}

/// Input for `get_risk_limit`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct RiskLimitRequest {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Validate for RiskLimitRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        optional_text("symbol", self.symbol.as_deref())
    }
}

/// Input for `get_long_short_ratio`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct LongShortRatioRequest {
    pub category: Category,
    pub symbol: String,
    pub period: StatsPeriod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Validate for LongShortRatioRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("symbol", &self.symbol)?;
        time_range("start_time", self.start_time, "end_time", self.end_time)?;
        limit_in_range("limit", self.limit, 500)
    }
}
