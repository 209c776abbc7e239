use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    bybit::{Category, TpslMode, TriggerBy},
    tools::validation::{
        limit_in_range, one_of, optional_decimal, optional_one_of, optional_text,
        require_decimal, require_signed_nonzero_decimal, require_text, time_range,
        RequestValidationError, Validate,
    },
};

const POSITION_IDX: &[i64] = &[0, 1, 2];
const TRADE_MODE: &[i64] = &[0, 1];
const POSITION_MODE: &[i64] = &[0, 3];
const AUTO_ADD_MARGIN: &[i64] = &[0, 1];

const TRADING_STOP_FIELDS: &[&str] = &["take_profit", "stop_loss", "trailing_stop"];

/// Input for `get_position_info`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct PositionInfoRequest {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_coin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_coin: Option<String>,
    /// 1..=200.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Validate for PositionInfoRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        optional_text("symbol", self.symbol.as_deref())?;
        optional_text("settle_coin", self.settle_coin.as_deref())?;
        limit_in_range("limit", self.limit, 200)
    }
}

/// Input for `get_closed_pnl`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ClosedPnlRequest {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// 1..=100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Validate for ClosedPnlRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        optional_text("symbol", self.symbol.as_deref())?;
        time_range("start_time", self.start_time, "end_time", self.end_time)?;
        limit_in_range("limit", self.limit, 100)
    }
}

/// Input for `set_leverage`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct SetLeverageRequest {
    pub category: Category,
    pub symbol: String,
    pub buy_leverage: String,
    /// Must equal `buy_leverage` in one-way mode.
    pub sell_leverage: String,
}

impl Validate for SetLeverageRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("symbol", &self.symbol)?;
        require_decimal("buy_leverage", &self.buy_leverage)?;
        require_decimal("sell_leverage", &self.sell_leverage)
    }
}

/// Input for `switch_cross_isolated_margin`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct SwitchIsolatedRequest {
    pub category: Category,
    pub symbol: String,
    /// 0 cross margin, 1 isolated margin.
    pub trade_mode: u8,
    pub buy_leverage: String,
    pub sell_leverage: String,
}

impl Validate for SwitchIsolatedRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("symbol", &self.symbol)?;
        one_of("trade_mode", self.trade_mode, TRADE_MODE)?;
        require_decimal("buy_leverage", &self.buy_leverage)?;
        require_decimal("sell_leverage", &self.sell_leverage)
    }
}

/// Input for `switch_position_mode`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct SwitchPositionModeRequest {
    pub category: Category,
    /// Either `symbol` or `coin` is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin: Option<String>,
    /// 0 merged single (one-way), 3 both sides (hedge).
    pub mode: u8,
}

impl Validate for SwitchPositionModeRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .is_some_and(|value| !value.trim().is_empty())
        };
        if !present(&self.symbol) && !present(&self.coin) {
            return Err(RequestValidationError::MissingScope);
        }
        one_of("mode", self.mode, POSITION_MODE)
    }
}

/// Input for `set_trading_stop`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct SetTradingStopRequest {
    pub category: Category,
    pub symbol: String,
    pub tpsl_mode: TpslMode,
    /// 0 one-way, 1 hedge buy side, 2 hedge sell side.
    pub position_idx: u8,
    /// `0` cancels the existing take profit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<String>,
    /// `0` cancels the existing stop loss.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<String>,
    /// Trailing distance in price units; `0` cancels it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_stop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tp_trigger_by: Option<TriggerBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sl_trigger_by: Option<TriggerBy>,
    /// Price at which the trailing stop activates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_price: Option<String>,
    /// Partial mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tp_size: Option<String>,
    /// Partial mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sl_size: Option<String>,
}

impl Validate for SetTradingStopRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("symbol", &self.symbol)?;
        one_of("position_idx", self.position_idx, POSITION_IDX)?;
        if self.take_profit.is_none() && self.stop_loss.is_none() && self.trailing_stop.is_none() {
            return Err(RequestValidationError::NothingToChange {
                fields: TRADING_STOP_FIELDS,
            });
        }
        optional_decimal("take_profit", self.take_profit.as_deref())?;
        optional_decimal("stop_loss", self.stop_loss.as_deref())?;
        optional_decimal("trailing_stop", self.trailing_stop.as_deref())?;
        optional_decimal("active_price", self.active_price.as_deref())?;
        optional_decimal("tp_size", self.tp_size.as_deref())?;
        optional_decimal("sl_size", self.sl_size.as_deref())
    }
}

/// Input for `set_auto_add_margin`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct SetAutoAddMarginRequest {
    pub category: Category,
    pub symbol: String,
    /// 0 off, 1 on.
    pub auto_add_margin: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_idx: Option<u8>,
}

impl Validate for SetAutoAddMarginRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("symbol", &self.symbol)?;
        one_of("auto_add_margin", self.auto_add_margin, AUTO_ADD_MARGIN)?;
        optional_one_of("position_idx", self.position_idx, POSITION_IDX)
    }
}

/// Input for `modify_position_margin`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ModifyPositionMarginRequest {
    pub category: Category,
    pub symbol: String,
    /// Positive adds margin, negative removes it.
    pub margin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_idx: Option<u8>,
}

impl Validate for ModifyPositionMarginRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("symbol", &self.symbol)?;
        require_signed_nonzero_decimal("margin", &self.margin)?;
        optional_one_of("position_idx", self.position_idx, POSITION_IDX)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn set_leverage_body_uses_bybit_names() {
        let request: SetLeverageRequest = serde_json::from_value(json!({
            "category": "linear",
            "symbol": "BTCUSDT",
            "buy_leverage": "10",
            "sell_leverage": "10"
        }))
        .expect("parses");
        request.validate().expect("valid leverage");
        assert_eq!(
            serde_json::to_string(&request).expect("serializes"),
            r#"{"category":"linear","symbol":"BTCUSDT","buyLeverage":"10","sellLeverage":"10"}"#
        );
    }

    #[test]
    fn switch_isolated_rejects_unknown_trade_mode() {
        let request = SwitchIsolatedRequest {
            category: Category::Inverse,
            symbol: "BTCUSD".into(),
            trade_mode: 2,
            buy_leverage: "5".into(),
            sell_leverage: "5".into(),
        };
        assert_eq!(
            request.validate(),
            Err(RequestValidationError::NotAllowed {
                field: "trade_mode",
                value: 2,
                allowed: TRADE_MODE
            })
        );
    }

    #[test]
    fn switch_position_mode_needs_symbol_or_coin() {
        let mut request = SwitchPositionModeRequest {
            category: Category::Linear,
            symbol: None,
            coin: None,
            mode: 3,
        };
        assert_eq!(
            request.validate(),
            Err(RequestValidationError::MissingScope)
        );
        request.coin = Some("USDT".into());
        request.validate().expect("coin scope is enough");
        request.mode = 1;
        assert!(request.validate().is_err());
    }

    #[test]
    fn trading_stop_needs_something_to_set() {
        let request: SetTradingStopRequest = serde_json::from_value(json!({
            "category": "linear",
            "symbol": "BTCUSDT",
            "tpsl_mode": "Full",
            "position_idx": 0
        }))
        .expect("parses");
        assert!(matches!(
            request.validate(),
            Err(RequestValidationError::NothingToChange { .. })
        ));

        let request = SetTradingStopRequest {
            stop_loss: Some("0".into()),
            ..request
        };
        request.validate().expect("zero clears the stop loss");
        assert_eq!(
            serde_json::to_value(&request).expect("serializes")["tpslMode"],
            "Full"
        );
    }

    #[test]
    fn margin_change_may_be_negative_but_not_zero() {
        let request = |margin: &str| ModifyPositionMarginRequest {
            category: Category::Linear,
            symbol: "BTCUSDT".into(),
            margin: margin.into(),
            position_idx: Some(0),
        };
        request("-10").validate().expect("removing margin");
        request("2.5").validate().expect("adding margin");
        assert_eq!(
            request("0").validate(),
            Err(RequestValidationError::ZeroAmount { field: "margin" })
        );
    }

    #[test]
    fn closed_pnl_query_respects_limit() {
        let request = ClosedPnlRequest {
            category: Category::Linear,
            symbol: Some("BTCUSDT".into()),
            start_time: None,
            end_time: None,
            limit: Some(101),
            cursor: None,
        };
        assert!(request.validate().is_err());
        let request = ClosedPnlRequest {
            limit: Some(100),
            ..request
        };
        request.validate().expect("100 is the maximum");
        assert_eq!(
            serde_urlencoded::to_string(&request).expect("encodes"),
            "category=linear&symbol=BTCUSDT&limit=100"
        );
    }
}
