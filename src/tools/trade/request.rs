use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    bybit::{AccountType, Category, OrderType, Side, TimeInForce, TpslMode, TriggerBy},
    tools::validation::{
        limit_in_range, one_of, optional_decimal, optional_one_of, optional_text,
        require_decimal, require_order_identifier, require_text, time_range, validate_batch,
        RequestValidationError, Validate,
    },
};

/// Batch size for spot orders.
pub const MAX_SPOT_BATCH: usize = 10;
/// Batch size for derivatives and options.
pub const MAX_BATCH: usize = 20;

const POSITION_IDX: &[i64] = &[0, 1, 2];
const BINARY_FLAG: &[i64] = &[0, 1];
const OPEN_ONLY: &[i64] = &[0, 1, 2];
const TRIGGER_DIRECTION: &[i64] = &[1, 2];

const AMENDABLE_FIELDS: &[&str] = &["qty", "price", "trigger_price", "take_profit", "stop_loss"];

/// Order fields shared by single and batch placement.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct OrderEntry {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    /// Order quantity as a decimal string.
    pub qty: String,
    /// Required for `Limit` orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    /// Client order id (max 36 chars).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
    /// 0 one-way, 1 hedge buy side, 2 hedge sell side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_idx: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<String>,
}

impl Validate for OrderEntry {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("symbol", &self.symbol)?;
        require_decimal("qty", &self.qty)?;
        optional_decimal("price", self.price.as_deref())?;
        if self.order_type == OrderType::Limit && self.price.is_none() {
            return Err(RequestValidationError::MissingLimitPrice);
        }
        optional_text("order_link_id", self.order_link_id.as_deref())?;
        optional_one_of("position_idx", self.position_idx, POSITION_IDX)?;
        optional_decimal("take_profit", self.take_profit.as_deref())?;
        optional_decimal("stop_loss", self.stop_loss.as_deref())
    }
}

/// Input for `place_order`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct PlaceOrderRequest {
    pub category: Category,
    #[serde(flatten)]
    pub order: OrderEntry,
    /// Spot margin trading: 1 to borrow, 0 spot only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_leverage: Option<u8>,
    /// Spot market orders: `baseCoin` or `quoteCoin` unit for `qty`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_on_trigger: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tp_trigger_by: Option<TriggerBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sl_trigger_by: Option<TriggerBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tpsl_mode: Option<TpslMode>,
}

impl Validate for PlaceOrderRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        self.order.validate()?;
        optional_one_of("is_leverage", self.is_leverage, BINARY_FLAG)
    }
}

/// Input for `place_trigger_order`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct PlaceTriggerOrderRequest {
    pub category: Category,
    #[serde(flatten)]
    pub order: OrderEntry,
    /// Price at which the order is released to the book.
    pub trigger_price: String,
    /// 1 triggers when price rises to `trigger_price`, 2 when it falls.
    pub trigger_direction: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_by: Option<TriggerBy>,
}

impl PlaceTriggerOrderRequest {
    /// Wire body; spot conditional orders need `orderFilter=StopOrder`.
    pub fn body(&self) -> TriggerOrderBody<'_> {
        TriggerOrderBody {
            request: self,
            order_filter: (self.category == Category::Spot).then_some("StopOrder"),
        }
    }
}

impl Validate for PlaceTriggerOrderRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        self.order.validate()?;
        require_decimal("trigger_price", &self.trigger_price)?;
        one_of("trigger_direction", self.trigger_direction, TRIGGER_DIRECTION)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerOrderBody<'a> {
    #[serde(flatten)]
    request: &'a PlaceTriggerOrderRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_filter: Option<&'static str>,
}

impl Validate for TriggerOrderBody<'_> {
    fn validate(&self) -> Result<(), RequestValidationError> {
        self.request.validate()
    }
}

/// Identifies one order and the fields to change on it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct AmendEntry {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<String>,
}

impl Validate for AmendEntry {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("symbol", &self.symbol)?;
        require_order_identifier(self.order_id.as_deref(), self.order_link_id.as_deref())?;
        let changes = [
            ("qty", &self.qty),
            ("price", &self.price),
            ("trigger_price", &self.trigger_price),
            ("take_profit", &self.take_profit),
            ("stop_loss", &self.stop_loss),
        ];
        if changes.iter().all(|(_, value)| value.is_none()) {
            return Err(RequestValidationError::NothingToChange {
                fields: AMENDABLE_FIELDS,
            });
        }
        for (field, value) in changes {
            optional_decimal(field, value.as_deref())?;
        }
        Ok(())
    }
}

/// Input for `amend_order`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct AmendOrderRequest {
    pub category: Category,
    #[serde(flatten)]
    pub amend: AmendEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tp_trigger_by: Option<TriggerBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sl_trigger_by: Option<TriggerBy>,
}

impl Validate for AmendOrderRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        self.amend.validate()
    }
}

/// Identifies one order to cancel.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct CancelEntry {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
}

impl Validate for CancelEntry {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("symbol", &self.symbol)?;
        require_order_identifier(self.order_id.as_deref(), self.order_link_id.as_deref())
    }
}

/// Input for `cancel_order`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct CancelOrderRequest {
    pub category: Category,
    #[serde(flatten)]
    pub cancel: CancelEntry,
    /// Spot only: `Order`, `tpslOrder` or `StopOrder`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_filter: Option<String>,
}

impl Validate for CancelOrderRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        self.cancel.validate()
    }
}

/// Input for `cancel_all_orders`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct CancelAllOrdersRequest {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_coin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_coin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_filter: Option<String>,
    /// e.g. `Stop` to cancel only conditional orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_order_type: Option<String>,
}

impl Validate for CancelAllOrdersRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        optional_text("symbol", self.symbol.as_deref())?;
        optional_text("base_coin", self.base_coin.as_deref())?;
        optional_text("settle_coin", self.settle_coin.as_deref())
    }
}

/// Input for `get_open_closed_orders`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct OpenOrdersRequest {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_coin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_coin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
    /// 0 open orders only, 1 recently closed orders too, 2 closed only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_only: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_filter: Option<String>,
    /// 1..=50.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Validate for OpenOrdersRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        optional_text("symbol", self.symbol.as_deref())?;
        optional_one_of("open_only", self.open_only, OPEN_ONLY)?;
        limit_in_range("limit", self.limit, 50)
    }
}

/// Input for `get_order_history`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct OrderHistoryRequest {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_coin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_coin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_filter: Option<String>,
    /// e.g. `Filled`, `Cancelled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// 1..=50.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Validate for OrderHistoryRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        optional_text("symbol", self.symbol.as_deref())?;
        time_range("start_time", self.start_time, "end_time", self.end_time)?;
        limit_in_range("limit", self.limit, 50)
    }
}

/// Input for `get_trade_history`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct TradeHistoryRequest {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_coin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// e.g. `Trade`, `Funding`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_type: Option<String>,
    /// 1..=100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Validate for TradeHistoryRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        optional_text("symbol", self.symbol.as_deref())?;
        time_range("start_time", self.start_time, "end_time", self.end_time)?;
        limit_in_range("limit", self.limit, 100)
    }
}

fn batch_limit(category: Category) -> usize {
    match category {
        Category::Spot => MAX_SPOT_BATCH,
        _ => MAX_BATCH,
    }
}

/// Input for `batch_place_order`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchPlaceOrderRequest {
    pub category: Category,
    #[serde(rename(serialize = "request"))]
    pub orders: Vec<OrderEntry>,
}

impl Validate for BatchPlaceOrderRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        validate_batch(&self.orders, batch_limit(self.category), |order| order.validate())
    }
}

/// Input for `batch_amend_order`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchAmendOrderRequest {
    pub category: Category,
    #[serde(rename(serialize = "request"))]
    pub orders: Vec<AmendEntry>,
}

impl Validate for BatchAmendOrderRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        validate_batch(&self.orders, batch_limit(self.category), |order| order.validate())
    }
}

/// Input for `batch_cancel_order`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchCancelOrderRequest {
    pub category: Category,
    #[serde(rename(serialize = "request"))]
    pub orders: Vec<CancelEntry>,
}

impl Validate for BatchCancelOrderRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        validate_batch(&self.orders, batch_limit(self.category), |order| order.validate())
    }
}

/// Input for `get_wallet_balance`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct WalletBalanceRequest {
    pub account_type: AccountType,
    /// Comma-separated coin list, e.g. `USDT,BTC`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin: Option<String>,
}

impl Validate for WalletBalanceRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        optional_text("coin", self.coin.as_deref())
    }
}

/// Input for `get_single_coin_balance`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct SingleCoinBalanceRequest {
    pub account_type: AccountType,
    pub coin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    /// Also report the transferable amount into this account type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_account_type: Option<AccountType>,
    /// 1 to include bonus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_bonus: Option<u8>,
}

impl Validate for SingleCoinBalanceRequest {
    fn validate(&self) -> Result<(), RequestValidationError> {
        require_text("coin", &self.coin)?;
        optional_one_of("with_bonus", self.with_bonus, BINARY_FLAG)
    }
}
