use crate::bybit::Endpoint;

pub const PLACE_ORDER: Endpoint = Endpoint::private_post("place_order", "/v5/order/create");
pub const AMEND_ORDER: Endpoint = Endpoint::private_post("amend_order", "/v5/order/amend");
pub const CANCEL_ORDER: Endpoint = Endpoint::private_post("cancel_order", "/v5/order/cancel");
pub const GET_OPEN_CLOSED_ORDERS: Endpoint =
    Endpoint::private_get("get_open_closed_orders", "/v5/order/realtime");
pub const CANCEL_ALL_ORDERS: Endpoint =
    Endpoint::private_post("cancel_all_orders", "/v5/order/cancel-all");
pub const GET_ORDER_HISTORY: Endpoint =
    Endpoint::private_get("get_order_history", "/v5/order/history");
pub const GET_TRADE_HISTORY: Endpoint =
    Endpoint::private_get("get_trade_history", "/v5/execution/list");
pub const BATCH_PLACE_ORDER: Endpoint =
    Endpoint::private_post("batch_place_order", "/v5/order/create-batch");
pub const BATCH_AMEND_ORDER: Endpoint =
    Endpoint::private_post("batch_amend_order", "/v5/order/amend-batch");
pub const BATCH_CANCEL_ORDER: Endpoint =
    Endpoint::private_post("batch_cancel_order", "/v5/order/cancel-batch");
pub const GET_WALLET_BALANCE: Endpoint =
    Endpoint::private_get("get_wallet_balance", "/v5/account/wallet-balance");
pub const GET_SINGLE_COIN_BALANCE: Endpoint = Endpoint::private_get(
    "get_single_coin_balance",
    "/v5/asset/transfer/query-account-coin-balance",
);
pub const GET_ACCOUNT_INFO: Endpoint =
    Endpoint::private_get("get_account_info", "/v5/account/info");
/// Conditional orders share the regular create path.
pub const PLACE_TRIGGER_ORDER: Endpoint =
    Endpoint::private_post("place_trigger_order", "/v5/order/create");

/// Trading endpoints in registration order.
pub const ENDPOINTS: [Endpoint; 14] = [
    PLACE_ORDER,
    AMEND_ORDER,
    CANCEL_ORDER,
    GET_OPEN_CLOSED_ORDERS,
    CANCEL_ALL_ORDERS,
    GET_ORDER_HISTORY,
    GET_TRADE_HISTORY,
    BATCH_PLACE_ORDER,
    BATCH_AMEND_ORDER,
    BATCH_CANCEL_ORDER,
    GET_WALLET_BALANCE,
    GET_SINGLE_COIN_BALANCE,
    GET_ACCOUNT_INFO,
    PLACE_TRIGGER_ORDER,
];
